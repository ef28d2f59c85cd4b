//! Wire contracts shared between the PDF chat frontend and any service
//! implementing its HTTP endpoints.

pub mod usecases;
