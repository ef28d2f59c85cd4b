pub mod api_utils;
pub mod icons;
pub mod scheduled_task;
