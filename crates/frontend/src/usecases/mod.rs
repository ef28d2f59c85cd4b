pub mod u601_pdf_chat;
