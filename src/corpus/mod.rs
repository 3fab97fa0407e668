pub mod docx;
pub mod library;
pub mod loader;
pub mod record;
pub mod sheet;
