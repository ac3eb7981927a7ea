pub mod error_log;
pub mod excel_write;
pub mod ods_read;
