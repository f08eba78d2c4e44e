pub mod console;
pub mod error;
pub mod logger;
pub mod time_format;
pub mod validation;
