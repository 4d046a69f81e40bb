mod app_error;

pub use app_error::AppError;

/// Crate-wide result; every handler, query and store call returns this.
pub type Result<T> = std::result::Result<T, AppError>;
