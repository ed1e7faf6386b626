use std::env;

use crate::error::AppError;

/// Database connection string, supplied by the runtime environment.
pub fn db_url() -> Result<String, AppError> {
    env::var("DATABASE_URL")
        .map_err(|_| AppError::config("DATABASE_URL must be set".to_string()))
}
