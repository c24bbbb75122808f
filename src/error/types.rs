// src/error/types.rs
use crate::domain::DomainError;
use rusqlite::ffi;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    /// Insert collided with an existing primary key. Recoverable: the row is already there.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Write would leave an episode without its title.
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    /// Watched percentage asked for a title with no imported episodes.
    #[error("No episodes imported for title {title_id}")]
    DivisionUndefined { title_id: String },

    #[error("Remote catalog unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Nothing found in remote catalog: {0}")]
    RemoteEmpty(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Convert a failed write into the error taxonomy.
    ///
    /// Primary key and unique collisions become `DuplicateKey`, foreign key
    /// failures become `IntegrityViolation`; everything else stays a raw
    /// database error.
    pub fn from_write(err: rusqlite::Error, key: &str) -> Self {
        let extended_code = match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Some(e.extended_code)
            }
            _ => None,
        };

        match extended_code {
            Some(ffi::SQLITE_CONSTRAINT_PRIMARYKEY) | Some(ffi::SQLITE_CONSTRAINT_UNIQUE) => {
                AppError::DuplicateKey(key.to_string())
            }
            Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => AppError::IntegrityViolation(format!(
                "foreign key constraint failed for {}",
                key
            )),
            _ => AppError::Database(err),
        }
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, AppError::DuplicateKey(_))
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
