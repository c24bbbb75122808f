// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides one consistent error format for text and JSON output
// - Logs the internal detail, shows the user what to do next

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::AppError;

/// Standard error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found
    NotFound,

    /// Invalid input/validation error
    Validation,

    /// Row already stored, nothing to do
    Conflict,

    /// Write refused to keep titles and episodes consistent
    Integrity,

    /// Value cannot be computed yet
    Unavailable,

    /// Database/persistence error
    Database,

    /// Remote catalog error
    ExternalService,

    /// File system error
    FileSystem,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found", None),

            AppError::Domain(DomainError::RatingOutOfRange(stars)) => Self::new(
                ErrorType::Validation,
                "Rating must be between 0 and 5",
                Some(format!("got {}", stars)),
            ),

            AppError::Domain(DomainError::InvalidEpisodeKey(key)) => Self::new(
                ErrorType::Validation,
                "Episode keys look like \"<title id> <episode number>\"",
                Some(key),
            ),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::Validation,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::DuplicateKey(key) => {
                log::warn!("Duplicate key: {}", key);
                Self::new(ErrorType::Conflict, "Already stored", Some(key))
            }

            AppError::IntegrityViolation(detail) => {
                log::warn!("Integrity violation: {}", detail);
                Self::new(
                    ErrorType::Integrity,
                    "Refused to leave episodes without their title",
                    Some(detail),
                )
            }

            AppError::DivisionUndefined { title_id } => Self::new(
                ErrorType::Unavailable,
                "not available",
                Some(format!("no episodes imported for {}", title_id)),
            ),

            AppError::RemoteUnavailable(detail) => {
                log::error!("Remote catalog unavailable: {}", detail);
                Self::new(
                    ErrorType::ExternalService,
                    "Remote catalog unavailable",
                    Some(detail),
                )
            }

            AppError::RemoteEmpty(query) => {
                Self::new(ErrorType::NotFound, "Nothing found", Some(query))
            }

            AppError::Database(db_error) => {
                // Log full error for debugging
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// One line for terminal output
    pub fn render(&self) -> String {
        match &self.details {
            Some(details) => format!("{} ({})", self.message, details),
            None => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Resource not found");
    }

    #[test]
    fn test_rating_out_of_range_is_validation() {
        let error = ErrorResponse::from_app_error(DomainError::RatingOutOfRange(6).into());
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.details.as_deref(), Some("got 6"));
    }

    #[test]
    fn test_division_undefined_reads_not_available() {
        let error = ErrorResponse::from_app_error(AppError::DivisionUndefined {
            title_id: "a1".to_string(),
        });
        assert_eq!(error.error_type, ErrorType::Unavailable);
        assert_eq!(error.message, "not available");
    }

    #[test]
    fn test_remote_empty_reads_nothing_found() {
        let error = ErrorResponse::from_app_error(AppError::RemoteEmpty("zzz".to_string()));
        assert_eq!(error.render(), "Nothing found (zzz)");
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("Resource not found"));
    }
}
