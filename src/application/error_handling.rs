// src/application/error_handling.rs
//
// Error Handling for Command Handlers
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Logs unexpected errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// A field value was rejected
    Validation,

    /// Edit would overwrite another entry, or changes nothing
    Conflict,

    /// The chosen file does not exist
    NotFound,

    /// File system error
    FileSystem,

    /// Wrong extension, unsupported format or rejected content
    InvalidFile,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Domain(domain_error) => Self {
                success: false,
                error_type: ErrorType::Validation,
                message: "Invalid entry".to_string(),
                details: Some(domain_error.to_string()),
            },

            error @ (AppError::IdentityConflict { .. } | AppError::NoChange { .. }) => Self {
                success: false,
                error_type: ErrorType::Conflict,
                message: error.to_string(),
                details: None,
            },

            error @ AppError::FileNotFound { .. } => Self {
                success: false,
                error_type: ErrorType::NotFound,
                message: error.to_string(),
                details: None,
            },

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);

                Self {
                    success: false,
                    error_type: ErrorType::FileSystem,
                    message: "File system operation failed".to_string(),
                    details: Some(io_error.to_string()),
                }
            }

            error @ (AppError::InvalidExtension { .. } | AppError::UnsupportedFormat(_)) => Self {
                success: false,
                error_type: ErrorType::InvalidFile,
                message: error.to_string(),
                details: None,
            },

            AppError::InvalidLoad(errors) => Self {
                success: false,
                error_type: ErrorType::InvalidFile,
                message: format!("{} invalid entries found", errors.len()),
                details: Some(errors.to_string()),
            },

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Data serialization failed".to_string(),
                    details: None,
                }
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message,
                    details: None,
                }
            }
        }
    }

    /// JSON form handed to the UI
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "Internal error".to_string())
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_app_error(e).to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::serializers::LoadErrors;

    #[test]
    fn test_missing_file_is_not_found() {
        let error = ErrorResponse::from_app_error(AppError::FileNotFound {
            path: "films.csv".into(),
        });
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "File not found: films.csv");
    }

    #[test]
    fn test_validation_error() {
        let error = ErrorResponse::from_app_error(AppError::Domain(DomainError::MissingViewStatus));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.details.as_deref(), Some("The view status cannot be missing"));
    }

    #[test]
    fn test_edit_rejections_are_conflicts() {
        let error = ErrorResponse::from_app_error(AppError::NoChange {
            title: "Heat".to_string(),
        });
        assert_eq!(error.error_type, ErrorType::Conflict);
        assert_eq!(error.message, "No changes were made to 'Heat'");

        let error = ErrorResponse::from_app_error(AppError::IdentityConflict {
            title: "Heat".to_string(),
        });
        assert_eq!(error.error_type, ErrorType::Conflict);
    }

    #[test]
    fn test_load_errors_keep_every_line() {
        let error = ErrorResponse::from_app_error(AppError::InvalidLoad(LoadErrors::single(
            "Row 3 (Film 1): entry already present",
        )));
        assert_eq!(error.error_type, ErrorType::InvalidFile);
        assert!(error
            .details
            .unwrap()
            .contains("Row 3 (Film 1): entry already present"));
    }

    #[test]
    fn test_serialization() {
        let json = ErrorResponse::from_app_error(AppError::UnsupportedFormat("xml".to_string()))
            .to_json();
        assert!(json.contains("invalid_file"));
        assert!(json.contains("Unsupported format: xml"));
    }
}
