// src/application/error_handling.rs
//
// Front-end error boundary
//
// ARCHITECTURE:
// - Every mutating or validating call maps to SUCCESS (0) or ERROR (1)
// - End users get a generic message; the specific error kind goes to the log
// - Never exposes internal implementation details

use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::{AppError, AppResult};

/// Uniform result code returned to front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ReturnCode {
    Success = 0,
    Error = 1,
}

impl ReturnCode {
    pub const SUCCESS: u8 = ReturnCode::Success as u8;
    pub const ERROR: u8 = ReturnCode::Error as u8;

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        self == ReturnCode::Success
    }
}

impl<T> From<&AppResult<T>> for ReturnCode {
    fn from(result: &AppResult<T>) -> Self {
        match result {
            Ok(_) => ReturnCode::Success,
            Err(_) => ReturnCode::Error,
        }
    }
}

/// Error categories, for logs only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Wrong type or range on a field
    Validation,

    /// A foreign key did not resolve
    MissingReference,

    /// Key, class or username collision
    Duplicate,

    NotFound,

    Authentication,

    /// Snapshot read or write failed
    FileSystem,

    Internal,
}

impl ErrorType {
    pub fn of(error: &AppError) -> Self {
        match error {
            AppError::Domain(DomainError::InvalidInput(_)) => ErrorType::Validation,
            AppError::Domain(DomainError::MissingReference { .. }) => ErrorType::MissingReference,
            AppError::Domain(DomainError::Duplicate(_)) => ErrorType::Duplicate,
            AppError::Domain(DomainError::NotFound { .. }) => ErrorType::NotFound,
            AppError::Authentication => ErrorType::Authentication,
            AppError::Io(_) | AppError::Serialization(_) => ErrorType::FileSystem,
            AppError::Other(_) => ErrorType::Internal,
        }
    }
}

/// What a front end shows when an operation fails
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u8,
    pub message: String,
}

impl ErrorResponse {
    /// Log the specific failure and build the generic response
    pub fn from_app_error(error: &AppError) -> Self {
        let error_type = ErrorType::of(error);
        match error_type {
            ErrorType::FileSystem | ErrorType::Internal => {
                error!("Operation failed ({:?}): {}", error_type, error)
            }
            _ => warn!("Operation rejected ({:?}): {}", error_type, error),
        }

        let message = match error_type {
            ErrorType::Authentication => "Invalid enrollment or password",
            _ => "Operation failed",
        };

        Self {
            code: ReturnCode::ERROR,
            message: message.to_string(),
        }
    }
}

/// Helper trait to convert Results for front ends
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for AppResult<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(|e| ErrorResponse::from_app_error(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_codes() {
        let ok: AppResult<()> = Ok(());
        let failed: AppResult<()> = Err(DomainError::Duplicate("x".to_string()).into());

        assert_eq!(ReturnCode::from(&ok).code(), 0);
        assert_eq!(ReturnCode::from(&failed).code(), 1);
        assert!(ReturnCode::from(&ok).is_success());
    }

    #[test]
    fn test_error_kind_stays_internal() {
        let response =
            ErrorResponse::from_app_error(&DomainError::missing("subject", 1301).into());

        assert_eq!(response.code, ReturnCode::ERROR);
        assert_eq!(response.message, "Operation failed");
        assert!(!response.message.contains("1301"));
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ErrorType::of(&DomainError::not_found("class", 2).into()),
            ErrorType::NotFound
        );
        assert_eq!(ErrorType::of(&AppError::Authentication), ErrorType::Authentication);
        assert_eq!(
            ErrorType::of(&AppError::Other("no file".to_string())),
            ErrorType::Internal
        );
    }

    #[test]
    fn test_to_error_response() {
        let result: AppResult<u8> = Err(AppError::Authentication);
        let response = result.to_error_response().unwrap_err();

        assert_eq!(response.message, "Invalid enrollment or password");
        assert_eq!(serde_json::to_string(&response).unwrap(), r#"{"code":1,"message":"Invalid enrollment or password"}"#);
    }
}
