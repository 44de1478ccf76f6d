use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";
const VALIDATION: &str = "ValidationException";

/// Failure talking to the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The service received the request and rejected it.
    #[error("{operation} rejected ({code}): {message}")]
    Service {
        operation: &'static str,
        code: String,
        message: String,
    },
    /// The request never produced a service response (network, credentials, timeouts).
    #[error("{operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn service(operation: &'static str, code: &str, message: impl Into<String>) -> Self {
        Self::Service {
            operation,
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(operation: &'static str, table_name: &str) -> Self {
        Self::service(
            operation,
            RESOURCE_NOT_FOUND,
            format!("Requested resource not found: Table: {table_name} not found"),
        )
    }

    pub fn validation(operation: &'static str, message: impl Into<String>) -> Self {
        Self::service(operation, VALIDATION, message)
    }

    /// Maps an SDK error, keeping the service error code when there is one.
    pub fn from_sdk<E, R>(operation: &'static str, err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        match err.as_service_error() {
            Some(service) => Self::service(
                operation,
                service.code().unwrap_or("Unknown"),
                service.message().unwrap_or_default(),
            ),
            None => Self::Transport {
                operation,
                message: DisplayErrorContext(&err).to_string(),
            },
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code),
            Self::Transport { .. } => None,
        }
    }

    /// The table (or other resource) the request named does not exist.
    pub fn is_not_found(&self) -> bool {
        self.code() == Some(RESOURCE_NOT_FOUND)
    }

    /// The service refused the request's contents, e.g. an item without its key attribute.
    pub fn is_validation(&self) -> bool {
        self.code() == Some(VALIDATION)
    }
}
