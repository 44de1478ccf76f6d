use std::panic::Location;

use anyhow::anyhow;
use axum::http::StatusCode;

use crate::api::Envelope;
use crate::dynamodb::StoreError;

/// What went wrong, independent of where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Unreadable or malformed request body.
    Decode,
    /// Well-formed request that cannot be served as asked.
    Validation,
    /// The store failed or refused the request.
    Store,
    /// An item could not be converted to or from the store representation.
    Codec,
}

impl FailureKind {
    /// Caller mistakes are 422, everything else is ours.
    pub fn status(self) -> StatusCode {
        match self {
            FailureKind::Decode | FailureKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            FailureKind::Store | FailureKind::Codec => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A classified request failure: the message shown to the caller, the cause
/// kept for logs and alarms, and where in the source it was raised.
#[derive(Debug)]
pub struct Failure {
    kind: FailureKind,
    message: String,
    cause: anyhow::Error,
    location: &'static Location<'static>,
}

impl Failure {
    #[track_caller]
    pub fn new(kind: FailureKind, message: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: cause.into(),
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self::new(FailureKind::Decode, message, cause)
    }

    /// Validation failure whose only cause is the message itself.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        let cause = anyhow!(message.clone());
        Self::new(FailureKind::Validation, message, cause)
    }

    /// Store failure; a store-side validation rejection is the caller's fault.
    #[track_caller]
    pub fn store(message: impl Into<String>, err: StoreError) -> Self {
        let kind = if err.is_validation() {
            FailureKind::Validation
        } else {
            FailureKind::Store
        };
        Self::new(kind, message, err)
    }

    #[track_caller]
    pub fn codec(message: impl Into<String>, err: serde_dynamo::Error) -> Self {
        Self::new(FailureKind::Codec, message, err)
    }

    #[cfg(test)]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &anyhow::Error {
        &self.cause
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// `[error] in src/api/handlers.rs:42 <cause>`
    pub fn trace(&self) -> String {
        format!(
            "[error] in {}:{} {:#}",
            self.location.file(),
            self.location.line(),
            self.cause
        )
    }

    /// The response the caller sees. No cause or location leaks into it.
    pub fn into_envelope(self) -> Envelope {
        if self.status() == StatusCode::UNPROCESSABLE_ENTITY {
            Envelope::unprocessable(self.message)
        } else {
            Envelope::error(self.message)
        }
    }
}
