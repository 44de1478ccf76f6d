use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Uniform JSON body returned by every endpoint.
///
/// `success` is always present; `message` only on failures; `data` whenever
/// the endpoint produced a payload, even an empty one.
#[derive(Debug, Serialize)]
pub struct Envelope<T = ()> {
    #[serde(skip)]
    status: StatusCode,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl Envelope {
    /// `200 {"success":true}`
    pub fn ok() -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: None,
            data: None,
        }
    }

    /// `500 {"success":false,"message":...}`
    pub fn error(message: impl Into<String>) -> Self {
        Self::failure(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// `422 {"success":false,"message":...}`
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::failure(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T> Envelope<T> {
    /// `200 {"success":true,"data":...}`
    pub fn with_data(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: None,
            data: Some(data),
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
