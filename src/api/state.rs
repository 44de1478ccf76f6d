use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::api::{Envelope, Failure, Reporter};
use crate::dynamodb::Store;

/// Context shared by every handler. Built once at startup, never mutated.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub reporter: Reporter,
    /// Dev mode: log request inputs and stored items.
    pub dev: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, reporter: Reporter, dev: bool) -> Self {
        Self {
            store,
            reporter,
            dev,
        }
    }

    /// Turns a handler outcome into a response, reporting failures first.
    pub async fn respond<T: Serialize>(&self, result: Result<Envelope<T>, Failure>) -> Response {
        match result {
            Ok(envelope) => envelope.into_response(),
            Err(failure) => {
                self.reporter.report(&failure).await;
                failure.into_envelope().into_response()
            }
        }
    }
}
