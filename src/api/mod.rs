//! HTTP surface: every endpoint answers with an [`Envelope`], and every
//! failure goes through a [`Failure`] and the [`Reporter`] before the response
//! is written.

mod alarm;
mod envelope;
mod failure;
mod handlers;
mod state;

use axum::{
    http::{header, Method},
    routing::post,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use alarm::{AlarmSink, Reporter, VictorOps};
pub use envelope::Envelope;
pub use failure::Failure;
pub use state::AppState;

#[cfg(test)]
pub(crate) use alarm::{
    tests::{silent_alarm_endpoint, RecordingSink},
    Severity,
};

/// Create the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    // Any origin may call any route
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::HEAD])
        .allow_headers([header::CONTENT_TYPE]);

    let dynamo = Router::new()
        .route("/test", post(handlers::ping))
        .route("/tables", post(handlers::tables))
        .route("/describe", post(handlers::describe))
        .route("/item", post(handlers::get_item))
        .route("/put", post(handlers::put_item));

    Router::new()
        .nest("/dynamo", dynamo)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
