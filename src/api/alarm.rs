use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::api::Failure;

/// Prefix identifying this service in alert titles.
const ALARM_PREFIX: &str = "Dynamodb -> ";

/// Longest a failing request waits for its alarm to be delivered.
const ALARM_TIMEOUT: Duration = Duration::from_secs(5);

/// Alert severity as understood by the alerting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Warning,
    Info,
}

impl Severity {
    /// Server faults warn, caller mistakes inform.
    pub fn for_status(status: StatusCode) -> Self {
        if status.is_server_error() {
            Severity::Warning
        } else {
            Severity::Info
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    pub message: String,
    pub severity: Severity,
    pub cause: String,
}

impl From<&Failure> for Alarm {
    fn from(failure: &Failure) -> Self {
        Self {
            message: format!("{ALARM_PREFIX}{}", failure.message()),
            severity: Severity::for_status(failure.status()),
            cause: format!("{:#}", failure.cause()),
        }
    }
}

#[derive(Debug, Error)]
pub enum AlarmError {
    #[error("alarm request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Destination for failure notifications.
#[async_trait]
pub trait AlarmSink: Send + Sync {
    async fn send(&self, alarm: &Alarm) -> Result<(), AlarmError>;
}

/// VictorOps REST integration.
#[derive(Debug, Clone)]
pub struct VictorOps {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct VictorOpsAlert<'a> {
    message_type: Severity,
    entity_id: &'a str,
    entity_display_name: &'a str,
    state_message: &'a str,
    monitoring_tool: &'static str,
}

impl VictorOps {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl AlarmSink for VictorOps {
    async fn send(&self, alarm: &Alarm) -> Result<(), AlarmError> {
        let alert = VictorOpsAlert {
            message_type: alarm.severity,
            entity_id: &alarm.message,
            entity_display_name: &alarm.message,
            state_message: &alarm.cause,
            monitoring_tool: env!("CARGO_PKG_NAME"),
        };

        self.client
            .post(&self.url)
            .json(&alert)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Logs failures and forwards them to the alarm sink.
///
/// Delivery problems are logged and dropped: a request that already failed is
/// answered the same way whether or not its alarm went out. A sink that does
/// not answer within the timeout counts as a delivery problem.
#[derive(Clone)]
pub struct Reporter {
    sink: Option<Arc<dyn AlarmSink>>,
    timeout: Duration,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Reporter {
    pub fn new(sink: Option<Arc<dyn AlarmSink>>) -> Self {
        Self {
            sink,
            timeout: ALARM_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn report(&self, failure: &Failure) {
        let location = failure.location();
        if failure.status().is_server_error() {
            error!(
                file = location.file(),
                line = location.line(),
                cause = %format!("{:#}", failure.cause()),
                "{}",
                failure.trace()
            );
        } else {
            warn!(
                file = location.file(),
                line = location.line(),
                cause = %format!("{:#}", failure.cause()),
                "{}",
                failure.trace()
            );
        }

        let Some(sink) = &self.sink else {
            debug!("No alarm sink configured, skipping alarm");
            return;
        };

        let alarm = Alarm::from(failure);
        match tokio::time::timeout(self.timeout, sink.send(&alarm)).await {
            Ok(Ok(())) => debug!("Alarm '{}' delivered", alarm.message),
            Ok(Err(e)) => error!("Failed to deliver alarm '{}': {e}", alarm.message),
            Err(_) => error!(
                "Alarm '{}' not delivered within {:?}, giving up",
                alarm.message, self.timeout
            ),
        }
    }
}
