use std::env;

use aws_config::{BehaviorVersion, Region};

pub const DEFAULT_PORT: u16 = 9001;
pub const DEFAULT_REGION: &str = "eu-west-1";
pub const DEFAULT_TABLE: &str = "leads";
pub const DEFAULT_TABLE_KEY: &str = "passport_id";

/// Process configuration, read once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Verbose/dev mode (`DEV=true`)
    pub dev: bool,
    /// Listening port (default: 9001)
    pub port: u16,
    /// Store region (default: "eu-west-1")
    pub region: String,
    /// Store endpoint override, e.g. a local DynamoDB
    pub endpoint: Option<String>,
    /// Table ensured at startup (default: "leads")
    pub default_table: String,
    /// String hash key of the default table (default: "passport_id")
    pub default_table_key: String,
    /// Alerting endpoint; alarms are only logged when unset
    pub alarm_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DEV` - `"true"` enables dev mode
    /// - `PORT` - listening port
    /// - `AWS_REGION` - store region
    /// - `DYNAMODB_ENDPOINT` - store endpoint override
    /// - `DEFAULT_TABLE` / `DEFAULT_TABLE_KEY` - table bootstrapped at startup
    /// - `ALARM_URL` - alerting endpoint
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] against an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            dev: lookup("DEV").is_some_and(|v| v.trim() == "true"),
            port: lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            region: non_empty("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint: non_empty("DYNAMODB_ENDPOINT"),
            default_table: non_empty("DEFAULT_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            default_table_key: non_empty("DEFAULT_TABLE_KEY")
                .unwrap_or_else(|| DEFAULT_TABLE_KEY.to_string()),
            alarm_url: non_empty("ALARM_URL"),
        }
    }

    /// SDK configuration for the store client.
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(self.region.clone()));

        if let Some(endpoint) = &self.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        loader.load().await
    }
}
