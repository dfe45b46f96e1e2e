use crate::workflows::grouping::{MalformedRecordPolicy, RecordColumns, RecordFormat};
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub grouping: GroupingConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let defaults = RecordColumns::default();
        let columns = RecordColumns {
            name: env::var("GROUPER_NAME_COLUMN").unwrap_or(defaults.name),
            address: env::var("GROUPER_ADDRESS_COLUMN").unwrap_or(defaults.address),
        };

        let output_file_name =
            env::var("GROUPER_OUTPUT_FILE").unwrap_or_else(|_| "sorted.csv".to_string());

        let record_format = match env::var("GROUPER_RECORD_FORMAT") {
            Ok(raw) => raw
                .parse::<RecordFormat>()
                .map_err(|_| ConfigError::InvalidRecordFormat(raw))?,
            Err(_) => RecordFormat::default(),
        };

        let malformed_policy = match env::var("GROUPER_ON_MALFORMED") {
            Ok(raw) => raw
                .parse::<MalformedRecordPolicy>()
                .map_err(|_| ConfigError::InvalidMalformedPolicy(raw))?,
            Err(_) => MalformedRecordPolicy::default(),
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            grouping: GroupingConfig {
                columns,
                output_file_name,
                record_format,
                malformed_policy,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Input layout and output defaults for the grouping run.
#[derive(Debug, Clone)]
pub struct GroupingConfig {
    pub columns: RecordColumns,
    pub output_file_name: String,
    pub record_format: RecordFormat,
    pub malformed_policy: MalformedRecordPolicy,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidRecordFormat(String),
    InvalidMalformedPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRecordFormat(value) => write!(
                f,
                "GROUPER_RECORD_FORMAT must be 'delimited' or 'csv' (found '{value}')"
            ),
            ConfigError::InvalidMalformedPolicy(value) => write!(
                f,
                "GROUPER_ON_MALFORMED must be 'fail' or 'skip' (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
