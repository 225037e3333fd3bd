//! Process configuration, read from the environment once at startup

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_credential_types::Credentials;
use contact_storage::contact::contacts_table_spec;
use contact_storage::table::{TableSpec, Throughput, DEFAULT_CAPACITY_UNITS};
use thiserror::Error;

use super::Environment;

const DEFAULT_TABLE_NAME: &str = "Contacts";
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },

    /// Only one half of the static credential pair is set
    #[error("AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together")]
    IncompleteCredentials,
}

/// Static AWS credential pair
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    /// Access key id
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

/// Settings for the AWS SDK
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    /// Region of the `DynamoDB` endpoint
    pub region: String,
    /// Static credentials; the default provider chain is used when absent
    pub credentials: Option<StaticCredentials>,
    /// Endpoint override (`LocalStack` in development)
    pub endpoint_url: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Deployment stage
    pub environment: Environment,
    /// Name of the contacts table
    pub table_name: String,
    /// Capacity profile used when the table has to be created
    pub throughput: Throughput,
    /// AWS SDK settings
    pub aws: AwsSettings,
    /// Upper bound on the duration of a request
    pub request_timeout: Duration,
    /// Directory with the front-end served at `/`
    pub static_dir: Option<PathBuf>,
    /// Port to listen on
    pub port: u16,
}

impl Config {
    /// Reads the configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable has an invalid value
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        let table_name = non_empty_var("DB_NAME").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());

        let credentials = match (
            non_empty_var("AWS_ACCESS_KEY_ID"),
            non_empty_var("AWS_SECRET_ACCESS_KEY"),
        ) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteCredentials),
        };

        let aws = AwsSettings {
            region: non_empty_var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            credentials,
            endpoint_url: non_empty_var("DYNAMODB_ENDPOINT_URL")
                .or_else(|| environment.default_aws_endpoint_url().map(ToString::to_string)),
        };

        Ok(Self {
            environment,
            table_name,
            throughput: throughput_from_env()?,
            aws,
            request_timeout: Duration::from_secs(parse_var(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            static_dir: non_empty_var("STATIC_DIR").map(PathBuf::from),
            port: parse_var("PORT", DEFAULT_PORT)?,
        })
    }

    /// Definition of the contacts table
    #[must_use]
    pub fn table_spec(&self) -> TableSpec {
        contacts_table_spec(&self.table_name, self.throughput)
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.aws.region.clone()))
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(credentials) = &self.aws.credentials {
            loader = loader.credentials_provider(Credentials::new(
                &credentials.access_key_id,
                &credentials.secret_access_key,
                None,
                None,
                "environment",
            ));
        }

        if let Some(endpoint_url) = &self.aws.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        loader.load().await
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    non_empty_var(name).map_or(Ok(default), |value| {
        value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value })
    })
}

fn throughput_from_env() -> Result<Throughput, ConfigError> {
    let mode = non_empty_var("DYNAMODB_BILLING_MODE")
        .unwrap_or_else(|| "provisioned".to_string())
        .to_lowercase();

    match mode.as_str() {
        "provisioned" => Ok(Throughput::Provisioned {
            read_capacity_units: parse_var("DYNAMODB_READ_CAPACITY", DEFAULT_CAPACITY_UNITS)?,
            write_capacity_units: parse_var("DYNAMODB_WRITE_CAPACITY", DEFAULT_CAPACITY_UNITS)?,
        }),
        "pay_per_request" | "on_demand" => Ok(Throughput::OnDemand),
        _ => Err(ConfigError::InvalidValue {
            name: "DYNAMODB_BILLING_MODE",
            value: mode,
        }),
    }
}
