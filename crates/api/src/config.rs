use std::time::Duration;

use axum::http::HeaderValue;

use cartoonizer_replicate::api::DEFAULT_API_BASE;
use cartoonizer_replicate::poll::{DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
use cartoonizer_replicate::{PollPolicy, ReplicateConfig};
use cartoonizer_storage::client::DEFAULT_BUCKET;
use cartoonizer_storage::StorageConfig;

/// Model version of the cartoonizer model on Replicate.
pub const DEFAULT_MODEL_VERSION: &str =
    "efc7c21e5c8f5d71b8c3a6a7cfc7c63c1c8edc7f4b7d8a1c4d1c4d7c8a2d1e";

/// Errors raised while loading configuration. Any of them aborts startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// Credentials have no defaults; everything else falls back to values
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `180`). This is the outer
    /// deadline for a cartoonize request and must exceed a bounded poll budget.
    pub request_timeout_secs: u64,
    pub replicate: ReplicateConfig,
    pub poll_policy: PollPolicy,
    pub storage: StorageConfig,
    /// Re-host the input image and give the model its URL (default: `false`).
    pub upload_input: bool,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                       | Default                          |
    /// |-------------------------------|----------------------------------|
    /// | `REPLICATE_API_TOKEN`         | required                         |
    /// | `SUPABASE_URL`                | required                         |
    /// | `SUPABASE_KEY`                | required                         |
    /// | `REPLICATE_API_BASE`          | `https://api.replicate.com/v1`   |
    /// | `REPLICATE_MODEL_VERSION`     | cartoonizer model version        |
    /// | `REPLICATE_POLL_INTERVAL_MS`  | `2000`                           |
    /// | `REPLICATE_POLL_MAX_ATTEMPTS` | `60` (`0` polls without limit)   |
    /// | `SUPABASE_BUCKET`             | `cartoonizer`                    |
    /// | `UPLOAD_INPUT`                | `false`                          |
    /// | `HOST`                        | `0.0.0.0`                        |
    /// | `PORT`                        | `3000`                           |
    /// | `CORS_ORIGINS`                | `*`                              |
    /// | `REQUEST_TIMEOUT_SECS`        | `180`                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let api_token = required("REPLICATE_API_TOKEN")?;
        let supabase_url = required("SUPABASE_URL")?;
        let supabase_key = required("SUPABASE_KEY")?;

        let replicate = ReplicateConfig {
            api_base: get("REPLICATE_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into()),
            api_token,
            model_version: get("REPLICATE_MODEL_VERSION")
                .unwrap_or_else(|| DEFAULT_MODEL_VERSION.into()),
        };

        let interval_ms: u64 = parse_or(
            "REPLICATE_POLL_INTERVAL_MS",
            get("REPLICATE_POLL_INTERVAL_MS"),
            DEFAULT_POLL_INTERVAL.as_millis() as u64,
        )?;
        let max_attempts: u32 = parse_or(
            "REPLICATE_POLL_MAX_ATTEMPTS",
            get("REPLICATE_POLL_MAX_ATTEMPTS"),
            DEFAULT_MAX_ATTEMPTS,
        )?;
        let interval = Duration::from_millis(interval_ms);
        let poll_policy = match max_attempts {
            0 => PollPolicy::unbounded(interval),
            n => PollPolicy::bounded(interval, n),
        };

        let storage = StorageConfig {
            base_url: supabase_url,
            api_key: supabase_key,
            bucket: get("SUPABASE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.into()),
        };

        let upload_input = match get("UPLOAD_INPUT") {
            None => false,
            Some(v) => parse_bool("UPLOAD_INPUT", &v)?,
        };

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or("PORT", get("PORT"), 3000)?;

        let cors_origins: Vec<String> = get("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        validate_origins(&cors_origins)?;

        let request_timeout_secs: u64 =
            parse_or("REQUEST_TIMEOUT_SECS", get("REQUEST_TIMEOUT_SECS"), 180)?;
        validate_deadline(request_timeout_secs, &poll_policy)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            replicate,
            poll_policy,
            storage,
            upload_input,
        })
    }

    /// Deadline for a single cartoonize request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// True when `CORS_ORIGINS` contains the `*` wildcard.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

/// The request deadline must be positive and, for a bounded poll policy,
/// longer than the whole poll budget.
fn validate_deadline(timeout_secs: u64, policy: &PollPolicy) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "REQUEST_TIMEOUT_SECS",
        value: timeout_secs.to_string(),
        reason,
    };

    if timeout_secs == 0 {
        return Err(invalid("must be greater than zero".into()));
    }
    if let Some(max_attempts) = policy.max_attempts {
        let budget = policy.interval.saturating_mul(max_attempts);
        if Duration::from_secs(timeout_secs) <= budget {
            return Err(invalid(format!(
                "must exceed the poll budget of {}ms ({} x {}ms)",
                budget.as_millis(),
                max_attempts,
                policy.interval.as_millis(),
            )));
        }
    }
    Ok(())
}

fn validate_origins(origins: &[String]) -> Result<(), ConfigError> {
    for origin in origins.iter().filter(|o| o.as_str() != "*") {
        if let Err(e) = origin.parse::<HeaderValue>() {
            return Err(ConfigError::Invalid {
                key: "CORS_ORIGINS",
                value: origin.clone(),
                reason: e.to_string(),
            });
        }
    }
    Ok(())
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => match value.parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
        },
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}
