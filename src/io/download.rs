//! HTTP download of remote CSV inputs (plain URLs or a file-storage API).
//!
//! Credentials are configuration of this client only: the fitting core never
//! sees them.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::AppError;

const ENV_API_KEY: &str = "BESTFIT_STORAGE_API_KEY";
const ENV_TIMEOUT: &str = "BESTFIT_HTTP_TIMEOUT_SECS";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Download client settings.
#[derive(Clone, Default)]
pub struct StorageConfig {
    /// Optional bearer token sent with every request.
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StorageConfig {
    /// Read settings from the environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let timeout_secs = match std::env::var(ENV_TIMEOUT) {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            timeout: Some(Duration::from_secs(timeout_secs)),
        })
    }
}

fn parse_timeout_secs(raw: &str) -> Result<u64, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(AppError::new(
            2,
            format!("Invalid {ENV_TIMEOUT}='{raw}' (expected a positive number of seconds)."),
        )),
    }
}

pub struct StorageClient {
    client: Client,
}

impl StorageClient {
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(StorageConfig::from_env()?)
    }

    pub fn new(config: StorageConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| AppError::new(2, format!("{ENV_API_KEY} contains invalid header characters.")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// GET `url` and return the body.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, AppError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::new(2, format!("Download request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                2,
                format!("Download failed with status {}.", resp.status()),
            ));
        }

        let body = resp
            .bytes()
            .map_err(|e| AppError::new(2, format!("Failed to read download body: {e}")))?;
        Ok(body.to_vec())
    }
}

/// Only CSV inputs are supported; the check ignores any query string or fragment.
pub fn ensure_csv_url(url: &str) -> Result<(), AppError> {
    let path = url.split(['?', '#']).next().unwrap_or("");
    if path.to_ascii_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(AppError::new(2, "Only CSV input is supported (URL must end in .csv)."))
    }
}
