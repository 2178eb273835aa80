//! Configuration module
//!
//! Runtime settings are read from the environment (and an optional `.env` file).
//! Every value has a development-friendly default so the service starts with no
//! configuration at all.

use std::env;

use crate::constants::DEFAULT_ALLOWED_EXTENSIONS;
use crate::validation::is_valid_extension;

const SERVER_PORT: u16 = 5000;
const BASE_URL: &str = "http://localhost:5000";
const METADATA_FILE: &str = "clips_metadata.json";
const UPLOAD_FOLDER: &str = "uploads";
const MAX_UPLOAD_SIZE_MB: u64 = 500;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Prefix for the absolute download and viewer links handed to clients
    pub base_url: String,
    pub metadata_file: String,
    pub upload_folder: String,
    pub max_upload_size_bytes: u64,
    /// Lower-cased extensions including the leading dot
    pub allowed_extensions: Vec<String>,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            base_url: BASE_URL.to_string(),
            metadata_file: METADATA_FILE.to_string(),
            upload_folder: UPLOAD_FOLDER.to_string(),
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<u64>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let max_upload_size_bytes = megabytes_to_bytes(max_upload_size_mb)?;

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            base_url: env::var("BASE_URL").unwrap_or_else(|_| BASE_URL.to_string()),
            metadata_file: env::var("METADATA_FILE").unwrap_or_else(|_| METADATA_FILE.to_string()),
            upload_folder: env::var("UPLOAD_FOLDER").unwrap_or_else(|_| UPLOAD_FOLDER.to_string()),
            max_upload_size_bytes,
            allowed_extensions: env::var("ALLOWED_EXTENSIONS")
                .map(|s| parse_extensions(&s))
                .unwrap_or_else(|_| Config::default().allowed_extensions),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("PORT must be greater than 0"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "BASE_URL must be an absolute http(s) URL, got '{}'",
                self.base_url
            ));
        }
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }
        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS must not be empty"));
        }
        if let Some(bad) = self.allowed_extensions.iter().find(|e| !is_valid_extension(e)) {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS entries must be '.' followed by letters or digits, got '{}'",
                bad
            ));
        }
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        Ok(())
    }

    pub fn max_upload_size_mb(&self) -> u64 {
        self.max_upload_size_bytes / 1024 / 1024
    }
}

/// Fails instead of wrapping when the product does not fit in a `u64`.
fn megabytes_to_bytes(megabytes: u64) -> Result<u64, anyhow::Error> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large, got {}", megabytes))
}

/// Parse a comma-separated extension list, adding the leading dot when missing.
fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .map(|s| if s.starts_with('.') { s } else { format!(".{}", s) })
        .collect()
}
