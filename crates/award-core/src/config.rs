//! Configuration module
//!
//! Settings come from the environment (after loading `.env` when present).
//! `Config::from_lookup` takes any key lookup so tests can build a config
//! without touching process environment.

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_ALLOWED_EXTENSIONS;
use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 5173;
const AUTOSAVE_QUIET_PERIOD_MS: u64 = 500;
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
const DELIVERY_TIMEOUT_SECS: u64 = 30;
const LOCAL_STORAGE_PATH: &str = "./data";
const DELIVERY_URL: &str = "http://localhost:5173/api/submit";

/// Settings shared by every binary
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_host: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_request_body_bytes: usize,
}

/// Award workflow configuration
#[derive(Clone, Debug)]
pub struct AwardConfig {
    pub base: BaseConfig,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub local_storage_path: PathBuf,
    // Form behavior
    pub evidence_allowed_extensions: Vec<String>,
    pub autosave_quiet_period_ms: u64,
    // Mail delivery
    pub smtp_host: Option<String>,
    /// Unset (or not a valid port) until configured; there is no default relay port
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub smtp_tls: bool,
    pub mail_to: Vec<String>,
    // Delivery endpoint used by clients
    pub delivery_url: String,
    pub delivery_timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<AwardConfig>);

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| v.trim().to_lowercase())
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl Config {
    fn as_award(&self) -> &AwardConfig {
        &self.0
    }

    /// Load `.env` (if present) and read settings from the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = parse_list(&lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string()));

        let base = BaseConfig {
            server_host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: match lookup("SERVER_PORT").or_else(|| lookup("PORT")) {
                Some(port) => port
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            cors_origins,
            environment,
            max_request_body_bytes: lookup("MAX_REQUEST_BODY_BYTES")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(MAX_REQUEST_BODY_BYTES),
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Local,
        };

        let smtp_user = non_empty(lookup("SMTP_USER"));
        let config = AwardConfig {
            base,
            storage_backend,
            local_storage_path: lookup("LOCAL_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(LOCAL_STORAGE_PATH)),
            evidence_allowed_extensions: lookup("EVIDENCE_ALLOWED_EXTENSIONS")
                .map(|s| parse_list(&s.to_lowercase()))
                .unwrap_or_else(|| {
                    DEFAULT_ALLOWED_EXTENSIONS
                        .iter()
                        .map(|ext| ext.to_string())
                        .collect()
                }),
            autosave_quiet_period_ms: lookup("AUTOSAVE_QUIET_PERIOD_MS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(AUTOSAVE_QUIET_PERIOD_MS),
            smtp_host: non_empty(lookup("SMTP_HOST")),
            smtp_port: lookup("SMTP_PORT")
                .and_then(|s| s.trim().parse().ok())
                .filter(|&p| p > 0),
            smtp_from: non_empty(lookup("SMTP_FROM")).or_else(|| smtp_user.clone()),
            smtp_user,
            smtp_password: non_empty(lookup("SMTP_PASS")).or_else(|| non_empty(lookup("SMTP_PASSWORD"))),
            smtp_tls: parse_bool(lookup("SMTP_TLS"), true),
            mail_to: lookup("MAIL_TO").map(|s| parse_list(&s)).unwrap_or_default(),
            delivery_url: lookup("AWARD_DELIVERY_URL").unwrap_or_else(|| DELIVERY_URL.to_string()),
            delivery_timeout_secs: lookup("DELIVERY_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DELIVERY_TIMEOUT_SECS),
        };

        let config = Config(Box::new(config));
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let award = self.as_award();
        if award.base.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than zero"));
        }

        if award.evidence_allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "EVIDENCE_ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        if self.is_production() && award.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.as_award().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn environment(&self) -> &str {
        &self.as_award().base.environment
    }

    pub fn server_host(&self) -> &str {
        &self.as_award().base.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.as_award().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_award().base.cors_origins
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.as_award().base.max_request_body_bytes
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_award().storage_backend
    }

    pub fn local_storage_path(&self) -> &Path {
        &self.as_award().local_storage_path
    }

    pub fn evidence_allowed_extensions(&self) -> &[String] {
        &self.as_award().evidence_allowed_extensions
    }

    pub fn autosave_quiet_period_ms(&self) -> u64 {
        self.as_award().autosave_quiet_period_ms
    }

    pub fn smtp_host(&self) -> Option<&str> {
        self.as_award().smtp_host.as_deref()
    }

    pub fn smtp_port(&self) -> Option<u16> {
        self.as_award().smtp_port
    }

    pub fn smtp_user(&self) -> Option<&str> {
        self.as_award().smtp_user.as_deref()
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.as_award().smtp_password.as_deref()
    }

    pub fn smtp_from(&self) -> Option<&str> {
        self.as_award().smtp_from.as_deref()
    }

    pub fn smtp_tls(&self) -> bool {
        self.as_award().smtp_tls
    }

    pub fn mail_to(&self) -> &[String] {
        &self.as_award().mail_to
    }

    pub fn delivery_url(&self) -> &str {
        &self.as_award().delivery_url
    }

    pub fn delivery_timeout_secs(&self) -> u64 {
        self.as_award().delivery_timeout_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_port(), 5173);
        assert_eq!(config.storage_backend(), StorageBackend::Local);
        assert_eq!(config.evidence_allowed_extensions(), ["pdf", "png", "jpg"]);
        assert_eq!(config.autosave_quiet_period_ms(), 500);
        assert_eq!(config.smtp_port(), None);
        assert!(config.smtp_tls());
        assert!(config.smtp_host().is_none());
        assert!(config.mail_to().is_empty());
        assert!(!config.is_production());
    }

    #[test]
    fn reads_smtp_and_recipients() {
        let config = config_from(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
            ("SMTP_USER", "award@example.com"),
            ("SMTP_PASS", "secret"),
            ("SMTP_TLS", "FALSE"),
            ("MAIL_TO", "hr@example.com, ceo@example.com,"),
        ])
        .unwrap();
        assert_eq!(config.smtp_host(), Some("smtp.example.com"));
        assert_eq!(config.smtp_port(), Some(2525));
        assert_eq!(config.smtp_password(), Some("secret"));
        assert_eq!(config.smtp_from(), Some("award@example.com"));
        assert!(!config.smtp_tls());
        assert_eq!(config.mail_to(), ["hr@example.com", "ceo@example.com"]);
    }

    #[test]
    fn allow_list_is_lowercased() {
        let config = config_from(&[("EVIDENCE_ALLOWED_EXTENSIONS", "PDF, Docx")]).unwrap();
        assert_eq!(config.evidence_allowed_extensions(), ["pdf", "docx"]);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(config_from(&[("SERVER_PORT", "abc")]).is_err());
        assert!(config_from(&[("SERVER_PORT", "0")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "s3")]).is_err());
        assert!(config_from(&[("EVIDENCE_ALLOWED_EXTENSIONS", " , ")]).is_err());
    }

    #[test]
    fn production_requires_explicit_cors_origins() {
        assert!(config_from(&[("ENVIRONMENT", "production")]).is_err());
        let config = config_from(&[
            ("ENVIRONMENT", "prod"),
            ("CORS_ORIGINS", "https://award.example.com"),
        ])
        .unwrap();
        assert!(config.is_production());
    }
}
