use anyhow::{Context, Result};
use std::env;

use crate::resolver::DEFAULT_LOG_TAG;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// `json` or `text`
    pub encoding: String,
    pub fallback_message: String,
    pub fallback_status: u16,
    pub log_tag: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            encoding: "json".to_string(),
            fallback_message: "Internal Server Error".to_string(),
            fallback_status: 500,
            log_tag: DEFAULT_LOG_TAG.to_string(),
        }
    }
}

impl ResolverConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            encoding: env::var("RESOLVER_ENCODING").unwrap_or(defaults.encoding),
            fallback_message: env::var("RESOLVER_FALLBACK_MESSAGE")
                .unwrap_or(defaults.fallback_message),
            fallback_status: match env::var("RESOLVER_FALLBACK_STATUS") {
                Ok(raw) => raw
                    .parse()
                    .context("RESOLVER_FALLBACK_STATUS must be a valid status code")?,
                Err(_) => defaults.fallback_status,
            },
            log_tag: env::var("RESOLVER_LOG_TAG").unwrap_or(defaults.log_tag),
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("API_PORT must be a valid port number")?,
            },
            resolver: ResolverConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
