use chrono::NaiveDate;

use crate::error::{AppError, Result};

pub const BACKEND_API_URL: &str = "https://api.pcfutsal.es";

/// HTTP timeout for backend requests (seconds).
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// How often the background refresher re-fetches tracked groups (seconds).
pub const REFRESH_INTERVAL_SECS: u64 = 300;

/// Default number of entries requested from the sanctions ranking.
pub const SANCTIONS_TOP_DEFAULT: usize = 20;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_api_url: String,
    pub log_level: String,
    pub api_port: u16,
    pub http_timeout_secs: u64,
    /// Season the sanctions ranking is scoped to (TEMPORADA_ID).
    pub temporada_id: u64,
    /// Default ranking size for /sanciones (SANCTIONS_TOP).
    pub sanctions_top: usize,
    /// Season bounds used when /semanas is called without explicit dates.
    pub season_start: NaiveDate,
    pub season_end: NaiveDate,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            backend_api_url: std::env::var("BACKEND_API_URL")
                .unwrap_or_else(|_| BACKEND_API_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| HTTP_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .unwrap_or(HTTP_TIMEOUT_SECS),
            temporada_id: std::env::var("TEMPORADA_ID")
                .unwrap_or_else(|_| "1".to_string())
                .parse::<u64>()
                .unwrap_or(1),
            sanctions_top: std::env::var("SANCTIONS_TOP")
                .unwrap_or_else(|_| SANCTIONS_TOP_DEFAULT.to_string())
                .parse::<usize>()
                .unwrap_or(SANCTIONS_TOP_DEFAULT),
            season_start: parse_season_date("SEASON_START", "2025-09-01")?,
            season_end: parse_season_date("SEASON_END", "2026-06-30")?,
        })
    }
}

fn parse_season_date(var: &str, default: &str) -> Result<NaiveDate> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| AppError::Config(format!("{var} must be a YYYY-MM-DD date, got {raw:?}")))
}
