//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Chairtime API
//! server. It retrieves configuration values from environment variables and
//! provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins, `*` is rejected
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout, zero or unparseable falls back to the default (default: 30)
//! - `CLINIC_FIRST_SLOT`: First bookable start of the day (default: "8:00 AM")
//! - `CLINIC_LAST_SLOT`: Last bookable start of the day (default: "5:00 PM")
//! - `SLOT_BLOCKING_RULE`: `legacy` or `interval-overlap` (default: "legacy")

use chairtime_core::{
    calculator::{BlockingRule, SlotAvailabilityCalculator},
    models::{clock::ClockTime, slot::SlotGrid},
};
use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;

/// Configuration for the Chairtime API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use chairtime_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// The clinic's bookable start times
    pub slot_grid: SlotGrid,

    pub blocking_rule: BlockingRule,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - A clinic slot is not a recognised time, or the two do not form a valid grid
    /// - The SLOT_BLOCKING_RULE value is unknown
    /// - API_CORS_ORIGINS contains the wildcard origin
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // Network settings
        let host = var("API_HOST", "0.0.0.0");
        let port: u16 = var("API_PORT", "3000")
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Logging settings
        let log_level = match var("LOG_LEVEL", "info").to_ascii_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        });
        // Credentialed CORS cannot use the wildcard origin
        if cors_origins
            .as_ref()
            .is_some_and(|origins| origins.iter().any(|o| o == "*"))
        {
            return Err(eyre!(
                "Invalid API_CORS_ORIGINS value: '*' is not allowed, list each origin explicitly"
            ));
        }

        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS", "30")
            .parse::<u64>()
            .ok()
            .filter(|&seconds| seconds > 0)
            .unwrap_or(30);

        // Clinic settings
        let first_slot = var("CLINIC_FIRST_SLOT", "8:00 AM");
        let first_slot: ClockTime = first_slot
            .parse()
            .wrap_err_with(|| format!("Invalid CLINIC_FIRST_SLOT value '{first_slot}'"))?;
        let last_slot = var("CLINIC_LAST_SLOT", "5:00 PM");
        let last_slot: ClockTime = last_slot
            .parse()
            .wrap_err_with(|| format!("Invalid CLINIC_LAST_SLOT value '{last_slot}'"))?;
        let slot_grid =
            SlotGrid::daily(first_slot, last_slot).wrap_err("Invalid clinic slot window")?;

        let blocking_rule: BlockingRule = var("SLOT_BLOCKING_RULE", "legacy")
            .parse()
            .wrap_err("Invalid SLOT_BLOCKING_RULE value")?;

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            slot_grid,
            blocking_rule,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn calculator(&self) -> SlotAvailabilityCalculator {
        SlotAvailabilityCalculator::new(self.slot_grid.clone()).with_rule(self.blocking_rule)
    }
}
