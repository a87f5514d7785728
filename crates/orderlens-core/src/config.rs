use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_ORDERS_ENDPOINT: &str = "https://www.zomato.com/webroutes/user/orders";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development config pointed at the public orders endpoint.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("ORDERLENS_ENV", "development"))?;
    let log_level = or_default("ORDERLENS_LOG_LEVEL", "info");

    let orders_endpoint = or_default("ORDERLENS_ORDERS_ENDPOINT", DEFAULT_ORDERS_ENDPOINT);
    if !orders_endpoint.starts_with("http://") && !orders_endpoint.starts_with("https://") {
        return Err(invalid(
            "ORDERLENS_ORDERS_ENDPOINT",
            format!("\"{orders_endpoint}\" is not an http(s) URL"),
        ));
    }

    let store_path = PathBuf::from(or_default("ORDERLENS_STORE_PATH", "./data/orders.json"));
    let session_cookie = lookup("ORDERLENS_SESSION_COOKIE")
        .ok()
        .filter(|c| !c.trim().is_empty());

    let request_timeout_secs = parse_u64("ORDERLENS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ORDERLENS_USER_AGENT", "orderlens/0.1 (order-history-sync)");
    let inter_page_delay_ms = parse_u64("ORDERLENS_INTER_PAGE_DELAY_MS", "1000")?;

    let min_page_size = parse_usize("ORDERLENS_MIN_PAGE_SIZE", "5")?;
    if min_page_size == 0 {
        return Err(invalid("ORDERLENS_MIN_PAGE_SIZE", "must be at least 1".to_string()));
    }

    let max_pages = parse_u32("ORDERLENS_MAX_PAGES", "200")?;
    if max_pages == 0 {
        return Err(invalid("ORDERLENS_MAX_PAGES", "must be at least 1".to_string()));
    }

    Ok(AppConfig {
        env,
        log_level,
        orders_endpoint,
        store_path,
        session_cookie,
        request_timeout_secs,
        user_agent,
        inter_page_delay_ms,
        min_page_size,
        max_pages,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ORDERLENS_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
