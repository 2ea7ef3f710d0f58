use crate::app_config::{AppConfig, SearchRadius};
use crate::ConfigError;

pub const DEFAULT_KAKAO_BASE_URL: &str = "https://dapi.kakao.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or the combination of
/// values is inconsistent.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or the combination of
/// values is inconsistent.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let kakao_api_key = lookup("KAKAO_REST_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let kakao_base_url = or_default("LUNCHWHEEL_KAKAO_BASE_URL", DEFAULT_KAKAO_BASE_URL);
    let log_level = or_default("LUNCHWHEEL_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("LUNCHWHEEL_REQUEST_TIMEOUT_SECS", "5")?;
    let max_retries = parse_u32("LUNCHWHEEL_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("LUNCHWHEEL_RETRY_BACKOFF_BASE_MS", "250")?;

    let radius_meters = parse_u32("LUNCHWHEEL_SEARCH_RADIUS_M", "400")?;
    let search_radius = SearchRadius::from_meters(radius_meters).ok_or_else(|| {
        invalid(
            "LUNCHWHEEL_SEARCH_RADIUS_M",
            format!("{radius_meters} is not one of 400, 800, 1200"),
        )
    })?;

    let max_candidates = parse_usize("LUNCHWHEEL_MAX_CANDIDATES", "15")?;
    let min_pool = parse_usize("LUNCHWHEEL_MIN_POOL", "5")?;
    let spin_duration_ms = parse_u64("LUNCHWHEEL_SPIN_DURATION_MS", "5000")?;
    let spin_min_turns = parse_u32("LUNCHWHEEL_SPIN_MIN_TURNS", "5")?;
    let spin_max_turns = parse_u32("LUNCHWHEEL_SPIN_MAX_TURNS", "10")?;
    let frame_interval_ms = parse_u64("LUNCHWHEEL_FRAME_INTERVAL_MS", "16")?;

    let excluded_category = or_default("LUNCHWHEEL_EXCLUDED_CATEGORY", "CE7");
    let restaurant_category = or_default("LUNCHWHEEL_RESTAURANT_CATEGORY", "FD6");

    let config = AppConfig {
        kakao_api_key,
        kakao_base_url,
        log_level,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        search_radius,
        max_candidates,
        min_pool,
        spin_duration_ms,
        spin_min_turns,
        spin_max_turns,
        frame_interval_ms,
        excluded_category,
        restaurant_category,
    };
    validate_app_config(&config)?;
    Ok(config)
}

fn validate_app_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.min_pool == 0 {
        return Err(ConfigError::Validation(
            "LUNCHWHEEL_MIN_POOL must be at least 1".to_string(),
        ));
    }
    if config.max_candidates < config.min_pool {
        return Err(ConfigError::Validation(format!(
            "LUNCHWHEEL_MAX_CANDIDATES ({}) must not be smaller than LUNCHWHEEL_MIN_POOL ({})",
            config.max_candidates, config.min_pool
        )));
    }
    if config.spin_min_turns >= config.spin_max_turns {
        return Err(ConfigError::Validation(format!(
            "spin turn range {}..{} is empty",
            config.spin_min_turns, config.spin_max_turns
        )));
    }
    if config.spin_duration_ms == 0 {
        return Err(ConfigError::Validation(
            "LUNCHWHEEL_SPIN_DURATION_MS must be positive".to_string(),
        ));
    }
    if config.frame_interval_ms == 0 {
        return Err(ConfigError::Validation(
            "LUNCHWHEEL_FRAME_INTERVAL_MS must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
