//! Build-time configuration.
//!
//! Values are baked in when the wasm bundle is compiled; each one falls back
//! to a default when its variable is unset or blank.

use tracing::Level;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

const ENV_API_URL: &str = "FARMVIZION_API_URL";
const ENV_SENSOR_URL: &str = "FARMVIZION_SENSOR_URL";
const ENV_GOOGLE_CLIENT_ID: &str = "FARMVIZION_GOOGLE_CLIENT_ID";
const ENV_LOG_LEVEL: &str = "FARMVIZION_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Edge sensor service; the main API when not set.
    pub sensor_base_url: String,
    /// Empty disables the Google button.
    pub google_client_id: String,
    pub log_level: Level,
}

impl AppConfig {
    /// Configuration compiled into this build.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            ENV_API_URL => option_env!("FARMVIZION_API_URL"),
            ENV_SENSOR_URL => option_env!("FARMVIZION_SENSOR_URL"),
            ENV_GOOGLE_CLIENT_ID => option_env!("FARMVIZION_GOOGLE_CLIENT_ID"),
            ENV_LOG_LEVEL => option_env!("FARMVIZION_LOG_LEVEL"),
            _ => None,
        })
    }

    fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let api_base_url = var(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let sensor_base_url = var(ENV_SENSOR_URL).unwrap_or_else(|| api_base_url.clone());
        let google_client_id = var(ENV_GOOGLE_CLIENT_ID).unwrap_or_default();
        let log_level = var(ENV_LOG_LEVEL)
            .and_then(|v| v.parse::<Level>().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            api_base_url,
            sensor_base_url,
            google_client_id,
            log_level,
        }
    }

    pub fn google_enabled(&self) -> bool {
        !self.google_client_id.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_base_url, DEFAULT_API_URL);
        assert_eq!(cfg.sensor_base_url, DEFAULT_API_URL);
        assert!(!cfg.google_enabled());
        assert_eq!(cfg.log_level, Level::INFO);
    }

    #[test]
    fn test_sensor_url_follows_api_url() {
        let cfg = AppConfig::from_lookup(|key| match key {
            ENV_API_URL => Some("https://api.farmvizion.com"),
            _ => None,
        });
        assert_eq!(cfg.sensor_base_url, "https://api.farmvizion.com");
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let cfg = AppConfig::from_lookup(|key| match key {
            ENV_API_URL => Some("   "),
            ENV_LOG_LEVEL => Some("chatty"),
            ENV_GOOGLE_CLIENT_ID => Some("abc.apps.googleusercontent.com"),
            _ => None,
        });
        assert_eq!(cfg.api_base_url, DEFAULT_API_URL);
        assert_eq!(cfg.log_level, DEFAULT_LOG_LEVEL);
        assert!(cfg.google_enabled());
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let cfg = AppConfig::from_lookup(|key| (key == ENV_LOG_LEVEL).then_some("DEBUG"));
        assert_eq!(cfg.log_level, Level::DEBUG);
    }
}
