use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::*;
use crate::settings::{Settings, SettingsUpdate};

/// Widget config.
///
/// Every field is optional in the config file.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    /// The base URL of the prayer times API, f.e. "https://api.aladhan.com/v1".
    pub api_url: String,

    /// The calculation method used by the prayer times API.
    ///
    /// Reference: https://aladhan.com/calculation-methods
    pub calculation_method: u8,

    /// Requests for prayer times are abandoned after this many seconds.
    pub request_timeout_secs: u64,

    /// The interval in which the countdown is refreshed.
    pub tick_millis: u64,

    /// The duration during which the error status is displayed before
    /// falling back to a fixed schedule.
    pub fallback_delay_millis: u64,

    /// Initial widget settings, using the same keys as host messages,
    /// f.e. `city = "Lyon"` or `displayCount = "all"`.
    ///
    /// The host may override any of them at runtime.
    pub defaults: Option<toml::Table>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            calculation_method: DEFAULT_CALCULATION_METHOD,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            tick_millis: DEFAULT_TICK_MILLIS,
            fallback_delay_millis: DEFAULT_FALLBACK_DELAY_MILLIS,
            defaults: None,
        }
    }
}

impl Config {
    /// Read the config file listed in the `SALAH_CONFIG` environment variable,
    /// or use the default config if that variable is not set.
    ///
    /// # Panics
    /// - when `SALAH_CONFIG` does not point to a valid TOML config
    /// - when an assertion on one or more values fails
    pub fn load() -> Config {
        let config = match std::env::var(CONFIG_ENV_VAR) {
            Ok(f) => {
                let path = PathBuf::from(f);
                log::info!("using config file {:?}", &path);
                Config::parse_file(&path).expect("failed to parse config file")
            }
            Err(_) => {
                log::info!("'{}' is not set, using default config", CONFIG_ENV_VAR);
                Config::default()
            }
        };
        check_config(&config);
        config
    }

    pub fn parse_file(f: &Path) -> anyhow::Result<Config> {
        let f_str = std::fs::read_to_string(f)?;
        Config::parse_str(&f_str)
    }

    pub fn parse_str(f_str: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(f_str)?;
        Ok(config)
    }

    /// The settings before the host sends its first update.
    pub fn initial_settings(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(defaults) = &self.defaults {
            match serde_json::to_value(defaults) {
                Ok(value) => {
                    let _ = settings.merge(SettingsUpdate::from_json(&value));
                }
                Err(e) => log::warn!("ignoring default settings: {}", e),
            }
        }
        settings
    }
}

/// Try to catch configuration errors early.
fn check_config(config: &Config) {
    assert!(config.tick_millis > 0, "config: 'tick_millis' must be greater than zero!");
    assert!(
        !config.api_url.is_empty(),
        "config: 'api_url' must not be empty!"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prayer::Language;
    use crate::schedule::DisplayMode;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse_str("").unwrap();
        assert_eq!(DEFAULT_API_URL, config.api_url);
        assert_eq!(DEFAULT_TICK_MILLIS, config.tick_millis);
        assert_eq!(Settings::default(), config.initial_settings());
    }

    #[test]
    fn test_default_settings_table() {
        let config = Config::parse_str(
            r#"
            calculation_method = 3

            [defaults]
            city = "Rabat"
            country = "Morocco"
            displayCount = "remaining"
            language = "en"
            showNativeName = false
            "#,
        )
        .unwrap();
        assert_eq!(3, config.calculation_method);

        let settings = config.initial_settings();
        assert_eq!("Rabat", settings.city);
        assert_eq!("Morocco", settings.country);
        assert_eq!(DisplayMode::Remaining, settings.display_mode);
        assert_eq!(Language::English, settings.language);
        assert!(!settings.show_native_name);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::parse_str("tick_millis = \"fast\"").is_err());
    }

    #[test]
    #[should_panic]
    fn test_check_zero_tick() {
        let config = Config {
            tick_millis: 0,
            ..Config::default()
        };
        check_config(&config);
    }
}
