use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{DEFAULT_UPDATE_URL, MAX_CHECK_INTERVAL_DAYS, MAX_SCHEDULE_OFFSET_MINUTES};
use crate::error::ConfigError;

/// Settings for the update check loop.
///
/// The two offsets shift the scheduled check later (positive) or earlier
/// (negative) depending on the `HostActivity` reported on each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateCheckConfig {
    /// Version endpoint queried with `v`, `pro`, `check` and `unityversion`.
    pub update_url: String,
    /// Version of the package being checked. Defaults to this crate's version.
    pub app_version: String,
    /// Host (editor) version sent as `unityversion`.
    pub host_version: String,
    /// Days between checks; also sent as `check`.
    pub check_interval_days: f64,
    pub idle_offset_minutes: i64,
    pub simulating_offset_minutes: i64,
    /// `tick` keeps reporting work while the next check is closer than this.
    pub due_soon_minutes: i64,
    /// Host tick period, e.g. `"100ms"`.
    pub tick_interval: String,
    /// HTTP request timeout, e.g. `"30s"`.
    pub request_timeout: String,
}

impl Default for UpdateCheckConfig {
    fn default() -> Self {
        Self {
            update_url: DEFAULT_UPDATE_URL.to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            host_version: "unknown".to_string(),
            check_interval_days: 1.0,
            idle_offset_minutes: 20,
            simulating_offset_minutes: -20,
            due_soon_minutes: 10,
            tick_interval: "100ms".to_string(),
            request_timeout: "30s".to_string(),
        }
    }
}

impl UpdateCheckConfig {
    /// Rejects schedule values that cannot be turned into a check time.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field:
    /// * `check_interval_days` must be finite, positive and at most
    ///   `MAX_CHECK_INTERVAL_DAYS`
    /// * both activity offsets must lie within `MAX_SCHEDULE_OFFSET_MINUTES`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let days = self.check_interval_days;
        if !days.is_finite() || days <= 0.0 || days > MAX_CHECK_INTERVAL_DAYS {
            return Err(ConfigError::InvalidValue(
                "updater.check_interval_days".to_string(),
                format!("{} is not in (0, {}]", days, MAX_CHECK_INTERVAL_DAYS),
            ));
        }

        for (field, minutes) in [
            ("updater.idle_offset_minutes", self.idle_offset_minutes),
            ("updater.simulating_offset_minutes", self.simulating_offset_minutes),
        ] {
            if minutes.unsigned_abs() > MAX_SCHEDULE_OFFSET_MINUTES.unsigned_abs() {
                return Err(ConfigError::InvalidValue(
                    field.to_string(),
                    format!("{} is outside ±{}", minutes, MAX_SCHEDULE_OFFSET_MINUTES),
                ));
            }
        }
        Ok(())
    }

    /// The check interval as a chrono duration, rounded to milliseconds.
    ///
    /// Saturates instead of panicking when the configuration was not validated.
    pub fn check_interval(&self) -> chrono::Duration {
        let millis = (self.check_interval_days * 86_400_000.0) as i64;
        chrono::Duration::try_milliseconds(millis).unwrap_or(chrono::Duration::MAX)
    }

    /// The `check` query value. Whole numbers are sent without a fraction.
    pub fn check_rate_param(&self) -> String {
        format!("{}", self.check_interval_days)
    }

    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        parse_duration_field("updater.tick_interval", &self.tick_interval)
    }

    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration_field("updater.request_timeout", &self.request_timeout)
    }
}

fn parse_duration_field(field: &str, raw: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(raw)
        .map_err(|e| ConfigError::InvalidValue(field.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UpdateCheckConfig::default();
        assert_eq!(config.check_interval(), chrono::Duration::days(1));
        assert_eq!(config.check_rate_param(), "1");
        assert_eq!(config.tick_interval().unwrap(), Duration::from_millis(100));
        assert_eq!(config.request_timeout().unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn test_fractional_interval() {
        let config = UpdateCheckConfig {
            check_interval_days: 0.5,
            ..Default::default()
        };
        assert_eq!(config.check_interval(), chrono::Duration::hours(12));
        assert_eq!(config.check_rate_param(), "0.5");
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(UpdateCheckConfig::default().validate().is_ok());
    }

    #[test]
    fn test_check_interval_out_of_range() {
        for days in [1.0e9, 0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = UpdateCheckConfig {
                check_interval_days: days,
                ..Default::default()
            };
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::InvalidValue(field, _)) if field == "updater.check_interval_days"
                ),
                "{} days accepted",
                days
            );
        }
    }

    #[test]
    fn test_huge_interval_saturates() {
        let config = UpdateCheckConfig {
            check_interval_days: 1.0e300,
            ..Default::default()
        };
        assert_eq!(config.check_interval(), chrono::Duration::MAX);
    }

    #[test]
    fn test_offset_out_of_range() {
        let config = UpdateCheckConfig {
            simulating_offset_minutes: i64::MIN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(field, _)) if field == "updater.simulating_offset_minutes"
        ));
    }

    #[test]
    fn test_bad_duration_is_reported() {
        let config = UpdateCheckConfig {
            tick_interval: "soon".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.tick_interval(),
            Err(ConfigError::InvalidValue(field, _)) if field == "updater.tick_interval"
        ));
    }
}
