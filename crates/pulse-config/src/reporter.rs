//! Weekly reporter schedule configuration.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_enabled() -> bool {
    true
}

fn default_weekday() -> String {
    "Fri".to_string()
}

const fn default_hour() -> u32 {
    17
}

const fn default_check_interval_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReporterConfig {
    /// Whether `pulse serve` starts the weekly reporter.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Day of the week the summary goes out (`Mon`..`Sun`, or full names).
    #[serde(default = "default_weekday")]
    pub weekday: String,

    /// Local hour (0-23).
    #[serde(default = "default_hour")]
    pub hour: u32,

    /// Minute within the hour (0-59).
    #[serde(default)]
    pub minute: u32,

    /// How often the timer loop checks the schedule.
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            weekday: default_weekday(),
            hour: default_hour(),
            minute: 0,
            check_interval_secs: default_check_interval_secs(),
        }
    }
}

impl ReporterConfig {
    /// Parse `weekday` into a `chrono::Weekday`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the name is not a weekday.
    pub fn parsed_weekday(&self) -> Result<Weekday, ConfigError> {
        self.weekday
            .parse::<Weekday>()
            .map_err(|_| ConfigError::InvalidValue {
                field: "reporter.weekday".into(),
                reason: format!("'{}' is not a day of the week", self.weekday),
            })
    }

    /// Validate hour and minute ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first out-of-range field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_weekday()?;
        if self.hour > 23 {
            return Err(ConfigError::InvalidValue {
                field: "reporter.hour".into(),
                reason: format!("{} is not in 0..=23", self.hour),
            });
        }
        if self.minute > 59 {
            return Err(ConfigError::InvalidValue {
                field: "reporter.minute".into(),
                reason: format!("{} is not in 0..=59", self.minute),
            });
        }
        if self.check_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reporter.check_interval_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fire_friday_at_five() {
        let config = ReporterConfig::default();
        assert!(config.enabled);
        assert_eq!(config.parsed_weekday().unwrap(), Weekday::Fri);
        assert_eq!(config.hour, 17);
        assert_eq!(config.minute, 0);
        assert_eq!(config.check_interval_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_weekday() {
        let config = ReporterConfig {
            weekday: "Caturday".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "reporter.weekday"
        ));
    }

    #[test]
    fn rejects_out_of_range_hour() {
        let config = ReporterConfig {
            hour: 24,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
