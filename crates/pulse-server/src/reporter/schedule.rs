use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use pulse_config::{ConfigError, ReporterConfig};

/// When the weekly report fires: a weekday and a local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklySchedule {
    pub weekday: Weekday,
    pub at: NaiveTime,
}

impl WeeklySchedule {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unknown weekday or an
    /// out-of-range time.
    pub fn from_config(config: &ReporterConfig) -> Result<Self, ConfigError> {
        let weekday = config.parsed_weekday()?;
        let at = NaiveTime::from_hms_opt(config.hour, config.minute, 0).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: "reporter.hour".into(),
                reason: format!("{:02}:{:02} is not a time of day", config.hour, config.minute),
            }
        })?;
        Ok(Self { weekday, at })
    }

    /// Whether a run is owed at `now`.
    ///
    /// True on the scheduled weekday from the scheduled time until midnight,
    /// unless a run already fired that day. A tick that lands late still
    /// fires, and a day never fires twice.
    #[must_use]
    pub fn is_due(&self, now: NaiveDateTime, last_fired: Option<NaiveDate>) -> bool {
        let today = now.date();
        today.weekday() == self.weekday && now.time() >= self.at && last_fired != Some(today)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn friday_five() -> WeeklySchedule {
        WeeklySchedule {
            weekday: Weekday::Fri,
            at: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }

    fn at(date: (i32, u32, u32), hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    // 2026-10-16 is a Friday.
    #[rstest]
    #[case(at((2026, 10, 16), 17, 0), None, true)]
    #[case(at((2026, 10, 16), 17, 1), None, true)]
    #[case(at((2026, 10, 16), 23, 59), None, true)]
    #[case(at((2026, 10, 16), 16, 59), None, false)]
    #[case(at((2026, 10, 15), 17, 0), None, false)]
    #[case(at((2026, 10, 17), 17, 0), None, false)]
    #[case(
        at((2026, 10, 16), 17, 1),
        NaiveDate::from_ymd_opt(2026, 10, 16),
        false
    )]
    #[case(
        at((2026, 10, 16), 17, 0),
        NaiveDate::from_ymd_opt(2026, 10, 9),
        true
    )]
    fn due(
        #[case] now: NaiveDateTime,
        #[case] last_fired: Option<NaiveDate>,
        #[case] expected: bool,
    ) {
        assert_eq!(friday_five().is_due(now, last_fired), expected);
    }

    #[test]
    fn built_from_config() {
        let schedule = WeeklySchedule::from_config(&ReporterConfig::default()).unwrap();
        assert_eq!(schedule, friday_five());

        let config = ReporterConfig {
            weekday: "monday".into(),
            hour: 9,
            minute: 30,
            ..ReporterConfig::default()
        };
        let schedule = WeeklySchedule::from_config(&config).unwrap();
        assert_eq!(schedule.weekday, Weekday::Mon);
        assert_eq!(schedule.at, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }
}
