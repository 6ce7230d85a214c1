use crate::calendar::WorkCalendar;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Scheduling configuration shared by the timeline and allocation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Earliest date from which work may be scheduled.
    pub start_date: NaiveDate,
    /// Length of one working day in hours. Fractional values are allowed;
    /// must be positive.
    pub hours_in_day: f64,
    /// Weekdays on which no work happens (e.g., Sat/Sun).
    #[serde(default)]
    pub excluded_weekdays: Vec<Weekday>,
    /// Explicit non-working dates (holidays, shutdowns).
    #[serde(default)]
    pub excluded_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveDayDuration { hours: f64 },
    AllWeekdaysExcluded,
    InvalidWeekdayNumber { number: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveDayDuration { hours } => {
                write!(f, "working day duration must be positive (got {hours})")
            }
            ConfigError::AllWeekdaysExcluded => {
                write!(f, "every weekday is excluded; no date can ever be scheduled")
            }
            ConfigError::InvalidWeekdayNumber { number } => {
                write!(f, "weekday number {number} is out of range (expected 0-6)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ScheduleConfig {
    pub fn new(start_date: NaiveDate, hours_in_day: f64) -> Self {
        Self {
            start_date,
            hours_in_day,
            excluded_weekdays: Vec::new(),
            excluded_dates: Vec::new(),
        }
    }

    pub fn with_excluded_weekdays<I>(mut self, weekdays: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        self.excluded_weekdays = weekdays.into_iter().collect();
        self
    }

    /// Set excluded weekdays from their numeric form (0 = Monday .. 6 = Sunday),
    /// the convention used by tracker-facing callers.
    pub fn with_excluded_weekday_numbers(
        mut self,
        numbers: &[u8],
    ) -> Result<Self, ConfigError> {
        let mut weekdays = Vec::with_capacity(numbers.len());
        for &number in numbers {
            weekdays.push(weekday_from_number(number)?);
        }
        self.excluded_weekdays = weekdays;
        Ok(self)
    }

    pub fn with_excluded_dates<I>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.excluded_dates = dates.into_iter().collect();
        self
    }

    /// Reject configurations the schedulers cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hours_in_day.is_finite() || self.hours_in_day <= 0.0 {
            return Err(ConfigError::NonPositiveDayDuration {
                hours: self.hours_in_day,
            });
        }
        let excluded: HashSet<Weekday> = self.excluded_weekdays.iter().copied().collect();
        if excluded.len() == 7 {
            return Err(ConfigError::AllWeekdaysExcluded);
        }
        Ok(())
    }

    pub fn build_calendar(&self) -> Result<WorkCalendar, ConfigError> {
        self.validate()?;
        Ok(WorkCalendar::new(
            self.excluded_weekdays.iter().copied(),
            self.excluded_dates.iter().copied(),
            self.hours_in_day,
        ))
    }
}

fn weekday_from_number(number: u8) -> Result<Weekday, ConfigError> {
    match number {
        0 => Ok(Weekday::Mon),
        1 => Ok(Weekday::Tue),
        2 => Ok(Weekday::Wed),
        3 => Ok(Weekday::Thu),
        4 => Ok(Weekday::Fri),
        5 => Ok(Weekday::Sat),
        6 => Ok(Weekday::Sun),
        _ => Err(ConfigError::InvalidWeekdayNumber { number }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn zero_day_duration_is_rejected() {
        let config = ScheduleConfig::new(d(2024, 1, 1), 0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveDayDuration { hours: 0.0 })
        );
    }

    #[test]
    fn negative_day_duration_is_rejected() {
        let config = ScheduleConfig::new(d(2024, 1, 1), -8.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn excluding_every_weekday_is_rejected() {
        let config = ScheduleConfig::new(d(2024, 1, 1), 8.0)
            .with_excluded_weekday_numbers(&[0, 1, 2, 3, 4, 5, 6])
            .unwrap();
        assert_eq!(config.validate(), Err(ConfigError::AllWeekdaysExcluded));
    }

    #[test]
    fn weekday_numbers_follow_monday_zero_convention() {
        let config = ScheduleConfig::new(d(2024, 1, 1), 8.0)
            .with_excluded_weekday_numbers(&[5, 6])
            .unwrap();
        assert_eq!(
            config.excluded_weekdays,
            vec![Weekday::Sat, Weekday::Sun]
        );
    }

    #[test]
    fn out_of_range_weekday_number_is_rejected() {
        let result = ScheduleConfig::new(d(2024, 1, 1), 8.0)
            .with_excluded_weekday_numbers(&[7]);
        assert_eq!(
            result.err(),
            Some(ConfigError::InvalidWeekdayNumber { number: 7 })
        );
    }
}
