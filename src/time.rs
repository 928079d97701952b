use crate::error::ScheduleError;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Whole minutes since midnight of the first day.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd)]
#[serde(transparent)]
pub struct Time(pub u64);

impl Time {
    pub const MINUTES_PER_DAY: u64 = 1440;

    pub(crate) fn is_overlapping(time: &(Time, Time), window: &(Time, Time)) -> bool {
        time.0 < window.1 && time.1 > window.0
    }

    pub fn saturating_add(self, minutes: u64) -> Time {
        Time(self.0.saturating_add(minutes))
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let days = self.0 / Self::MINUTES_PER_DAY;
        let remaining = self.0 % Self::MINUTES_PER_DAY;
        let hours = remaining / 60;
        let mins = remaining % 60;
        write!(f, "DAY{} {:02}:{:02}", days + 1, hours, mins)
    }
}

/// Accepts `HHMM` or `HH:MM` on a 24 hour clock.
impl FromStr for Time {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTime(s.to_string());
        let digits = match s.trim().split_once(':') {
            Some((h, m)) if h.len() == 2 && m.len() == 2 => format!("{}{}", h, m),
            Some(_) => return Err(invalid()),
            None => s.trim().to_string(),
        };
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let hours: u64 = digits[..2].parse().map_err(|_| invalid())?;
        let mins: u64 = digits[2..].parse().map_err(|_| invalid())?;
        if hours > 23 || mins > 59 {
            return Err(invalid());
        }
        Ok(Time(hours * 60 + mins))
    }
}

impl Add<u64> for Time {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Time(self.0 + rhs)
    }
}

impl Sub<Time> for Time {
    type Output = u64;

    fn sub(self, rhs: Time) -> Self::Output {
        self.0 - rhs.0
    }
}
