use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Wall-clock "HH:MM" value with no date attached. All diary answers use
/// this form, so interval arithmetic has to assume the night crosses
/// midnight whenever the end does not lie strictly after the start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u32,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid time `{0}`, expected zero-padded 24-hour HH:MM")]
pub struct ParseTimeError(pub String);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { minutes: hour * 60 + minute })
        } else {
            None
        }
    }

    pub fn hour(&self) -> u32 {
        self.minutes / 60
    }

    pub fn minute(&self) -> u32 {
        self.minutes % 60
    }

    pub fn minute_of_day(&self) -> u32 {
        self.minutes
    }

    /// Minutes from `self` to `end`, wrapping past midnight when `end` is
    /// not strictly after `self`. `end == self` yields a full day (1440),
    /// never zero: the diary has no same-instant intervals.
    pub fn minutes_until(&self, end: TimeOfDay) -> u32 {
        if end.minutes <= self.minutes {
            (MINUTES_PER_DAY - self.minutes) + end.minutes
        } else {
            end.minutes - self.minutes
        }
    }

    /// Wrapping addition on the clock face. The offset is reduced modulo a
    /// day first, so arbitrarily large minute counts cannot overflow.
    pub fn add_minutes(&self, minutes: u32) -> TimeOfDay {
        TimeOfDay { minutes: (self.minutes + minutes % MINUTES_PER_DAY) % MINUTES_PER_DAY }
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(ParseTimeError(value.to_owned()));
        }
        let digits = |range: std::ops::Range<usize>| -> Option<u32> {
            trimmed.get(range).and_then(|part| {
                if part.bytes().all(|b| b.is_ascii_digit()) {
                    part.parse().ok()
                } else {
                    None
                }
            })
        };
        match (digits(0..2), digits(3..5)) {
            (Some(hour), Some(minute)) => {
                TimeOfDay::new(hour, minute).ok_or_else(|| ParseTimeError(value.to_owned()))
            }
            _ => Err(ParseTimeError(value.to_owned())),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
