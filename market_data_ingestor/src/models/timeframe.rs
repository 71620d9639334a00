//! Bar interval expressed as amount × unit.
//!
//! [`TimeFrame`] only guarantees a non-zero amount. Which combinations a vendor
//! actually serves (e.g. Alpaca's 1-59 minutes, Yahoo's fixed interval list) is
//! checked by each provider when it builds its request.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeFrameError {
    #[error("Invalid amount for {:?}: {}", unit, message)]
    InvalidAmount {
        unit: TimeFrameUnit,
        message: String,
    },

    #[error("Invalid input: {}", message)]
    InvalidInput { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFrameUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

/// A timeframe = amount × unit (e.g., 5-Minute, 1-Day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    pub fn new(amount: u32, unit: TimeFrameUnit) -> Result<Self, TimeFrameError> {
        if amount == 0 {
            return Err(TimeFrameError::InvalidAmount {
                unit,
                message: "amount must be greater than zero".into(),
            });
        }
        Ok(Self { amount, unit })
    }

    /// One daily bar, the interval the screener runs on by default.
    pub const fn day() -> Self {
        Self {
            amount: 1,
            unit: TimeFrameUnit::Day,
        }
    }
}

impl Default for TimeFrame {
    fn default() -> Self {
        Self::day()
    }
}

/// Display/parse for config and CLI ergonomics (`"5m"`, `"1h"`, `"1D"`, `"1W"`, `"6M"`)
impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let u = match self.unit {
            TimeFrameUnit::Minute => "m",
            TimeFrameUnit::Hour => "h",
            TimeFrameUnit::Day => "D",
            TimeFrameUnit::Week => "W",
            TimeFrameUnit::Month => "M",
        };
        write!(f, "{}{u}", self.amount)
    }
}

impl FromStr for TimeFrame {
    type Err = TimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| TimeFrameError::InvalidInput {
                message: format!("missing unit in timeframe '{s}'"),
            })?;
        let (digits, unit) = s.split_at(split);
        let amount: u32 = digits.parse().map_err(|_| TimeFrameError::InvalidInput {
            message: format!("invalid amount in timeframe '{s}'"),
        })?;

        // "M" is month, "m" is minute; everything else is case-insensitive.
        let unit = match unit {
            "M" | "mo" | "Mo" => TimeFrameUnit::Month,
            "m" => TimeFrameUnit::Minute,
            other => match other.to_lowercase().as_str() {
                "min" | "minute" => TimeFrameUnit::Minute,
                "h" | "hr" | "hour" => TimeFrameUnit::Hour,
                "d" | "day" => TimeFrameUnit::Day,
                "w" | "wk" | "week" => TimeFrameUnit::Week,
                "month" => TimeFrameUnit::Month,
                _ => {
                    return Err(TimeFrameError::InvalidInput {
                        message: format!("Invalid timeframe unit: {unit}"),
                    });
                }
            },
        };
        TimeFrame::new(amount, unit)
    }
}

impl TryFrom<String> for TimeFrame {
    type Error = TimeFrameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeFrame> for String {
    fn from(tf: TimeFrame) -> Self {
        tf.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_forms() {
        assert_eq!("5m".parse::<TimeFrame>().unwrap(), TimeFrame::new(5, TimeFrameUnit::Minute).unwrap());
        assert_eq!("1h".parse::<TimeFrame>().unwrap().unit, TimeFrameUnit::Hour);
        assert_eq!("1D".parse::<TimeFrame>().unwrap(), TimeFrame::day());
        assert_eq!("1d".parse::<TimeFrame>().unwrap(), TimeFrame::day());
        assert_eq!("1W".parse::<TimeFrame>().unwrap().unit, TimeFrameUnit::Week);
        assert_eq!("3M".parse::<TimeFrame>().unwrap().unit, TimeFrameUnit::Month);
        assert_eq!("1mo".parse::<TimeFrame>().unwrap().unit, TimeFrameUnit::Month);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for tf in ["15m", "4h", "1D", "1W", "6M"] {
            assert_eq!(tf.parse::<TimeFrame>().unwrap().to_string(), tf);
        }
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!(matches!(
            "0D".parse::<TimeFrame>(),
            Err(TimeFrameError::InvalidAmount { .. })
        ));
        assert!("D".parse::<TimeFrame>().is_err());
        assert!("12".parse::<TimeFrame>().is_err());
        assert!("5x".parse::<TimeFrame>().is_err());
    }

    #[test]
    fn deserializes_from_string() {
        let tf: TimeFrame = serde_json::from_str("\"1D\"").unwrap();
        assert_eq!(tf, TimeFrame::day());
        assert_eq!(serde_json::to_string(&tf).unwrap(), "\"1D\"");
    }
}
