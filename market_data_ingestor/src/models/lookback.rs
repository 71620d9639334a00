//! Trailing history window such as "1mo" or "5d".
//!
//! Tokens follow the period vocabulary most quote vendors use (`d`, `wk`, `mo`, `y`).
//! A [`Lookback`] resolves to a concrete `[start, end)` range with
//! [`Lookback::window_ending`], using calendar arithmetic for months and years.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookbackError {
    #[error("invalid lookback '{0}': expected <amount><d|wk|mo|y>, e.g. \"1mo\"")]
    InvalidToken(String),

    #[error("lookback amount must be greater than zero")]
    ZeroAmount,

    #[error("lookback {0} reaches before the supported date range")]
    OutOfRange(Lookback),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookbackUnit {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Lookback {
    pub amount: u32,
    pub unit: LookbackUnit,
}

impl Lookback {
    pub fn new(amount: u32, unit: LookbackUnit) -> Result<Self, LookbackError> {
        if amount == 0 {
            return Err(LookbackError::ZeroAmount);
        }
        Ok(Self { amount, unit })
    }

    /// The most recent calendar month.
    pub const fn one_month() -> Self {
        Self {
            amount: 1,
            unit: LookbackUnit::Month,
        }
    }

    /// Returns `(start, end)` where `start` is this lookback before `end`.
    pub fn window_ending(
        &self,
        end: DateTime<Utc>,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), LookbackError> {
        let start = match self.unit {
            LookbackUnit::Day => end.checked_sub_signed(Duration::days(i64::from(self.amount))),
            LookbackUnit::Week => end.checked_sub_signed(Duration::weeks(i64::from(self.amount))),
            LookbackUnit::Month => end.checked_sub_months(Months::new(self.amount)),
            LookbackUnit::Year => self
                .amount
                .checked_mul(12)
                .and_then(|m| end.checked_sub_months(Months::new(m))),
        };
        start
            .map(|start| (start, end))
            .ok_or(LookbackError::OutOfRange(*self))
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Self::one_month()
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let u = match self.unit {
            LookbackUnit::Day => "d",
            LookbackUnit::Week => "wk",
            LookbackUnit::Month => "mo",
            LookbackUnit::Year => "y",
        };
        write!(f, "{}{u}", self.amount)
    }
}

impl FromStr for Lookback {
    type Err = LookbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        let split = token
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| LookbackError::InvalidToken(s.to_string()))?;
        let (digits, unit) = token.split_at(split);
        let amount: u32 = digits
            .parse()
            .map_err(|_| LookbackError::InvalidToken(s.to_string()))?;
        let unit = match unit {
            "d" | "day" | "days" => LookbackUnit::Day,
            "w" | "wk" | "week" | "weeks" => LookbackUnit::Week,
            "mo" | "month" | "months" => LookbackUnit::Month,
            "y" | "yr" | "year" | "years" => LookbackUnit::Year,
            _ => return Err(LookbackError::InvalidToken(s.to_string())),
        };
        Lookback::new(amount, unit)
    }
}

impl TryFrom<String> for Lookback {
    type Error = LookbackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Lookback> for String {
    fn from(lb: Lookback) -> Self {
        lb.to_string()
    }
}
