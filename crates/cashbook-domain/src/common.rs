//! Direction enums, selectors and parse errors shared by cashbook primitives.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a cash movement relative to the business.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Applies the direction's sign to a non-negative amount.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Direction::In => amount,
            Direction::Out => -amount,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::In => "IN",
            Direction::Out => "OUT",
        };
        f.write_str(label)
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            _ => Err(ParseError::new("direction", value)),
        }
    }
}

/// Display filter applied to a book ledger after balances are computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectionFilter {
    #[default]
    All,
    In,
    Out,
}

impl DirectionFilter {
    pub fn matches(self, direction: Direction) -> bool {
        match self {
            DirectionFilter::All => true,
            DirectionFilter::In => direction == Direction::In,
            DirectionFilter::Out => direction == Direction::Out,
        }
    }
}

impl fmt::Display for DirectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DirectionFilter::All => "ALL",
            DirectionFilter::In => "IN",
            DirectionFilter::Out => "OUT",
        };
        f.write_str(label)
    }
}

impl FromStr for DirectionFilter {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(DirectionFilter::All),
            "in" => Ok(DirectionFilter::In),
            "out" => Ok(DirectionFilter::Out),
            _ => Err(ParseError::new("direction filter", value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when a textual selector (direction, period, view) cannot be parsed.
pub struct ParseError {
    kind: &'static str,
    value: String,
}

impl ParseError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl std::error::Error for ParseError {}
