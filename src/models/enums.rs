//! Enumeration types for constrained booking values.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sub-daily scheduling unit of a booking.
///
/// Variants are declared in chronological order, so the derived [`Ord`]
/// places [`Shift::Day`] before [`Shift::Night`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shift {
    /// Day shift.
    Day,
    /// Night shift.
    Night,
}

impl Shift {
    /// Returns the lowercase wire name of the shift.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

impl core::fmt::Display for Shift {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = ParseEnumError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            _ => Err(ParseEnumError::new("shift", s)),
        }
    }
}

/// Presentation tab selecting which classified view is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingTab {
    /// Today and upcoming bookings.
    #[default]
    Active,
    /// Bookings dated strictly before today.
    Expired,
}

impl FromStr for BookingTab {
    type Err = ParseEnumError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseEnumError::new("tab", s)),
        }
    }
}

/// Error returned when parsing a [`Shift`] or [`BookingTab`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseEnumError {
    /// Name of the enumeration being parsed.
    kind: &'static str,
    /// The rejected input.
    value: String,
}

impl ParseEnumError {
    /// Creates a parse error for `value`.
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
