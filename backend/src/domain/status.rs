//! Booking status enum and parser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a booking.
///
/// `Cancelled` and `Done` are terminal; no transition leads out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Done,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Done => "done",
        }
    }

    /// Whether the status counts toward availability checks.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`BookingStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBookingStatusError {
    pub input: String,
}

impl fmt::Display for ParseBookingStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid booking status: {}", self.input)
    }
}

impl std::error::Error for ParseBookingStatusError {}

impl FromStr for BookingStatus {
    type Err = ParseBookingStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "done" => Ok(Self::Done),
            _ => Err(ParseBookingStatusError {
                input: value.to_owned(),
            }),
        }
    }
}
