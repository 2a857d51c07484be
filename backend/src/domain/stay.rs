//! Stay periods and the interval overlap predicate.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Validation errors returned by [`StayPeriod::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StayValidationError {
    CheckoutNotAfterCheckin,
}

impl fmt::Display for StayValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckoutNotAfterCheckin => write!(f, "checkout must be after checkin"),
        }
    }
}

impl std::error::Error for StayValidationError {}

/// Half-open stay interval `[checkin, checkout)` in whole days.
///
/// ## Invariants
/// - `checkin < checkout`; every stay covers at least one night.
/// - Overlap is strict: a stay ending on the day another begins does not
///   conflict with it, so back-to-back stays are always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StayPeriodDto", into = "StayPeriodDto")]
pub struct StayPeriod {
    checkin: NaiveDate,
    checkout: NaiveDate,
}

impl StayPeriod {
    /// Validate and construct a stay period.
    pub fn new(checkin: NaiveDate, checkout: NaiveDate) -> Result<Self, StayValidationError> {
        if checkin >= checkout {
            return Err(StayValidationError::CheckoutNotAfterCheckin);
        }
        Ok(Self { checkin, checkout })
    }

    /// First occupied day.
    pub fn checkin(&self) -> NaiveDate {
        self.checkin
    }

    /// First day after the stay ends.
    pub fn checkout(&self) -> NaiveDate {
        self.checkout
    }

    /// Whether two stays share at least one occupied day.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.checkin < other.checkout && other.checkin < self.checkout
    }

    /// Number of nights covered by the stay.
    pub fn nights(&self) -> i64 {
        (self.checkout - self.checkin).num_days()
    }
}

impl fmt::Display for StayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.checkin, self.checkout)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StayPeriodDto {
    checkin: NaiveDate,
    checkout: NaiveDate,
}

impl From<StayPeriod> for StayPeriodDto {
    fn from(value: StayPeriod) -> Self {
        Self {
            checkin: value.checkin,
            checkout: value.checkout,
        }
    }
}

impl TryFrom<StayPeriodDto> for StayPeriod {
    type Error = StayValidationError;

    fn try_from(value: StayPeriodDto) -> Result<Self, Self::Error> {
        StayPeriod::new(value.checkin, value.checkout)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn day(ordinal: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .expect("valid base date")
            .checked_add_days(chrono::Days::new(u64::from(ordinal)))
            .expect("offset stays in range")
    }

    fn stay(checkin: u32, checkout: u32) -> StayPeriod {
        StayPeriod::new(day(checkin), day(checkout)).expect("valid stay")
    }

    #[rstest]
    fn rejects_inverted_and_empty_intervals() {
        assert!(matches!(
            StayPeriod::new(day(5), day(5)),
            Err(StayValidationError::CheckoutNotAfterCheckin)
        ));
        assert!(StayPeriod::new(day(6), day(5)).is_err());
    }

    #[rstest]
    #[case(stay(5, 10), stay(8, 12), true)]
    #[case(stay(5, 10), stay(1, 6), true)]
    #[case(stay(5, 10), stay(6, 9), true)]
    #[case(stay(5, 10), stay(1, 20), true)]
    #[case(stay(5, 10), stay(11, 15), false)]
    #[case(stay(5, 10), stay(1, 4), false)]
    fn overlap_follows_half_open_semantics(
        #[case] a: StayPeriod,
        #[case] b: StayPeriod,
        #[case] expected: bool,
    ) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }

    #[rstest]
    fn back_to_back_stays_do_not_conflict() {
        let first = stay(5, 10);
        let second = stay(10, 14);
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[rstest]
    fn counts_nights() {
        assert_eq!(stay(5, 10).nights(), 5);
        assert_eq!(stay(5, 6).nights(), 1);
    }

    #[rstest]
    fn serde_rejects_inverted_intervals() {
        let json = r#"{"checkin":"2026-03-10","checkout":"2026-03-05"}"#;
        let result: Result<StayPeriod, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[rstest]
    fn serde_round_trips() {
        let value = stay(5, 10);
        let json = serde_json::to_string(&value).expect("stay serialises");
        let back: StayPeriod = serde_json::from_str(&json).expect("stay deserialises");
        assert_eq!(back, value);
    }
}
