//! Booking engine library modules.

pub mod domain;
pub mod outbound;
