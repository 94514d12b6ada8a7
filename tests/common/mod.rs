//! Shared test fixtures for integration tests.

use chrono::{NaiveDate, NaiveDateTime};
use hess_sim::sim::clock::FixedClock;
use hess_sim::sim::types::GenerationParams;

/// Anchor instant used by every fixed clock (2024-06-21 18:00:00).
pub fn anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 21)
        .and_then(|d| d.and_hms_opt(18, 0, 0))
        .expect("valid anchor date")
}

/// Clock frozen at [`anchor`].
pub fn fixed_clock() -> FixedClock {
    FixedClock::new(anchor())
}

/// Entry-point defaults (65 %, 24 h, seed 42).
pub fn default_params() -> GenerationParams {
    GenerationParams::default()
}
