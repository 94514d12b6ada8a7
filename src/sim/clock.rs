use chrono::{Local, NaiveDateTime};

/// Source of the "now" instant that anchors a generated series.
///
/// The generator places the last row of every series at [`Clock::now`], so
/// swapping the clock is the only thing needed to make timestamps
/// reproducible.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hess_sim::sim::clock::{Clock, FixedClock};
///
/// let anchor = NaiveDate::from_ymd_opt(2024, 6, 21)
///     .and_then(|d| d.and_hms_opt(18, 0, 0))
///     .unwrap();
/// let clock = FixedClock::new(anchor);
/// assert_eq!(clock.now(), anchor);
/// ```
pub trait Clock {
    /// Returns the current instant as a naive local timestamp.
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time of the host, in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    /// Instant returned by every call to `now`
    anchor: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock that always reports `anchor`.
    pub fn new(anchor: NaiveDateTime) -> Self {
        Self { anchor }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.anchor
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
