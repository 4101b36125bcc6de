//! Injected time source

use chrono::{DateTime, Utc};

/// Time source consulted for every month computation.
///
/// Injected into the service so tests can pin the calendar; production uses
/// [`SystemClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
