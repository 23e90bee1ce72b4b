use chrono::{DateTime, Utc};

/// Port for time abstraction
///
/// This allows callers to use different time sources:
/// - Real system time for production
/// - The mock-now override for tests
/// - Fixed time for deterministic tests
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> DateTime<Utc>;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
