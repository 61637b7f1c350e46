use chrono::{DateTime, Duration, Utc};

/// A single flood-control registration.
///
/// Events are counted while `timestamp` lies inside the caller's window and
/// become eligible for garbage collection once `expiration` has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloodEvent {
    pub event: String,
    pub identifier: String,
    pub timestamp: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
}

impl FloodEvent {
    /// Creates an event registered at `now` that expires after `window`.
    pub fn new(
        event: impl Into<String>,
        identifier: impl Into<String>,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Self {
        Self {
            event: event.into(),
            identifier: identifier.into(),
            timestamp: now,
            expiration: now
                .checked_add_signed(window)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}
