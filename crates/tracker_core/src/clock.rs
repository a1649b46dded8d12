use time::{OffsetDateTime, UtcOffset};

/// Source of "now" for deadline checks, id generation and completion stamps.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time in the local offset, falling back to UTC when the offset
/// cannot be determined.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(local_offset())
    }
}

pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}
