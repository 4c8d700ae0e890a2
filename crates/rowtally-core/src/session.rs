//! Clock and time-zone collaborators handed to triggers.

use chrono::{DateTime, Utc};
use rowtally_engine::engine::{ScriptTimeZone, TimestampPattern};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Per-host script session: the clock plus the configured time zone.
pub struct Session {
    clock: Box<dyn Clock>,
    time_zone: ScriptTimeZone,
}

impl Session {
    pub fn new(clock: Box<dyn Clock>, time_zone: ScriptTimeZone) -> Self {
        Session { clock, time_zone }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn time_zone(&self) -> ScriptTimeZone {
        self.time_zone
    }

    /// Render `instant` with `pattern` in the session time zone.
    pub fn format_date(&self, instant: DateTime<Utc>, pattern: &TimestampPattern) -> String {
        pattern.render(instant, self.time_zone)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Box::new(SystemClock), ScriptTimeZone::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_session() {
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 17, 0, 0).unwrap();
        let session = Session::new(Box::new(FixedClock(at)), "+07:00".parse().unwrap());
        assert_eq!(session.now(), at);
        assert_eq!(
            session.format_date(session.now(), &TimestampPattern::default()),
            "2025-02-01 00:00:00"
        );
    }
}
