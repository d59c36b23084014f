#![forbid(unsafe_code)]

use chrono::{SecondsFormat, TimeZone, Utc};

use ticketease_contracts::WallClockMs;

/// Wall-clock source. Injected so repositories stay deterministic under
/// test; the runtime wires `SystemClock`.
pub trait Clock {
    fn now_ms(&mut self) -> WallClockMs;
}

/// Real wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&mut self) -> WallClockMs {
        WallClockMs(Utc::now().timestamp_millis().max(0) as u64)
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub WallClockMs);

impl Clock for FixedClock {
    fn now_ms(&mut self) -> WallClockMs {
        self.0
    }
}

/// Starts at an instant and advances by a fixed step per reading.
#[derive(Debug, Clone, Copy)]
pub struct SteppingClock {
    next: WallClockMs,
    step_ms: u64,
}

impl SteppingClock {
    pub fn new(start: WallClockMs, step_ms: u64) -> Self {
        Self {
            next: start,
            step_ms,
        }
    }
}

impl Clock for SteppingClock {
    fn now_ms(&mut self) -> WallClockMs {
        let now = self.next;
        self.next = WallClockMs(self.next.0.saturating_add(self.step_ms));
        now
    }
}

/// Epoch milliseconds rendered in the `YYYY-MM-DDTHH:MM:SS.mmmZ` shape the
/// persisted `createdAt` field carries. Out-of-range readings render as the
/// epoch.
pub fn iso8601_utc(at: WallClockMs) -> String {
    match Utc.timestamp_millis_opt(at.0 as i64).single() {
        Some(instant) => instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => "1970-01-01T00:00:00.000Z".to_string(),
    }
}
