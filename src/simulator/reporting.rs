//! Wall-clock pacing of progress reports.
//!
//! The step engine has no notion of time; only the simulation loop consults the clock, through a [`ReportingState`].
use std::time::{Duration, Instant};

/// A progress report, emitted at most once per reporting interval.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Report {
    /// The tick at which the report is emitted.
    pub tick: u64,
    /// The number of ticks since the previous report.
    pub delta: u64,
}

/// Keeps track of when the last report was emitted and when the next one is due.
#[derive(Debug, Clone)]
pub struct ReportingState {
    last_printed_tick: u64,
    next_print_time: Option<Instant>,
    interval: Duration,
}

impl ReportingState {
    /// Create a reporting state emitting reports at least `interval` apart.
    /// The first poll always emits a report.
    pub fn new(interval: Duration) -> Self {
        ReportingState {
            last_printed_tick: 0,
            next_print_time: None,
            interval,
        }
    }

    /// Returns the tick of the last emitted report.
    pub fn last_printed_tick(&self) -> u64 {
        self.last_printed_tick
    }

    /// Returns a report if one is due at the given time.
    pub fn poll(&mut self, tick: u64, now: Instant) -> Option<Report> {
        if self.next_print_time.is_some_and(|due| now < due) {
            return None;
        }

        let report = Report {
            tick,
            delta: tick.saturating_sub(self.last_printed_tick),
        };
        self.last_printed_tick = tick;
        self.next_print_time = Some(now + self.interval);
        Some(report)
    }
}
