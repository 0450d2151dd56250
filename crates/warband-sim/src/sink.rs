//! Host-side helpers: a notification sink backed by `log`, and the HUD
//! poll throttle.

use std::time::{Duration, Instant};

use log::{info, warn};

use warband_core::enums::Severity;
use warband_core::events::EventSink;

/// Forwards notifications to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn notify(&mut self, text: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => info!(target: "warband::battle", "{text}"),
            Severity::Warning | Severity::Danger => warn!(target: "warband::battle", "{text}"),
        }
    }
}

/// Rate limiter for HUD polling, independent of the frame rate.
#[derive(Debug, Clone)]
pub struct HudThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl HudThrottle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            last: None,
        }
    }

    /// True at most once per interval; the first call always passes.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
