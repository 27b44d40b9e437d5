// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time sources and the relayout debouncer.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic time source in milliseconds.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> f64;
}

/// Wall clock measured from construction.
#[derive(Copy, Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock advanced by hand.
///
/// Clones share the same time, so a test can keep one handle and give another
/// to the engine.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// A clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `ms`.
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    /// Sets the current time.
    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Coalesces bursts of requests into one firing.
///
/// Each request moves the deadline to `now + delay`, so the last request in a
/// burst decides when it fires.
#[derive(Clone, Debug, PartialEq)]
pub struct Debouncer {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl Debouncer {
    /// A debouncer with nothing pending.
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            deadline: None,
        }
    }

    /// Requests a firing at `now + delay`, superseding any pending one.
    pub fn request(&mut self, now: f64) {
        self.deadline = Some(now + self.delay_ms);
    }

    /// Returns `true` once when the deadline has passed, clearing it.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` while a firing is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drops any pending firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_request_wins() {
        let mut d = Debouncer::new(120.0);
        d.request(0.0);
        d.request(100.0);
        assert!(!d.poll(150.0), "superseded deadline must not fire");
        assert!(d.poll(220.0), "latest deadline fires");
        assert!(!d.poll(500.0), "fires once");
    }

    #[test]
    fn cancel_clears() {
        let mut d = Debouncer::new(10.0);
        d.request(0.0);
        assert!(d.is_pending());
        d.cancel();
        assert!(!d.poll(100.0), "cancelled request fires");
    }

    #[test]
    fn manual_clock_is_shared() {
        let a = ManualClock::new();
        let b = a.clone();
        a.advance(5.0);
        b.advance(2.5);
        assert_eq!(a.now_ms(), 7.5);
        b.set(1.0);
        assert_eq!(a.now_ms(), 1.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let c = SystemClock::default();
        let first = c.now_ms();
        assert!(c.now_ms() >= first, "time went backwards");
    }
}
