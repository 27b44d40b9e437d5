// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::VecDeque;

use kurbo::{Point, Vec2};

/// What a pointer press landed on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// Empty canvas.
    #[default]
    Background,
    /// The body of a card.
    Entry,
    /// A text field, button, or other form control.
    FormControl,
    /// A hyperlink.
    Hyperlink,
    /// An embedded frame such as a video player.
    EmbeddedFrame,
}

impl PointerTarget {
    /// Returns `true` for targets that keep their own pointer handling and
    /// must never start a pan.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            Self::FormControl | Self::Hyperlink | Self::EmbeddedFrame
        )
    }
}

/// A raw input event waiting for the next frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MotionInput {
    /// Pointer pressed.
    PointerDown {
        /// View-space pointer position.
        position: Point,
        /// Event time in milliseconds.
        time: f64,
        /// What the press landed on.
        target: PointerTarget,
    },
    /// Pointer moved.
    PointerMove {
        /// View-space pointer position.
        position: Point,
        /// Event time in milliseconds.
        time: f64,
    },
    /// Pointer released.
    PointerUp {
        /// Event time in milliseconds.
        time: f64,
    },
    /// Pointer stream cancelled by the platform.
    PointerCancel {
        /// Event time in milliseconds.
        time: f64,
    },
    /// Wheel or trackpad scroll.
    Wheel {
        /// Scroll delta in view units.
        delta: Vec2,
    },
}

impl MotionInput {
    fn is_coalescable(&self) -> bool {
        matches!(self, Self::PointerMove { .. } | Self::Wheel { .. })
    }
}

/// Bounded FIFO of [`MotionInput`] drained once per frame.
///
/// When full, a new pointer move replaces a trailing move and a new wheel
/// event is summed into a trailing wheel event. Any other event evicts the
/// oldest move or wheel event (or the oldest event if there is none), so
/// presses and releases are never lost to a burst of moves.
#[derive(Clone, Debug)]
pub struct InputQueue {
    events: VecDeque<MotionInput>,
    capacity: usize,
    coalesced: u64,
}

impl InputQueue {
    /// Creates a queue holding at most `capacity` events (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            coalesced: 0,
        }
    }

    /// Enqueues `event`, coalescing when the queue is full.
    pub fn push(&mut self, event: MotionInput) {
        if self.events.len() < self.capacity {
            self.events.push_back(event);
            return;
        }
        self.coalesced += 1;
        match (event, self.events.back_mut()) {
            (MotionInput::PointerMove { .. }, Some(last @ MotionInput::PointerMove { .. })) => {
                *last = event;
            }
            (MotionInput::Wheel { delta }, Some(MotionInput::Wheel { delta: acc })) => {
                *acc += delta;
            }
            _ => {
                let victim = self
                    .events
                    .iter()
                    .position(MotionInput::is_coalescable)
                    .unwrap_or(0);
                let dropped = self.events.remove(victim);
                log::trace!("input queue full, dropped {dropped:?}");
                self.events.push_back(event);
            }
        }
    }

    /// Removes the oldest event.
    pub fn pop(&mut self) -> Option<MotionInput> {
        self.events.pop_front()
    }

    /// Number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pushes that had to coalesce or evict.
    #[must_use]
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}
