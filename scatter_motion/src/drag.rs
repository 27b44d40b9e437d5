// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking: pointer deltas between timed samples plus the total offset.

use kurbo::{Point, Vec2};

/// Movement between two consecutive pointer samples.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSample {
    /// Pointer displacement since the previous sample.
    pub delta: Vec2,
    /// Milliseconds since the previous sample.
    pub elapsed: f64,
}

/// Tracks one drag gesture.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragTracker {
    start: Option<Point>,
    last: Option<(Point, f64)>,
}

impl DragTracker {
    /// Begins a gesture at `pos`, sampled at `time`.
    pub fn start(&mut self, pos: Point, time: f64) {
        self.start = Some(pos);
        self.last = Some((pos, time));
    }

    /// Records a new sample, returning the movement since the previous one.
    pub fn update(&mut self, pos: Point, time: f64) -> Option<DragSample> {
        self.start?;
        let (last_pos, last_time) = self.last.replace((pos, time))?;
        Some(DragSample {
            delta: pos - last_pos,
            elapsed: time - last_time,
        })
    }

    /// Offset of `pos` from the gesture start.
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.start.map(|start| pos - start)
    }

    /// Ends the gesture.
    pub fn end(&mut self) {
        self.start = None;
        self.last = None;
    }
}
