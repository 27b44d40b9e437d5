// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Tunables for [`crate::MotionController`].
///
/// Times are in milliseconds, lengths in view units, and velocities in view
/// units per frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Per-frame velocity decay factor, in `(0, 1)`.
    pub friction: f64,
    /// Fraction of the remaining pan/target distance covered each frame.
    pub smoothing: f64,
    /// Velocity magnitude at or below which motion counts as stopped.
    pub velocity_epsilon: f64,
    /// Per-axis pan/target distance at or below which the pan counts as settled.
    pub pan_epsilon: f64,
    /// Pointer travel beyond which a press becomes a drag.
    pub drag_threshold: f64,
    /// How long a trailing click is suppressed after a drag.
    pub just_dragged_ms: f64,
    /// Wheel delta to velocity scale.
    pub wheel_scale: f64,
    /// Largest velocity increment a single wheel event adds per axis.
    pub wheel_max_step: f64,
    /// Nominal frame duration used to express velocity per frame.
    pub frame_ms: f64,
    /// Capacity of the per-frame input queue.
    pub queue_capacity: usize,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            friction: 0.92,
            smoothing: 0.18,
            velocity_epsilon: 0.05,
            pan_epsilon: 0.3,
            drag_threshold: 4.0,
            just_dragged_ms: 160.0,
            wheel_scale: 0.25,
            wheel_max_step: 12.0,
            frame_ms: 16.0,
            queue_capacity: 64,
        }
    }
}
