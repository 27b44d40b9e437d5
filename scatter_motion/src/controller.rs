// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::config::MotionConfig;
use crate::drag::DragTracker;
use crate::input::{InputQueue, MotionInput, PointerTarget};
use crate::viewport::Viewport;

bitflags::bitflags! {
    /// Motion state flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MotionFlags: u8 {
        /// A pointer drag is in progress.
        const DRAGGING    = 0b0000_0001;
        /// The current drag has travelled past the drag threshold.
        const MOVED       = 0b0000_0010;
        /// The per-frame loop is scheduled.
        const LOOP_ACTIVE = 0b0000_0100;
    }
}

/// Result of one frame step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Motion is pending; run another step next frame.
    Continue,
    /// Everything settled; the loop is no longer scheduled.
    Idle,
}

/// Snapshot of the pan state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewState {
    /// Current pan.
    pub pan: Vec2,
    /// Pan the smoothing filter is heading towards.
    pub target: Vec2,
    /// Velocity in view units per frame.
    pub velocity: Vec2,
    /// Drag and loop flags.
    pub flags: MotionFlags,
}

/// Owns the pan, pan target, and velocity of the canvas.
///
/// All mutation goes through the drag, wheel, and programmatic-pan entry
/// points; none of them do more than update a few fields and make sure the
/// per-frame loop is scheduled. [`MotionController::step`] does the work.
#[derive(Clone, Debug)]
pub struct MotionController {
    config: MotionConfig,
    pan: Vec2,
    target: Vec2,
    velocity: Vec2,
    flags: MotionFlags,
    drag: DragTracker,
    drag_baseline: Vec2,
    suppress_click_until: Option<f64>,
    queue: InputQueue,
    coalesced_seen: u64,
    loop_starts: u64,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

impl MotionController {
    /// Creates an idle controller at pan zero.
    #[must_use]
    pub fn new(config: MotionConfig) -> Self {
        let queue = InputQueue::new(config.queue_capacity);
        Self {
            config,
            pan: Vec2::ZERO,
            target: Vec2::ZERO,
            velocity: Vec2::ZERO,
            flags: MotionFlags::empty(),
            drag: DragTracker::default(),
            drag_baseline: Vec2::ZERO,
            suppress_click_until: None,
            queue,
            coalesced_seen: 0,
            loop_starts: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Current pan.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Current pan target.
    #[must_use]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Current flags.
    #[must_use]
    pub fn flags(&self) -> MotionFlags {
        self.flags
    }

    /// Snapshot of pan, target, velocity, and flags.
    #[must_use]
    pub fn state(&self) -> ViewState {
        ViewState {
            pan: self.pan,
            target: self.target,
            velocity: self.velocity,
            flags: self.flags,
        }
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.flags.contains(MotionFlags::DRAGGING)
    }

    /// Returns `true` while the per-frame loop is scheduled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.flags.contains(MotionFlags::LOOP_ACTIVE)
    }

    /// How many times the loop went from idle to scheduled.
    #[must_use]
    pub fn loop_starts(&self) -> u64 {
        self.loop_starts
    }

    /// Schedules the per-frame loop.
    ///
    /// Returns `true` only when the loop was idle; requests while it is
    /// already scheduled are absorbed.
    pub fn ensure_scheduled(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.flags.insert(MotionFlags::LOOP_ACTIVE);
        self.loop_starts += 1;
        true
    }

    /// Starts a drag at view-space `position`.
    ///
    /// Presses on interactive targets are ignored and return `false`.
    pub fn drag_start(&mut self, position: Point, time: f64, target: PointerTarget) -> bool {
        if target.is_interactive() {
            return false;
        }
        self.drag.start(position, time);
        self.drag_baseline = self.pan;
        self.target = self.pan;
        self.velocity = Vec2::ZERO;
        self.flags.insert(MotionFlags::DRAGGING);
        self.flags.remove(MotionFlags::MOVED);
        self.ensure_scheduled();
        true
    }

    /// Moves the active drag to view-space `position`.
    pub fn drag_move(&mut self, position: Point, time: f64) {
        if !self.is_dragging() {
            return;
        }
        let Some(offset) = self.drag.total_offset(position) else {
            return;
        };
        self.target = self.drag_baseline + offset;
        if let Some(sample) = self.drag.update(position, time) {
            let frame_ms = self.config.frame_ms.max(f64::MIN_POSITIVE);
            let elapsed = if sample.elapsed > 0.0 {
                sample.elapsed
            } else {
                frame_ms
            };
            self.velocity = sample.delta * (frame_ms / elapsed);
        }
        if offset.hypot() > self.config.drag_threshold {
            self.flags.insert(MotionFlags::MOVED);
        }
        self.ensure_scheduled();
    }

    /// Ends the drag.
    ///
    /// Always clears the drag flags, even without a matching start. If the
    /// drag moved past the threshold, clicks are suppressed for a short
    /// window. Velocity is kept so the canvas coasts.
    pub fn drag_end(&mut self, time: f64) {
        if self.flags.contains(MotionFlags::MOVED) {
            self.suppress_click_until = Some(time + self.config.just_dragged_ms);
        }
        self.flags.remove(MotionFlags::DRAGGING | MotionFlags::MOVED);
        self.drag.end();
        if self.velocity != Vec2::ZERO || self.pan != self.target {
            self.ensure_scheduled();
        }
    }

    /// Handles a platform pointer cancel exactly like a release.
    pub fn drag_cancel(&mut self, time: f64) {
        self.drag_end(time);
    }

    /// Returns `true` while a click right after a drag should be ignored.
    #[must_use]
    pub fn is_click_suppressed(&self, now: f64) -> bool {
        self.suppress_click_until.is_some_and(|until| now < until)
    }

    /// Converts a wheel delta into velocity.
    ///
    /// The increment is inverted so content follows the scroll direction and
    /// clamped per axis.
    pub fn wheel(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        let scale = self.config.wheel_scale;
        let max = self.config.wheel_max_step.abs();
        let nudge = |d: f64| (-d * scale).clamp(-max, max);
        self.velocity += Vec2::new(nudge(delta.x), nudge(delta.y));
        self.ensure_scheduled();
    }

    /// Glides to `target` using the smoothing loop.
    ///
    /// Any coasting velocity is dropped so the glide lands on `target`.
    pub fn animate_pan_to(&mut self, target: Vec2) {
        if !target.is_finite() {
            return;
        }
        self.target = target;
        self.velocity = Vec2::ZERO;
        self.ensure_scheduled();
    }

    /// Glides so that `world_point` ends up at the center of `viewport`.
    pub fn center_on(&mut self, world_point: Point, viewport: &Viewport) {
        self.animate_pan_to(viewport.pan_to_center(world_point));
    }

    /// Sets pan and target to `pan` immediately, without a glide.
    pub fn jump_to(&mut self, pan: Vec2) {
        if !pan.is_finite() {
            return;
        }
        self.pan = pan;
        self.target = pan;
        self.velocity = Vec2::ZERO;
    }

    /// Queues `input` for the next [`MotionController::tick`].
    pub fn push(&mut self, input: MotionInput) {
        self.queue.push(input);
        self.ensure_scheduled();
    }

    /// Queued input count.
    #[must_use]
    pub fn pending_input(&self) -> usize {
        self.queue.len()
    }

    /// Applies all queued input in arrival order without stepping.
    pub fn drain_input(&mut self) {
        while let Some(input) = self.queue.pop() {
            self.apply(input);
        }
    }

    /// Drains queued input, then runs one frame step.
    pub fn tick(&mut self, now: f64) -> StepOutcome {
        let coalesced = self.queue.coalesced();
        if coalesced != self.coalesced_seen {
            log::debug!(
                "{} input events coalesced since the last frame",
                coalesced - self.coalesced_seen
            );
            self.coalesced_seen = coalesced;
        }
        self.drain_input();
        if self.suppress_click_until.is_some_and(|until| now >= until) {
            self.suppress_click_until = None;
        }
        self.step()
    }

    fn apply(&mut self, input: MotionInput) {
        match input {
            MotionInput::PointerDown {
                position,
                time,
                target,
            } => {
                self.drag_start(position, time, target);
            }
            MotionInput::PointerMove { position, time } => self.drag_move(position, time),
            MotionInput::PointerUp { time } => self.drag_end(time),
            MotionInput::PointerCancel { time } => self.drag_cancel(time),
            MotionInput::Wheel { delta } => self.wheel(delta),
        }
    }

    /// Advances motion by one frame.
    ///
    /// Outside a drag, velocity above epsilon advances the target and decays
    /// by the friction factor; at or below epsilon it is zeroed. The pan then
    /// moves a fixed fraction of the way to the target. The loop unschedules
    /// itself on the first frame that is not dragging, has zero velocity, and
    /// has the pan within epsilon of the target on both axes; the pan snaps to
    /// the target at that point.
    pub fn step(&mut self) -> StepOutcome {
        if !self.is_active() {
            return StepOutcome::Idle;
        }
        let c = &self.config;
        let dragging = self.is_dragging();

        if !dragging {
            if self.velocity.hypot() > c.velocity_epsilon {
                self.target += self.velocity;
                self.velocity *= c.friction;
            }
            if self.velocity.hypot() <= c.velocity_epsilon {
                self.velocity = Vec2::ZERO;
            }
        }

        self.pan += (self.target - self.pan) * c.smoothing;

        let gap = self.target - self.pan;
        let settled = !dragging
            && self.velocity == Vec2::ZERO
            && gap.x.abs() <= c.pan_epsilon
            && gap.y.abs() <= c.pan_epsilon;
        if settled {
            self.pan = self.target;
            self.flags.remove(MotionFlags::LOOP_ACTIVE);
            StepOutcome::Idle
        } else {
            StepOutcome::Continue
        }
    }
}
