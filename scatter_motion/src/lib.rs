// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter Motion: inertial panning and smooth recentering.
//!
//! [`MotionController`] owns the pan state of an infinite canvas: the current
//! pan, the pan target, a velocity, and a few flags. Input handlers only touch
//! those fields; the actual motion happens in a single per-frame step that the
//! host runs while the controller reports itself active.
//!
//! - Dragging sets the pan target from the pointer and samples a velocity so
//!   that releasing the pointer leaves the canvas coasting.
//! - Wheel input never moves the pan directly; it nudges the velocity.
//! - Each frame, velocity advances the target and decays by a friction
//!   factor, and the pan follows the target through a single-pole low-pass
//!   filter.
//! - Programmatic pans ([`MotionController::animate_pan_to`]) just move the
//!   target; the same smoothing glides the pan there.
//!
//! Pan is expressed in view units as the offset of the world origin, so a
//! world point `p` appears at `p + pan` in the view. [`Viewport`] holds the
//! view size and converts between the two spaces.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Vec2;
//! use scatter_motion::{MotionConfig, MotionController, StepOutcome};
//!
//! let mut motion = MotionController::new(MotionConfig::default());
//! motion.animate_pan_to(Vec2::new(500.0, 0.0));
//!
//! let mut frames = 0;
//! while motion.step() == StepOutcome::Continue {
//!     frames += 1;
//! }
//! assert!(frames < 60);
//! assert_eq!(motion.pan(), Vec2::new(500.0, 0.0));
//! ```
//!
//! High-frequency input can also be queued with [`MotionController::push`]
//! and drained once per frame by [`MotionController::tick`].

mod config;
mod controller;
mod drag;
mod input;
mod viewport;

pub use config::MotionConfig;
pub use controller::{MotionController, MotionFlags, StepOutcome, ViewState};
pub use drag::{DragSample, DragTracker};
pub use input::{InputQueue, MotionInput, PointerTarget};
pub use viewport::Viewport;
