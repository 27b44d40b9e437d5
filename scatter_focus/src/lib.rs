// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter Focus: directional focus navigation over scattered cards.
//!
//! Cards live at arbitrary world-space rectangles, so "the card to the right"
//! is a geometric question rather than an index step. This crate answers it:
//!
//! - [`FocusSpace`] is a borrowed view of candidate [`FocusEntry`] values
//!   (an id plus a world rectangle), in working-set order.
//! - [`best_in_direction`] scores candidates by center distance plus half of
//!   their off-axis deviation, optionally keeping only candidates strictly on
//!   the requested side.
//! - [`nearest_to`] picks the card whose center is closest to a point.
//! - [`FocusNavigator`] tracks the active id and combines the above into
//!   [`FocusNavigator::move_focus`]: re-initialize near the viewport center,
//!   step in a direction, or wrap around from the viewport center when
//!   nothing lies on the requested side.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use scatter_focus::{Direction, FocusEntry, FocusMove, FocusNavigator, FocusSpace};
//!
//! let entries = [
//!     FocusEntry::new("left", Rect::new(0.0, 0.0, 80.0, 40.0)),
//!     FocusEntry::new("center", Rect::new(100.0, 0.0, 180.0, 40.0)),
//!     FocusEntry::new("right", Rect::new(200.0, 0.0, 280.0, 40.0)),
//! ];
//! let space = FocusSpace::new(&entries);
//! let mut nav = FocusNavigator::new();
//!
//! // Nothing active yet: pick the card nearest the viewport center.
//! let first = nav.move_focus(Direction::Right, &space, Point::new(130.0, 20.0));
//! assert_eq!(first, Some(FocusMove::Initialized("center")));
//!
//! let next = nav.move_focus(Direction::Right, &space, Point::new(140.0, 20.0));
//! assert_eq!(next, Some(FocusMove::Moved("right")));
//! ```
//!
//! Ties are resolved in favour of the candidate that appears first in the
//! space.

mod navigator;
mod policy;

pub use navigator::{FocusMove, FocusNavigator};
pub use policy::{HalfPlane, best_in_direction, nearest_to, score};

use kurbo::{Point, Rect, Vec2};

/// Compass direction of a navigation request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
    /// Towards negative y.
    Up,
    /// Towards positive y.
    Down,
}

impl Direction {
    /// All directions.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Unit vector of the direction (y grows downwards).
    #[must_use]
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
        }
    }

    /// Magnitude of the component of `d` perpendicular to the travel axis.
    #[must_use]
    pub fn off_axis(self, d: Vec2) -> f64 {
        match self {
            Self::Left | Self::Right => d.y.abs(),
            Self::Up | Self::Down => d.x.abs(),
        }
    }
}

/// A focus candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusEntry<K> {
    /// Caller id.
    pub id: K,
    /// World-space bounds.
    pub rect: Rect,
}

impl<K> FocusEntry<K> {
    /// Creates an entry.
    pub fn new(id: K, rect: Rect) -> Self {
        Self { id, rect }
    }

    /// Center of the entry's bounds.
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// Borrowed, ordered view of focus candidates.
#[derive(Clone, Copy, Debug)]
pub struct FocusSpace<'a, K> {
    /// Candidates in working-set order.
    pub nodes: &'a [FocusEntry<K>],
}

impl<'a, K> FocusSpace<'a, K> {
    /// Wraps a slice of candidates.
    pub fn new(nodes: &'a [FocusEntry<K>]) -> Self {
        Self { nodes }
    }

    /// Returns `true` if there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<K: PartialEq> FocusSpace<'_, K> {
    /// Candidate with the given id.
    pub fn get(&self, id: &K) -> Option<&FocusEntry<K>> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    /// Returns `true` if `id` is a candidate.
    pub fn contains(&self, id: &K) -> bool {
        self.get(id).is_some()
    }
}
