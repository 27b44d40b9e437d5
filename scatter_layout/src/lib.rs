// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter Layout: masonry-style packing of measured cards.
//!
//! This crate positions a sequence of cards in a world-space plane whose
//! horizontal origin sits at the middle of the packed content. It is
//! headless: callers own the cards and report each card's rendered height
//! through the [`Measure`] trait once the engine has told them how wide the
//! card will be.
//!
//! Three [`ViewMode`]s are supported:
//! - [`ViewMode::Grid`]: greedy shortest-column bin-packing into as many
//!   columns as fit the viewport width (within configured limits).
//! - [`ViewMode::List`]: a single centered column with a roomy vertical gap.
//! - [`ViewMode::Compact`]: a single centered column with a tight gap, where
//!   individual cards can be collapsed to a fixed strip height.
//!
//! Cards are processed in the given order, in an explicit caller-supplied
//! order, or in a uniformly shuffled order drawn from a [`rand::Rng`].
//!
//! ## Minimal example
//!
//! ```rust
//! use scatter_layout::{LayoutConfig, LayoutEngine, LayoutItem, ViewMode};
//!
//! let engine = LayoutEngine::new(LayoutConfig::default());
//! let heights = [100.0, 150.0, 120.0, 90.0, 200.0];
//! let items: Vec<LayoutItem<usize>> = (0..heights.len()).map(LayoutItem::new).collect();
//!
//! let mut measure = |key: &usize, _width: f64| heights.get(*key).copied();
//! let layout = engine.layout(&items, 1000.0, ViewMode::Grid, &mut measure);
//!
//! assert_eq!(layout.columns(), 2);
//! assert_eq!(layout.placements().len(), 5);
//! // Column 0 receives cards 0, 2 and 4.
//! assert_eq!(layout.get(&4).map(|p| p.column), Some(0));
//! ```
//!
//! Cards that cannot be measured yet (the measure returns `None`) are skipped
//! and listed in [`Layout::skipped`]; packing never fails.

mod config;
mod measure;
mod pack;

pub use config::{LayoutConfig, ViewMode};
pub use measure::{LayoutItem, Measure};
pub use pack::{GridMetrics, Layout, LayoutEngine, Placement, shuffled_order};
