// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering collaborator seam.

use crate::entry::Entry;

/// Produces visuals for entries and reports their rendered height.
///
/// The engine asks for a height at the width the current view mode assigns.
/// Returning `None` means the entry is not mounted yet; it is left out of the
/// layout until a later relayout can measure it.
pub trait Renderer {
    /// Rendered height of `entry` at `width`.
    fn measure(&mut self, entry: &Entry, width: f64) -> Option<f64>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn measure(&mut self, entry: &Entry, width: f64) -> Option<f64> {
        (**self).measure(entry, width)
    }
}

/// Result of loading deferred content (an image or an embed).
///
/// Both outcomes request the same relayout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The content loaded.
    Loaded,
    /// The content failed to load.
    Failed,
}

/// A [`Renderer`] that uses each entry's own height estimate.
#[derive(Copy, Clone, Debug, Default)]
pub struct EstimatingRenderer;

impl Renderer for EstimatingRenderer {
    fn measure(&mut self, entry: &Entry, width: f64) -> Option<f64> {
        Some(entry.estimated_height(width))
    }
}
