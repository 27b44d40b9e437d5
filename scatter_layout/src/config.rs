// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// How cards are arranged on the canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViewMode {
    /// Multi-column masonry packing.
    #[default]
    Grid,
    /// One centered column with a roomy gap.
    List,
    /// One centered column with a tight gap and collapsible cards.
    Compact,
}

impl ViewMode {
    /// All modes, in slider order.
    pub const ALL: [Self; 3] = [Self::Grid, Self::List, Self::Compact];

    /// Returns `true` for the single-column modes.
    #[must_use]
    pub fn is_single_column(self) -> bool {
        !matches!(self, Self::Grid)
    }

    /// Stable lowercase name of the mode.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tunables for [`crate::LayoutEngine`].
///
/// All lengths are in world units (logical pixels at zoom 1).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Preferred grid card width.
    pub column_width: f64,
    /// Upper bound on the grid card width as a fraction of the viewport width.
    pub max_width_fraction: f64,
    /// Horizontal gap between grid columns.
    pub column_gap: f64,
    /// Vertical gap between cards stacked in one grid column.
    pub row_gap: f64,
    /// Lower bound on the grid column count.
    pub min_columns: usize,
    /// Upper bound on the grid column count.
    pub max_columns: usize,
    /// Single-column card width as a fraction of the viewport width.
    pub list_width_fraction: f64,
    /// Cap on the single-column card width.
    pub list_max_width: f64,
    /// Vertical gap in [`ViewMode::List`].
    pub list_gap: f64,
    /// Vertical gap in [`ViewMode::Compact`].
    pub compact_gap: f64,
    /// Height a collapsed card contributes in [`ViewMode::Compact`].
    pub compact_collapsed_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_width: 360.0,
            max_width_fraction: 0.86,
            column_gap: 60.0,
            row_gap: 60.0,
            min_columns: 1,
            max_columns: 6,
            list_width_fraction: 0.62,
            list_max_width: 720.0,
            list_gap: 40.0,
            compact_gap: 12.0,
            compact_collapsed_height: 64.0,
        }
    }
}

impl LayoutConfig {
    /// Returns the `(min, max)` column limits, normalized so `1 <= min <= max`.
    #[must_use]
    pub fn column_limits(&self) -> (usize, usize) {
        let lo = self.min_columns.max(1);
        let hi = self.max_columns.max(1);
        if lo <= hi { (lo, hi) } else { (hi, lo) }
    }

    /// Vertical gap used when stacking cards in `mode`.
    #[must_use]
    pub fn vertical_gap(&self, mode: ViewMode) -> f64 {
        match mode {
            ViewMode::Grid => self.row_gap,
            ViewMode::List => self.list_gap,
            ViewMode::Compact => self.compact_gap,
        }
    }
}
