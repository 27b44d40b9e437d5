// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{LayoutConfig, ViewMode};
use crate::measure::{LayoutItem, Measure, measured_height};

/// Column geometry of [`ViewMode::Grid`] for one viewport width.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridMetrics {
    /// Width of every card.
    pub card_width: f64,
    /// Number of columns.
    pub columns: usize,
    /// `columns * card_width + (columns - 1) * gap`.
    pub total_width: f64,
    /// World x of the left edge of column 0 (`-total_width / 2`).
    pub origin_x: f64,
    /// Horizontal gap between columns.
    pub gap: f64,
}

impl GridMetrics {
    /// World x of the left edge of `column`.
    #[must_use]
    pub fn column_x(&self, column: usize) -> f64 {
        let column = column as f64;
        self.origin_x + column * (self.card_width + self.gap)
    }
}

/// Where one card landed.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement<K> {
    /// Caller key of the card.
    pub key: K,
    /// Index of the card in the input slice.
    pub index: usize,
    /// Column the card was packed into (always 0 in single-column modes).
    pub column: usize,
    /// World-space rectangle of the card.
    pub rect: Rect,
}

/// Result of one layout pass.
#[derive(Clone, Debug)]
pub struct Layout<K> {
    mode: ViewMode,
    placements: Vec<Placement<K>>,
    skipped: Vec<K>,
    order: Vec<usize>,
    column_heights: Vec<f64>,
    card_width: f64,
    total_width: f64,
}

impl<K> Layout<K> {
    /// An empty layout for `mode`.
    #[must_use]
    pub fn empty(mode: ViewMode) -> Self {
        Self {
            mode,
            placements: Vec::new(),
            skipped: Vec::new(),
            order: Vec::new(),
            column_heights: Vec::new(),
            card_width: 0.0,
            total_width: 0.0,
        }
    }

    /// Mode this layout was computed for.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Placements in processing order.
    #[must_use]
    pub fn placements(&self) -> &[Placement<K>] {
        &self.placements
    }

    /// Keys that could not be measured and were left unplaced.
    #[must_use]
    pub fn skipped(&self) -> &[K] {
        &self.skipped
    }

    /// Input indices in the order they were processed.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of columns (1 in single-column modes).
    #[must_use]
    pub fn columns(&self) -> usize {
        self.column_heights.len()
    }

    /// Accumulated height of each column, trailing gap included.
    #[must_use]
    pub fn column_heights(&self) -> &[f64] {
        &self.column_heights
    }

    /// Width of each card.
    #[must_use]
    pub fn card_width(&self) -> f64 {
        self.card_width
    }

    /// Horizontal extent of the packed columns.
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Tallest column height.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.column_heights.iter().copied().fold(0.0, f64::max)
    }

    /// Union of every placed rectangle, or `None` if nothing was placed.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let mut iter = self.placements.iter().map(|p| p.rect);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, r| acc.union(r)))
    }

    /// Returns `true` if no card was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

impl<K: PartialEq> Layout<K> {
    /// Placement for `key`, if it was placed.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&Placement<K>> {
        self.placements.iter().find(|p| p.key == *key)
    }
}

/// Packs cards according to a [`LayoutConfig`].
#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    /// Computes grid column geometry for `viewport_width`.
    ///
    /// The card width is `min(column_width, max_width_fraction * viewport_width)`
    /// and the column count is `floor((viewport_width - gap) / (card_width + gap))`
    /// clamped into the configured limits. A non-positive or non-finite viewport
    /// width falls back to `column_width`.
    #[must_use]
    pub fn grid_metrics(&self, viewport_width: f64) -> GridMetrics {
        let c = &self.config;
        let gap = c.column_gap.max(0.0);
        let valid = viewport_width.is_finite() && viewport_width > 0.0;
        let card_width = if valid {
            c.column_width.min(viewport_width * c.max_width_fraction)
        } else {
            c.column_width
        }
        .max(0.0);

        let (lo, hi) = c.column_limits();
        let fit = if valid && card_width + gap > 0.0 {
            ((viewport_width - gap) / (card_width + gap)).floor()
        } else {
            0.0
        };
        #[expect(
            clippy::cast_possible_truncation,
            reason = "fit is clamped to the column limits first"
        )]
        let columns = fit.clamp(lo as f64, hi as f64) as usize;

        let n = columns as f64;
        let total_width = n * card_width + (n - 1.0) * gap;
        GridMetrics {
            card_width,
            columns,
            total_width,
            origin_x: -total_width / 2.0,
            gap,
        }
    }

    /// Card width used in `mode` for `viewport_width`.
    #[must_use]
    pub fn card_width(&self, viewport_width: f64, mode: ViewMode) -> f64 {
        match mode {
            ViewMode::Grid => self.grid_metrics(viewport_width).card_width,
            ViewMode::List | ViewMode::Compact => self.single_column_width(viewport_width),
        }
    }

    fn single_column_width(&self, viewport_width: f64) -> f64 {
        let c = &self.config;
        let width = if viewport_width.is_finite() && viewport_width > 0.0 {
            (viewport_width * c.list_width_fraction).min(c.list_max_width)
        } else {
            c.list_max_width
        };
        width.max(0.0)
    }

    /// Lays out `items` in their given order.
    pub fn layout<K, M>(
        &self,
        items: &[LayoutItem<K>],
        viewport_width: f64,
        mode: ViewMode,
        measure: &mut M,
    ) -> Layout<K>
    where
        K: Clone,
        M: Measure<K> + ?Sized,
    {
        let order: Vec<usize> = (0..items.len()).collect();
        self.layout_in_order(items, &order, viewport_width, mode, measure)
    }

    /// Lays out `items` after a uniform random permutation drawn from `rng`.
    ///
    /// The permutation is available afterwards through [`Layout::order`] so a
    /// caller can replay it with [`LayoutEngine::layout_in_order`].
    pub fn layout_shuffled<K, M, R>(
        &self,
        items: &[LayoutItem<K>],
        viewport_width: f64,
        mode: ViewMode,
        measure: &mut M,
        rng: &mut R,
    ) -> Layout<K>
    where
        K: Clone,
        M: Measure<K> + ?Sized,
        R: Rng + ?Sized,
    {
        let order = shuffled_order(items.len(), rng);
        self.layout_in_order(items, &order, viewport_width, mode, measure)
    }

    /// Lays out `items` visiting them in `order` (indices into `items`).
    ///
    /// Out-of-range and repeated indices are ignored.
    pub fn layout_in_order<K, M>(
        &self,
        items: &[LayoutItem<K>],
        order: &[usize],
        viewport_width: f64,
        mode: ViewMode,
        measure: &mut M,
    ) -> Layout<K>
    where
        K: Clone,
        M: Measure<K> + ?Sized,
    {
        let mut seen = vec![false; items.len()];
        let order: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&i| i < items.len() && !core::mem::replace(&mut seen[i], true))
            .collect();

        match mode {
            ViewMode::Grid => self.pack_grid(items, order, viewport_width, measure),
            ViewMode::List | ViewMode::Compact => {
                self.pack_column(items, order, viewport_width, mode, measure)
            }
        }
    }

    fn pack_grid<K, M>(
        &self,
        items: &[LayoutItem<K>],
        order: Vec<usize>,
        viewport_width: f64,
        measure: &mut M,
    ) -> Layout<K>
    where
        K: Clone,
        M: Measure<K> + ?Sized,
    {
        let metrics = self.grid_metrics(viewport_width);
        let row_gap = self.config.vertical_gap(ViewMode::Grid);
        let mut heights = vec![0.0; metrics.columns];
        let mut placements = Vec::with_capacity(order.len());
        let mut skipped = Vec::new();

        for &index in &order {
            let item = &items[index];
            let Some(height) = measured_height(measure, &item.key, metrics.card_width) else {
                skipped.push(item.key.clone());
                continue;
            };
            let column = shortest_column(&heights);
            let x = metrics.column_x(column);
            let y = heights[column];
            placements.push(Placement {
                key: item.key.clone(),
                index,
                column,
                rect: Rect::new(x, y, x + metrics.card_width, y + height),
            });
            heights[column] += height + row_gap;
        }

        Layout {
            mode: ViewMode::Grid,
            placements,
            skipped,
            order,
            column_heights: heights,
            card_width: metrics.card_width,
            total_width: metrics.total_width,
        }
    }

    fn pack_column<K, M>(
        &self,
        items: &[LayoutItem<K>],
        order: Vec<usize>,
        viewport_width: f64,
        mode: ViewMode,
        measure: &mut M,
    ) -> Layout<K>
    where
        K: Clone,
        M: Measure<K> + ?Sized,
    {
        let width = self.single_column_width(viewport_width);
        let gap = self.config.vertical_gap(mode);
        let x = -width / 2.0;
        let mut y = 0.0;
        let mut placements = Vec::with_capacity(order.len());
        let mut skipped = Vec::new();

        for &index in &order {
            let item = &items[index];
            let Some(mut height) = measured_height(measure, &item.key, width) else {
                skipped.push(item.key.clone());
                continue;
            };
            if mode == ViewMode::Compact && item.collapsed {
                height = height.min(self.config.compact_collapsed_height.max(0.0));
            }
            placements.push(Placement {
                key: item.key.clone(),
                index,
                column: 0,
                rect: Rect::new(x, y, x + width, y + height),
            });
            y += height + gap;
        }

        Layout {
            mode,
            placements,
            skipped,
            order,
            column_heights: vec![y],
            card_width: width,
            total_width: width,
        }
    }
}

/// Index of the strictly shortest column; the lowest index wins ties.
fn shortest_column(heights: &[f64]) -> usize {
    let mut best = 0;
    for (i, &h) in heights.iter().enumerate().skip(1) {
        if h < heights[best] {
            best = i;
        }
    }
    best
}

/// A uniformly random permutation of `0..len` (Fisher–Yates).
pub fn shuffled_order<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn items(n: usize) -> Vec<LayoutItem<usize>> {
        (0..n).map(LayoutItem::new).collect()
    }

    fn by_index(heights: &[f64]) -> impl FnMut(&usize, f64) -> Option<f64> + '_ {
        move |key, _| heights.get(*key).copied()
    }

    #[test]
    fn two_column_scenario() {
        let engine = LayoutEngine::default();
        let heights = [100.0, 150.0, 120.0, 90.0, 200.0];
        let layout = engine.layout(&items(5), 1000.0, ViewMode::Grid, &mut by_index(&heights));

        assert_eq!(layout.columns(), 2);
        let columns: Vec<usize> = layout.placements().iter().map(|p| p.column).collect();
        assert_eq!(columns, [0, 1, 0, 1, 0]);
        assert_eq!(layout.column_heights(), &[600.0, 360.0]);

        let p2 = layout.get(&2).unwrap();
        assert_eq!(p2.rect.y0, 160.0);
        assert_eq!(p2.rect.height(), 120.0);
    }

    #[test]
    fn grid_width_is_centered() {
        let engine = LayoutEngine::default();
        let metrics = engine.grid_metrics(1000.0);
        assert_eq!(metrics.card_width, 360.0);
        assert_eq!(metrics.columns, 2);
        assert_eq!(metrics.total_width, 780.0);
        assert_eq!(metrics.origin_x, -390.0);
        assert_eq!(metrics.column_x(1), 30.0);
    }

    #[test]
    fn narrow_viewport_shrinks_card() {
        let engine = LayoutEngine::default();
        let metrics = engine.grid_metrics(300.0);
        assert!((metrics.card_width - 258.0).abs() < 1e-9);
        assert_eq!(metrics.columns, 1);
        assert_eq!(metrics.total_width, metrics.card_width);
    }

    #[test]
    fn wide_viewport_is_capped() {
        let engine = LayoutEngine::default();
        assert_eq!(engine.grid_metrics(10_000.0).columns, 6);
    }

    #[test]
    fn invalid_viewport_falls_back() {
        let engine = LayoutEngine::default();
        for w in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let metrics = engine.grid_metrics(w);
            assert_eq!(metrics.card_width, 360.0);
            assert_eq!(metrics.columns, 1);
        }
    }

    #[test]
    fn ties_pick_lowest_column() {
        let engine = LayoutEngine::default();
        let heights = [50.0, 50.0, 50.0, 50.0];
        let layout = engine.layout(&items(4), 1000.0, ViewMode::Grid, &mut by_index(&heights));
        let columns: Vec<usize> = layout.placements().iter().map(|p| p.column).collect();
        assert_eq!(columns, [0, 1, 0, 1]);
    }

    #[test]
    fn unmeasurable_items_are_skipped() {
        let engine = LayoutEngine::default();
        let heights = [100.0, 150.0];
        let layout = engine.layout(&items(3), 1000.0, ViewMode::Grid, &mut by_index(&heights));
        assert_eq!(layout.placements().len(), 2);
        assert_eq!(layout.skipped(), &[2]);
        assert_eq!(layout.order(), &[0, 1, 2]);
    }

    #[test]
    fn list_stacks_vertically() {
        let engine = LayoutEngine::default();
        let heights = [100.0, 150.0, 120.0];
        let layout = engine.layout(&items(3), 1000.0, ViewMode::List, &mut by_index(&heights));
        assert_eq!(layout.columns(), 1);
        assert!((layout.card_width() - 620.0).abs() < 1e-9);
        let ys: Vec<f64> = layout.placements().iter().map(|p| p.rect.y0).collect();
        assert_eq!(ys, [0.0, 140.0, 330.0]);
        assert!(layout.placements().iter().all(|p| p.rect.x0 == -310.0));
    }

    #[test]
    fn list_width_is_capped() {
        let engine = LayoutEngine::default();
        assert_eq!(engine.card_width(4000.0, ViewMode::List), 720.0);
    }

    #[test]
    fn compact_collapse_only_moves_followers() {
        let engine = LayoutEngine::default();
        let heights = [200.0, 150.0, 120.0];
        let mut list = items(3);
        let open = engine.layout(&list, 1000.0, ViewMode::Compact, &mut by_index(&heights));

        list[0].collapsed = true;
        let closed = engine.layout(&list, 1000.0, ViewMode::Compact, &mut by_index(&heights));

        let a = open.get(&0).unwrap().rect;
        let b = closed.get(&0).unwrap().rect;
        assert_eq!(a.x0, b.x0);
        assert_eq!(b.height(), 64.0);
        assert_eq!(closed.get(&1).unwrap().rect.y0, 64.0 + 12.0);
        assert_eq!(open.get(&1).unwrap().rect.y0, 200.0 + 12.0);
    }

    #[test]
    fn collapsed_is_ignored_outside_compact() {
        let engine = LayoutEngine::default();
        let heights = [200.0];
        let list = vec![LayoutItem::new(0).with_collapsed(true)];
        let layout = engine.layout(&list, 1000.0, ViewMode::List, &mut by_index(&heights));
        assert_eq!(layout.get(&0).unwrap().rect.height(), 200.0);
    }

    #[test]
    fn shuffle_is_a_permutation_and_replayable() {
        let engine = LayoutEngine::default();
        let heights: Vec<f64> = (0..20).map(|i| 40.0 + f64::from(i) * 7.0).collect();
        let list = items(heights.len());
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled =
            engine.layout_shuffled(&list, 1400.0, ViewMode::Grid, &mut by_index(&heights), &mut rng);

        let mut sorted = shuffled.order().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());

        let replay = engine.layout_in_order(
            &list,
            shuffled.order(),
            1400.0,
            ViewMode::Grid,
            &mut by_index(&heights),
        );
        assert_eq!(replay.placements(), shuffled.placements());
    }

    #[test]
    fn shuffle_first_slot_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0_u32; 4];
        for _ in 0..8_000 {
            counts[shuffled_order(4, &mut rng)[0]] += 1;
        }
        for c in counts {
            assert!((1_700..2_300).contains(&c), "skewed first slot: {counts:?}");
        }
    }

    #[test]
    fn order_drops_repeats_and_out_of_range() {
        let engine = LayoutEngine::default();
        let heights = [10.0, 20.0];
        let layout = engine.layout_in_order(
            &items(2),
            &[1, 1, 9, 0],
            1000.0,
            ViewMode::List,
            &mut by_index(&heights),
        );
        assert_eq!(layout.order(), &[1, 0]);
        assert_eq!(layout.placements()[0].key, 1);
    }

    #[test]
    fn empty_layout_has_no_bounds() {
        let engine = LayoutEngine::default();
        let layout = engine.layout::<usize, _>(&[], 1000.0, ViewMode::Grid, &mut |_: &usize, _: f64| -> Option<f64> { None });
        assert!(layout.is_empty());
        assert!(layout.bounds().is_none());
        assert_eq!(layout.content_height(), 0.0);
        assert!(Layout::<usize>::empty(ViewMode::List).bounds().is_none());
    }

    #[test]
    fn bounds_cover_all_cards() {
        let engine = LayoutEngine::default();
        let heights = [100.0, 150.0, 120.0];
        let layout = engine.layout(&items(3), 1000.0, ViewMode::Grid, &mut by_index(&heights));
        let bounds = layout.bounds().unwrap();
        assert_eq!(bounds, Rect::new(-390.0, 0.0, 390.0, 280.0));
    }
}
