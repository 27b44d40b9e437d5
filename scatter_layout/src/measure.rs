// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Reports the rendered height of a card laid out at a given width.
///
/// The layout engine decides each card's width first and then asks for its
/// height. Return `None` while a card cannot be measured (for example because
/// it is not mounted yet); the engine skips it instead of failing.
///
/// Closures of the form `FnMut(&K, f64) -> Option<f64>` implement this trait.
pub trait Measure<K> {
    /// Height of `key` when rendered `width` units wide.
    fn measure(&mut self, key: &K, width: f64) -> Option<f64>;
}

impl<K, F> Measure<K> for F
where
    F: FnMut(&K, f64) -> Option<f64>,
{
    fn measure(&mut self, key: &K, width: f64) -> Option<f64> {
        self(key, width)
    }
}

/// One card handed to the layout engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutItem<K> {
    /// Caller key, returned unchanged in the resulting [`crate::Placement`].
    pub key: K,
    /// Collapsed state; only consulted in [`crate::ViewMode::Compact`].
    pub collapsed: bool,
}

impl<K> LayoutItem<K> {
    /// An expanded item.
    pub fn new(key: K) -> Self {
        Self {
            key,
            collapsed: false,
        }
    }

    /// Sets the collapsed state.
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }
}

/// Measures `key`, rejecting non-finite and negative heights.
pub(crate) fn measured_height<K, M>(measure: &mut M, key: &K, width: f64) -> Option<f64>
where
    M: Measure<K> + ?Sized,
{
    measure
        .measure(key, width)
        .filter(|h| h.is_finite() && *h >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_measure() {
        let mut m = |key: &u32, width: f64| Some(f64::from(*key) + width);
        assert_eq!(measured_height(&mut m, &2, 10.0), Some(12.0));
    }

    #[test]
    fn bad_heights_are_rejected() {
        let mut nan = |_: &u32, _: f64| Some(f64::NAN);
        assert_eq!(measured_height(&mut nan, &0, 10.0), None);
        let mut negative = |_: &u32, _: f64| Some(-1.0);
        assert_eq!(measured_height(&mut negative, &0, 10.0), None);
        let mut missing = |_: &u32, _: f64| -> Option<f64> { None };
        assert_eq!(measured_height(&mut missing, &0, 10.0), None);
    }

    #[test]
    fn item_builder() {
        let item = LayoutItem::new("a").with_collapsed(true);
        assert!(item.collapsed);
        assert_eq!(item.key, "a");
    }
}
