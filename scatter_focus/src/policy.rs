// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::{Direction, FocusSpace};

/// Whether [`best_in_direction`] keeps only candidates on the requested side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HalfPlane {
    /// Keep candidates whose displacement has a strictly positive dot product
    /// with the direction.
    Strict,
    /// Score every candidate.
    Any,
}

/// Directional cost of a displacement: distance plus half the off-axis deviation.
#[must_use]
pub fn score(displacement: Vec2, direction: Direction) -> f64 {
    displacement.hypot() + 0.5 * direction.off_axis(displacement)
}

/// Candidate with the lowest [`score`] measured from `origin`.
///
/// `exclude` is never returned. Earlier candidates win ties.
pub fn best_in_direction<K>(
    origin: Point,
    exclude: Option<&K>,
    direction: Direction,
    space: &FocusSpace<'_, K>,
    half_plane: HalfPlane,
) -> Option<K>
where
    K: Copy + PartialEq,
{
    let unit = direction.unit();
    let mut best: Option<(K, f64)> = None;
    for node in space.nodes {
        if exclude.is_some_and(|e| *e == node.id) {
            continue;
        }
        let d = node.center() - origin;
        if half_plane == HalfPlane::Strict && d.dot(unit) <= 0.0 {
            continue;
        }
        let s = score(d, direction);
        if !s.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, b)| s < b) {
            best = Some((node.id, s));
        }
    }
    best.map(|(id, _)| id)
}

/// Candidate whose center is nearest `point`; earlier candidates win ties.
pub fn nearest_to<K: Copy>(point: Point, space: &FocusSpace<'_, K>) -> Option<K> {
    let mut best: Option<(K, f64)> = None;
    for node in space.nodes {
        let d = (node.center() - point).hypot();
        if !d.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, b)| d < b) {
            best = Some((node.id, d));
        }
    }
    best.map(|(id, _)| id)
}
