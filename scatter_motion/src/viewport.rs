// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

/// Pan-only view over the world plane.
///
/// A world point `p` is drawn at `p + pan` in view space. The viewport only
/// knows the view size; the pan itself is owned by
/// [`crate::MotionController`] and passed in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    size: Size,
}

impl Viewport {
    /// Creates a viewport of the given view size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self { size }
    }

    /// View size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Sets the view size, returning `true` if it changed.
    pub fn set_size(&mut self, size: Size) -> bool {
        if self.size == size {
            return false;
        }
        self.size = size;
        true
    }

    /// Center of the view in view coordinates.
    #[must_use]
    pub fn view_center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    /// Converts a world point to view coordinates under `pan`.
    #[must_use]
    pub fn world_to_view(&self, pan: Vec2, pt: Point) -> Point {
        pt + pan
    }

    /// Converts a view point to world coordinates under `pan`.
    #[must_use]
    pub fn view_to_world(&self, pan: Vec2, pt: Point) -> Point {
        pt - pan
    }

    /// World point under the view center for `pan`.
    #[must_use]
    pub fn world_center(&self, pan: Vec2) -> Point {
        self.view_to_world(pan, self.view_center())
    }

    /// World rectangle visible under `pan`.
    #[must_use]
    pub fn visible_world_rect(&self, pan: Vec2) -> Rect {
        Rect::from_origin_size(self.view_to_world(pan, Point::ORIGIN), self.size)
    }

    /// Pan that puts `world_point` at the view center.
    #[must_use]
    pub fn pan_to_center(&self, world_point: Point) -> Vec2 {
        self.view_center() - world_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_view_roundtrip() {
        let vp = Viewport::new(Size::new(800.0, 600.0));
        let pan = Vec2::new(13.0, -7.0);
        let world = Point::new(10.0, -5.0);
        assert_eq!(vp.view_to_world(pan, vp.world_to_view(pan, world)), world);
    }

    #[test]
    fn centering_pan_puts_point_under_center() {
        let vp = Viewport::new(Size::new(800.0, 600.0));
        let target = Point::new(-120.0, 940.0);
        let pan = vp.pan_to_center(target);
        assert_eq!(vp.world_center(pan), target);
        assert_eq!(vp.visible_world_rect(pan).center(), target);
    }

    #[test]
    fn set_size_reports_change() {
        let mut vp = Viewport::new(Size::new(800.0, 600.0));
        assert!(!vp.set_size(Size::new(800.0, 600.0)));
        assert!(vp.set_size(Size::new(1024.0, 600.0)));
        assert_eq!(vp.view_center(), Point::new(512.0, 300.0));
    }
}
