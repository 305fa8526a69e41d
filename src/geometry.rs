// SPDX-License-Identifier: GPL-3.0-or-later

use std::cmp::min;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub w: usize,
    pub h: usize,
}

impl Size {
    pub fn new(w: usize, h: usize) -> Self {
        Self { w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn swapped(&self) -> Size {
        Size::new(self.h, self.w)
    }

    /// Uniformly scale to the largest size that fits inside `bounds`.
    /// Returns `None` if either size is degenerate.
    pub fn fit_within(&self, bounds: &Size) -> Option<Size> {
        if self.is_empty() || bounds.is_empty() {
            return None;
        }

        let scale_w = bounds.w as f64 / self.w as f64;
        let scale_h = bounds.h as f64 / self.h as f64;
        let scale = scale_w.min(scale_h);

        let w = (self.w as f64 * scale).round() as usize;
        let h = (self.h as f64 * scale).round() as usize;
        Some(Size::new(w.clamp(1, bounds.w), h.clamp(1, bounds.h)))
    }

    /// Top-left position that centers this size inside `bounds`. Odd
    /// padding goes to the right and bottom edges.
    pub fn center_in(&self, bounds: &Size) -> Coord {
        Coord::new(
            bounds.w.saturating_sub(self.w) / 2,
            bounds.h.saturating_sub(self.h) / 2,
        )
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

#[derive(Debug, Clone)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn clip(&self, width: usize, height: usize) -> Rect {
        if self.x >= width || self.y >= height {
            Rect::new(self.x, self.y, 0, 0)
        } else {
            let w = min(self.w, width - self.x);
            let h = min(self.h, height - self.y);
            Rect::new(self.x, self.y, w, h)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "@{},{}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord() {
        let pos = Coord::new(10, 20);
        assert_eq!(pos.x, 10);
        assert_eq!(pos.y, 20);
        assert_eq!(format!("{}", pos), "@10,20");
    }

    #[test]
    fn test_rect_clip() {
        for tc in vec![
            (Rect::new(5, 10, 15, 20), Rect::new(5, 10, 15, 20)), // fully inside
            (Rect::new(5, 10, 50, 50), Rect::new(5, 10, 20, 25)), // clipped
            (Rect::new(30, 10, 50, 50), Rect::new(30, 10, 0, 0)), // off-canvas x
            (Rect::new(5, 40, 50, 50), Rect::new(5, 40, 0, 0)),   // off-canvas y
        ] {
            let r = tc.0.clip(25, 35);
            assert_eq!(r.x, tc.1.x);
            assert_eq!(r.y, tc.1.y);
            assert_eq!(r.w, tc.1.w);
            assert_eq!(r.h, tc.1.h);
        }
    }

    #[test]
    fn test_fit_within() {
        for tc in vec![
            (Size::new(1000, 500), Size::new(800, 480), Size::new(800, 400)),
            (Size::new(480, 800), Size::new(480, 800), Size::new(480, 800)),
            (Size::new(480, 800), Size::new(800, 480), Size::new(288, 480)),
            (Size::new(100, 100), Size::new(800, 480), Size::new(480, 480)),
            (Size::new(3, 1), Size::new(10, 10), Size::new(10, 3)),
            (Size::new(1, 10000), Size::new(800, 480), Size::new(1, 480)),
        ] {
            assert_eq!(tc.0.fit_within(&tc.1), Some(tc.2), "{} in {}", tc.0, tc.1);
        }
    }

    #[test]
    fn test_fit_within_degenerate() {
        assert_eq!(Size::new(0, 10).fit_within(&Size::new(800, 480)), None);
        assert_eq!(Size::new(10, 0).fit_within(&Size::new(800, 480)), None);
        assert_eq!(Size::new(10, 10).fit_within(&Size::new(0, 480)), None);
    }

    #[test]
    fn test_center_in() {
        let canvas = Size::new(800, 480);
        assert_eq!(Size::new(800, 400).center_in(&canvas), Coord::new(0, 40));
        assert_eq!(Size::new(288, 480).center_in(&canvas), Coord::new(256, 0));
        assert_eq!(Size::new(799, 479).center_in(&canvas), Coord::new(0, 0));
        assert_eq!(Size::new(10, 3).center_in(&Size::new(10, 10)), Coord::new(0, 3));
    }

    #[test]
    fn test_size_swapped() {
        let s = Size::new(800, 480);
        assert_eq!(s.swapped(), Size::new(480, 800));
        assert_eq!(format!("{}", s), "800x480");
    }
}
