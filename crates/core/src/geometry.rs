//! Screen positions and additive offsets.
//!
//! Terminal coordinates are unsigned cells, but a dragged panel can be
//! pushed past the top-left corner, so offsets are signed.

use std::ops::{Add, Sub};

use ratatui::layout::Rect;

/// A pointer position in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position of a mouse event.
    pub fn from_cell(column: u16, row: u16) -> Self {
        Self::new(i32::from(column), i32::from(row))
    }
}

/// Additive translation from a widget's default layout position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Translate `rect` by this offset, keeping the visible part inside `bounds`.
    ///
    /// Returns `None` once the rectangle has been dragged entirely off-screen.
    pub fn apply(self, rect: Rect, bounds: Rect) -> Option<Rect> {
        let left = i32::from(rect.x) + self.dx;
        let top = i32::from(rect.y) + self.dy;
        let right = left + i32::from(rect.width);
        let bottom = top + i32::from(rect.height);

        let min_x = left.max(i32::from(bounds.x));
        let min_y = top.max(i32::from(bounds.y));
        let max_x = right.min(i32::from(bounds.right()));
        let max_y = bottom.min(i32::from(bounds.bottom()));

        if min_x >= max_x || min_y >= max_y {
            return None;
        }

        Some(Rect::new(
            min_x as u16,
            min_y as u16,
            (max_x - min_x) as u16,
            (max_y - min_y) as u16,
        ))
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, origin: Point) -> Offset {
        Offset::new(self.x - origin.x, self.y - origin.y)
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, other: Offset) -> Offset {
        Offset::new(self.dx + other.dx, self.dy + other.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_delta_plus_start_offset() {
        let origin = Point::new(100, 100);
        let current = Point::new(130, 115);
        assert_eq!((current - origin) + Offset::new(5, 5), Offset::new(35, 20));
    }

    #[test]
    fn test_apply_inside_bounds() {
        let bounds = Rect::new(0, 0, 80, 24);
        let panel = Rect::new(10, 5, 40, 10);
        assert_eq!(
            Offset::new(3, -2).apply(panel, bounds),
            Some(Rect::new(13, 3, 40, 10))
        );
    }

    #[test]
    fn test_apply_clips_past_top_left() {
        let bounds = Rect::new(0, 0, 80, 24);
        let panel = Rect::new(10, 5, 40, 10);
        assert_eq!(
            Offset::new(-15, -8).apply(panel, bounds),
            Some(Rect::new(0, 0, 35, 7))
        );
    }

    #[test]
    fn test_apply_fully_off_screen() {
        let bounds = Rect::new(0, 0, 80, 24);
        let panel = Rect::new(10, 5, 40, 10);
        assert_eq!(Offset::new(100, 0).apply(panel, bounds), None);
    }
}
