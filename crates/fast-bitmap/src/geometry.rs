//! Integer rectangles in pixel space.
//!
//! Arithmetic saturates at the `i32` range, so rectangles built from
//! untrusted input clamp instead of overflowing.

/// An axis-aligned rectangle with integer coordinates.
///
/// Width and height may be negative (e.g. while a user drags a selection
/// up and to the left); [`Rect::normalized`] flips such rectangles so
/// the extents become positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Same area with non-negative width and height.
    pub fn normalized(&self) -> Self {
        let (x, width) = if self.width < 0 {
            (self.x.saturating_add(self.width), self.width.saturating_neg())
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0 {
            (self.y.saturating_add(self.height), self.height.saturating_neg())
        } else {
            (self.y, self.height)
        };
        Self::new(x, y, width, height)
    }

    /// Grow by `dx` on the left and right and `dy` on the top and bottom.
    /// Negative amounts shrink the rectangle.
    #[inline]
    pub const fn inflate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_sub(dx),
            self.y.saturating_sub(dy),
            self.width.saturating_add(dx.saturating_mul(2)),
            self.height.saturating_add(dy.saturating_mul(2)),
        )
    }

    #[inline]
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// True if `other` lies completely inside `self`. Both must be normalized.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_flips_negative_extents() {
        let r = Rect::new(10, 20, -4, -6).normalized();
        assert_eq!(r, Rect::new(6, 14, 4, 6));
        assert_eq!(Rect::new(1, 2, 3, 4).normalized(), Rect::new(1, 2, 3, 4));
    }

    #[test]
    fn test_inflate_negative_shrinks_symmetrically() {
        let r = Rect::new(0, 0, 100, 50).inflate(-2, -2);
        assert_eq!(r, Rect::new(2, 2, 96, 46));
    }

    #[test]
    fn test_offset_keeps_size() {
        let r = Rect::new(3, 4, 10, 10).offset(5, 5);
        assert_eq!(r, Rect::new(8, 9, 10, 10));
    }

    #[test]
    fn test_contains_rect() {
        let outer = Rect::from_size(10, 10);
        assert!(outer.contains_rect(&Rect::new(0, 0, 10, 10)));
        assert!(outer.contains_rect(&Rect::new(2, 3, 4, 5)));
        assert!(!outer.contains_rect(&Rect::new(8, 8, 3, 1)));
        assert!(!outer.contains_rect(&Rect::new(-1, 0, 2, 2)));
    }

    #[test]
    fn test_extreme_rects_saturate() {
        let far = Rect::new(i32::MAX - 600, 0, 1000, 10);
        assert_eq!(far.right(), i32::MAX);
        assert_eq!(far.offset(700, 5).x, i32::MAX);
        assert_eq!(far.inflate(-3, -3), Rect::new(i32::MAX - 597, 3, 994, 4));

        let flipped = Rect::new(i32::MIN, 0, i32::MIN, 1).normalized();
        assert_eq!(flipped, Rect::new(i32::MIN, 0, i32::MAX, 1));

        let huge = Rect::new(0, 0, i32::MAX, i32::MAX).inflate(i32::MAX, 1);
        assert_eq!(huge, Rect::new(-i32::MAX, -1, i32::MAX, i32::MAX));
        assert!(!Rect::from_size(10, 10).contains_rect(&far));
    }

    #[test]
    fn test_is_empty() {
        assert!(Rect::from_size(0, 5).is_empty());
        assert!(Rect::new(0, 0, -1, 5).is_empty());
        assert!(!Rect::from_size(1, 1).is_empty());
    }
}
