//! Axis-aligned rectangle collision
//!
//! Everything on the field is a box: paddles, goal zones, and the ball's
//! bounding square. Edges are inclusive, so touching boxes collide.

/// Integer rectangle in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Split into three stacked bands of `h / 3` each (top, middle, bottom).
    ///
    /// Integer division means the bands may not cover the last pixel or two
    /// of a rectangle whose height is not a multiple of three.
    pub fn thirds(&self) -> [Rect; 3] {
        let band = self.h / 3;
        [
            Rect::new(self.x, self.y, self.w, band),
            Rect::new(self.x, self.y + band, self.w, band),
            Rect::new(self.x, self.y + 2 * self.h / 3, self.w, band),
        ]
    }
}

/// True iff the two rectangles overlap or touch
#[inline]
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    a.right() >= b.x && b.right() >= a.x && a.bottom() >= b.y && b.bottom() >= a.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects_collide() {
        let a = Rect::new(0, 0, 20, 20);
        let b = Rect::new(10, 10, 20, 20);
        assert!(check_collision(&a, &b));
        assert!(check_collision(&b, &a));
    }

    #[test]
    fn test_touching_edges_collide() {
        let a = Rect::new(0, 0, 20, 20);
        // Shares the x = 20 edge
        let b = Rect::new(20, 5, 10, 10);
        assert!(check_collision(&a, &b));
        // Shares only the corner (20, 20)
        let c = Rect::new(20, 20, 5, 5);
        assert!(check_collision(&a, &c));
    }

    #[test]
    fn test_separated_rects_miss() {
        let a = Rect::new(0, 0, 20, 20);
        assert!(!check_collision(&a, &Rect::new(21, 0, 5, 5)));
        assert!(!check_collision(&a, &Rect::new(0, 21, 5, 5)));
        assert!(!check_collision(&a, &Rect::new(-6, 0, 5, 5)));
    }

    #[test]
    fn test_thirds_of_paddle() {
        let paddle = Rect::new(20, 250, 20, 100);
        let [top, middle, bottom] = paddle.thirds();
        assert_eq!(top, Rect::new(20, 250, 20, 33));
        assert_eq!(middle, Rect::new(20, 283, 20, 33));
        assert_eq!(bottom, Rect::new(20, 316, 20, 33));
    }

    proptest! {
        #[test]
        fn collision_is_symmetric(
            ax in -500i32..500, ay in -500i32..500, aw in 0i32..200, ah in 0i32..200,
            bx in -500i32..500, by in -500i32..500, bw in 0i32..200, bh in 0i32..200,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(check_collision(&a, &b), check_collision(&b, &a));
        }

        #[test]
        fn rect_always_collides_with_itself(x in -500i32..500, y in -500i32..500, w in 0i32..200, h in 0i32..200) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(check_collision(&r, &r));
        }
    }
}
