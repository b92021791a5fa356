/// Rasterizer viewport in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ViewportRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ViewportRect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Full-target viewport anchored at the origin.
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clips the rect to a `width` x `height` target.
    ///
    /// Returns `None` when nothing of the rect remains inside the target.
    pub fn clamped_to(self, width: u32, height: u32) -> Option<Self> {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let r = Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        };
        if r.is_empty() { None } else { Some(r) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_starts_at_origin() {
        assert_eq!(ViewportRect::full(800, 600), ViewportRect::new(0, 0, 800, 600));
    }

    #[test]
    fn clamp_inside_is_identity() {
        let r = ViewportRect::full(800, 600);
        assert_eq!(r.clamped_to(800, 600), Some(r));
    }

    #[test]
    fn clamp_shrinks_oversized() {
        let r = ViewportRect::full(1024, 768);
        assert_eq!(r.clamped_to(800, 600), Some(ViewportRect::full(800, 600)));
    }

    #[test]
    fn clamp_offset_rect() {
        let r = ViewportRect::new(700, 500, 200, 200);
        assert_eq!(r.clamped_to(800, 600), Some(ViewportRect::new(700, 500, 100, 100)));
    }

    #[test]
    fn clamp_outside_is_none() {
        assert_eq!(ViewportRect::new(900, 0, 10, 10).clamped_to(800, 600), None);
    }

    #[test]
    fn zero_size_is_empty() {
        assert!(ViewportRect::full(0, 600).is_empty());
        assert!(!ViewportRect::full(1, 1).is_empty());
    }
}
