// Viewport clamping for window geometry

use super::{Geometry, Viewport, MIN_VISIBLE};

/// Clamp a window's position so at least `min_visible` pixels stay inside the
/// viewport on each axis. The top edge is pinned at 0: a window can hang off
/// the sides and the bottom, but its header may never leave the screen.
///
/// Size is never changed here, only position. Maximized windows are exempt;
/// callers skip them before calling.
pub fn clamp_to_viewport(geometry: Geometry, viewport: Viewport, min_visible: i32) -> Geometry {
    let mut g = geometry;

    let min_x = -(g.width as i32) + min_visible;
    let max_x = viewport.width as i32 - min_visible;
    g.x = g.x.min(max_x).max(min_x);

    let max_y = viewport.height as i32 - min_visible;
    g.y = g.y.min(max_y).max(0);

    g
}

/// Clamp with the default 40px visible margin.
pub fn clamp_default(geometry: Geometry, viewport: Viewport) -> Geometry {
    clamp_to_viewport(geometry, viewport, MIN_VISIBLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport {
        width: 1920,
        height: 1032,
    };

    #[test]
    fn test_in_bounds_geometry_unchanged() {
        let g = Geometry::new(90, 110, 600, 400);
        assert_eq!(clamp_default(g, VP), g);
    }

    #[test]
    fn test_x_clamped_to_visible_margin() {
        // Dragged far off the left edge: only 40px may stay hidden short of
        // the window width.
        let g = Geometry::new(-5000, 100, 600, 400);
        let c = clamp_default(g, VP);
        assert_eq!(c.x, -600 + 40);

        // Far off the right edge.
        let g = Geometry::new(5000, 100, 600, 400);
        let c = clamp_default(g, VP);
        assert_eq!(c.x, 1920 - 40);
    }

    #[test]
    fn test_top_edge_pinned_at_zero() {
        let g = Geometry::new(100, -300, 600, 400);
        let c = clamp_default(g, VP);
        assert_eq!(c.y, 0);
    }

    #[test]
    fn test_bottom_clamped_to_visible_margin() {
        let g = Geometry::new(100, 5000, 600, 400);
        let c = clamp_default(g, VP);
        assert_eq!(c.y, 1032 - 40);
    }

    #[test]
    fn test_idempotent() {
        let cases = [
            Geometry::new(-5000, -5000, 280, 180),
            Geometry::new(5000, 5000, 700, 500),
            Geometry::new(0, 0, 280, 180),
            Geometry::new(-240, 992, 280, 180),
        ];
        for g in cases {
            let once = clamp_default(g, VP);
            let twice = clamp_default(once, VP);
            assert_eq!(once, twice, "clamp must be idempotent for {:?}", g);
        }
    }

    #[test]
    fn test_size_never_modified() {
        let g = Geometry::new(-9999, 9999, 333, 444);
        let c = clamp_default(g, VP);
        assert_eq!(c.width, 333);
        assert_eq!(c.height, 444);
    }

    #[test]
    fn test_tiny_viewport_still_bounded() {
        let vp = Viewport::new(30, 30);
        let g = Geometry::new(500, 500, 280, 180);
        let once = clamp_to_viewport(g, vp, 40);
        let twice = clamp_to_viewport(once, vp, 40);
        assert_eq!(once, twice);
    }
}
