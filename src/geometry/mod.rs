// Geometry primitives for window placement

pub mod clamp;

use serde::{Deserialize, Serialize};

/// Smallest width a window can be resized to.
pub const MIN_WIDTH: u32 = 280;
/// Smallest height a window can be resized to.
pub const MIN_HEIGHT: u32 = 180;
/// Height reserved for the taskbar at the bottom of the screen.
pub const TASKBAR_HEIGHT: u32 = 48;
/// How many pixels of a window must remain visible after clamping.
pub const MIN_VISIBLE: i32 = 40;

/// Position and size of a window, viewport-relative, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Size with the 280x180 floor applied. Position is untouched.
    pub fn floored(mut self) -> Self {
        self.width = self.width.max(MIN_WIDTH);
        self.height = self.height.max(MIN_HEIGHT);
        self
    }
}

/// Usable desktop area: the screen minus the reserved taskbar strip.
/// Derived on demand, never stored on a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn from_screen(screen_width: u32, screen_height: u32, taskbar_height: u32) -> Self {
        Self {
            width: screen_width,
            height: screen_height.saturating_sub(taskbar_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floored_respects_minimums() {
        let g = Geometry::new(10, 10, 100, 50).floored();
        assert_eq!(g.width, MIN_WIDTH);
        assert_eq!(g.height, MIN_HEIGHT);

        let g = Geometry::new(10, 10, 640, 480).floored();
        assert_eq!(g.width, 640);
        assert_eq!(g.height, 480);
    }

    #[test]
    fn test_viewport_reserves_taskbar() {
        let vp = Viewport::from_screen(1920, 1080, TASKBAR_HEIGHT);
        assert_eq!(vp.width, 1920);
        assert_eq!(vp.height, 1080 - TASKBAR_HEIGHT);
    }
}
