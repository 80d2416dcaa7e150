// Core data structures for the pointer and keyboard input paths

use serde::{Deserialize, Serialize};

/// One edge or corner of a window frame, as encoded by the eight resize
/// handles ("n", "sw", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeEdge {
    /// Parse from a handle direction token.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" => Some(ResizeEdge::N),
            "s" => Some(ResizeEdge::S),
            "e" => Some(ResizeEdge::E),
            "w" => Some(ResizeEdge::W),
            "ne" => Some(ResizeEdge::Ne),
            "nw" => Some(ResizeEdge::Nw),
            "se" => Some(ResizeEdge::Se),
            "sw" => Some(ResizeEdge::Sw),
            _ => None,
        }
    }

    /// West edges move the left side; x shifts to keep the right edge fixed.
    pub fn has_west(&self) -> bool {
        matches!(self, ResizeEdge::W | ResizeEdge::Nw | ResizeEdge::Sw)
    }

    pub fn has_east(&self) -> bool {
        matches!(self, ResizeEdge::E | ResizeEdge::Ne | ResizeEdge::Se)
    }

    /// North edges move the top side; y shifts to keep the bottom edge fixed.
    pub fn has_north(&self) -> bool {
        matches!(self, ResizeEdge::N | ResizeEdge::Ne | ResizeEdge::Nw)
    }

    pub fn has_south(&self) -> bool {
        matches!(self, ResizeEdge::S | ResizeEdge::Se | ResizeEdge::Sw)
    }
}

/// What a pointer-down landed on: the title bar starts a drag, a resize
/// handle starts a resize along its edge set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    Drag,
    Resize(ResizeEdge),
}

/// A pointer event as fed to the controller. `pointer_id` distinguishes
/// concurrent pointers (mouse plus touches); `timestamp_ms` drives the
/// double-activation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub pointer_id: i64,
    pub x: i32,
    pub y: i32,
    pub timestamp_ms: u64,
}

impl PointerEvent {
    pub fn new(pointer_id: i64, x: i32, y: i32, timestamp_ms: u64) -> Self {
        Self {
            pointer_id,
            x,
            y,
            timestamp_ms,
        }
    }
}

/// Arrow keys for the keyboard nudge path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

impl ArrowKey {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ArrowLeft" => Some(ArrowKey::Left),
            "ArrowRight" => Some(ArrowKey::Right),
            "ArrowUp" => Some(ArrowKey::Up),
            "ArrowDown" => Some(ArrowKey::Down),
            _ => None,
        }
    }
}

/// Modifier keys held during a keyboard nudge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Nudge step in pixels: Shift for fine movement, Alt for coarse.
    pub fn step(&self) -> i32 {
        if self.shift {
            1
        } else if self.alt {
            20
        } else {
            10
        }
    }

    /// Ctrl/Meta turn the arrows into a resize instead of a move.
    pub fn is_resize(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_parsing() {
        assert_eq!(ResizeEdge::from_str("nw"), Some(ResizeEdge::Nw));
        assert_eq!(ResizeEdge::from_str("E"), Some(ResizeEdge::E));
        assert_eq!(ResizeEdge::from_str("x"), None);
    }

    #[test]
    fn test_corner_edges_combine_axes() {
        assert!(ResizeEdge::Nw.has_north());
        assert!(ResizeEdge::Nw.has_west());
        assert!(!ResizeEdge::Nw.has_east());
        assert!(ResizeEdge::Se.has_south());
        assert!(ResizeEdge::Se.has_east());
    }

    #[test]
    fn test_modifier_steps() {
        assert_eq!(Modifiers::default().step(), 10);
        let shift = Modifiers {
            shift: true,
            ..Default::default()
        };
        assert_eq!(shift.step(), 1);
        let alt = Modifiers {
            alt: true,
            ..Default::default()
        };
        assert_eq!(alt.step(), 20);
    }
}
