// Pointer interaction controller: drag and resize gestures

use std::collections::HashMap;

use tracing::debug;

use crate::geometry::{Geometry, MIN_HEIGHT, MIN_WIDTH};

use super::types::{GestureKind, PointerEvent};

/// Two rapid taps on a drag handle within this window toggle maximize.
const DOUBLE_TAP_MS: u64 = 500;

/// Transient state for one active gesture. Exists from pointer-down to
/// pointer-up/cancel for exactly one pointer, and never survives past the up.
#[derive(Debug, Clone)]
pub struct GestureState {
    pub window_id: String,
    pub pointer_id: i64,
    pub kind: GestureKind,
    /// Pointer position at pointer-down.
    origin_x: i32,
    origin_y: i32,
    /// Committed window geometry at pointer-down.
    origin_geometry: Geometry,
    /// Live proposed geometry; becomes the commit candidate on pointer-up.
    proposed: Geometry,
    moved: bool,
}

impl GestureState {
    pub fn proposed_geometry(&self) -> Geometry {
        self.proposed
    }
}

/// Outcome of a pointer-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownOutcome {
    /// Gesture started; the target window must be raised to front.
    Started { window_id: String },
    /// Ignored: target maximized, pointer already busy, or the window is
    /// already the target of another pointer's gesture.
    Ignored,
}

/// Outcome of a pointer-up or pointer-cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpOutcome {
    /// Commit this geometry, then clamp and persist.
    Commit { window_id: String, geometry: Geometry },
    /// Double activation on the drag handle: toggle maximize instead.
    ToggleMaximize { window_id: String },
    /// No gesture was active for this pointer id.
    Ignored,
}

/// State machine driving drag and resize gestures. One gesture per pointer
/// id, at most one gesture per window; everything else is ignored, which is
/// what lets independent pointers work different windows concurrently.
pub struct PointerController {
    gestures: HashMap<i64, GestureState>,
    /// Window id and timestamp of the last clean tap (down/up without
    /// movement) on a drag handle.
    last_tap: Option<(String, u64)>,
}

impl PointerController {
    pub fn new() -> Self {
        Self {
            gestures: HashMap::new(),
            last_tap: None,
        }
    }

    pub fn active_gesture(&self, pointer_id: i64) -> Option<&GestureState> {
        self.gestures.get(&pointer_id)
    }

    /// Whether any pointer currently has a gesture on this window.
    pub fn is_window_engaged(&self, window_id: &str) -> bool {
        self.gestures.values().any(|g| g.window_id == window_id)
    }

    /// Pointer-down on a drag or resize handle. Maximized windows are not
    /// draggable or resizable, so their events are dropped here.
    pub fn pointer_down(
        &mut self,
        window_id: &str,
        window_maximized: bool,
        geometry: Geometry,
        kind: GestureKind,
        event: PointerEvent,
    ) -> DownOutcome {
        if window_maximized {
            return DownOutcome::Ignored;
        }
        if self.gestures.contains_key(&event.pointer_id) {
            return DownOutcome::Ignored;
        }
        if self.is_window_engaged(window_id) {
            // A window may not be the target of two concurrent gestures.
            return DownOutcome::Ignored;
        }

        debug!(window_id, pointer_id = event.pointer_id, ?kind, "gesture start");

        self.gestures.insert(
            event.pointer_id,
            GestureState {
                window_id: window_id.to_string(),
                pointer_id: event.pointer_id,
                kind,
                origin_x: event.x,
                origin_y: event.y,
                origin_geometry: geometry,
                proposed: geometry,
                moved: false,
            },
        );

        DownOutcome::Started {
            window_id: window_id.to_string(),
        }
    }

    /// Pointer-move. Returns the window id and its new proposed geometry so
    /// the renderer can track the pointer; committed state is untouched until
    /// pointer-up. Events for pointers with no active gesture are ignored.
    ///
    /// Drag positions are intentionally NOT clamped live; the window may
    /// extend past the viewport mid-gesture and is corrected at gesture end.
    pub fn pointer_move(&mut self, event: PointerEvent) -> Option<(String, Geometry)> {
        let gesture = self.gestures.get_mut(&event.pointer_id)?;

        let dx = event.x - gesture.origin_x;
        let dy = event.y - gesture.origin_y;
        if dx != 0 || dy != 0 {
            gesture.moved = true;
        }

        gesture.proposed = match gesture.kind {
            GestureKind::Drag => Geometry {
                x: gesture.origin_geometry.x + dx,
                y: gesture.origin_geometry.y + dy,
                ..gesture.origin_geometry
            },
            GestureKind::Resize(edge) => resize_geometry(gesture.origin_geometry, edge, dx, dy),
        };

        Some((gesture.window_id.clone(), gesture.proposed))
    }

    /// Pointer-up: destroy the gesture unconditionally and report what to do
    /// with it. A drag that never moved is a tap; a second tap on the same
    /// window within the double-tap window requests a maximize toggle.
    pub fn pointer_up(&mut self, event: PointerEvent) -> UpOutcome {
        let Some(gesture) = self.gestures.remove(&event.pointer_id) else {
            return UpOutcome::Ignored;
        };

        debug!(
            window_id = %gesture.window_id,
            pointer_id = event.pointer_id,
            "gesture end"
        );

        if !gesture.moved && matches!(gesture.kind, GestureKind::Drag) {
            if let Some((tap_id, tap_at)) = self.last_tap.take() {
                if tap_id == gesture.window_id
                    && event.timestamp_ms.saturating_sub(tap_at) <= DOUBLE_TAP_MS
                {
                    return UpOutcome::ToggleMaximize {
                        window_id: gesture.window_id,
                    };
                }
            }
            self.last_tap = Some((gesture.window_id.clone(), event.timestamp_ms));
        }

        UpOutcome::Commit {
            window_id: gesture.window_id,
            geometry: gesture.proposed,
        }
    }

    /// Pointer-cancel (device disconnect, capture loss). Must behave exactly
    /// like pointer-up so no uncommitted state can linger.
    pub fn pointer_cancel(&mut self, event: PointerEvent) -> UpOutcome {
        self.pointer_up(event)
    }
}

impl Default for PointerController {
    fn default() -> Self {
        Self::new()
    }
}

/// Resize arithmetic for one edge set. East/south edges only grow or shrink
/// the size; west/north edges also move the position so the opposite edge
/// stays fixed. Once the 280x180 floor is hit the position stops moving too,
/// which keeps the fixed edge from drifting.
fn resize_geometry(origin: Geometry, edge: super::types::ResizeEdge, dx: i32, dy: i32) -> Geometry {
    let mut g = origin;

    if edge.has_east() {
        g.width = (origin.width as i32 + dx).max(MIN_WIDTH as i32) as u32;
    }
    if edge.has_west() {
        let new_width = (origin.width as i32 - dx).max(MIN_WIDTH as i32) as u32;
        g.x = origin.x + (origin.width as i32 - new_width as i32);
        g.width = new_width;
    }
    if edge.has_south() {
        g.height = (origin.height as i32 + dy).max(MIN_HEIGHT as i32) as u32;
    }
    if edge.has_north() {
        let new_height = (origin.height as i32 - dy).max(MIN_HEIGHT as i32) as u32;
        g.y = origin.y + (origin.height as i32 - new_height as i32);
        g.height = new_height;
    }

    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::types::ResizeEdge;

    fn ev(pointer_id: i64, x: i32, y: i32) -> PointerEvent {
        PointerEvent::new(pointer_id, x, y, 0)
    }

    fn ev_at(pointer_id: i64, x: i32, y: i32, t: u64) -> PointerEvent {
        PointerEvent::new(pointer_id, x, y, t)
    }

    fn geo(x: i32, y: i32, w: u32, h: u32) -> Geometry {
        Geometry::new(x, y, w, h)
    }

    #[test]
    fn test_drag_commits_origin_plus_delta() {
        let mut pc = PointerController::new();

        let down = pc.pointer_down("a", false, geo(50, 50, 600, 400), GestureKind::Drag, ev(1, 100, 100));
        assert_eq!(
            down,
            DownOutcome::Started {
                window_id: "a".to_string()
            }
        );

        pc.pointer_move(ev(1, 140, 160));
        let up = pc.pointer_up(ev(1, 140, 160));
        assert_eq!(
            up,
            UpOutcome::Commit {
                window_id: "a".to_string(),
                geometry: geo(90, 110, 600, 400),
            }
        );
        assert!(pc.active_gesture(1).is_none());
    }

    #[test]
    fn test_drag_is_unclamped_live() {
        let mut pc = PointerController::new();
        pc.pointer_down("a", false, geo(0, 0, 600, 400), GestureKind::Drag, ev(1, 0, 0));

        let (_, proposed) = pc.pointer_move(ev(1, -5000, -5000)).unwrap();
        assert_eq!(proposed.x, -5000);
        assert_eq!(proposed.y, -5000);
    }

    #[test]
    fn test_west_resize_stops_at_floor() {
        let mut pc = PointerController::new();
        pc.pointer_down(
            "a",
            false,
            geo(50, 50, 600, 400),
            GestureKind::Resize(ResizeEdge::W),
            ev(1, 50, 200),
        );

        // Drag east by 500: width would go to 100, floors at 280, and x
        // advances by exactly initial_width - 280.
        pc.pointer_move(ev(1, 550, 200));
        let up = pc.pointer_up(ev(1, 550, 200));
        assert_eq!(
            up,
            UpOutcome::Commit {
                window_id: "a".to_string(),
                geometry: geo(50 + (600 - 280), 50, 280, 400),
            }
        );
    }

    #[test]
    fn test_north_resize_keeps_bottom_edge_fixed() {
        let mut pc = PointerController::new();
        pc.pointer_down(
            "a",
            false,
            geo(100, 100, 400, 300),
            GestureKind::Resize(ResizeEdge::N),
            ev(1, 0, 0),
        );

        // Drag the top edge up by 50: taller window, same bottom edge.
        let (_, g) = pc.pointer_move(ev(1, 0, -50)).unwrap();
        assert_eq!(g, geo(100, 50, 400, 350));
        assert_eq!(g.y + g.height as i32, 100 + 300);

        // Drag down past the floor: height stops at 180, y stops with it.
        let (_, g) = pc.pointer_move(ev(1, 0, 500)).unwrap();
        assert_eq!(g.height, 180);
        assert_eq!(g.y, 100 + (300 - 180));
    }

    #[test]
    fn test_corner_resize_moves_both_axes() {
        let mut pc = PointerController::new();
        pc.pointer_down(
            "a",
            false,
            geo(100, 100, 400, 300),
            GestureKind::Resize(ResizeEdge::Se),
            ev(1, 0, 0),
        );
        let (_, g) = pc.pointer_move(ev(1, 60, 40)).unwrap();
        assert_eq!(g, geo(100, 100, 460, 340));
    }

    #[test]
    fn test_maximized_window_not_draggable() {
        let mut pc = PointerController::new();
        let down = pc.pointer_down("a", true, geo(0, 0, 600, 400), GestureKind::Drag, ev(1, 0, 0));
        assert_eq!(down, DownOutcome::Ignored);
        assert!(pc.active_gesture(1).is_none());
    }

    #[test]
    fn test_mismatched_pointer_ignored() {
        let mut pc = PointerController::new();
        pc.pointer_down("a", false, geo(0, 0, 600, 400), GestureKind::Drag, ev(1, 0, 0));

        // Moves and ups from an unrelated pointer do nothing.
        assert!(pc.pointer_move(ev(7, 500, 500)).is_none());
        assert_eq!(pc.pointer_up(ev(7, 500, 500)), UpOutcome::Ignored);
        assert!(pc.active_gesture(1).is_some());
    }

    #[test]
    fn test_concurrent_gestures_on_different_windows() {
        let mut pc = PointerController::new();
        pc.pointer_down("a", false, geo(0, 0, 600, 400), GestureKind::Drag, ev(1, 0, 0));
        let down = pc.pointer_down(
            "b",
            false,
            geo(700, 0, 400, 300),
            GestureKind::Resize(ResizeEdge::E),
            ev(2, 1100, 100),
        );
        assert!(matches!(down, DownOutcome::Started { .. }));

        // Each pointer only drives its own window.
        let (id_a, g_a) = pc.pointer_move(ev(1, 30, 20)).unwrap();
        assert_eq!(id_a, "a");
        assert_eq!(g_a, geo(30, 20, 600, 400));

        let (id_b, g_b) = pc.pointer_move(ev(2, 1150, 100)).unwrap();
        assert_eq!(id_b, "b");
        assert_eq!(g_b, geo(700, 0, 450, 300));
    }

    #[test]
    fn test_window_cannot_have_two_gestures() {
        let mut pc = PointerController::new();
        pc.pointer_down("a", false, geo(0, 0, 600, 400), GestureKind::Drag, ev(1, 0, 0));

        let down = pc.pointer_down(
            "a",
            false,
            geo(0, 0, 600, 400),
            GestureKind::Resize(ResizeEdge::S),
            ev(2, 200, 400),
        );
        assert_eq!(down, DownOutcome::Ignored);
    }

    #[test]
    fn test_cancel_behaves_like_up() {
        let mut pc = PointerController::new();
        pc.pointer_down("a", false, geo(50, 50, 600, 400), GestureKind::Drag, ev(1, 100, 100));
        pc.pointer_move(ev(1, 120, 130));

        let out = pc.pointer_cancel(ev(1, 120, 130));
        assert_eq!(
            out,
            UpOutcome::Commit {
                window_id: "a".to_string(),
                geometry: geo(70, 80, 600, 400),
            }
        );
        assert!(pc.active_gesture(1).is_none());
    }

    #[test]
    fn test_double_tap_toggles_maximize() {
        let mut pc = PointerController::new();

        pc.pointer_down("a", false, geo(0, 0, 600, 400), GestureKind::Drag, ev_at(1, 10, 10, 100));
        pc.pointer_up(ev_at(1, 10, 10, 150));

        pc.pointer_down("a", false, geo(0, 0, 600, 400), GestureKind::Drag, ev_at(1, 10, 10, 300));
        let out = pc.pointer_up(ev_at(1, 10, 10, 350));
        assert_eq!(
            out,
            UpOutcome::ToggleMaximize {
                window_id: "a".to_string()
            }
        );
    }

    #[test]
    fn test_slow_second_tap_does_not_toggle() {
        let mut pc = PointerController::new();

        pc.pointer_down("a", false, geo(0, 0, 600, 400), GestureKind::Drag, ev_at(1, 10, 10, 0));
        pc.pointer_up(ev_at(1, 10, 10, 50));

        pc.pointer_down("a", false, geo(0, 0, 600, 400), GestureKind::Drag, ev_at(1, 10, 10, 900));
        let out = pc.pointer_up(ev_at(1, 10, 10, 950));
        assert!(matches!(out, UpOutcome::Commit { .. }));
    }

    #[test]
    fn test_moved_drag_is_not_a_tap() {
        let mut pc = PointerController::new();

        pc.pointer_down("a", false, geo(0, 0, 600, 400), GestureKind::Drag, ev_at(1, 10, 10, 0));
        pc.pointer_move(ev_at(1, 40, 10, 20));
        pc.pointer_up(ev_at(1, 40, 10, 50));

        // A prior real drag must not arm the double-tap.
        pc.pointer_down("a", false, geo(30, 0, 600, 400), GestureKind::Drag, ev_at(1, 10, 10, 100));
        let out = pc.pointer_up(ev_at(1, 10, 10, 150));
        assert!(matches!(out, UpOutcome::Commit { .. }));
    }
}
