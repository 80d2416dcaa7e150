// crtdesk: window manager core for a retro CRT terminal desktop.
//
// The crate owns window state, gestures, clamping and persistence; rendering
// and event delivery belong to the embedding shell, which plugs in through
// EventSink and StateStore.

// Error types
pub mod error;
// Presentation-layer contract (events, indicators, start menu)
pub mod events;
// Geometry primitives and viewport clamping
pub mod geometry;
// Pointer and keyboard input handling
pub mod input;
// Session orchestrator
pub mod manager;
// Layout and theme persistence
pub mod persist;
// Window registry and entities
pub mod state;

pub use error::DesktopError;
pub use events::{DesktopEvent, EventSink, Indicator, NullSink, StartMenuEntry, WindowSnapshot};
pub use geometry::clamp::{clamp_default, clamp_to_viewport};
pub use geometry::{Geometry, Viewport, MIN_HEIGHT, MIN_VISIBLE, MIN_WIDTH, TASKBAR_HEIGHT};
pub use input::controller::PointerController;
pub use input::types::{ArrowKey, GestureKind, Modifiers, PointerEvent, ResizeEdge};
pub use manager::{default_windows, CompletionToken, DesktopManager};
pub use persist::{FileStore, MemoryStore, StateStore, Theme};
pub use state::window::{WindowConfig, WindowEntity};
pub use state::WindowRegistry;
