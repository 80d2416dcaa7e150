// Presentation-layer contract: lifecycle events out, commands back in.
//
// The taskbar, start menu and CRT renderer live outside this crate; they
// implement EventSink, redraw from the payloads, and call back into the
// manager (open_window / focus_window / indicator_clicked).

use serde::Serialize;

use crate::persist::Theme;
use crate::state::window::WindowEntity;

/// Snapshot of one window as shown to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowSnapshot {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub maximized: bool,
    pub minimized: bool,
    pub closed: bool,
    pub z_order: u32,
    pub show_in_start: bool,
}

impl From<&WindowEntity> for WindowSnapshot {
    fn from(entity: &WindowEntity) -> Self {
        Self {
            id: entity.id.clone(),
            title: entity.title.clone(),
            icon: entity.icon.clone(),
            x: entity.geometry.x,
            y: entity.geometry.y,
            width: entity.geometry.width,
            height: entity.geometry.height,
            maximized: entity.maximized,
            minimized: entity.minimized,
            closed: entity.closed,
            z_order: entity.z_order,
            show_in_start: entity.show_in_start,
        }
    }
}

/// Taskbar indicator state for one window. Emitted as a full list in window
/// insertion order so the taskbar layout is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub closed: bool,
    pub minimized: bool,
    /// Focused and not minimized.
    pub active: bool,
}

/// One launcher row in the start menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartMenuEntry {
    pub id: String,
    pub icon: String,
    pub label: String,
}

/// Events the desktop emits towards the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum DesktopEvent {
    WindowCreated { window: WindowSnapshot },
    WindowStateChanged { window: WindowSnapshot },
    FocusChanged { id: String },
    IndicatorsChanged { indicators: Vec<Indicator> },
    ThemeChanged { theme: Theme },
}

/// Where desktop events go. Implemented by the presentation layer.
pub trait EventSink {
    fn emit(&mut self, event: DesktopEvent);
}

/// Sink that drops everything; for headless sessions and tests that do not
/// inspect events.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: DesktopEvent) {}
}
