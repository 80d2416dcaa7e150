use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;

/// Static configuration for a window at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    /// Icon glyph shown in the taskbar indicator and start menu.
    pub icon: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Whether the window appears in the start-menu launcher.
    pub show_in_start: bool,
}

impl WindowConfig {
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.x, self.y, self.width, self.height)
    }
}

/// One desktop window. Owned exclusively by the registry; interaction code
/// refers to it by id only.
///
/// The three flags are independent booleans. While `maximized` is set,
/// `geometry` holds the pre-maximize rectangle to restore to; the maximized
/// view itself is a full-viewport overlay owned by the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowEntity {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub show_in_start: bool,
    pub geometry: Geometry,
    pub maximized: bool,
    pub minimized: bool,
    pub closed: bool,
    /// Stacking rank. 0 until first focused, then always a unique value from
    /// the registry's counter.
    pub z_order: u32,
}

impl WindowEntity {
    pub fn from_config(id: &str, config: &WindowConfig) -> Self {
        Self {
            id: id.to_string(),
            title: config.title.clone(),
            icon: config.icon.clone(),
            show_in_start: config.show_in_start,
            geometry: config.geometry(),
            maximized: false,
            minimized: false,
            closed: false,
            z_order: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }
}

/// Geometry and flags persisted per window id in the layout blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedWindow {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub maximized: bool,
    pub minimized: bool,
    pub closed: bool,
}

impl PersistedWindow {
    pub fn from_entity(entity: &WindowEntity) -> Self {
        Self {
            x: entity.geometry.x,
            y: entity.geometry.y,
            width: entity.geometry.width,
            height: entity.geometry.height,
            maximized: entity.maximized,
            minimized: entity.minimized,
            closed: entity.closed,
        }
    }

    /// Apply a loaded record to a live window. Sizes are re-floored to
    /// 280x180 in case an older blob stored something smaller.
    pub fn apply_to(&self, entity: &mut WindowEntity) {
        entity.geometry = Geometry::new(self.x, self.y, self.width, self.height).floored();
        entity.maximized = self.maximized;
        entity.minimized = self.minimized;
        entity.closed = self.closed;
    }
}
