use std::collections::HashMap;

use crate::error::DesktopError;

use self::window::{WindowConfig, WindowEntity};

pub mod window;

/// Counter base; leaves stacking room below the first window for desktop
/// chrome rendered by the presentation layer.
const Z_ORDER_BASE: u32 = 1000;

/// Owns every window of the desktop session. Windows are created once and
/// never removed; closing only flags them, so ids stay stable for the
/// lifetime of the session and across persisted layouts.
pub struct WindowRegistry {
    windows: HashMap<String, WindowEntity>,
    /// Insertion order of ids; drives deterministic indicator layout.
    order: Vec<String>,
    focused: Option<String>,
    z_counter: u32,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
            order: Vec::new(),
            focused: None,
            z_counter: Z_ORDER_BASE,
        }
    }

    /// Register a new window. The id must be unused; ids are never reused.
    /// The window gets a z-order only on first focus.
    pub fn create(&mut self, id: &str, config: &WindowConfig) -> Result<(), DesktopError> {
        if self.windows.contains_key(id) {
            return Err(DesktopError::DuplicateId(id.to_string()));
        }

        self.windows
            .insert(id.to_string(), WindowEntity::from_config(id, config));
        self.order.push(id.to_string());
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.windows.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Result<&WindowEntity, DesktopError> {
        self.windows
            .get(id)
            .ok_or_else(|| DesktopError::NotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut WindowEntity, DesktopError> {
        self.windows
            .get_mut(id)
            .ok_or_else(|| DesktopError::NotFound(id.to_string()))
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Focus a window and raise it above all others. Returns `true` when the
    /// focus actually changed, `false` when it was a no-op (already focused,
    /// or the window is closed and excluded from focus consideration).
    ///
    /// The counter only ever increments, so z-order values form a strict
    /// total order and ties cannot occur.
    pub fn set_focused(&mut self, id: &str) -> Result<bool, DesktopError> {
        let entity = self
            .windows
            .get_mut(id)
            .ok_or_else(|| DesktopError::NotFound(id.to_string()))?;

        if entity.closed {
            return Ok(false);
        }
        if self.focused.as_deref() == Some(id) {
            return Ok(false);
        }

        self.z_counter += 1;
        entity.z_order = self.z_counter;
        self.focused = Some(id.to_string());
        Ok(true)
    }

    /// Drop focus if it currently points at `id` (used when closing).
    pub fn unfocus(&mut self, id: &str) {
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }
    }

    /// Iterate windows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &WindowEntity> {
        self.order.iter().filter_map(|id| self.windows.get(id))
    }

    /// Ids in insertion order, for callers that need to mutate while walking.
    pub fn ids(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}
