// Desktop manager: composes the registry, pointer controller, clamp and
// persistence behind the lifecycle operations the presentation layer calls.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::error::DesktopError;
use crate::events::{DesktopEvent, EventSink, Indicator, StartMenuEntry, WindowSnapshot};
use crate::geometry::{clamp::clamp_default, Geometry, Viewport, MIN_HEIGHT, MIN_WIDTH, TASKBAR_HEIGHT};
use crate::input::controller::{DownOutcome, PointerController, UpOutcome};
use crate::input::types::{ArrowKey, GestureKind, Modifiers, PointerEvent};
use crate::persist::{self, LayoutSnapshot, StateStore, Theme, LAYOUT_KEY};
use crate::state::window::{PersistedWindow, WindowConfig};
use crate::state::WindowRegistry;

/// Token for a staged (animated) minimize or close. The animation callback
/// hands it back through `commit_*`; if the window was touched in between,
/// the token is stale and the completion is dropped instead of clobbering
/// newer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionToken {
    window_id: String,
    token: Uuid,
}

impl CompletionToken {
    pub fn window_id(&self) -> &str {
        &self.window_id
    }
}

/// The desktop session orchestrator. One per session; owns the registry and
/// the gesture controller, writes layout through the store, and reports
/// every visible change to the sink.
pub struct DesktopManager<S: StateStore, E: EventSink> {
    registry: WindowRegistry,
    controller: PointerController,
    store: S,
    sink: E,
    screen_width: u32,
    screen_height: u32,
    taskbar_height: u32,
    theme: Theme,
    /// Window id to the token of its currently staged completion, if any.
    pending: HashMap<String, Uuid>,
}

impl<S: StateStore, E: EventSink> DesktopManager<S, E> {
    pub fn new(store: S, sink: E, screen_width: u32, screen_height: u32) -> Self {
        let theme = persist::load_theme(&store);
        Self {
            registry: WindowRegistry::new(),
            controller: PointerController::new(),
            store,
            sink,
            screen_width,
            screen_height,
            taskbar_height: TASKBAR_HEIGHT,
            theme,
            pending: HashMap::new(),
        }
    }

    /// Usable desktop area: screen minus the taskbar strip.
    pub fn viewport(&self) -> Viewport {
        Viewport::from_screen(self.screen_width, self.screen_height, self.taskbar_height)
    }

    // ===== Window Lifecycle =====

    /// Register a new window. Initial geometry is clamped into the viewport.
    pub fn create_window(&mut self, id: &str, config: WindowConfig) -> Result<(), DesktopError> {
        self.registry.create(id, &config)?;

        let vp = self.viewport();
        let snapshot = {
            let entity = self.registry.get_mut(id)?;
            entity.geometry = clamp_default(entity.geometry, vp);
            WindowSnapshot::from(&*entity)
        };

        debug!(id, "window created");
        self.sink.emit(DesktopEvent::WindowCreated { window: snapshot });
        self.refresh_indicators();
        Ok(())
    }

    /// Create the stock desktop windows, then apply any persisted layout on
    /// top of their defaults.
    pub fn seed_default_windows(&mut self) -> Result<(), DesktopError> {
        for (id, config) in default_windows() {
            self.create_window(id, config)?;
        }
        self.load_state();
        Ok(())
    }

    /// Raise a window and give it focus. Idempotent when already focused;
    /// closed windows are left alone.
    pub fn focus_window(&mut self, id: &str) -> Result<(), DesktopError> {
        if self.registry.set_focused(id)? {
            self.sink
                .emit(DesktopEvent::FocusChanged { id: id.to_string() });
            self.refresh_indicators();
        }
        Ok(())
    }

    pub fn minimize_window(&mut self, id: &str) -> Result<(), DesktopError> {
        let entity = self.registry.get_mut(id)?;
        if entity.closed {
            return Ok(());
        }
        entity.minimized = true;

        self.invalidate_pending(id);
        self.emit_state_changed(id);
        self.refresh_indicators();
        self.save_state();
        Ok(())
    }

    /// Un-minimize and re-focus.
    pub fn restore_window(&mut self, id: &str) -> Result<(), DesktopError> {
        let entity = self.registry.get_mut(id)?;
        entity.minimized = false;

        self.invalidate_pending(id);
        if self.registry.set_focused(id)? {
            self.sink
                .emit(DesktopEvent::FocusChanged { id: id.to_string() });
        }
        self.emit_state_changed(id);
        self.refresh_indicators();
        self.save_state();
        Ok(())
    }

    /// Maximize, or restore the pre-maximize geometry. The stored geometry is
    /// never overwritten while maximized, so toggling back is exact. A
    /// minimized window is restored first, keeping the two flags mutually
    /// exclusive.
    pub fn toggle_maximize(&mut self, id: &str) -> Result<(), DesktopError> {
        let entity = self.registry.get_mut(id)?;
        if entity.closed {
            return Ok(());
        }
        entity.minimized = false;
        entity.maximized = !entity.maximized;

        self.invalidate_pending(id);
        self.emit_state_changed(id);
        self.refresh_indicators();
        self.save_state();
        Ok(())
    }

    /// Flag a window closed. The entity stays in the registry so its id and
    /// persisted geometry survive; open_window brings it back.
    pub fn close_window(&mut self, id: &str) -> Result<(), DesktopError> {
        let entity = self.registry.get_mut(id)?;
        entity.closed = true;
        self.registry.unfocus(id);

        self.invalidate_pending(id);
        self.emit_state_changed(id);
        self.refresh_indicators();
        self.save_state();
        Ok(())
    }

    /// Reopen a closed window and focus it. Unknown ids are a silent no-op,
    /// so launcher entries can point at windows that were never created.
    pub fn open_window(&mut self, id: &str) {
        if !self.registry.contains(id) {
            debug!(id, "open ignored for unknown window");
            return;
        }

        if let Ok(entity) = self.registry.get_mut(id) {
            entity.closed = false;
            entity.minimized = false;
        }

        self.invalidate_pending(id);
        if let Ok(true) = self.registry.set_focused(id) {
            self.sink
                .emit(DesktopEvent::FocusChanged { id: id.to_string() });
        }
        self.emit_state_changed(id);
        self.refresh_indicators();
        self.save_state();
    }

    // ===== Staged Completions =====

    /// Stage a minimize behind an animation. The returned token must be
    /// handed back via commit_minimize when the animation finishes.
    pub fn stage_minimize(&mut self, id: &str) -> Result<CompletionToken, DesktopError> {
        self.stage(id)
    }

    /// Apply a staged minimize, unless the token went stale.
    pub fn commit_minimize(&mut self, token: &CompletionToken) {
        if self.take_if_current(token) {
            let _ = self.minimize_window(&token.window_id);
        }
    }

    /// Stage a close behind an animation.
    pub fn stage_close(&mut self, id: &str) -> Result<CompletionToken, DesktopError> {
        self.stage(id)
    }

    /// Apply a staged close, unless the token went stale.
    pub fn commit_close(&mut self, token: &CompletionToken) {
        if self.take_if_current(token) {
            let _ = self.close_window(&token.window_id);
        }
    }

    fn stage(&mut self, id: &str) -> Result<CompletionToken, DesktopError> {
        self.registry.get(id)?;
        let token = Uuid::new_v4();
        // Restaging replaces any earlier pending completion for the window.
        self.pending.insert(id.to_string(), token);
        Ok(CompletionToken {
            window_id: id.to_string(),
            token,
        })
    }

    fn take_if_current(&mut self, token: &CompletionToken) -> bool {
        if self.pending.get(&token.window_id) == Some(&token.token) {
            self.pending.remove(&token.window_id);
            true
        } else {
            debug!(window_id = %token.window_id, "stale completion ignored");
            false
        }
    }

    /// Any committed mutation of a window outruns its staged completion.
    fn invalidate_pending(&mut self, id: &str) {
        self.pending.remove(id);
    }

    // ===== Pointer Path =====

    /// Pointer-down on a window's drag handle or one of its resize handles.
    pub fn handle_pointer_down(
        &mut self,
        window_id: &str,
        kind: GestureKind,
        event: PointerEvent,
    ) -> Result<(), DesktopError> {
        let entity = self.registry.get(window_id)?;
        if entity.closed || entity.minimized {
            return Ok(());
        }

        let maximized = entity.maximized;
        let geometry = entity.geometry;

        match self
            .controller
            .pointer_down(window_id, maximized, geometry, kind, event)
        {
            DownOutcome::Started { window_id } => {
                self.invalidate_pending(&window_id);
                self.focus_window(&window_id)?;
            }
            DownOutcome::Ignored => {}
        }
        Ok(())
    }

    /// Pointer-move. Returns the live proposed geometry for the renderer;
    /// committed state is only written at gesture end.
    pub fn handle_pointer_move(&mut self, event: PointerEvent) -> Option<(String, Geometry)> {
        self.controller.pointer_move(event)
    }

    /// Pointer-up: commit the gesture's final geometry, clamp it, persist.
    pub fn handle_pointer_up(&mut self, event: PointerEvent) {
        match self.controller.pointer_up(event) {
            UpOutcome::Commit {
                window_id,
                geometry,
            } => self.commit_gesture(&window_id, geometry),
            UpOutcome::ToggleMaximize { window_id } => {
                let _ = self.toggle_maximize(&window_id);
            }
            UpOutcome::Ignored => {}
        }
    }

    /// Pointer-cancel commits exactly like pointer-up; no partial state may
    /// survive a device disconnect.
    pub fn handle_pointer_cancel(&mut self, event: PointerEvent) {
        self.handle_pointer_up(event);
    }

    fn commit_gesture(&mut self, window_id: &str, geometry: Geometry) {
        let vp = self.viewport();
        let Ok(entity) = self.registry.get_mut(window_id) else {
            return;
        };

        entity.geometry = geometry;
        if !entity.maximized {
            entity.geometry = clamp_default(entity.geometry, vp);
        }

        self.invalidate_pending(window_id);
        self.emit_state_changed(window_id);
        self.save_state();
    }

    // ===== Keyboard Path =====

    /// Arrow-key nudge of the focused window. Synchronous: mutates committed
    /// geometry directly, then clamps and persists. Shift moves by 1, Alt by
    /// 20, default 10; Ctrl/Meta resizes instead, with the size floors
    /// applied. Maximized windows ignore nudges.
    pub fn nudge_window(
        &mut self,
        id: &str,
        key: ArrowKey,
        modifiers: Modifiers,
    ) -> Result<(), DesktopError> {
        let vp = self.viewport();
        let entity = self.registry.get_mut(id)?;
        if entity.maximized || entity.closed {
            return Ok(());
        }

        let step = modifiers.step();
        let g = &mut entity.geometry;
        if modifiers.is_resize() {
            match key {
                ArrowKey::Left => g.width = (g.width as i32 - step).max(MIN_WIDTH as i32) as u32,
                ArrowKey::Right => g.width = (g.width as i32 + step) as u32,
                ArrowKey::Up => g.height = (g.height as i32 - step).max(MIN_HEIGHT as i32) as u32,
                ArrowKey::Down => g.height = (g.height as i32 + step) as u32,
            }
        } else {
            match key {
                ArrowKey::Left => g.x -= step,
                ArrowKey::Right => g.x += step,
                ArrowKey::Up => g.y -= step,
                ArrowKey::Down => g.y += step,
            }
        }
        entity.geometry = clamp_default(entity.geometry, vp);

        self.invalidate_pending(id);
        self.emit_state_changed(id);
        self.save_state();
        Ok(())
    }

    // ===== Viewport =====

    /// Re-clamp every non-maximized window; called after viewport changes.
    pub fn clamp_all_windows(&mut self) {
        let vp = self.viewport();
        for id in self.registry.ids() {
            if let Ok(entity) = self.registry.get_mut(&id) {
                if !entity.maximized {
                    entity.geometry = clamp_default(entity.geometry, vp);
                }
            }
        }
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
        self.clamp_all_windows();
    }

    // ===== Taskbar / Start Menu Contract =====

    /// Indicator states in window insertion order.
    pub fn indicators(&self) -> Vec<Indicator> {
        let focused = self.registry.focused_id();
        self.registry
            .iter()
            .map(|w| Indicator {
                id: w.id.clone(),
                title: w.title.clone(),
                icon: w.icon.clone(),
                closed: w.closed,
                minimized: w.minimized,
                active: focused == Some(w.id.as_str()) && !w.minimized,
            })
            .collect()
    }

    /// Launcher rows: every window flagged for the start menu, open or not.
    pub fn start_menu_entries(&self) -> Vec<StartMenuEntry> {
        self.registry
            .iter()
            .filter(|w| w.show_in_start)
            .map(|w| StartMenuEntry {
                id: w.id.clone(),
                icon: w.icon.clone(),
                label: w.title.clone(),
            })
            .collect()
    }

    /// Taskbar indicator click: restore if minimized, minimize if it is the
    /// focused window, otherwise just focus.
    pub fn indicator_clicked(&mut self, id: &str) -> Result<(), DesktopError> {
        let entity = self.registry.get(id)?;
        if entity.minimized {
            self.restore_window(id)
        } else if self.registry.focused_id() == Some(id) {
            self.minimize_window(id)
        } else {
            self.focus_window(id)
        }
    }

    fn refresh_indicators(&mut self) {
        let indicators = self.indicators();
        self.sink
            .emit(DesktopEvent::IndicatorsChanged { indicators });
    }

    // ===== Persistence =====

    /// Write the full layout blob. Eager and unconditional; the store is a
    /// last-write-wins overwrite.
    pub fn save_state(&mut self) {
        let snapshot: LayoutSnapshot = self
            .registry
            .iter()
            .map(|w| (w.id.clone(), PersistedWindow::from_entity(w)))
            .collect();
        let bytes = persist::encode_layout(&snapshot);
        self.store.save(LAYOUT_KEY, &bytes);
    }

    /// Best-effort load: unknown ids in the blob are ignored, ids missing
    /// from it keep their config defaults, malformed blobs count as no saved
    /// state. Loaded geometry is re-floored and re-clamped.
    pub fn load_state(&mut self) {
        let Some(bytes) = self.store.load(LAYOUT_KEY) else {
            return;
        };
        let Some(snapshot) = persist::decode_layout(&bytes) else {
            return;
        };

        let vp = self.viewport();
        for id in self.registry.ids() {
            if let Some(record) = snapshot.get(&id) {
                if let Ok(entity) = self.registry.get_mut(&id) {
                    record.apply_to(entity);
                    if !entity.maximized {
                        entity.geometry = clamp_default(entity.geometry, vp);
                    }
                }
            }
        }
        self.refresh_indicators();
    }

    // ===== Theme =====

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        persist::save_theme(&mut self.store, self.theme);
        self.sink
            .emit(DesktopEvent::ThemeChanged { theme: self.theme });
        self.theme
    }

    // ===== Read Access =====

    pub fn window(&self, id: &str) -> Result<WindowSnapshot, DesktopError> {
        self.registry.get(id).map(WindowSnapshot::from)
    }

    pub fn focused_window(&self) -> Option<&str> {
        self.registry.focused_id()
    }

    pub fn window_count(&self) -> usize {
        self.registry.len()
    }

    fn emit_state_changed(&mut self, id: &str) {
        let snapshot = match self.registry.get(id) {
            Ok(entity) => WindowSnapshot::from(entity),
            Err(_) => return,
        };
        self.sink
            .emit(DesktopEvent::WindowStateChanged { window: snapshot });
    }
}

/// The three windows the stock desktop ships with.
pub fn default_windows() -> Vec<(&'static str, WindowConfig)> {
    vec![
        (
            "console",
            WindowConfig {
                title: "Analog Console".to_string(),
                icon: "📟".to_string(),
                x: 50,
                y: 50,
                width: 600,
                height: 400,
                show_in_start: true,
            },
        ),
        (
            "links",
            WindowConfig {
                title: "Links".to_string(),
                icon: "🔗".to_string(),
                x: 100,
                y: 100,
                width: 700,
                height: 500,
                show_in_start: true,
            },
        ),
        (
            "status",
            WindowConfig {
                title: "Status Monitor".to_string(),
                icon: "📊".to_string(),
                x: 150,
                y: 150,
                width: 500,
                height: 450,
                show_in_start: true,
            },
        ),
    ]
}
