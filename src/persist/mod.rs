// Layout and theme persistence

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::window::PersistedWindow;

/// Storage key for the window layout blob.
pub const LAYOUT_KEY: &str = "windowState";
/// Storage key for the phosphor theme token.
pub const THEME_KEY: &str = "theme";

/// Key-value store the desktop persists through. One global blob per key;
/// writes are full-state overwrites and the last write wins.
pub trait StateStore {
    fn load(&self, key: &str) -> Option<Vec<u8>>;
    fn save(&mut self, key: &str, bytes: &[u8]);
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, bytes: &[u8]) {
        self.entries.insert(key.to_string(), bytes.to_vec());
    }
}

/// One file per key under a base directory. Read failures degrade to "no
/// saved state"; they are logged and never surfaced to the session.
#[derive(Debug)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl StateStore for FileStore {
    fn load(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, key: &str, bytes: &[u8]) {
        if let Err(e) = std::fs::create_dir_all(&self.base_dir) {
            warn!("Failed to create {}: {}", self.base_dir.display(), e);
            return;
        }
        let path = self.path_for(key);
        if let Err(e) = std::fs::write(&path, bytes) {
            warn!("Failed to write {}: {}", path.display(), e);
        }
    }
}

/// The layout blob: window id to persisted geometry and flags.
pub type LayoutSnapshot = HashMap<String, PersistedWindow>;

pub fn encode_layout(snapshot: &LayoutSnapshot) -> Vec<u8> {
    match serde_json::to_vec(snapshot) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to encode layout: {}", e);
            Vec::new()
        }
    }
}

/// Decode a loaded blob. Malformed data is treated as no saved state.
pub fn decode_layout(bytes: &[u8]) -> Option<LayoutSnapshot> {
    match serde_json::from_slice(bytes) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("Discarding unreadable layout blob: {}", e);
            None
        }
    }
}

/// CRT phosphor theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Green,
    Amber,
}

impl Theme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "green" => Some(Theme::Green),
            "amber" => Some(Theme::Amber),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Green => "green",
            Theme::Amber => "amber",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Green => Theme::Amber,
            Theme::Amber => Theme::Green,
        }
    }

    /// Short label shown in the taskbar status capsule.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Green => "GRN",
            Theme::Amber => "AMB",
        }
    }
}

pub fn load_theme(store: &dyn StateStore) -> Theme {
    store
        .load(THEME_KEY)
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .and_then(|s| Theme::from_str(s.trim()))
        .unwrap_or_default()
}

pub fn save_theme(store: &mut dyn StateStore, theme: Theme) {
    store.save(THEME_KEY, theme.as_str().as_bytes());
}
