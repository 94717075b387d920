#![forbid(unsafe_code)]

//! Persisted display preferences.
//!
//! Two string-valued preferences under fixed keys: the theme (`theme`,
//! default dark) and the accent color (`color`, default blue). They are
//! loaded once when a [`PrefCenter`] opens (seeding the store with
//! defaults on first run) and written through on every change.
//!
//! # Design Invariants
//!
//! 1. Storage failures never panic; operations return `Result`.
//! 2. File storage uses the write-rename pattern so a crashed write cannot
//!    corrupt the previous state.
//! 3. A missing store yields defaults; a present-but-unreadable store is an
//!    error, not a silent reset.

use std::fmt;
#[cfg(feature = "file-store")]
use std::path::PathBuf;
use std::sync::Mutex;

/// Default accent color name.
pub const DEFAULT_ACCENT: &str = "blue";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from preference storage.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Serialization error while writing.
    Serialization(String),
    /// Storage content is not the expected format.
    Corruption(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StoreError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Preference values
// ---------------------------------------------------------------------------

/// Display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Dark theme (the default).
    #[default]
    Dark,
    /// Light theme.
    Light,
}

impl Theme {
    /// Stable storage name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a storage name. Unknown names yield `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// The full preference set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Current theme.
    pub theme: Theme,
    /// Accent color name.
    pub accent: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            accent: DEFAULT_ACCENT.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Storage backends
// ---------------------------------------------------------------------------

/// A backing store for the preference set.
pub trait PrefStore {
    /// Load the stored preferences, or `None` when nothing was stored yet.
    fn load(&self) -> Result<Option<Preferences>, StoreError>;

    /// Persist the preferences.
    fn save(&self, prefs: &Preferences) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    prefs: Mutex<Option<Preferences>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryStore {
    fn load(&self) -> Result<Option<Preferences>, StoreError> {
        Ok(self.prefs.lock().unwrap().clone())
    }

    fn save(&self, prefs: &Preferences) -> Result<(), StoreError> {
        *self.prefs.lock().unwrap() = Some(prefs.clone());
        Ok(())
    }
}

/// On-disk JSON shape: the two fixed keys the store has always used.
#[cfg(feature = "file-store")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PrefFile {
    theme: String,
    color: String,
}

/// JSON file store with atomic write-rename persistence.
#[cfg(feature = "file-store")]
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

#[cfg(feature = "file-store")]
impl FileStore {
    /// Create a store backed by `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(feature = "file-store")]
impl PrefStore for FileStore {
    fn load(&self) -> Result<Option<Preferences>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let file: PrefFile =
            serde_json::from_str(&raw).map_err(|e| StoreError::Corruption(e.to_string()))?;
        Ok(Some(Preferences {
            // An unknown theme name in the file falls back to the default
            // rather than failing the whole load.
            theme: Theme::parse(&file.theme).unwrap_or_default(),
            accent: file.color,
        }))
    }

    fn save(&self, prefs: &Preferences) -> Result<(), StoreError> {
        let file = PrefFile {
            theme: prefs.theme.as_str().to_string(),
            color: prefs.accent.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        // Write-rename so a crash mid-write leaves the old file intact.
        let mut tmp = self.path.clone();
        tmp.set_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Preference center
// ---------------------------------------------------------------------------

/// Loaded preferences with write-through persistence.
#[derive(Debug)]
pub struct PrefCenter<S: PrefStore> {
    store: S,
    prefs: Preferences,
}

impl<S: PrefStore> PrefCenter<S> {
    /// Open the store, loading preferences. A first run (nothing stored)
    /// seeds the store with defaults before returning.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let prefs = match store.load()? {
            Some(prefs) => prefs,
            None => {
                let defaults = Preferences::default();
                store.save(&defaults)?;
                #[cfg(feature = "tracing")]
                tracing::debug!("seeded preference store with defaults");
                defaults
            }
        };
        Ok(Self { store, prefs })
    }

    /// Current theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.prefs.theme
    }

    /// Current accent color name.
    #[must_use]
    pub fn accent(&self) -> &str {
        &self.prefs.accent
    }

    /// Set and persist the theme.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.prefs.theme = theme;
        self.store.save(&self.prefs)
    }

    /// Toggle and persist the theme, returning the new value.
    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        let next = self.prefs.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Set and persist the accent color.
    pub fn set_accent(&mut self, accent: impl Into<String>) -> Result<(), StoreError> {
        self.prefs.accent = accent.into();
        self.store.save(&self.prefs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
