//! Runtime configuration injected into the core.
//!
//! # Responsibility
//! - Carry the store file location chosen by the host process.
//! - Carry per-view window geometry handed to the presentation layer.
//!
//! # Invariants
//! - The core never reads environment variables; hosts resolve values and
//!   pass them in.

use crate::navigation::ViewName;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name of the message database next to the application.
pub const DB_FILE_NAME: &str = "database.db";

/// Resolves where the database file lives.
///
/// Packaged builds pass the directory they were unpacked to; development
/// runs pass `None` and use the working directory.
pub fn resolve_store_path(bundle_dir: Option<&Path>) -> PathBuf {
    bundle_dir.unwrap_or_else(|| Path::new(".")).join(DB_FILE_NAME)
}

/// Location of the SQLite file backing the message store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store config for `database.db` inside `bundle_dir` (or `.`).
    pub fn beside(bundle_dir: Option<&Path>) -> Self {
        Self::new(resolve_store_path(bundle_dir))
    }
}

/// Window size requested when a view becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
}

impl WindowGeometry {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Display for WindowGeometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Window geometry per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryConfig {
    pub main_menu: WindowGeometry,
    pub input_data: WindowGeometry,
    pub view_data: WindowGeometry,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            main_menu: WindowGeometry::new(400, 300),
            input_data: WindowGeometry::new(400, 300),
            view_data: WindowGeometry::new(800, 400),
        }
    }
}

impl GeometryConfig {
    pub fn for_view(&self, view: ViewName) -> WindowGeometry {
        match view {
            ViewName::MainMenu => self.main_menu,
            ViewName::InputData => self.input_data,
            ViewName::ViewData => self.view_data,
        }
    }
}

/// Everything the application needs at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub geometry: GeometryConfig,
}

impl AppConfig {
    pub fn new(store: StoreConfig) -> Self {
        Self {
            store,
            geometry: GeometryConfig::default(),
        }
    }
}
