//! Per-profile extension catalog
//!
//! `Extensions/extensions.json` records every extension the local service
//! manages. Writes go through a temporary file in the same directory and a
//! rename, so a crash never leaves a truncated catalog.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InstallerError, Result};

/// Catalog file name inside the extensions directory
pub const CATALOG_FILE: &str = "extensions.json";

/// Marker touched whenever the catalog changes, prompting the host to rescan
pub const CHANGED_MARKER: &str = "extensions.configurationchanged";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    Installed,
    /// Files removed, bookkeeping not yet committed
    PendingUninstall,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub identifier: String,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    pub install_path: PathBuf,
    pub hash: String,
    pub state: EntryState,
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub extensions: Vec<CatalogEntry>,
}

impl Catalog {
    /// Load the catalog of an extensions directory; missing means empty
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CATALOG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| InstallerError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| InstallerError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Write the catalog and touch the change marker
    pub fn save(&self, dir: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        staged.write_all(json.as_bytes())?;
        staged.write_all(b"\n")?;
        staged
            .persist(dir.join(CATALOG_FILE))
            .map_err(|e| InstallerError::from(e.error))?;

        fs::write(dir.join(CHANGED_MARKER), b"")?;
        Ok(())
    }

    /// Entry for an identifier, in any state
    pub fn find(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.extensions.iter().find(|e| e.identifier == identifier)
    }

    pub fn find_mut(&mut self, identifier: &str) -> Option<&mut CatalogEntry> {
        self.extensions
            .iter_mut()
            .find(|e| e.identifier == identifier)
    }

    /// Entry for an identifier that is currently installed
    pub fn installed(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.find(identifier)
            .filter(|e| e.state == EntryState::Installed)
    }

    pub fn remove(&mut self, identifier: &str) {
        self.extensions.retain(|e| e.identifier != identifier);
    }
}
