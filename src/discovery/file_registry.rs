//! Installation registry mirrored in a YAML file
//!
//! The file holds the subtree below `SOFTWARE\Microsoft\VisualStudio`:
//!
//! ```yaml
//! "15.0":
//!   Setup:
//!     VS:
//!       EnvironmentPath: C:\VS15\Common7\IDE\devenv.exe
//! "16.0_Config": {}
//! ```
//!
//! Keys are matched case-insensitively like registry keys. Version keys
//! should be quoted so YAML keeps them as strings.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use super::{ENVIRONMENT_PATH_VALUE, InstallationLister, SETUP_KEY};
use crate::error::{InstallerError, Result, discovery};

/// Registry mirror loaded from a YAML file
#[derive(Debug)]
pub struct FileRegistry {
    path: PathBuf,
    /// `None` when the file does not exist
    root: Option<Mapping>,
}

impl FileRegistry {
    /// Load a registry mirror.
    ///
    /// A missing file is not an error here; it surfaces as
    /// `DiscoveryUnavailable` once versions are listed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                root: None,
            });
        }

        let content = fs::read_to_string(path).map_err(|e| InstallerError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(path, &content)
    }

    fn from_yaml(path: &Path, content: &str) -> Result<Self> {
        let parse_failed = |reason: String| InstallerError::ConfigParseFailed {
            path: path.display().to_string(),
            reason,
        };

        let value: Value = serde_yaml::from_str(content).map_err(|e| parse_failed(e.to_string()))?;
        let root = match value {
            Value::Null => Mapping::new(),
            Value::Mapping(mapping) => mapping,
            _ => return Err(parse_failed("registry root must be a mapping".to_string())),
        };

        Ok(Self {
            path: path.to_path_buf(),
            root: Some(root),
        })
    }
}

fn key_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Case-insensitive child lookup
fn child<'m>(mapping: &'m Mapping, name: &str) -> Option<&'m Value> {
    mapping.iter().find_map(|(key, value)| {
        key_name(key)
            .filter(|key| key.eq_ignore_ascii_case(name))
            .map(|_| value)
    })
}

impl InstallationLister for FileRegistry {
    fn version_keys(&self) -> Result<Vec<String>> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| discovery::unavailable(self.path.display().to_string()))?;

        Ok(root.keys().filter_map(key_name).collect())
    }

    fn environment_path(&self, version_key: &str) -> Option<PathBuf> {
        let mut node = child(self.root.as_ref()?, version_key)?;
        for segment in SETUP_KEY.split('\\') {
            node = child(node.as_mapping()?, segment)?;
        }

        let path = child(node.as_mapping()?, ENVIRONMENT_PATH_VALUE)?.as_str()?;
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }
}
