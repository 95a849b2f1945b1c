//! Settings scopes
//!
//! A scope is the opened settings store of one host executable, either its
//! default profile or a named sub-profile (root suffix such as `Exp`). It is
//! held exclusively for the whole run and released when dropped, on success
//! and on every error path alike.

pub mod local;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::registry::ExtensionService;

pub use local::LocalScopeOpener;

/// Which profile of an installation a scope belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub executable: PathBuf,
    /// `None` for the default profile
    pub root_suffix: Option<String>,
}

impl Profile {
    /// Profile for an executable; an empty suffix means the default profile
    pub fn new(executable: &Path, root_suffix: Option<&str>) -> Self {
        Self {
            executable: executable.to_path_buf(),
            root_suffix: root_suffix
                .map(str::trim)
                .filter(|suffix| !suffix.is_empty())
                .map(str::to_string),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root_suffix {
            Some(suffix) => write!(f, "{} /rootSuffix {}", self.executable.display(), suffix),
            None => write!(f, "{}", self.executable.display()),
        }
    }
}

/// An opened settings scope
pub trait SettingsScope {
    fn profile(&self) -> &Profile;

    /// Open a fresh extension service handle bound to this scope
    fn connect(&self) -> Result<Box<dyn ExtensionService + '_>>;
}

/// Factory for settings scopes
pub trait ScopeOpener {
    /// Open the scope for `executable`, using the default profile when the
    /// suffix is absent or empty.
    fn open(&self, executable: &Path, root_suffix: Option<&str>) -> Result<Box<dyn SettingsScope>>;
}
