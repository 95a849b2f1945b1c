//! Operations module for installing and uninstalling extensions
//!
//! This module provides high-level operations that coordinate:
//! - InstallOperation: install, optionally replacing an existing copy
//! - UninstallOperation: remove an installed extension by identifier
//!
//! The operations coordinate with:
//! - Discovery: version resolution (from discovery module)
//! - Scope: opening the settings scope of the resolved executable
//! - Registry: one extension service handle per call (from registry module)
//! - UI: status reporting (from ui module)

pub mod install;
pub mod uninstall;

pub use install::{InstallOperation, InstallOptions, Replacement};
pub use uninstall::{UninstallOperation, UninstallOptions};

use crate::scope::Profile;
use crate::version::HostVersion;

/// `Visual Studio 16.0` or `Visual Studio 16.0 /rootSuffix Exp`
pub(crate) fn target_label(version: &HostVersion, profile: &Profile) -> String {
    match &profile.root_suffix {
        Some(suffix) => format!("Visual Studio {version} /rootSuffix {suffix}"),
        None => format!("Visual Studio {version}"),
    }
}
