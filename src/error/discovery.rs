//! Host version discovery errors

use super::InstallerError;

/// Creates an error for a missing installation registry root
pub fn unavailable(root: impl Into<String>) -> InstallerError {
    InstallerError::DiscoveryUnavailable { root: root.into() }
}

/// Creates an error for a version without a resolvable executable
pub fn version_not_usable(version: impl Into<String>, detected: Vec<String>) -> InstallerError {
    InstallerError::VersionNotUsable {
        version: version.into(),
        detected,
    }
}
