//! VSIX bundle errors

use std::path::Path;

use super::InstallerError;

/// Creates a bundle not found error
pub fn not_found(path: &Path) -> InstallerError {
    InstallerError::BundleNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a bundle load failed error
pub fn load_failed(path: &Path, reason: impl ToString) -> InstallerError {
    InstallerError::BundleLoadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
