//! Settings scope and extension service errors

use std::path::Path;

use super::InstallerError;

/// Creates a scope open failed error
pub fn scope_open_failed(executable: &Path, reason: impl ToString) -> InstallerError {
    InstallerError::ScopeOpenFailed {
        executable: executable.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an extension service operation failed error
pub fn operation_failed(operation: &str, reason: impl ToString) -> InstallerError {
    InstallerError::RegistryOperationFailed {
        operation: operation.to_string(),
        reason: reason.to_string(),
    }
}
