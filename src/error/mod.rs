//! Error types and handling for rootvsix
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`discovery`]: Host version discovery errors
//! - [`bundle`]: VSIX bundle errors
//! - [`registry`]: Settings scope and extension service errors

pub mod bundle;
pub mod discovery;
pub mod registry;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for rootvsix operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallerError {
    // Discovery errors
    #[error("Installation registry not available: {root}")]
    #[diagnostic(
        code(rootvsix::discovery::unavailable),
        help("Install Visual Studio, or point --registry-file at a registry mirror")
    )]
    DiscoveryUnavailable { root: String },

    #[error("Cannot find any installed copies of Visual Studio")]
    #[diagnostic(
        code(rootvsix::discovery::no_installation),
        help("No installations were detected in the installation registry")
    )]
    NoInstallationFound,

    #[error("Cannot find Visual Studio {version}")]
    #[diagnostic(
        code(rootvsix::discovery::version_not_usable),
        help("Pass --vs-version with one of the detected versions")
    )]
    VersionNotUsable {
        version: String,
        /// Versions whose executable does resolve, for the caller to print
        detected: Vec<String>,
    },

    // Bundle errors
    #[error("Cannot find VSIX file {path}")]
    #[diagnostic(code(rootvsix::bundle::not_found))]
    BundleNotFound { path: String },

    #[error("Failed to load VSIX file {path}: {reason}")]
    #[diagnostic(
        code(rootvsix::bundle::load_failed),
        help("The archive must contain a valid extension.vsixmanifest")
    )]
    BundleLoadFailed { path: String, reason: String },

    // Scope and registry errors
    #[error("Failed to open settings for {executable}: {reason}")]
    #[diagnostic(code(rootvsix::scope::open_failed))]
    ScopeOpenFailed { executable: String, reason: String },

    #[error("Extension manager failed to {operation}: {reason}")]
    #[diagnostic(code(rootvsix::registry::operation_failed))]
    RegistryOperationFailed { operation: String, reason: String },

    #[error("Extension '{identifier}' is not installed")]
    #[diagnostic(
        code(rootvsix::registry::not_installed),
        help("Check the identifier and the --vs-version / --root-suffix it was installed under")
    )]
    ExtensionNotInstalled { identifier: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(rootvsix::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(rootvsix::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(rootvsix::fs::io_error))]
    IoError { message: String },
}

impl InstallerError {
    /// Versions worth listing alongside the error message, if any
    pub fn detected_versions(&self) -> &[String] {
        match self {
            InstallerError::VersionNotUsable { detected, .. } => detected,
            _ => &[],
        }
    }
}

impl From<std::io::Error> for InstallerError {
    fn from(err: std::io::Error) -> Self {
        InstallerError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for InstallerError {
    fn from(err: serde_yaml::Error) -> Self {
        InstallerError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for InstallerError {
    fn from(err: serde_json::Error) -> Self {
        InstallerError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for InstallerError {
    fn from(err: zip::result::ZipError) -> Self {
        InstallerError::BundleLoadFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, InstallerError>;
