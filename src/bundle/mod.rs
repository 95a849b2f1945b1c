//! VSIX bundles
//!
//! A bundle is a ZIP archive carrying an `extension.vsixmanifest` at its
//! root. Only the manifest is read here; extraction belongs to the extension
//! service that installs it.

pub mod manifest;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Result, bundle};
pub use manifest::ManifestSchema;

/// Manifest entry name inside a VSIX archive
pub const MANIFEST_ENTRY: &str = "extension.vsixmanifest";

/// An installable extension read from a bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    pub identifier: String,
    pub name: String,
    pub version: String,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub schema: ManifestSchema,
    /// Archive the descriptor was loaded from
    pub source: PathBuf,
}

impl ExtensionDescriptor {
    /// Load the descriptor of the bundle at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| bundle::load_failed(path, e))?;
        let mut archive = zip::ZipArchive::new(file).map_err(|e| bundle::load_failed(path, e))?;

        let mut xml = String::new();
        archive
            .by_name(MANIFEST_ENTRY)
            .map_err(|_| bundle::load_failed(path, format!("archive has no {MANIFEST_ENTRY}")))?
            .read_to_string(&mut xml)
            .map_err(|e| bundle::load_failed(path, e))?;

        let manifest = manifest::parse(xml.trim_start_matches('\u{feff}'))
            .map_err(|reason| bundle::load_failed(path, reason))?;

        Ok(Self {
            identifier: manifest.identifier,
            name: manifest.name,
            version: manifest.version,
            publisher: manifest.publisher,
            description: manifest.description,
            schema: manifest.schema,
            source: path.to_path_buf(),
        })
    }
}
