//! Extension service over a profile directory
//!
//! Extensions live under `Extensions/<identifier>/<version>/` of the profile,
//! tracked by the catalog in [`super::catalog`]. The catalog is read when a
//! handle opens and written when it closes, so each handle sees the state
//! left by the previous one.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use super::catalog::{Catalog, CatalogEntry, EntryState};
use super::{ExtensionService, InstalledExtension};
use crate::bundle::ExtensionDescriptor;
use crate::error::{Result, registry};
use crate::hash;
use crate::transaction::Transaction;
use crate::ui::progress::{self, ProgressReporter};

/// Turn an identifier or version into a single safe path component
fn path_component(text: &str) -> String {
    let component = text
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == ' ')
        .to_string();

    if component.is_empty() {
        "_".to_string()
    } else {
        component
    }
}

/// Create `dir` and its missing ancestors, tracking each one created
fn create_dirs(dir: &Path, transaction: &mut Transaction) -> io::Result<()> {
    let missing: Vec<PathBuf> = dir
        .ancestors()
        .take_while(|ancestor| !ancestor.exists())
        .map(Path::to_path_buf)
        .collect();

    fs::create_dir_all(dir)?;
    for created in missing {
        transaction.track_dir_created(created);
    }
    Ok(())
}

/// Unpack every safely named archive entry into `target`
fn extract_entries(
    archive: &mut ZipArchive<File>,
    target: &Path,
    transaction: &mut Transaction,
    progress: &mut dyn ProgressReporter,
) -> Result<Vec<String>> {
    let failed = |e: &dyn std::fmt::Display| registry::operation_failed("install", e);

    create_dirs(target, transaction).map_err(|e| failed(&e))?;
    progress.init_file_progress(archive.len() as u64);

    let mut files = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| failed(&e))?;
        // Entries escaping the target (absolute paths, `..`) are skipped
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            continue;
        };
        let destination = target.join(&relative);

        if entry.is_dir() {
            create_dirs(&destination, transaction).map_err(|e| failed(&e))?;
            continue;
        }

        if let Some(parent) = destination.parent() {
            create_dirs(parent, transaction).map_err(|e| failed(&e))?;
        }
        // Files already on disk are not ours to overwrite or roll back
        let mut out = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&destination)
            .map_err(|e| failed(&e))?;
        transaction.track_file_created(&destination);
        io::copy(&mut entry, &mut out).map_err(|e| failed(&e))?;

        let name = relative.to_string_lossy().replace('\\', "/");
        progress.update_file(&name);
        files.push(name);
    }

    Ok(files)
}

/// One open handle on a profile's extensions directory
pub struct LocalExtensionService {
    dir: PathBuf,
    catalog: Catalog,
    dirty: bool,
    show_progress: bool,
}

impl LocalExtensionService {
    /// Open the service for an extensions directory, creating it if needed
    pub fn open(dir: PathBuf, show_progress: bool) -> Result<Self> {
        let connect_failed = |e: &dyn std::fmt::Display| registry::operation_failed("connect", e);

        fs::create_dir_all(&dir).map_err(|e| connect_failed(&e))?;
        let catalog = Catalog::load(&dir).map_err(|e| connect_failed(&e))?;

        Ok(Self {
            dir,
            catalog,
            dirty: false,
            show_progress,
        })
    }

    fn extract(&self, extension: &ExtensionDescriptor, target: &Path) -> Result<Vec<String>> {
        let failed = |e: &dyn std::fmt::Display| registry::operation_failed("install", e);

        let file = File::open(&extension.source).map_err(|e| failed(&e))?;
        let mut archive = ZipArchive::new(file).map_err(|e| failed(&e))?;

        let mut transaction = Transaction::new();
        let mut progress = progress::file_progress(self.show_progress);

        match extract_entries(&mut archive, target, &mut transaction, progress.as_mut()) {
            Ok(files) => {
                progress.finish_files();
                transaction.commit();
                Ok(files)
            }
            Err(e) => {
                progress.abandon();
                // Dropping the transaction removes what was extracted
                Err(e)
            }
        }
    }
}

impl ExtensionService for LocalExtensionService {
    fn is_installed(&mut self, extension: &ExtensionDescriptor) -> Result<bool> {
        Ok(self.catalog.installed(&extension.identifier).is_some())
    }

    fn get_installed(&mut self, identifier: &str) -> Result<Option<InstalledExtension>> {
        Ok(self
            .catalog
            .installed(identifier)
            .map(|entry| InstalledExtension {
                identifier: entry.identifier.clone(),
                name: entry.name.clone(),
                version: entry.version.clone(),
                install_path: self.dir.join(&entry.install_path),
            }))
    }

    fn install(&mut self, extension: &ExtensionDescriptor, per_machine: bool) -> Result<()> {
        if per_machine {
            return Err(registry::operation_failed(
                "install",
                "per-machine installation is not supported",
            ));
        }

        if let Some(existing) = self.catalog.installed(&extension.identifier) {
            return Err(registry::operation_failed(
                "install",
                format!(
                    "'{}' version {} is already installed",
                    existing.identifier, existing.version
                ),
            ));
        }

        let install_path = PathBuf::from(path_component(&extension.identifier))
            .join(path_component(&extension.version));
        let hash = hash::hash_file(&extension.source)
            .map_err(|e| registry::operation_failed("install", e))?;
        let files = self.extract(extension, &self.dir.join(&install_path))?;

        // An uncommitted removal of the same identifier is superseded
        self.catalog.remove(&extension.identifier);
        self.catalog.extensions.push(CatalogEntry {
            identifier: extension.identifier.clone(),
            name: extension.name.clone(),
            version: extension.version.clone(),
            publisher: extension.publisher.clone(),
            install_path,
            hash,
            state: EntryState::Installed,
            files,
        });
        self.dirty = true;
        Ok(())
    }

    fn uninstall(&mut self, extension: &InstalledExtension) -> Result<()> {
        let entry = self
            .catalog
            .find_mut(&extension.identifier)
            .filter(|entry| entry.state == EntryState::Installed)
            .ok_or_else(|| {
                registry::operation_failed(
                    "uninstall",
                    format!("'{}' is not installed", extension.identifier),
                )
            })?;

        let install_dir = self.dir.join(&entry.install_path);
        if install_dir.exists() {
            fs::remove_dir_all(&install_dir)
                .map_err(|e| registry::operation_failed("uninstall", e))?;
        }
        if let Some(parent) = install_dir.parent().filter(|p| *p != self.dir.as_path()) {
            // Only succeeds once no other version is left
            let _ = fs::remove_dir(parent);
        }

        entry.state = EntryState::PendingUninstall;
        self.dirty = true;
        Ok(())
    }

    fn commit_external_uninstall(&mut self, extension: &InstalledExtension) -> Result<()> {
        match self.catalog.find(&extension.identifier).map(|e| e.state) {
            Some(EntryState::PendingUninstall) => {
                self.catalog.remove(&extension.identifier);
                self.dirty = true;
                Ok(())
            }
            Some(EntryState::Installed) => Err(registry::operation_failed(
                "commit uninstall",
                format!("'{}' has not been uninstalled", extension.identifier),
            )),
            None => Ok(()),
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.dirty {
            self.catalog
                .save(&self.dir)
                .map_err(|e| registry::operation_failed("save the extension catalog", e))?;
            self.dirty = false;
        }
        Ok(())
    }
}
