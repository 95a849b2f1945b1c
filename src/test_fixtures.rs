//! Test fixtures and utilities for reducing test setup duplication.
//!
//! Two kinds of helpers live here:
//!
//! - On-disk builders: temp directories, VSIX archives, registry mirrors and
//!   fake host executables.
//! - In-memory fakes for the seams the workflows run against:
//!   [`FakeRegistry`] for installation discovery, [`FakeHost`] for scopes and
//!   the extension service, and [`RecordingReporter`] for console output.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{FakeHost, create_temp_dir, write_vsix};
//!
//! #[test]
//! fn my_test() {
//!     let temp = create_temp_dir();
//!     let vsix = write_vsix(temp.path(), "sample.vsix", "Sample.Ext", "Sample", "1.0");
//!
//!     let host = FakeHost::new().with_installed("Sample.Ext", "0.9");
//!     // ... run a workflow against `host`, then inspect `host.events()`
//! }
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_yaml::{Mapping, Value};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::FileOptions;

use crate::bundle::{ExtensionDescriptor, ManifestSchema};
use crate::discovery::InstallationLister;
use crate::error::{Result, discovery, registry};
use crate::registry::{ExtensionService, InstalledExtension};
use crate::scope::{Profile, ScopeOpener, SettingsScope};
use crate::ui::Reporter;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Write a ZIP archive with the given `(entry name, content)` pairs, in order
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn write_zip(dir: &Path, file_name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(file_name);
    let file = File::create(&path).expect("Failed to create archive");
    let mut zip = ZipWriter::new(file);

    for (name, content) in entries {
        zip.start_file(*name, FileOptions::default())
            .expect("Failed to start archive entry");
        zip.write_all(content.as_bytes())
            .expect("Failed to write archive entry");
    }
    zip.finish().expect("Failed to finish archive");

    path
}

/// Manifest XML in the current (v2) schema
#[must_use]
pub fn manifest_xml(identifier: &str, name: &str, version: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<PackageManifest Version="2.0.0" xmlns="http://schemas.microsoft.com/developer/vsx-schema/2011">
  <Metadata>
    <Identity Id="{identifier}" Version="{version}" Language="en-US" Publisher="Contoso" />
    <DisplayName>{name}</DisplayName>
    <Description>Test extension</Description>
  </Metadata>
</PackageManifest>
"#
    )
}

/// Write a small but complete VSIX.
///
/// Entries are `extension.vsixmanifest`, `Sample.dll` and
/// `Resources/icon.png`, in that order.
pub fn write_vsix(
    dir: &Path,
    file_name: &str,
    identifier: &str,
    name: &str,
    version: &str,
) -> PathBuf {
    let manifest = manifest_xml(identifier, name, version);
    write_zip(
        dir,
        file_name,
        &[
            ("extension.vsixmanifest", manifest.as_str()),
            ("Sample.dll", "MZ fake assembly"),
            ("Resources/icon.png", "fake png"),
        ],
    )
}

/// Write a registry mirror with one `(version key, environment path)` entry
/// per installation; `None` leaves out the `Setup\VS` subtree.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_registry_file(dir: &Path, installations: &[(&str, Option<&str>)]) -> PathBuf {
    let mut root = Mapping::new();
    for (key, environment_path) in installations {
        let mut version = Mapping::new();
        if let Some(path) = environment_path {
            let mut vs = Mapping::new();
            vs.insert(
                Value::from("EnvironmentPath"),
                Value::from(path.to_string()),
            );
            let mut setup = Mapping::new();
            setup.insert(Value::from("VS"), Value::Mapping(vs));
            version.insert(Value::from("Setup"), Value::Mapping(setup));
        }
        root.insert(Value::from(key.to_string()), Value::Mapping(version));
    }

    let path = dir.join("registry.yaml");
    let yaml = serde_yaml::to_string(&root).expect("Failed to serialize registry");
    fs::write(&path, yaml).expect("Failed to write registry file");
    path
}

/// Create `<dir>/<name>/devenv.exe` as a stand-in host executable
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn create_fake_executable(dir: &Path, name: &str) -> PathBuf {
    let install_dir = dir.join(name);
    fs::create_dir_all(&install_dir).expect("Failed to create install dir");
    let exe = install_dir.join("devenv.exe");
    fs::write(&exe, "fake host").expect("Failed to write executable");
    exe
}

/// Descriptor for `Sample.Ext` version 1.0 that is never read from disk
#[must_use]
pub fn sample_descriptor() -> ExtensionDescriptor {
    ExtensionDescriptor {
        identifier: "Sample.Ext".to_string(),
        name: "Sample".to_string(),
        version: "1.0".to_string(),
        publisher: None,
        description: None,
        schema: ManifestSchema::V2,
        source: PathBuf::from("sample.vsix"),
    }
}

/// In-memory installation registry
#[derive(Debug, Default)]
pub struct FakeRegistry {
    available: bool,
    keys: Vec<String>,
    paths: BTreeMap<String, PathBuf>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    /// A registry whose root key does not exist
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Version key without a `Setup\VS` subtree
    #[must_use]
    pub fn with_key(mut self, key: &str) -> Self {
        self.keys.push(key.to_string());
        self
    }

    #[must_use]
    pub fn with_installation(mut self, key: &str, executable: &str) -> Self {
        self.keys.push(key.to_string());
        self.paths.insert(key.to_string(), PathBuf::from(executable));
        self
    }
}

impl InstallationLister for FakeRegistry {
    fn version_keys(&self) -> Result<Vec<String>> {
        if !self.available {
            return Err(discovery::unavailable("fake registry"));
        }
        Ok(self.keys.clone())
    }

    fn environment_path(&self, version_key: &str) -> Option<PathBuf> {
        self.paths.get(version_key).cloned()
    }
}

/// Everything observable that happens to a [`FakeHost`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ScopeOpened {
        executable: PathBuf,
        root_suffix: Option<String>,
    },
    ScopeReleased,
    Connect,
    Close,
    IsInstalled(String),
    GetInstalled(String),
    Install {
        identifier: String,
        per_machine: bool,
    },
    Uninstall(String),
    CommitUninstall(String),
}

impl Event {
    fn is_scope_event(&self) -> bool {
        matches!(self, Self::ScopeOpened { .. } | Self::ScopeReleased)
    }
}

#[derive(Debug, Default)]
struct HostState {
    /// identifier -> version
    installed: BTreeMap<String, String>,
    /// Reported by `is_installed` but unknown to `get_installed`
    orphaned: BTreeSet<String>,
    failing: HashSet<String>,
    events: Vec<Event>,
}

impl HostState {
    fn fail_if(&self, operation: &str) -> Result<()> {
        if self.failing.contains(operation) {
            return Err(registry::operation_failed(operation, "simulated failure"));
        }
        Ok(())
    }
}

/// Scope opener and extension service recording every call
#[derive(Debug, Default)]
pub struct FakeHost {
    state: Rc<RefCell<HostState>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_installed(self, identifier: &str, version: &str) -> Self {
        self.state
            .borrow_mut()
            .installed
            .insert(identifier.to_string(), version.to_string());
        self
    }

    /// Metadata that claims an install the lookup cannot find
    #[must_use]
    pub fn with_orphan(self, identifier: &str) -> Self {
        self.state
            .borrow_mut()
            .orphaned
            .insert(identifier.to_string());
        self
    }

    /// Make one operation fail: `open`, `connect`, `is_installed`,
    /// `get_installed`, `install`, `uninstall`, `commit uninstall` or `close`
    #[must_use]
    pub fn failing_on(self, operation: &str) -> Self {
        self.state
            .borrow_mut()
            .failing
            .insert(operation.to_string());
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    /// Events of the extension service only
    pub fn service_events(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| !event.is_scope_event())
            .collect()
    }

    pub fn clear_events(&self) {
        self.state.borrow_mut().events.clear();
    }

    pub fn count(&self, wanted: &Event) -> usize {
        self.events().iter().filter(|event| *event == wanted).count()
    }

    pub fn scopes_opened(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, Event::ScopeOpened { .. }))
            .count()
    }

    pub fn installed_version(&self, identifier: &str) -> Option<String> {
        self.state.borrow().installed.get(identifier).cloned()
    }
}

impl ScopeOpener for FakeHost {
    fn open(&self, executable: &Path, root_suffix: Option<&str>) -> Result<Box<dyn SettingsScope>> {
        let profile = Profile::new(executable, root_suffix);
        {
            let state = self.state.borrow();
            if state.failing.contains("open") {
                return Err(registry::scope_open_failed(executable, "simulated failure"));
            }
        }

        self.state.borrow_mut().events.push(Event::ScopeOpened {
            executable: profile.executable.clone(),
            root_suffix: profile.root_suffix.clone(),
        });
        Ok(Box::new(FakeScope {
            state: Rc::clone(&self.state),
            profile,
        }))
    }
}

struct FakeScope {
    state: Rc<RefCell<HostState>>,
    profile: Profile,
}

impl SettingsScope for FakeScope {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    fn connect(&self) -> Result<Box<dyn ExtensionService + '_>> {
        self.state.borrow().fail_if("connect")?;
        self.state.borrow_mut().events.push(Event::Connect);
        Ok(Box::new(FakeService {
            state: self.state.as_ref(),
        }))
    }
}

impl Drop for FakeScope {
    fn drop(&mut self) {
        self.state.borrow_mut().events.push(Event::ScopeReleased);
    }
}

struct FakeService<'a> {
    state: &'a RefCell<HostState>,
}

impl FakeService<'_> {
    fn record(&self, event: Event, operation: &str) -> Result<()> {
        self.state.borrow_mut().events.push(event);
        self.state.borrow().fail_if(operation)
    }
}

impl ExtensionService for FakeService<'_> {
    fn is_installed(&mut self, extension: &ExtensionDescriptor) -> Result<bool> {
        self.record(
            Event::IsInstalled(extension.identifier.clone()),
            "is_installed",
        )?;
        let state = self.state.borrow();
        Ok(state.installed.contains_key(&extension.identifier)
            || state.orphaned.contains(&extension.identifier))
    }

    fn get_installed(&mut self, identifier: &str) -> Result<Option<InstalledExtension>> {
        self.record(Event::GetInstalled(identifier.to_string()), "get_installed")?;
        Ok(self
            .state
            .borrow()
            .installed
            .get(identifier)
            .map(|version| InstalledExtension {
                identifier: identifier.to_string(),
                name: identifier.to_string(),
                version: version.clone(),
                install_path: PathBuf::from(identifier).join(version),
            }))
    }

    fn install(&mut self, extension: &ExtensionDescriptor, per_machine: bool) -> Result<()> {
        self.record(
            Event::Install {
                identifier: extension.identifier.clone(),
                per_machine,
            },
            "install",
        )?;
        let mut state = self.state.borrow_mut();
        state.orphaned.remove(&extension.identifier);
        state
            .installed
            .insert(extension.identifier.clone(), extension.version.clone());
        Ok(())
    }

    fn uninstall(&mut self, extension: &InstalledExtension) -> Result<()> {
        self.record(Event::Uninstall(extension.identifier.clone()), "uninstall")?;
        self.state
            .borrow_mut()
            .installed
            .remove(&extension.identifier);
        Ok(())
    }

    fn commit_external_uninstall(&mut self, extension: &InstalledExtension) -> Result<()> {
        self.record(
            Event::CommitUninstall(extension.identifier.clone()),
            "commit uninstall",
        )
    }

    fn close(&mut self) -> Result<()> {
        self.record(Event::Close, "close")
    }
}

/// Reporter keeping every message for assertions
#[derive(Debug, Default)]
pub struct RecordingReporter {
    statuses: RefCell<Vec<String>>,
    warnings: RefCell<Vec<String>>,
    details: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.statuses.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    pub fn details(&self) -> Vec<String> {
        self.details.borrow().clone()
    }
}

impl Reporter for RecordingReporter {
    fn status(&self, message: &str) {
        self.statuses.borrow_mut().push(message.to_string());
    }

    fn warning(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }

    fn detail(&self, message: &str) {
        self.details.borrow_mut().push(message.to_string());
    }
}
