//! Common test utilities for rootvsix integration tests

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_yaml::{Mapping, Value};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::FileOptions;

/// An isolated environment: a registry mirror, fake host executables and a
/// profile data directory, all inside one temp directory
pub struct TestEnv {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the environment root
    pub path: PathBuf,
}

impl TestEnv {
    /// Create an environment with no installations registered
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create an environment with the given installations.
    ///
    /// `(version key, true)` registers a version with an existing executable,
    /// `(version key, false)` one whose setup recorded no executable.
    pub fn with_versions(versions: &[(&str, bool)]) -> Self {
        let env = Self::new();
        env.write_registry(versions);
        env
    }

    pub fn registry_file(&self) -> PathBuf {
        self.path.join("registry.yaml")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.path.join("profiles")
    }

    /// Executable registered for a version key
    pub fn executable(&self, version_key: &str) -> PathBuf {
        self.path
            .join("hosts")
            .join(version_key)
            .join("devenv.exe")
    }

    pub fn write_registry(&self, versions: &[(&str, bool)]) {
        let mut root = Mapping::new();
        for (key, usable) in versions {
            let mut version = Mapping::new();
            if *usable {
                let exe = self.executable(key);
                fs::create_dir_all(exe.parent().expect("executable has a parent"))
                    .expect("Failed to create host directory");
                fs::write(&exe, "fake host").expect("Failed to write executable");

                let mut vs = Mapping::new();
                vs.insert(
                    Value::from("EnvironmentPath"),
                    Value::from(exe.display().to_string()),
                );
                let mut setup = Mapping::new();
                setup.insert(Value::from("VS"), Value::Mapping(vs));
                version.insert(Value::from("Setup"), Value::Mapping(setup));
            }
            root.insert(Value::from(key.to_string()), Value::Mapping(version));
        }

        let yaml = serde_yaml::to_string(&root).expect("Failed to serialize registry");
        fs::write(self.registry_file(), yaml).expect("Failed to write registry file");
    }

    /// Write a VSIX with a v2 manifest and two payload files
    pub fn write_vsix(&self, file_name: &str, identifier: &str, name: &str, version: &str) -> PathBuf {
        let manifest = format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<PackageManifest Version="2.0.0" xmlns="http://schemas.microsoft.com/developer/vsx-schema/2011">
  <Metadata>
    <Identity Id="{identifier}" Version="{version}" Language="en-US" Publisher="Contoso" />
    <DisplayName>{name}</DisplayName>
  </Metadata>
</PackageManifest>
"#
        );
        self.write_zip(
            file_name,
            &[
                ("extension.vsixmanifest", manifest.as_str()),
                ("Sample.dll", "MZ fake assembly"),
                ("Resources/icon.png", "fake png"),
            ],
        )
    }

    pub fn write_zip(&self, file_name: &str, entries: &[(&str, &str)]) -> PathBuf {
        let path = self.path.join(file_name);
        let mut zip = ZipWriter::new(File::create(&path).expect("Failed to create archive"));
        for (entry, content) in entries {
            zip.start_file(*entry, FileOptions::default())
                .expect("Failed to start archive entry");
            zip.write_all(content.as_bytes())
                .expect("Failed to write archive entry");
        }
        zip.finish().expect("Failed to finish archive");
        path
    }

    /// The rootvsix binary pointed at this environment
    pub fn cmd(&self) -> Command {
        let mut cmd = rootvsix_cmd();
        cmd.env("ROOTVSIX_REGISTRY_FILE", self.registry_file())
            .env("ROOTVSIX_DATA_DIR", self.data_dir())
            .arg("--no-progress");
        cmd
    }

    /// Profile directories created so far
    pub fn profiles(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(self.data_dir()) else {
            return Vec::new();
        };
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();
        dirs
    }

    /// Profile directory for a root suffix (`""` for the default profile)
    pub fn profile(&self, root_suffix: &str) -> PathBuf {
        self.profiles()
            .into_iter()
            .find(|dir| {
                let name = file_name(dir);
                name.len() == 8 + root_suffix.len() && name.ends_with(root_suffix)
            })
            .expect("Profile directory not found")
    }

    /// Parsed `extensions.json` of a profile
    pub fn catalog(&self, root_suffix: &str) -> serde_json::Value {
        let path = self.profile(root_suffix).join("Extensions/extensions.json");
        let content = fs::read_to_string(path).expect("Failed to read catalog");
        serde_json::from_str(&content).expect("Failed to parse catalog")
    }

    /// Identifiers and versions recorded in a profile's catalog
    pub fn catalog_entries(&self, root_suffix: &str) -> Vec<(String, String, String)> {
        self.catalog(root_suffix)["extensions"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| {
                        (
                            entry["identifier"].as_str().unwrap_or_default().to_string(),
                            entry["version"].as_str().unwrap_or_default().to_string(),
                            entry["state"].as_str().unwrap_or_default().to_string(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn rootvsix_cmd() -> Command {
    Command::cargo_bin("rootvsix").expect("rootvsix binary is built")
}
