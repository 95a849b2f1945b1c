//! Settings scopes stored under a local data directory
//!
//! Each (executable, root suffix) pair maps to its own profile directory,
//! named after a short digest of the canonical executable path followed by
//! the suffix, e.g. `3fa2b1c0` and `3fa2b1c0Exp`. An open scope holds an OS
//! lock on `profile.lock` in that directory until it is dropped; the lock
//! goes away with the process if a run is killed.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use fslock::LockFile;

use super::{Profile, ScopeOpener, SettingsScope};
use crate::error::{Result, registry};
use crate::hash;
use crate::registry::{ExtensionService, LocalExtensionService};

/// Lock file held while a scope is open
pub const LOCK_FILE: &str = "profile.lock";

/// Extensions directory inside a profile directory
pub const EXTENSIONS_DIR: &str = "Extensions";

/// Exclusive hold on a profile directory, released on drop
struct ProfileLock {
    lock: LockFile,
    path: PathBuf,
}

impl ProfileLock {
    /// Take the lock without blocking; `None` when another holder has it
    fn try_acquire(path: PathBuf) -> std::io::Result<Option<Self>> {
        let mut lock = LockFile::open(&path)?;
        if lock.try_lock_with_pid()? {
            Ok(Some(Self { lock, path }))
        } else {
            Ok(None)
        }
    }
}

impl fmt::Debug for ProfileLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileLock")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Drop for ProfileLock {
    fn drop(&mut self) {
        let _ = self.lock.unlock();

        // Recreated on the next open
        let _ = fs::remove_file(&self.path);
    }
}

fn is_valid_suffix(suffix: &str) -> bool {
    suffix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Opens profile directories under a data directory
#[derive(Debug, Clone)]
pub struct LocalScopeOpener {
    data_dir: PathBuf,
    show_progress: bool,
}

impl LocalScopeOpener {
    pub fn new(data_dir: PathBuf, show_progress: bool) -> Self {
        Self {
            data_dir,
            show_progress,
        }
    }

    /// Profile directory for an executable and suffix, without opening it
    pub fn profile_dir(&self, executable: &Path, root_suffix: Option<&str>) -> Result<PathBuf> {
        let profile = Profile::new(executable, root_suffix);

        if !executable.is_file() {
            return Err(registry::scope_open_failed(
                executable,
                "executable does not exist",
            ));
        }
        if let Some(suffix) = &profile.root_suffix {
            if !is_valid_suffix(suffix) {
                return Err(registry::scope_open_failed(
                    executable,
                    format!("invalid root suffix '{suffix}'"),
                ));
            }
        }

        let canonical =
            dunce::canonicalize(executable).map_err(|e| registry::scope_open_failed(executable, e))?;
        let key = format!(
            "{}{}",
            hash::short_digest(&canonical.to_string_lossy()),
            profile.root_suffix.as_deref().unwrap_or_default()
        );

        Ok(self.data_dir.join(key))
    }
}

impl ScopeOpener for LocalScopeOpener {
    fn open(&self, executable: &Path, root_suffix: Option<&str>) -> Result<Box<dyn SettingsScope>> {
        let dir = self.profile_dir(executable, root_suffix)?;
        fs::create_dir_all(&dir).map_err(|e| registry::scope_open_failed(executable, e))?;

        let lock = ProfileLock::try_acquire(dir.join(LOCK_FILE))
            .map_err(|e| registry::scope_open_failed(executable, e))?
            .ok_or_else(|| {
                registry::scope_open_failed(executable, "profile is locked by another process")
            })?;

        Ok(Box::new(LocalSettingsScope {
            profile: Profile::new(executable, root_suffix),
            dir,
            show_progress: self.show_progress,
            _lock: lock,
        }))
    }
}

/// An open profile directory
#[derive(Debug)]
pub struct LocalSettingsScope {
    profile: Profile,
    dir: PathBuf,
    show_progress: bool,
    _lock: ProfileLock,
}

impl SettingsScope for LocalSettingsScope {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    fn connect(&self) -> Result<Box<dyn ExtensionService + '_>> {
        Ok(Box::new(LocalExtensionService::open(
            self.dir.join(EXTENSIONS_DIR),
            self.show_progress,
        )?))
    }
}
