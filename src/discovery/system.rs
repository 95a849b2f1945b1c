//! The Windows installation registry
//!
//! Visual Studio registers itself in the 32-bit view of
//! `HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft\VisualStudio`. Other platforms have
//! no such registry and report it as unavailable.

use std::path::PathBuf;

use super::InstallationLister;
#[cfg(windows)]
use super::{ENVIRONMENT_PATH_VALUE, SETUP_KEY};
use crate::error::Result;
#[cfg(not(windows))]
use crate::error::discovery;

/// Registry root holding one subkey per installed version
pub const REGISTRY_ROOT: &str = r"SOFTWARE\Microsoft\VisualStudio";

/// Installation registry of the running machine
#[derive(Debug, Default)]
pub struct SystemRegistry;

impl SystemRegistry {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl SystemRegistry {
    fn open(path: &str) -> std::io::Result<winreg::RegKey> {
        use winreg::RegKey;
        use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ, KEY_WOW64_32KEY};

        RegKey::predef(HKEY_LOCAL_MACHINE).open_subkey_with_flags(path, KEY_READ | KEY_WOW64_32KEY)
    }
}

#[cfg(windows)]
impl InstallationLister for SystemRegistry {
    fn version_keys(&self) -> Result<Vec<String>> {
        let root = Self::open(REGISTRY_ROOT)
            .map_err(|_| crate::error::discovery::unavailable(format!(r"HKLM\{REGISTRY_ROOT}")))?;

        Ok(root.enum_keys().filter_map(std::result::Result::ok).collect())
    }

    fn environment_path(&self, version_key: &str) -> Option<PathBuf> {
        let setup = Self::open(&format!(r"{REGISTRY_ROOT}\{version_key}\{SETUP_KEY}")).ok()?;
        let path: String = setup.get_value(ENVIRONMENT_PATH_VALUE).ok()?;
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }
}

#[cfg(not(windows))]
impl InstallationLister for SystemRegistry {
    fn version_keys(&self) -> Result<Vec<String>> {
        Err(discovery::unavailable(format!(
            r"HKLM\{REGISTRY_ROOT} (no Windows registry on this platform)"
        )))
    }

    fn environment_path(&self, _version_key: &str) -> Option<PathBuf> {
        None
    }
}
