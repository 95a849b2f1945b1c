//! Versions command implementation
//!
//! Prints every installed version, ascending, with its executable or a
//! marker when setup did not record one.

use console::Style;

use crate::config::Settings;
use crate::discovery::{InstallationLister, VersionDiscovery};
use crate::error::{InstallerError, Result};

/// One line per installed version
pub fn version_lines(lister: &dyn InstallationLister) -> Result<Vec<String>> {
    let discovery = VersionDiscovery::new(lister);
    let versions = discovery.list_installed_versions()?;
    if versions.is_empty() {
        return Err(InstallerError::NoInstallationFound);
    }

    Ok(versions
        .iter()
        .map(|version| match discovery.resolve_executable(version) {
            Some(executable) => format!("{version}  {}", executable.display()),
            None => format!("{version}  (not usable: no EnvironmentPath)"),
        })
        .collect())
}

/// Run the versions command
pub fn run(settings: &Settings) -> Result<()> {
    let lister = settings.lister()?;
    let lines = version_lines(lister.as_ref())?;

    println!("{}", Style::new().bold().apply_to("Detected versions:"));
    for line in lines {
        println!("  {line}");
    }

    Ok(())
}
