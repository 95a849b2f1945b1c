//! Install command implementation
//!
//! Wires the configured registry source, profile store and console reporter
//! into [`InstallOperation`].

use crate::cli::InstallArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::operations::{InstallOperation, InstallOptions, Replacement};
use crate::ui::{ConsoleReporter, Reporter};

impl From<&InstallArgs> for InstallOptions {
    fn from(args: &InstallArgs) -> Self {
        Self {
            version: args.target.vs_version.clone(),
            root_suffix: args.target.root_suffix.clone(),
            replace_existing: args.replace,
            ..Self::new(&args.vsix)
        }
    }
}

/// Run the install command
pub fn run(settings: &Settings, args: &InstallArgs) -> Result<()> {
    let lister = settings.lister()?;
    let opener = settings.scope_opener();
    let reporter = ConsoleReporter::new(settings.verbose);

    let report = InstallOperation::new(lister.as_ref(), &opener, &reporter)
        .execute(&InstallOptions::from(args))?;

    if let Replacement::Uninstalled(previous) = &report.replacement {
        reporter.detail(&format!(
            "Replaced version {} of '{}'",
            previous.version, previous.identifier
        ));
    }
    reporter.detail(&format!(
        "Installed '{}' into Visual Studio {} ({})",
        report.extension.identifier, report.version, report.profile
    ));

    Ok(())
}
