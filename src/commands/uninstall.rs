//! Uninstall command implementation

use crate::cli::UninstallArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::operations::{UninstallOperation, UninstallOptions};
use crate::ui::{ConsoleReporter, Reporter};

impl From<&UninstallArgs> for UninstallOptions {
    fn from(args: &UninstallArgs) -> Self {
        Self {
            identifier: args.identifier.clone(),
            version: args.target.vs_version.clone(),
            root_suffix: args.target.root_suffix.clone(),
        }
    }
}

/// Run the uninstall command
pub fn run(settings: &Settings, args: &UninstallArgs) -> Result<()> {
    let lister = settings.lister()?;
    let opener = settings.scope_opener();
    let reporter = ConsoleReporter::new(settings.verbose);

    let report = UninstallOperation::new(lister.as_ref(), &opener, &reporter)
        .execute(&UninstallOptions::from(args))?;

    reporter.detail(&format!(
        "Removed {} from Visual Studio {} ({})",
        report.removed.install_path.display(),
        report.version,
        report.profile
    ));

    Ok(())
}
