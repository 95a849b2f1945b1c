//! Console presentation layer
//!
//! This module handles:
//! - Status lines printed while a workflow runs ([`Reporter`])
//! - File extraction progress ([`progress`])
//!
//! Workflows only talk to the traits, so tests run them silently and the
//! binary decides styling and verbosity.

pub mod progress;

use console::Style;

/// Sink for human-readable workflow messages
pub trait Reporter {
    /// Step the user should always see
    fn status(&self, message: &str);

    /// Something odd that did not stop the run
    fn warning(&self, message: &str);

    /// Extra context, shown with `--verbose`
    fn detail(&self, message: &str);
}

/// Reporter printing styled lines to the terminal
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn status(&self, message: &str) {
        println!("{}", Style::new().bold().apply_to(message));
    }

    fn warning(&self, message: &str) {
        eprintln!(
            "{} {}",
            Style::new().bold().yellow().apply_to("Warning:"),
            message
        );
    }

    fn detail(&self, message: &str) {
        if self.verbose {
            println!("{}", Style::new().dim().apply_to(message));
        }
    }
}
