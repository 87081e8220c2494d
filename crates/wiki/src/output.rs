//! Startup and error messages for the terminal.

use std::fmt::Display;

use console::{Style, Term};

/// Writes wiki status lines to stderr.
pub(crate) struct Output {
    term: Term,
    label: Style,
    banner: Style,
    failure: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            banner: Style::new().cyan().bold(),
            failure: Style::new().red(),
        }
    }

    /// Announce the address the wiki is served on.
    pub(crate) fn serving(&self, host: &str, port: u16) {
        let line = format!("Serving wiki on http://{host}:{port}/");
        let _ = self.term.write_line(&self.banner.apply_to(line).to_string());
    }

    /// One `label: value` line describing a startup setting.
    pub(crate) fn setting(&self, label: &str, value: impl Display) {
        let label = self.label.apply_to(format!("{label}:"));
        let _ = self.term.write_line(&format!("  {label} {value}"));
    }

    pub(crate) fn error(&self, err: impl Display) {
        let _ = self
            .term
            .write_line(&self.failure.apply_to(format!("Error: {err}")).to_string());
    }
}
