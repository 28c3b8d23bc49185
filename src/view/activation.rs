//! Primary actions invoked when a result is activated.

use crate::model::Document;
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// What happens when the user presses Enter on a result.
///
/// Called exactly once per activation, with the document under the cursor.
pub trait ResultAction {
    /// Run the action for `document`.
    fn activate(&mut self, document: &Document);
}

/// Collects activated links; `main` prints them once the terminal is restored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSelection {
    base_url: String,
    links: Vec<String>,
}

impl RecordSelection {
    /// Start with no links; `base_url` is prepended to slugs.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            links: Vec::new(),
        }
    }

    /// Links activated so far, oldest first.
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Consume the recorder, returning its links.
    pub fn into_links(self) -> Vec<String> {
        self.links
    }
}

impl ResultAction for RecordSelection {
    fn activate(&mut self, document: &Document) {
        let link = document.link(&self.base_url);
        info!(%link, "Result activated");
        self.links.push(link);
    }
}

/// Opens activated links with an external program (`xdg-open`, `open`, ...).
///
/// The configured command is split on whitespace; the link is appended as
/// the last argument. Launch failures are logged, never surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOpener {
    program: String,
    args: Vec<String>,
    base_url: String,
    launched: usize,
}

impl CommandOpener {
    /// Parse `command`. Returns `None` for a blank command.
    pub fn parse(command: &str, base_url: impl Into<String>) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
            base_url: base_url.into(),
            launched: 0,
        })
    }

    /// Program to run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments placed before the link.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Number of successfully spawned openers.
    pub fn launched(&self) -> usize {
        self.launched
    }
}

impl ResultAction for CommandOpener {
    fn activate(&mut self, document: &Document) {
        let link = document.link(&self.base_url);
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(&link)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(_) => {
                self.launched += 1;
                info!(program = %self.program, %link, "Opened result");
            }
            Err(error) => {
                warn!(program = %self.program, %link, %error, "Failed to launch opener");
            }
        }
    }
}
