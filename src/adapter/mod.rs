// src/adapter/mod.rs

//! Language adapters.
//!
//! The engine itself is language-agnostic. An adapter turns a source file
//! name into the ordered list of [`Stage`]s needed to build and run it;
//! the [`AdapterRegistry`] maps each [`Language`](crate::types::Language)
//! to its adapter.
//!
//! - [`template`] provides [`TemplateAdapter`], a data-driven adapter built
//!   from command templates with `{source}` / `{stem}` placeholders.
//! - [`languages`] registers the built-in toolchains.
//! - [`registry`] owns the language -> adapter mapping.

use std::time::Duration;

use crate::types::StageKind;

pub mod languages;
pub mod registry;
pub mod template;

pub use registry::AdapterRegistry;
pub use template::TemplateAdapter;

/// One externally invoked process step.
///
/// `command` and `args` are resolved relative to the workspace directory,
/// which is the working directory of the spawned process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub kind: StageKind,
    pub command: String,
    pub args: Vec<String>,
    pub timeout: Duration,
    /// Treat any error-stream output as a failure, even on exit code 0.
    pub fail_on_stderr: bool,
}

impl Stage {
    /// Shell-like rendering for logs and `--dry-run`.
    pub fn display_command(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.command.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Per-language strategy producing a submission's stage list.
pub trait LanguageAdapter: Send + Sync {
    /// Source-file extension, without the dot.
    fn extension(&self) -> &str;

    /// Stem for the source file inside a workspace.
    ///
    /// Defaults to the workspace identifier. Languages whose entry point is
    /// derived from the file name may pin it instead.
    fn source_stem(&self, workspace_id: &str) -> String {
        workspace_id.to_string()
    }

    /// Ordered stages for the given source file name.
    fn stages(&self, source_file: &str) -> Vec<Stage>;
}
