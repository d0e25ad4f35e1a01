// src/adapter/template.rs

use std::path::Path;
use std::time::Duration;

use crate::adapter::{LanguageAdapter, Stage};
use crate::config::LanguageSettings;
use crate::types::StageKind;

/// A stage with unexpanded placeholders.
///
/// Supported placeholders in `command` and `args`:
/// - `{source}`: source file name (e.g. `ws1234.c`)
/// - `{stem}`: source file name without extension (e.g. `ws1234`)
#[derive(Debug, Clone, PartialEq, Eq)]
struct StageTemplate {
    kind: StageKind,
    command: String,
    args: Vec<String>,
    timeout: Duration,
    fail_on_stderr: bool,
}

impl StageTemplate {
    fn expand(&self, source_file: &str) -> Stage {
        let stem = Path::new(source_file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| source_file.to_string());

        let subst = |s: &str| s.replace("{source}", source_file).replace("{stem}", &stem);

        Stage {
            kind: self.kind,
            command: subst(&self.command),
            args: self.args.iter().map(|a| subst(a)).collect(),
            timeout: self.timeout,
            fail_on_stderr: self.fail_on_stderr,
        }
    }
}

/// Adapter built from stage templates.
///
/// ```ignore
/// let c = TemplateAdapter::new("c", &settings)
///     .compile("gcc", &["{source}", "-o", "{stem}"])
///     .run("./{stem}", &[]);
/// ```
#[derive(Debug, Clone)]
pub struct TemplateAdapter {
    extension: String,
    source_stem: Option<String>,
    settings: LanguageSettings,
    templates: Vec<StageTemplate>,
}

impl TemplateAdapter {
    pub fn new(extension: &str, settings: &LanguageSettings) -> Self {
        Self {
            extension: extension.to_string(),
            source_stem: None,
            settings: settings.clone(),
            templates: Vec::new(),
        }
    }

    /// Pin the source file stem instead of using the workspace identifier.
    pub fn with_source_stem(mut self, stem: &str) -> Self {
        self.source_stem = Some(stem.to_string());
        self
    }

    pub fn compile(self, command: &str, args: &[&str]) -> Self {
        let timeout = self.settings.compile_timeout;
        self.stage(StageKind::Compile, command, args, timeout)
    }

    pub fn run(self, command: &str, args: &[&str]) -> Self {
        let timeout = self.settings.run_timeout;
        self.stage(StageKind::Run, command, args, timeout)
    }

    fn stage(mut self, kind: StageKind, command: &str, args: &[&str], timeout: Duration) -> Self {
        self.templates.push(StageTemplate {
            kind,
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout,
            fail_on_stderr: self.settings.fail_on_stderr,
        });
        self
    }
}

impl LanguageAdapter for TemplateAdapter {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn source_stem(&self, workspace_id: &str) -> String {
        self.source_stem
            .clone()
            .unwrap_or_else(|| workspace_id.to_string())
    }

    fn stages(&self, source_file: &str) -> Vec<Stage> {
        self.templates.iter().map(|t| t.expand(source_file)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> LanguageSettings {
        LanguageSettings {
            compile_timeout: Duration::from_secs(3),
            run_timeout: Duration::from_secs(1),
            fail_on_stderr: true,
            enabled: true,
        }
    }

    #[test]
    fn placeholders_expand_in_command_and_args() {
        let adapter = TemplateAdapter::new("c", &settings())
            .compile("gcc", &["{source}", "-o", "{stem}"])
            .run("./{stem}", &[]);

        let stages = adapter.stages("ws42.c");
        assert_eq!(stages.len(), 2);

        assert_eq!(stages[0].kind, StageKind::Compile);
        assert_eq!(stages[0].command, "gcc");
        assert_eq!(stages[0].args, vec!["ws42.c", "-o", "ws42"]);
        assert_eq!(stages[0].timeout, Duration::from_secs(3));

        assert_eq!(stages[1].kind, StageKind::Run);
        assert_eq!(stages[1].command, "./ws42");
        assert!(stages[1].args.is_empty());
        assert_eq!(stages[1].timeout, Duration::from_secs(1));
    }

    #[test]
    fn pinned_stem_overrides_workspace_id() {
        let plain = TemplateAdapter::new("py", &settings());
        assert_eq!(plain.source_stem("ws1"), "ws1");

        let pinned = TemplateAdapter::new("java", &settings()).with_source_stem("Main");
        assert_eq!(pinned.source_stem("ws1"), "Main");
    }
}
