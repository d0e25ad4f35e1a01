#![allow(dead_code)]

use std::time::Duration;

use execzone::adapter::{AdapterRegistry, TemplateAdapter};
use execzone::config::LanguageSettings;
use execzone::submission::Submission;
use execzone::types::Language;

/// Builder for `Submission` to simplify test setup.
pub struct SubmissionBuilder {
    language: Language,
    source_code: String,
    stdin_lines: Vec<String>,
}

impl SubmissionBuilder {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            source_code: String::new(),
            stdin_lines: Vec::new(),
        }
    }

    pub fn source(mut self, code: &str) -> Self {
        self.source_code = code.to_string();
        self
    }

    pub fn stdin_line(mut self, line: &str) -> Self {
        self.stdin_lines.push(line.to_string());
        self
    }

    pub fn build(self) -> Submission {
        Submission::new(self.language, self.source_code, self.stdin_lines)
    }
}

/// Builder for `LanguageSettings`.
pub struct SettingsBuilder {
    settings: LanguageSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: LanguageSettings {
                compile_timeout: Duration::from_secs(5),
                run_timeout: Duration::from_secs(5),
                fail_on_stderr: true,
                enabled: true,
            },
        }
    }

    pub fn compile_timeout(mut self, d: Duration) -> Self {
        self.settings.compile_timeout = d;
        self
    }

    pub fn run_timeout(mut self, d: Duration) -> Self {
        self.settings.run_timeout = d;
        self
    }

    pub fn fail_on_stderr(mut self, val: bool) -> Self {
        self.settings.fail_on_stderr = val;
        self
    }

    pub fn build(self) -> LanguageSettings {
        self.settings
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpreted "language": the source is a shell script run with `sh`.
pub fn shell_adapter(settings: &LanguageSettings) -> TemplateAdapter {
    TemplateAdapter::new("sh", settings).run("sh", &["{source}"])
}

/// Compiled "language": the source is checked with `sh -n`, then copied to
/// `{stem}` and run from there. Exercises both stages with only `sh` on PATH.
pub fn compiled_shell_adapter(settings: &LanguageSettings) -> TemplateAdapter {
    TemplateAdapter::new("sh", settings)
        .compile("sh", &["-c", "sh -n {source} && cp {source} {stem}"])
        .run("sh", &["{stem}"])
}

/// Registry serving `Python` with [`shell_adapter`] and `C` with
/// [`compiled_shell_adapter`], sharing one settings value.
pub fn shell_registry(settings: &LanguageSettings) -> AdapterRegistry {
    let mut registry = AdapterRegistry::empty();
    registry.register(Language::Python, shell_adapter(settings));
    registry.register(Language::C, compiled_shell_adapter(settings));
    registry
}
