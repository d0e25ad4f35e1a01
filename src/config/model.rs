// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::Language;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [engine]
/// execution_root = "execution_zone"
/// compile_timeout = "10s"
/// run_timeout = "10s"
/// fail_on_stderr = true
/// stale_workspace_age = "1h"
///
/// [language.java]
/// run_timeout = "15s"
///
/// [language.perl]
/// enabled = false
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Engine-wide settings from `[engine]`.
    #[serde(default)]
    pub engine: EngineSection,

    /// Per-language overrides from `[language.<tag>]`.
    ///
    /// Keys are language tags (aliases such as `js` are accepted).
    #[serde(default)]
    pub language: BTreeMap<String, LanguageSection>,
}

/// `[engine]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSection {
    /// Directory under which one workspace per submission is created.
    #[serde(default = "default_execution_root")]
    pub execution_root: String,

    #[serde(default = "default_timeout")]
    pub compile_timeout: String,

    #[serde(default = "default_timeout")]
    pub run_timeout: String,

    /// Whether error-stream output fails a stage even on exit code 0.
    #[serde(default = "default_fail_on_stderr")]
    pub fail_on_stderr: bool,

    /// If set, leftover workspaces older than this are removed at startup.
    #[serde(default)]
    pub stale_workspace_age: Option<String>,
}

fn default_execution_root() -> String {
    "execution_zone".to_string()
}

fn default_timeout() -> String {
    "10s".to_string()
}

fn default_fail_on_stderr() -> bool {
    true
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            execution_root: default_execution_root(),
            compile_timeout: default_timeout(),
            run_timeout: default_timeout(),
            fail_on_stderr: default_fail_on_stderr(),
            stale_workspace_age: None,
        }
    }
}

/// `[language.<tag>]` section. Unset fields fall back to `[engine]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageSection {
    #[serde(default)]
    pub compile_timeout: Option<String>,

    #[serde(default)]
    pub run_timeout: Option<String>,

    #[serde(default)]
    pub fail_on_stderr: Option<bool>,

    /// Set to `false` to stop serving this language.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Effective settings for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSettings {
    pub compile_timeout: Duration,
    pub run_timeout: Duration,
    pub fail_on_stderr: bool,
    pub enabled: bool,
}

/// Validated engine configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// [`EngineConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub execution_root: PathBuf,
    pub stale_workspace_age: Option<Duration>,
    defaults: LanguageSettings,
    overrides: BTreeMap<Language, LanguageSettings>,
}

impl EngineConfig {
    pub(crate) fn new_unchecked(
        execution_root: PathBuf,
        stale_workspace_age: Option<Duration>,
        defaults: LanguageSettings,
        overrides: BTreeMap<Language, LanguageSettings>,
    ) -> Self {
        Self {
            execution_root,
            stale_workspace_age,
            defaults,
            overrides,
        }
    }

    /// Same config rooted elsewhere. Handy for tests and the CLI.
    pub fn with_execution_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.execution_root = root.into();
        self
    }

    pub fn defaults(&self) -> &LanguageSettings {
        &self.defaults
    }

    /// Effective settings for `language`.
    pub fn settings_for(&self, language: Language) -> LanguageSettings {
        self.overrides
            .get(&language)
            .cloned()
            .unwrap_or_else(|| self.defaults.clone())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new_unchecked(
            PathBuf::from(default_execution_root()),
            None,
            LanguageSettings {
                compile_timeout: Duration::from_secs(10),
                run_timeout: Duration::from_secs(10),
                fail_on_stderr: default_fail_on_stderr(),
                enabled: true,
            },
            BTreeMap::new(),
        )
    }
}
