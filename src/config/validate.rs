// src/config/validate.rs

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::model::{EngineConfig, LanguageSection, LanguageSettings, RawConfigFile};
use crate::errors::{ExeczoneError, Result};
use crate::types::{Language, parse_duration};

impl TryFrom<RawConfigFile> for EngineConfig {
    type Error = ExeczoneError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let execution_root = validate_execution_root(&raw)?;
        let defaults = validate_defaults(&raw)?;
        let stale_workspace_age = raw
            .engine
            .stale_workspace_age
            .as_deref()
            .map(|s| positive_duration("[engine].stale_workspace_age", s))
            .transpose()?;
        let overrides = validate_languages(&raw, &defaults)?;

        Ok(EngineConfig::new_unchecked(
            execution_root,
            stale_workspace_age,
            defaults,
            overrides,
        ))
    }
}

fn validate_execution_root(cfg: &RawConfigFile) -> Result<PathBuf> {
    let root = cfg.engine.execution_root.trim();
    if root.is_empty() {
        return Err(ExeczoneError::ConfigError(
            "[engine].execution_root must not be empty".to_string(),
        ));
    }
    Ok(PathBuf::from(root))
}

fn validate_defaults(cfg: &RawConfigFile) -> Result<LanguageSettings> {
    Ok(LanguageSettings {
        compile_timeout: positive_duration("[engine].compile_timeout", &cfg.engine.compile_timeout)?,
        run_timeout: positive_duration("[engine].run_timeout", &cfg.engine.run_timeout)?,
        fail_on_stderr: cfg.engine.fail_on_stderr,
        enabled: true,
    })
}

fn validate_languages(
    cfg: &RawConfigFile,
    defaults: &LanguageSettings,
) -> Result<BTreeMap<Language, LanguageSettings>> {
    let mut overrides = BTreeMap::new();

    for (tag, section) in cfg.language.iter() {
        let language: Language = tag.parse().map_err(|e| {
            ExeczoneError::ConfigError(format!("[language.{tag}]: {e}"))
        })?;

        if overrides.contains_key(&language) {
            return Err(ExeczoneError::ConfigError(format!(
                "[language.{tag}] configures '{language}' a second time"
            )));
        }

        overrides.insert(language, merge_language(tag, section, defaults)?);
    }

    Ok(overrides)
}

fn merge_language(
    tag: &str,
    section: &LanguageSection,
    defaults: &LanguageSettings,
) -> Result<LanguageSettings> {
    let compile_timeout = match section.compile_timeout.as_deref() {
        Some(s) => positive_duration(&format!("[language.{tag}].compile_timeout"), s)?,
        None => defaults.compile_timeout,
    };
    let run_timeout = match section.run_timeout.as_deref() {
        Some(s) => positive_duration(&format!("[language.{tag}].run_timeout"), s)?,
        None => defaults.run_timeout,
    };

    Ok(LanguageSettings {
        compile_timeout,
        run_timeout,
        fail_on_stderr: section.fail_on_stderr.unwrap_or(defaults.fail_on_stderr),
        enabled: section.enabled.unwrap_or(true),
    })
}

fn positive_duration(field: &str, value: &str) -> Result<Duration> {
    let d = parse_duration(value)
        .map_err(|e| ExeczoneError::ConfigError(format!("{field}: {e}")))?;
    if d.is_zero() {
        return Err(ExeczoneError::ConfigError(format!(
            "{field} must be greater than zero (got {value:?})"
        )));
    }
    Ok(d)
}
