// tests/config_errors.rs

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;

use execzone::adapter::AdapterRegistry;
use execzone::config::load_and_validate;
use execzone::errors::ExeczoneError;
use execzone::types::Language;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn test_zero_timeout_returns_config_error() {
    let file = config_file(
        r#"
[engine]
run_timeout = "0s"
"#,
    );

    match load_and_validate(file.path()) {
        Err(ExeczoneError::ConfigError(msg)) => {
            assert!(msg.contains("run_timeout"));
            assert!(msg.contains("greater than zero"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_bad_duration_unit_names_the_field() {
    let file = config_file(
        r#"
[language.java]
compile_timeout = "3 fortnights"
"#,
    );

    match load_and_validate(file.path()) {
        Err(ExeczoneError::ConfigError(msg)) => {
            assert!(msg.contains("[language.java].compile_timeout"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_unknown_language_section_returns_config_error() {
    let file = config_file(
        r#"
[language.cobol]
run_timeout = "5s"
"#,
    );

    match load_and_validate(file.path()) {
        Err(ExeczoneError::ConfigError(msg)) => {
            assert!(msg.contains("unknown language tag"));
            assert!(msg.contains("cobol"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_aliases_cannot_configure_a_language_twice() {
    let file = config_file(
        r#"
[language.py]
run_timeout = "5s"

[language.python]
run_timeout = "6s"
"#,
    );

    match load_and_validate(file.path()) {
        Err(ExeczoneError::ConfigError(msg)) => assert!(msg.contains("second time")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_empty_execution_root_returns_config_error() {
    let file = config_file(
        r#"
[engine]
execution_root = "  "
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(ExeczoneError::ConfigError(_))
    ));
}

#[test]
fn test_malformed_toml_returns_toml_error() {
    let file = config_file("[engine\nrun_timeout = ");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(ExeczoneError::TomlError(_))
    ));
}

#[test]
fn test_overrides_merge_with_engine_defaults() {
    let file = config_file(
        r#"
[engine]
execution_root = "/tmp/zone"
compile_timeout = "20s"
run_timeout = "4s"
stale_workspace_age = "1h"

[language.python]
run_timeout = "1500ms"
fail_on_stderr = false

[language.go]
enabled = false
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.execution_root.to_str(), Some("/tmp/zone"));
    assert_eq!(cfg.stale_workspace_age, Some(Duration::from_secs(3600)));

    let py = cfg.settings_for(Language::Python);
    assert_eq!(py.run_timeout, Duration::from_millis(1500));
    assert_eq!(py.compile_timeout, Duration::from_secs(20));
    assert!(!py.fail_on_stderr);

    let c = cfg.settings_for(Language::C);
    assert_eq!(c.run_timeout, Duration::from_secs(4));
    assert!(c.fail_on_stderr);

    let registry = AdapterRegistry::with_builtins(&cfg);
    assert!(registry.resolve(Language::Go).is_err());
    assert!(registry.resolve(Language::C).is_ok());
}
