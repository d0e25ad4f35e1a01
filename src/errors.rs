// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExeczoneError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Failed to create workspace at {path:?}: {source}")]
    WorkspaceCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Toolchain binary '{command}' not found on PATH: {source}")]
    ToolchainMissing {
        command: String,
        #[source]
        source: which::Error,
    },

    #[error("Failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stream setup failed: {0}")]
    Stream(String),
}

pub type Result<T> = std::result::Result<T, ExeczoneError>;
