// src/config/mod.rs

//! Configuration loading and validation for execzone.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate durations, language tags and paths (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{
    EngineConfig, EngineSection, LanguageSection, LanguageSettings, RawConfigFile,
};
