// src/submission.rs

//! Caller-facing data: what comes in (`Submission`) and what goes out
//! (`ExecutionResult` and its wire form `ResultPayload`).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::Language;

/// One request to execute source code in a declared language.
///
/// Immutable once built; the engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    language: Language,
    source_code: String,
    stdin_lines: Vec<String>,
}

impl Submission {
    pub fn new(
        language: Language,
        source_code: impl Into<String>,
        stdin_lines: Vec<String>,
    ) -> Self {
        Self {
            language,
            source_code: source_code.into(),
            stdin_lines,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    pub fn stdin_lines(&self) -> &[String] {
        &self.stdin_lines
    }
}

/// Terminal classification of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Success,
    CompileError,
    RuntimeError,
    Timeout,
    UnsupportedLanguage,
    InternalError,
}

impl ResultStatus {
    pub fn is_success(self) -> bool {
        matches!(self, ResultStatus::Success)
    }
}

/// Final result of one submission. Exactly one status holds.
///
/// `output` is only meaningful for `Success`, `error_message` for every
/// other status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub status: ResultStatus,
    pub output: String,
    pub error_message: String,
    pub timestamp: DateTime<Utc>,
}

impl ExecutionResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Success,
            output: output.into(),
            error_message: String::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn failure(status: ResultStatus, error_message: impl Into<String>) -> Self {
        debug_assert!(!status.is_success());
        Self {
            status,
            output: String::new(),
            error_message: error_message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Compare two results while ignoring when they were produced.
    pub fn same_outcome(&self, other: &ExecutionResult) -> bool {
        self.status == other.status
            && self.output == other.output
            && self.error_message == other.error_message
    }

    /// Convert into the shape the transport layer serialises.
    pub fn to_payload(&self) -> ResultPayload {
        let success = self.is_success();
        ResultPayload {
            success,
            output: success.then(|| self.output.clone()),
            error: (!success).then(|| self.error_message.clone()),
            timestamp: self.timestamp,
        }
    }
}

/// Wire form: `output` only on success, `error` only on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPayload {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}
