// src/engine/mod.rs

//! Result aggregation for execzone.
//!
//! Per submission the engine walks this state machine:
//!
//! ```text
//! Created -> WorkspaceAllocated -> Stage1Running
//!   -> Stage1Failed (terminal)
//!   -> Stage1Succeeded -> Stage2Running -> Stage2Failed | Stage2Succeeded (terminal)
//! -> WorkspaceReleased (always) -> done
//! ```
//!
//! The pure classification rules live in [`core`]; the async shell that
//! allocates workspaces and drives the executor is in [`runtime`].

pub mod core;
pub mod runtime;

pub use core::{INTERNAL_ERROR_MESSAGE, Redactor, StageVerdict, classify_stage};
pub use runtime::Engine;
