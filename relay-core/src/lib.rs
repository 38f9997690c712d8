//! # relay-core
//!
//! Core traits and types shared across the Relay workspace.
//!
//! ## Overview
//!
//! - [`Turn`] / [`Block`] - the conversation transcript data model
//! - [`Llm`] - the model-invocation seam (implemented by relay-model)
//! - [`ToolCatalog`] / [`ToolDescriptor`] - the tool-dispatch seam
//!   (implemented by relay-catalog)
//! - [`RelayError`] / [`Result`] - unified error handling
//!
//! The transcript alternates between user-authored and model-authored
//! turns; one round of tool use inserts an assistant turn carrying
//! tool-use requests followed by a synthesized turn carrying the
//! matching tool results. relay-agent owns that protocol; this crate
//! only defines the vocabulary.

pub mod error;
pub mod model;
pub mod tool;
pub mod types;

pub use error::{RelayError, Result};
pub use model::{Llm, LlmReply, LlmRequest, StopReason, TokenUsage};
pub use tool::{ToolCatalog, ToolDescriptor};
pub use types::{Block, Role, ToolResult, ToolUse, Turn};
