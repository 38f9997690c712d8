use crate::{Result, tool::ToolDescriptor, types::Turn};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Why the model stopped producing its reply.
///
/// The round loop is driven entirely by this value: `ToolUse` means the
/// assistant turn contains tool-use requests that must be answered
/// before invoking the model again; anything else ends the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    ToolUse,
    EndTurn,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: i32,
    pub output_tokens: i32,
    pub total_tokens: i32,
}

/// One model invocation: the full transcript so far, the fixed system
/// prompt, and the tool declaration snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub model: String,
    pub transcript: Vec<Turn>,
    pub system: String,
    pub tools: Vec<ToolDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmReply {
    /// The assistant-authored message.
    pub message: Turn,
    pub stop_reason: StopReason,
    pub usage: Option<TokenUsage>,
}

impl LlmRequest {
    pub fn new(model: impl Into<String>, transcript: Vec<Turn>) -> Self {
        Self { model: model.into(), transcript, system: String::new(), tools: Vec::new() }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.tools = tools;
        self
    }
}

impl LlmReply {
    pub fn new(message: Turn, stop_reason: StopReason) -> Self {
        Self { message, stop_reason, usage: None }
    }
}

/// A conversational model endpoint.
///
/// Non-streaming by design: the orchestration loop awaits whole replies,
/// one at a time.
#[async_trait]
pub trait Llm: Send + Sync {
    fn name(&self) -> &str;
    async fn converse(&self, request: LlmRequest) -> Result<LlmReply>;
}
