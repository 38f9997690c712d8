use crate::normalize::{decode_args, objectify};
use relay_core::{
    Llm, LlmReply, LlmRequest, RelayError, Result, StopReason, ToolCatalog, ToolDescriptor,
    ToolUse, Turn,
};
use relay_model::retry::{ThrottleRetry, converse_with_retry};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that uses tools when helpful.";

const DEFAULT_MAX_TOOL_ROUNDS: u32 = 6;

/// How a chat turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The model finished without requesting further tool use. Covers
    /// every stop reason other than tool-use.
    EndOfTurn,
    /// The round cap was exhausted while the model still wanted tools;
    /// the returned text may be incomplete.
    RoundLimit,
    /// The model claimed tool use but its turn carried no extractable
    /// tool-use requests.
    Stalled,
}

/// Outcome of one [`ConversationAgent::chat`] call.
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// Newline-joined non-empty text blocks of the final assistant turn.
    pub text: String,
    /// Number of tool rounds executed during this turn.
    pub rounds: u32,
    pub termination: Termination,
}

/// Drives the multi-round tool-use protocol against one model endpoint.
///
/// The agent owns the transcript for its session. Each `chat` call
/// appends the user turn, then loops: invoke the model, and while the
/// stop reason is tool-use, execute every requested tool through the
/// catalog and fold the results back as one synthesized turn before
/// invoking the model again. The tool declaration snapshot is captured
/// from the catalog once, at build time.
pub struct ConversationAgent {
    model: Arc<dyn Llm>,
    catalog: Arc<dyn ToolCatalog>,
    tools: Vec<ToolDescriptor>,
    transcript: Vec<Turn>,
    system_prompt: String,
    max_tool_rounds: u32,
    throttle_retry: ThrottleRetry,
}

impl std::fmt::Debug for ConversationAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationAgent").finish_non_exhaustive()
    }
}

pub struct ConversationAgentBuilder {
    model: Option<Arc<dyn Llm>>,
    catalog: Option<Arc<dyn ToolCatalog>>,
    system_prompt: Option<String>,
    max_tool_rounds: u32,
    throttle_retry: ThrottleRetry,
}

impl ConversationAgentBuilder {
    pub fn new() -> Self {
        Self {
            model: None,
            catalog: None,
            system_prompt: None,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            throttle_retry: ThrottleRetry::default(),
        }
    }

    pub fn model(mut self, model: Arc<dyn Llm>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn catalog(mut self, catalog: Arc<dyn ToolCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Cap on tool rounds per user turn. Default 6.
    pub fn max_tool_rounds(mut self, rounds: u32) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    pub fn throttle_retry(mut self, retry: ThrottleRetry) -> Self {
        self.throttle_retry = retry;
        self
    }

    pub fn build(self) -> Result<ConversationAgent> {
        let model =
            self.model.ok_or_else(|| RelayError::Agent("Model is required".to_string()))?;
        let catalog = self
            .catalog
            .ok_or_else(|| RelayError::Agent("Tool catalog is required".to_string()))?;

        // Declaration snapshot is captured once, here.
        let tools = catalog.descriptors();
        info!(model = model.name(), tool_count = tools.len(), "conversation agent ready");

        Ok(ConversationAgent {
            model,
            catalog,
            tools,
            transcript: Vec::new(),
            system_prompt: self.system_prompt.unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            max_tool_rounds: self.max_tool_rounds,
            throttle_retry: self.throttle_retry,
        })
    }
}

impl Default for ConversationAgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationAgent {
    pub fn builder() -> ConversationAgentBuilder {
        ConversationAgentBuilder::new()
    }

    /// The transcript accumulated so far, oldest turn first.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    async fn invoke_model(&self) -> Result<LlmReply> {
        let request = LlmRequest::new(self.model.name(), self.transcript.clone())
            .with_system(self.system_prompt.clone())
            .with_tools(self.tools.clone());
        converse_with_retry(self.model.as_ref(), request, &self.throttle_retry).await
    }

    /// Run one user turn through the round loop and return the final
    /// assistant text.
    ///
    /// Any fatal model or tool failure propagates; in that case no
    /// partial tool-result turn is appended for the round in flight.
    pub async fn chat(&mut self, user_text: impl Into<String>) -> Result<ChatReply> {
        self.transcript.push(Turn::user().with_text(user_text));

        let mut reply = self.invoke_model().await?;
        self.transcript.push(reply.message.clone());

        let mut rounds = 0u32;
        let mut stalled = false;

        while reply.stop_reason == StopReason::ToolUse && rounds < self.max_tool_rounds {
            rounds += 1;

            let requests: Vec<ToolUse> =
                reply.message.tool_uses().into_iter().cloned().collect();

            if requests.is_empty() {
                // Malformed response: the stop reason promised tool use
                // but the turn carries none. Terminal, not an error.
                warn!("assistant turn claimed tool use but carried no requests");
                stalled = true;
                break;
            }

            let mut result_turn = Turn::user();
            for request in &requests {
                let args = decode_args(&request.input)?;
                debug!(tool = %request.name, id = %request.id, "dispatching tool call");
                let raw = self.catalog.execute(&request.name, args).await?;
                result_turn = result_turn.with_tool_result(request.id.clone(), objectify(raw));
            }
            self.transcript.push(result_turn);

            reply = self.invoke_model().await?;
            self.transcript.push(reply.message.clone());
        }

        let termination = if stalled {
            Termination::Stalled
        } else if reply.stop_reason == StopReason::ToolUse {
            Termination::RoundLimit
        } else {
            Termination::EndOfTurn
        };

        let text = reply.message.joined_text();
        info!(rounds, ?termination, "chat turn complete");
        Ok(ChatReply { text, rounds, termination })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay_core::ToolCatalog;
    use serde_json::Value;

    struct EmptyCatalog;

    #[async_trait]
    impl ToolCatalog for EmptyCatalog {
        fn descriptors(&self) -> Vec<ToolDescriptor> {
            vec![ToolDescriptor::new("fetch_file_id", "Fetch a Drive file id")]
        }

        async fn execute(&self, name: &str, _args: Value) -> Result<Value> {
            Err(RelayError::UnknownTool(name.to_string()))
        }
    }

    #[test]
    fn builder_requires_model() {
        let result = ConversationAgent::builder().catalog(Arc::new(EmptyCatalog)).build();
        assert!(result.unwrap_err().to_string().contains("Model is required"));
    }

    #[test]
    fn builder_requires_catalog() {
        let model = Arc::new(relay_model::MockLlm::new("test"));
        let result = ConversationAgent::builder().model(model).build();
        assert!(result.unwrap_err().to_string().contains("Tool catalog is required"));
    }

    #[test]
    fn builder_captures_declaration_snapshot() {
        let model = Arc::new(relay_model::MockLlm::new("test"));
        let agent = ConversationAgent::builder()
            .model(model)
            .catalog(Arc::new(EmptyCatalog))
            .build()
            .unwrap();
        assert_eq!(agent.tools.len(), 1);
        assert_eq!(agent.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(agent.max_tool_rounds, 6);
        assert!(agent.transcript().is_empty());
    }
}
