use serde::{Deserialize, Serialize};

/// Author of a transcript turn.
///
/// Tool-result turns are synthesized by the orchestrator but carry the
/// `User` role, which is how the Converse API expects them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One tool invocation requested by the model within an assistant turn.
///
/// `id` is the call identifier the model uses to correlate the eventual
/// result; it is unique within the turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUse {
    pub id: String,
    pub name: String,
    pub input: serde_json::Value,
}

/// Normalized output of one completed tool call, tagged with the call
/// identifier it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub id: String,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Block {
    Text { text: String },
    ToolUse(ToolUse),
    ToolResult(ToolResult),
}

/// One entry in the conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub blocks: Vec<Block>,
}

impl Turn {
    pub fn new(role: Role) -> Self {
        Self { role, blocks: Vec::new() }
    }

    pub fn user() -> Self {
        Self::new(Role::User)
    }

    pub fn assistant() -> Self {
        Self::new(Role::Assistant)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Text { text: text.into() });
        self
    }

    pub fn with_tool_use(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        input: serde_json::Value,
    ) -> Self {
        self.blocks.push(Block::ToolUse(ToolUse { id: id.into(), name: name.into(), input }));
        self
    }

    pub fn with_tool_result(mut self, id: impl Into<String>, payload: serde_json::Value) -> Self {
        self.blocks.push(Block::ToolResult(ToolResult { id: id.into(), payload }));
        self
    }

    /// Tool-use requests in this turn, in block order.
    pub fn tool_uses(&self) -> Vec<&ToolUse> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::ToolUse(tu) => Some(tu),
                _ => None,
            })
            .collect()
    }

    /// Non-empty text blocks joined with newlines, in block order.
    pub fn joined_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(Block::text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Block {
    /// Returns the text content if this is a Text block, None otherwise
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns true if this block is a tool-use request
    pub fn is_tool_use(&self) -> bool {
        matches!(self, Block::ToolUse(_))
    }

    /// Create a new text block
    pub fn text_block(text: impl Into<String>) -> Self {
        Block::Text { text: text.into() }
    }
}
