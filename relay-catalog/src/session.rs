// Transport seam for the MCP tool catalog.
//
// The catalog's recovery logic (one reconnect-and-retry per failed
// call) is written against these traits so it can be exercised with
// scripted sessions in tests; the rmcp-backed implementation lives in
// transport.rs. Errors stay stringly-typed at this layer and are
// classified into RelayError by the catalog.

use async_trait::async_trait;
use relay_core::ToolDescriptor;
use serde_json::{Map, Value};

/// One content fragment of an MCP tool result, in response order.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFragment {
    Text(String),
    /// Non-text content (images, resources, audio), carried as a
    /// human-readable placeholder.
    Other(String),
}

/// Raw outcome of one MCP tool call, before normalization.
#[derive(Debug, Clone, Default)]
pub struct RawToolOutput {
    /// Structured payload, when the server returned one.
    pub structured: Option<Value>,
    /// Ordered content fragments.
    pub fragments: Vec<RawFragment>,
    /// Whether the server flagged the call as failed.
    pub is_error: bool,
}

impl RawToolOutput {
    pub fn structured(value: Value) -> Self {
        Self { structured: Some(value), ..Default::default() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self { fragments: vec![RawFragment::Text(text.into())], ..Default::default() }
    }
}

/// A live transport session to an MCP server.
#[async_trait]
pub trait McpSession: Send + Sync {
    async fn list_tools(&self) -> std::result::Result<Vec<ToolDescriptor>, String>;

    async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> std::result::Result<RawToolOutput, String>;

    async fn close(&self);
}

/// Factory for [`McpSession`]s against one fixed endpoint/credential.
///
/// The catalog holds a connector for the lifetime of the session so the
/// recovery cycle can reopen the transport with the same parameters.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> std::result::Result<Box<dyn McpSession>, String>;
}
