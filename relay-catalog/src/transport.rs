// MCP streamable HTTP transport.
//
// Connects to remote MCP servers over rmcp's streamable HTTP client
// transport, with an optional injected bearer credential. The MCP
// initialize handshake performed by `serve` doubles as the liveness
// check at connect time.

use crate::auth::CatalogAuth;
use crate::session::{Connector, McpSession, RawFragment, RawToolOutput};
use async_trait::async_trait;
use relay_core::ToolDescriptor;
use rmcp::{
    RoleClient,
    model::{CallToolRequestParams, CallToolResult, RawContent, ResourceContents},
    service::RunningService,
};
use serde_json::{Map, Value};
use std::ops::Deref;
use tokio::sync::Mutex;
use tracing::debug;

/// Connector for remote MCP servers reachable over streamable HTTP.
///
/// # Example
///
/// ```rust,ignore
/// use relay_catalog::{CatalogAuth, HttpConnector, McpToolCatalog};
///
/// let connector = HttpConnector::new("https://mcp.example.com/v1")
///     .with_auth(CatalogAuth::bearer("user-jwt"));
/// let catalog = McpToolCatalog::new(connector);
/// catalog.connect().await?;
/// ```
#[derive(Clone)]
pub struct HttpConnector {
    endpoint: String,
    auth: CatalogAuth,
}

impl HttpConnector {
    /// Create a new connector for the given MCP endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), auth: CatalogAuth::None }
    }

    /// Set the credential attached to every session this connector opens.
    pub fn with_auth(mut self, auth: CatalogAuth) -> Self {
        self.auth = auth;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for HttpConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConnector")
            .field("endpoint", &self.endpoint)
            .field("auth", &self.auth)
            .finish()
    }
}

#[async_trait]
impl Connector for HttpConnector {
    async fn connect(&self) -> std::result::Result<Box<dyn McpSession>, String> {
        use rmcp::ServiceExt;
        use rmcp::transport::streamable_http_client::{
            StreamableHttpClientTransport, StreamableHttpClientTransportConfig,
        };

        debug!(endpoint = %self.endpoint, "connecting to MCP server");

        let mut config = StreamableHttpClientTransportConfig::with_uri(self.endpoint.as_str());

        // rmcp adds the "Bearer " prefix via auth_header.
        if let CatalogAuth::Bearer(token) = &self.auth {
            config = config.auth_header(token.clone());
        }

        let transport = StreamableHttpClientTransport::from_config(config);

        let client = ()
            .serve(transport)
            .await
            .map_err(|e| format!("failed to connect to MCP server: {e}"))?;

        Ok(Box::new(RmcpSession { inner: Mutex::new(client) }))
    }
}

/// [`McpSession`] backed by a running rmcp client service.
struct RmcpSession<S>
where
    S: rmcp::service::Service<RoleClient> + Send + Sync + 'static,
{
    inner: Mutex<RunningService<RoleClient, S>>,
}

#[async_trait]
impl<S> McpSession for RmcpSession<S>
where
    S: rmcp::service::Service<RoleClient> + Send + Sync + 'static,
{
    async fn list_tools(&self) -> std::result::Result<Vec<ToolDescriptor>, String> {
        let client = self.inner.lock().await;
        let tools = client.list_all_tools().await.map_err(|e| e.to_string())?;

        Ok(tools
            .into_iter()
            .map(|tool| ToolDescriptor {
                name: tool.name.to_string(),
                description: tool.description.map(|d| d.to_string()).unwrap_or_default(),
                input_schema: Some(Value::Object(tool.input_schema.as_ref().clone())),
            })
            .collect())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> std::result::Result<RawToolOutput, String> {
        let client = self.inner.lock().await;
        let mut params = CallToolRequestParams::new(name.to_string());
        params.arguments = arguments;
        let result = client
            .call_tool(params)
            .await
            .map_err(|e| e.to_string())?;

        Ok(raw_output_from_result(result))
    }

    async fn close(&self) {
        let client = self.inner.lock().await;
        client.cancellation_token().cancel();
    }
}

fn raw_output_from_result(result: CallToolResult) -> RawToolOutput {
    let mut fragments = Vec::new();

    for content in &result.content {
        let raw: &RawContent = content.deref();
        match raw {
            RawContent::Text(text_content) => {
                fragments.push(RawFragment::Text(text_content.text.clone()));
            }
            RawContent::Image(image_content) => {
                fragments.push(RawFragment::Other(format!(
                    "[Image: {} bytes, mime: {}]",
                    image_content.data.len(),
                    image_content.mime_type
                )));
            }
            RawContent::Resource(resource_content) => {
                let uri = match &resource_content.resource {
                    ResourceContents::TextResourceContents { uri, .. } => uri,
                    ResourceContents::BlobResourceContents { uri, .. } => uri,
                };
                fragments.push(RawFragment::Other(format!("[Resource: {uri}]")));
            }
            RawContent::Audio(_) => {
                fragments.push(RawFragment::Other("[Audio content]".to_string()));
            }
            RawContent::ResourceLink(link) => {
                fragments.push(RawFragment::Other(format!("[ResourceLink: {}]", link.uri)));
            }
        }
    }

    RawToolOutput {
        structured: result.structured_content,
        fragments,
        is_error: result.is_error.unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_builder() {
        let connector = HttpConnector::new("https://mcp.example.com/v1")
            .with_auth(CatalogAuth::bearer("tok"));
        assert_eq!(connector.endpoint(), "https://mcp.example.com/v1");
    }

    #[test]
    fn test_connector_debug_redacts_credential() {
        let connector = HttpConnector::new("https://mcp.example.com/v1")
            .with_auth(CatalogAuth::bearer("super-secret"));
        let debug = format!("{connector:?}");
        assert!(!debug.contains("super-secret"));
    }
}
