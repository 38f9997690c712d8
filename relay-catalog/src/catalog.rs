use crate::session::{Connector, McpSession, RawFragment, RawToolOutput};
use async_trait::async_trait;
use relay_core::{RelayError, Result, ToolCatalog, ToolDescriptor};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Tool catalog backed by one live MCP session.
///
/// The declaration snapshot is fetched once at [`connect`] time and is
/// immutable for the rest of the catalog's life: a reconnect during
/// [`execute`] replaces only the transport session, never the snapshot.
///
/// Recovery policy: a failed call triggers exactly one cycle of close,
/// reconnect (same endpoint/credential), retry. The second failure
/// propagates; there is no further retry and no backoff.
///
/// [`connect`]: McpToolCatalog::connect
/// [`execute`]: ToolCatalog::execute
pub struct McpToolCatalog {
    connector: Arc<dyn Connector>,
    session: Mutex<Option<Box<dyn McpSession>>>,
    descriptors: StdMutex<Vec<ToolDescriptor>>,
}

impl McpToolCatalog {
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self {
            connector: Arc::new(connector),
            session: Mutex::new(None),
            descriptors: StdMutex::new(Vec::new()),
        }
    }

    /// Open the transport session and fetch the tool list.
    ///
    /// The MCP initialize handshake performed by the connector is the
    /// liveness check. A no-op if the catalog is already active.
    pub async fn connect(&self) -> Result<()> {
        let mut guard = self.session.lock().await;
        if guard.is_some() {
            return Ok(());
        }

        let session = self
            .connector
            .connect()
            .await
            .map_err(|e| RelayError::Tool(format!("Failed to connect to MCP server: {e}")))?;

        let tools = session
            .list_tools()
            .await
            .map_err(|e| RelayError::Tool(format!("Failed to list MCP tools: {e}")))?;

        info!(tool_count = tools.len(), "MCP tool catalog loaded");

        *self.descriptors.lock().unwrap() = tools;
        *guard = Some(session);
        Ok(())
    }

    /// Tear down the transport session. Subsequent `execute` calls fail
    /// as not active.
    pub async fn close(&self) {
        let mut guard = self.session.lock().await;
        if let Some(session) = guard.take() {
            session.close().await;
            info!("MCP session closed");
        }
    }

    pub async fn is_active(&self) -> bool {
        self.session.lock().await.is_some()
    }

    fn known_tool(&self, name: &str) -> bool {
        self.descriptors.lock().unwrap().iter().any(|d| d.name == name)
    }
}

#[async_trait]
impl ToolCatalog for McpToolCatalog {
    fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.descriptors.lock().unwrap().clone()
    }

    async fn execute(&self, name: &str, args: Value) -> Result<Value> {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.as_ref() else {
            return Err(RelayError::CatalogInactive);
        };
        if !self.known_tool(name) {
            return Err(RelayError::UnknownTool(name.to_string()));
        }

        let arguments = to_argument_map(args)?;
        debug!(tool = name, "calling MCP tool");

        let first_attempt = session.call_tool(name, arguments.clone()).await;

        let raw = match first_attempt {
            Ok(raw) => raw,
            Err(error) => {
                warn!(tool = name, error = %error, "MCP tool call failed; reconnecting and retrying once");

                if let Some(old) = guard.take() {
                    old.close().await;
                }
                let fresh = self
                    .connector
                    .connect()
                    .await
                    .map_err(|e| RelayError::Tool(format!("Failed to refresh MCP connection: {e}")))?;

                // The fresh session stays installed even if the retry
                // fails; the catalog remains active.
                let retry_result = fresh.call_tool(name, arguments).await;
                *guard = Some(fresh);

                retry_result.map_err(|e| {
                    RelayError::Tool(format!("Failed to call MCP tool '{name}': {e}"))
                })?
            }
        };

        normalize_output(name, raw)
    }
}

/// Convert the model-decoded argument value into the MCP argument map.
/// `Null` and `{}` mean no arguments.
fn to_argument_map(args: Value) -> Result<Option<Map<String, Value>>> {
    if args.is_null() {
        return Ok(None);
    }
    match args {
        Value::Object(map) => Ok(if map.is_empty() { None } else { Some(map) }),
        _ => Err(RelayError::Tool("Tool arguments must be an object".to_string())),
    }
}

/// Normalize a raw MCP result into a JSON payload for the model:
/// structured content when present, otherwise the text fragments joined
/// with newlines as `{"result": <string-or-null>}`.
fn normalize_output(name: &str, raw: RawToolOutput) -> Result<Value> {
    if raw.is_error {
        let detail = raw
            .fragments
            .iter()
            .map(|f| match f {
                RawFragment::Text(t) => t.as_str(),
                RawFragment::Other(t) => t.as_str(),
            })
            .find(|t| !t.is_empty())
            .unwrap_or("unknown error");
        return Err(RelayError::Tool(format!("MCP tool '{name}' execution failed: {detail}")));
    }

    if let Some(structured) = raw.structured {
        return Ok(structured);
    }

    let texts: Vec<&str> = raw
        .fragments
        .iter()
        .filter_map(|f| match f {
            RawFragment::Text(t) => Some(t.as_str()),
            RawFragment::Other(_) => None,
        })
        .collect();

    if texts.is_empty() {
        Ok(json!({ "result": Value::Null }))
    } else {
        let joined =
            texts.iter().filter(|t| !t.is_empty()).copied().collect::<Vec<_>>().join("\n");
        Ok(json!({ "result": joined }))
    }
}
