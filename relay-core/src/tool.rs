use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provider-neutral declaration of one remotely callable tool.
///
/// The set of descriptors is fetched once when the catalog connects and
/// is immutable for the rest of the session, including across transport
/// reconnects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Option<Value>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into(), input_schema: None }
    }

    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }
}

/// A catalog of remote tools behind one live connection.
///
/// `execute` takes the raw argument value as decoded from the model's
/// tool-use request (`Null` is treated as no arguments) and returns a
/// JSON-compatible result payload.
#[async_trait]
pub trait ToolCatalog: Send + Sync {
    /// Snapshot of the available tool declarations, in server order.
    /// No network call.
    fn descriptors(&self) -> Vec<ToolDescriptor>;

    async fn execute(&self, name: &str, args: Value) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RelayError;
    use serde_json::json;
    use std::sync::Arc;

    struct StaticCatalog {
        descriptors: Vec<ToolDescriptor>,
    }

    #[async_trait]
    impl ToolCatalog for StaticCatalog {
        fn descriptors(&self) -> Vec<ToolDescriptor> {
            self.descriptors.clone()
        }

        async fn execute(&self, name: &str, _args: Value) -> Result<Value> {
            if self.descriptors.iter().any(|d| d.name == name) {
                Ok(json!({"ok": true}))
            } else {
                Err(RelayError::UnknownTool(name.to_string()))
            }
        }
    }

    #[test]
    fn test_descriptor_builder() {
        let desc = ToolDescriptor::new("fetch_file_id", "Fetch a Drive file id")
            .with_input_schema(json!({"type": "object", "properties": {}}));
        assert_eq!(desc.name, "fetch_file_id");
        assert!(desc.input_schema.is_some());
    }

    #[tokio::test]
    async fn test_catalog_trait_object() {
        let catalog: Arc<dyn ToolCatalog> = Arc::new(StaticCatalog {
            descriptors: vec![ToolDescriptor::new("fetch_file_id", "")],
        });

        let ok = catalog.execute("fetch_file_id", Value::Null).await.unwrap();
        assert_eq!(ok, json!({"ok": true}));

        let err = catalog.execute("nope", Value::Null).await.unwrap_err();
        assert!(matches!(err, RelayError::UnknownTool(name) if name == "nope"));
    }
}
