//! Type conversions between Relay and Amazon Bedrock Converse API types.
//!
//! Maps the transcript model (`Turn`/`Block`) and tool descriptors onto
//! the message, tool-configuration and stop-reason types used by
//! `aws-sdk-bedrockruntime`, including the `serde_json::Value` to
//! `aws_smithy_types::Document` bridge the SDK requires for JSON-like
//! payloads.

use aws_sdk_bedrockruntime::types::{
    self as bedrock, ContentBlock, ConversationRole, ConverseOutput, Message, SystemContentBlock,
    Tool, ToolConfiguration, ToolInputSchema, ToolResultBlock, ToolResultContentBlock,
    ToolSpecification, ToolUseBlock,
};
use aws_smithy_types::Document;
use relay_core::{
    Block, LlmReply, LlmRequest, Role, StopReason, TokenUsage, ToolDescriptor, ToolUse, Turn,
};
use serde_json::Value;

/// Result of converting an [`LlmRequest`] into Bedrock Converse inputs.
///
/// The system prompt is carried separately since the Converse API takes
/// it as a distinct parameter rather than inline with the messages.
pub(crate) struct BedrockConverseInput {
    pub messages: Vec<Message>,
    pub system: Vec<SystemContentBlock>,
    pub tool_config: Option<ToolConfiguration>,
}

pub(crate) fn relay_request_to_bedrock(
    request: &LlmRequest,
) -> Result<BedrockConverseInput, String> {
    let mut messages = Vec::new();

    for turn in &request.transcript {
        let role = match turn.role {
            Role::User => ConversationRole::User,
            Role::Assistant => ConversationRole::Assistant,
        };

        let blocks = relay_blocks_to_bedrock(&turn.blocks);
        if !blocks.is_empty() {
            let msg = Message::builder()
                .role(role)
                .set_content(Some(blocks))
                .build()
                .map_err(|e| format!("Failed to build Bedrock message: {e}"))?;
            messages.push(msg);
        }
    }

    let system = if request.system.is_empty() {
        Vec::new()
    } else {
        vec![SystemContentBlock::Text(request.system.clone())]
    };

    let tool_config = if request.tools.is_empty() {
        None
    } else {
        Some(descriptors_to_tool_config(&request.tools)?)
    };

    Ok(BedrockConverseInput { messages, system, tool_config })
}

/// Convert Relay `Block` list to Bedrock `ContentBlock` list.
fn relay_blocks_to_bedrock(blocks: &[Block]) -> Vec<ContentBlock> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Text { text } => {
                if text.is_empty() {
                    None
                } else {
                    Some(ContentBlock::Text(text.clone()))
                }
            }
            Block::ToolUse(tu) => {
                let tool_use = ToolUseBlock::builder()
                    .tool_use_id(tu.id.clone())
                    .name(tu.name.clone())
                    .input(json_value_to_document(&tu.input))
                    .build()
                    .ok()?;
                Some(ContentBlock::ToolUse(tool_use))
            }
            Block::ToolResult(tr) => {
                let tool_result = ToolResultBlock::builder()
                    .tool_use_id(tr.id.clone())
                    .content(ToolResultContentBlock::Json(json_value_to_document(&tr.payload)))
                    .build()
                    .ok()?;
                Some(ContentBlock::ToolResult(tool_result))
            }
        })
        .collect()
}

/// Convert the catalog's declaration snapshot to a Bedrock
/// `ToolConfiguration`.
fn descriptors_to_tool_config(tools: &[ToolDescriptor]) -> Result<ToolConfiguration, String> {
    let bedrock_tools: Vec<Tool> = tools
        .iter()
        .filter_map(|desc| {
            let schema = desc.input_schema.clone().unwrap_or(serde_json::json!({
                "type": "object",
                "properties": {}
            }));

            let mut spec_builder = ToolSpecification::builder()
                .name(desc.name.clone())
                .input_schema(ToolInputSchema::Json(json_value_to_document(&schema)));

            if !desc.description.is_empty() {
                spec_builder = spec_builder.description(desc.description.clone());
            }

            spec_builder.build().ok().map(Tool::ToolSpec)
        })
        .collect();

    ToolConfiguration::builder()
        .set_tools(Some(bedrock_tools))
        .build()
        .map_err(|e| format!("Failed to build Bedrock tool configuration: {e}"))
}

/// Convert a Bedrock Converse response to a Relay [`LlmReply`].
pub(crate) fn bedrock_response_to_relay(
    output: &ConverseOutput,
    stop_reason: &bedrock::StopReason,
    usage: Option<&bedrock::TokenUsage>,
) -> LlmReply {
    let message = match output {
        ConverseOutput::Message(message) => bedrock_message_to_turn(message),
        _ => Turn::assistant(),
    };

    let usage = usage.map(|u| TokenUsage {
        input_tokens: u.input_tokens,
        output_tokens: u.output_tokens,
        total_tokens: u.total_tokens,
    });

    LlmReply { message, stop_reason: bedrock_stop_reason_to_relay(stop_reason), usage }
}

fn bedrock_message_to_turn(message: &Message) -> Turn {
    let blocks = message
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text(text) => {
                if text.is_empty() {
                    None
                } else {
                    Some(Block::Text { text: text.clone() })
                }
            }
            ContentBlock::ToolUse(tool_use) => Some(Block::ToolUse(ToolUse {
                id: tool_use.tool_use_id.clone(),
                name: tool_use.name.clone(),
                input: document_to_json_value(&tool_use.input),
            })),
            _ => None,
        })
        .collect();

    Turn { role: Role::Assistant, blocks }
}

/// Map Bedrock `StopReason` to the three-valued Relay [`StopReason`].
fn bedrock_stop_reason_to_relay(stop_reason: &bedrock::StopReason) -> StopReason {
    match stop_reason {
        bedrock::StopReason::ToolUse => StopReason::ToolUse,
        bedrock::StopReason::EndTurn => StopReason::EndTurn,
        _ => StopReason::Other,
    }
}

// --- JSON Value <-> AWS Document conversion ---

/// Convert a `serde_json::Value` to an `aws_smithy_types::Document`.
///
/// The SDK uses `Document` for JSON-like values (tool inputs, tool
/// schemas, tool results) rather than `serde_json::Value`.
pub(crate) fn json_value_to_document(value: &Value) -> Document {
    match value {
        Value::Null => Document::Null,
        Value::Bool(b) => Document::Bool(*b),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Document::Number(aws_smithy_types::Number::PosInt(u))
            } else if let Some(i) = n.as_i64() {
                Document::Number(aws_smithy_types::Number::NegInt(i))
            } else if let Some(f) = n.as_f64() {
                Document::Number(aws_smithy_types::Number::Float(f))
            } else {
                Document::Null
            }
        }
        Value::String(s) => Document::String(s.clone()),
        Value::Array(arr) => Document::Array(arr.iter().map(json_value_to_document).collect()),
        Value::Object(obj) => Document::Object(
            obj.iter().map(|(k, v)| (k.clone(), json_value_to_document(v))).collect(),
        ),
    }
}

/// Convert an `aws_smithy_types::Document` to a `serde_json::Value`.
///
/// Inverse of [`json_value_to_document`], used for tool-use inputs
/// coming back in Bedrock responses.
pub(crate) fn document_to_json_value(doc: &Document) -> Value {
    match doc {
        Document::Null => Value::Null,
        Document::Bool(b) => Value::Bool(*b),
        Document::Number(n) => match *n {
            aws_smithy_types::Number::PosInt(u) => Value::Number(serde_json::Number::from(u)),
            aws_smithy_types::Number::NegInt(i) => Value::Number(serde_json::Number::from(i)),
            aws_smithy_types::Number::Float(f) => {
                serde_json::Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
            }
        },
        Document::String(s) => Value::String(s.clone()),
        Document::Array(arr) => Value::Array(arr.iter().map(document_to_json_value).collect()),
        Document::Object(obj) => {
            Value::Object(obj.iter().map(|(k, v)| (k.clone(), document_to_json_value(v))).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(transcript: Vec<Turn>) -> LlmRequest {
        LlmRequest::new("test-model", transcript)
    }

    #[test]
    fn test_json_value_to_document_roundtrip() {
        let value = serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string" },
                "count": 42,
                "active": true,
                "tags": ["a", "b"]
            }
        });
        let doc = json_value_to_document(&value);
        let back = document_to_json_value(&doc);
        assert_eq!(value, back);
    }

    #[test]
    fn test_json_null_roundtrip() {
        let doc = json_value_to_document(&Value::Null);
        assert_eq!(document_to_json_value(&doc), Value::Null);
    }

    #[test]
    fn test_system_prompt_extraction() {
        let req = request(vec![Turn::user().with_text("Hello")])
            .with_system("You are a helpful assistant.");

        let result = relay_request_to_bedrock(&req).unwrap();
        assert_eq!(result.system.len(), 1);
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn test_empty_system_prompt_omitted() {
        let req = request(vec![Turn::user().with_text("Hello")]);
        let result = relay_request_to_bedrock(&req).unwrap();
        assert!(result.system.is_empty());
    }

    #[test]
    fn test_role_mapping() {
        let req = request(vec![
            Turn::user().with_text("Hi"),
            Turn::assistant().with_text("Hello"),
        ]);

        let result = relay_request_to_bedrock(&req).unwrap();
        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[0].role, ConversationRole::User);
        assert_eq!(result.messages[1].role, ConversationRole::Assistant);
    }

    #[test]
    fn test_tool_use_conversion() {
        let req = request(vec![
            Turn::assistant().with_tool_use("t1", "fetch_file_id", serde_json::json!({"q": "a"})),
        ]);

        let result = relay_request_to_bedrock(&req).unwrap();
        assert_eq!(result.messages.len(), 1);

        let blocks = &result.messages[0].content;
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            ContentBlock::ToolUse(tu) => {
                assert_eq!(tu.tool_use_id, "t1");
                assert_eq!(tu.name, "fetch_file_id");
            }
            other => panic!("expected tool use block, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_result_conversion() {
        let req = request(vec![
            Turn::user().with_tool_result("t1", serde_json::json!({"files": []})),
        ]);

        let result = relay_request_to_bedrock(&req).unwrap();
        let blocks = &result.messages[0].content;
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            ContentBlock::ToolResult(tr) => {
                assert_eq!(tr.tool_use_id, "t1");
                assert!(matches!(tr.content[0], ToolResultContentBlock::Json(_)));
            }
            other => panic!("expected tool result block, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_config_conversion() {
        let req = request(vec![]).with_tools(vec![
            ToolDescriptor::new("fetch_file_id", "Fetch a Drive file id").with_input_schema(
                serde_json::json!({
                    "type": "object",
                    "properties": { "query": { "type": "string" } }
                }),
            ),
        ]);

        let result = relay_request_to_bedrock(&req).unwrap();
        let tool_config = result.tool_config.expect("tool config should be present");
        assert_eq!(tool_config.tools.len(), 1);
    }

    #[test]
    fn test_missing_schema_defaults_to_empty_object() {
        let req = request(vec![]).with_tools(vec![ToolDescriptor::new("ping", "Liveness")]);
        let result = relay_request_to_bedrock(&req).unwrap();
        assert!(result.tool_config.is_some());
    }

    #[test]
    fn test_no_tools_means_no_tool_config() {
        let result = relay_request_to_bedrock(&request(vec![])).unwrap();
        assert!(result.tool_config.is_none());
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(bedrock_stop_reason_to_relay(&bedrock::StopReason::ToolUse), StopReason::ToolUse);
        assert_eq!(bedrock_stop_reason_to_relay(&bedrock::StopReason::EndTurn), StopReason::EndTurn);
        assert_eq!(
            bedrock_stop_reason_to_relay(&bedrock::StopReason::MaxTokens),
            StopReason::Other
        );
        assert_eq!(
            bedrock_stop_reason_to_relay(&bedrock::StopReason::StopSequence),
            StopReason::Other
        );
    }

    #[test]
    fn test_response_message_conversion() {
        let message = Message::builder()
            .role(ConversationRole::Assistant)
            .content(ContentBlock::Text("Here are your files".to_string()))
            .content(ContentBlock::ToolUse(
                ToolUseBlock::builder()
                    .tool_use_id("t1")
                    .name("fetch_file_id")
                    .input(json_value_to_document(&serde_json::json!({})))
                    .build()
                    .unwrap(),
            ))
            .build()
            .unwrap();

        let reply = bedrock_response_to_relay(
            &ConverseOutput::Message(message),
            &bedrock::StopReason::ToolUse,
            None,
        );

        assert_eq!(reply.stop_reason, StopReason::ToolUse);
        assert_eq!(reply.message.role, Role::Assistant);
        assert_eq!(reply.message.blocks.len(), 2);
        assert_eq!(reply.message.tool_uses()[0].id, "t1");
    }

    #[test]
    fn test_empty_text_blocks_skipped() {
        let req = request(vec![Turn::user().with_text("")]);
        let result = relay_request_to_bedrock(&req).unwrap();
        // A turn whose blocks all convert to nothing produces no message.
        assert!(result.messages.is_empty());
    }
}
