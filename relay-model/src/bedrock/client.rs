//! Amazon Bedrock client implementation.
//!
//! Uses the AWS SDK Converse API for non-streaming inference.
//! Credentials are loaded automatically from the environment via
//! `aws-config` (environment variables, shared config, IMDS, etc.).

use super::config::BedrockConfig;
use super::convert::{bedrock_response_to_relay, relay_request_to_bedrock};
use async_trait::async_trait;
use relay_core::{Llm, LlmReply, LlmRequest, RelayError, Result};
use tracing::{debug, info, instrument};

/// Amazon Bedrock model backed by the AWS SDK Converse API.
///
/// # Example
///
/// ```rust,ignore
/// use relay_model::bedrock::{BedrockConfig, BedrockModel};
///
/// let config = BedrockConfig::new("eu-west-1", "eu.anthropic.claude-3-haiku-20240307-v1:0");
/// let model = BedrockModel::new(config).await?;
///
/// // Use via the Llm trait
/// let reply = model.converse(request).await?;
/// ```
pub struct BedrockModel {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
    region: String,
}

impl BedrockModel {
    /// Create a new Bedrock model handle from the given configuration.
    ///
    /// Loads AWS credentials from the standard credential chain and
    /// constructs an `aws_sdk_bedrockruntime::Client`.
    pub async fn new(config: BedrockConfig) -> Result<Self> {
        let region = config.region.clone();
        let model_id = config.model_id.clone();

        let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint_url) = &config.endpoint_url {
            sdk_config_loader = sdk_config_loader.endpoint_url(endpoint_url);
        }

        let sdk_config = sdk_config_loader.load().await;
        let client = aws_sdk_bedrockruntime::Client::new(&sdk_config);

        info!("bedrock client created for region={region}, model={model_id}");

        Ok(Self { client, model_id, region })
    }
}

#[async_trait]
impl Llm for BedrockModel {
    fn name(&self) -> &str {
        &self.model_id
    }

    #[instrument(skip_all, fields(model_id = %self.model_id, region = %self.region))]
    async fn converse(&self, request: LlmRequest) -> Result<LlmReply> {
        let input = relay_request_to_bedrock(&request).map_err(|e| {
            RelayError::Model(format!(
                "Bedrock request conversion failed for region={}, model={}: {e}",
                self.region, self.model_id
            ))
        })?;

        debug!(
            messages = input.messages.len(),
            tools = request.tools.len(),
            "bedrock converse for model={}",
            self.model_id
        );

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .set_messages(Some(input.messages))
            .set_system(Some(input.system))
            .set_tool_config(input.tool_config)
            .send()
            .await
            .map_err(|e| {
                RelayError::Model(format!(
                    "Bedrock API error for region={}, model={}: {e}",
                    self.region, self.model_id
                ))
            })?;

        let output = response.output.ok_or_else(|| {
            RelayError::Model(format!(
                "Bedrock response missing output for model={}",
                self.model_id
            ))
        })?;

        Ok(bedrock_response_to_relay(&output, &response.stop_reason, response.usage.as_ref()))
    }
}
