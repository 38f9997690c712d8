use crate::cli::Cli;
use anyhow::{Context, Result, bail};

const DEFAULT_REGION: &str = "eu-west-1";

const DEFAULT_SYSTEM_PROMPT: &str = "You are an advanced AI assistant that can call various \
tools to help answer user questions.\nWhen you get a google auth url, you will write it out \
exactly to the user so the user can click it.";

/// Fully resolved runtime configuration: flags win over environment
/// variables, environment variables over defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_id: String,
    pub region: String,
    pub endpoint: String,
    /// Pre-obtained bearer credential for the MCP endpoint. Credential
    /// acquisition is the caller's concern.
    pub bearer_token: Option<String>,
    pub system_prompt: String,
    pub max_tool_rounds: u32,
}

impl AppConfig {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let region = cli
            .region
            .clone()
            .or_else(|| env_var("AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let model_id = cli
            .model_id
            .clone()
            .or_else(|| env_var("BEDROCK_MODEL_ID"))
            .context("no model configured: pass --model-id or set BEDROCK_MODEL_ID")?;

        let endpoint = match cli.endpoint.clone().or_else(|| env_var("MCP_ENDPOINT")) {
            Some(endpoint) => endpoint,
            None => {
                let Some(arn) = cli.agent_arn.clone().or_else(|| env_var("AGENT_ARN")) else {
                    bail!(
                        "no MCP endpoint configured: pass --endpoint / MCP_ENDPOINT, \
                         or --agent-arn / AGENT_ARN to derive one"
                    );
                };
                agentcore_endpoint(&region, &arn)
            }
        };

        Ok(Self {
            model_id,
            region,
            endpoint,
            bearer_token: env_var("MCP_BEARER_TOKEN"),
            system_prompt: cli
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            max_tool_rounds: cli.max_tool_rounds,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Build the Bedrock AgentCore runtime invocation URL for an agent ARN.
/// The ARN is percent-encoded in full since it contains `:` and `/`.
fn agentcore_endpoint(region: &str, agent_arn: &str) -> String {
    format!(
        "https://bedrock-agentcore.{region}.amazonaws.com/runtimes/{}/invocations?qualifier=DEFAULT",
        urlencoding::encode(agent_arn)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agentcore_endpoint_encodes_the_arn() {
        let url = agentcore_endpoint(
            "eu-west-1",
            "arn:aws:bedrock-agentcore:eu-west-1:123456789012:runtime/my-agent",
        );
        assert_eq!(
            url,
            "https://bedrock-agentcore.eu-west-1.amazonaws.com/runtimes/\
             arn%3Aaws%3Abedrock-agentcore%3Aeu-west-1%3A123456789012%3Aruntime%2Fmy-agent\
             /invocations?qualifier=DEFAULT"
        );
    }
}
