use clap::Parser;

/// Interactive console for a Bedrock-backed MCP tool agent.
///
/// Every flag falls back to an environment variable; a `.env` file in
/// the working directory is loaded first.
#[derive(Parser, Debug)]
#[command(name = "relay", version, about)]
pub struct Cli {
    /// Bedrock model or inference profile id (env: BEDROCK_MODEL_ID)
    #[arg(long)]
    pub model_id: Option<String>,

    /// AWS region (env: AWS_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// MCP endpoint URL (env: MCP_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// AgentCore runtime ARN; used to derive the MCP endpoint when
    /// --endpoint is absent (env: AGENT_ARN)
    #[arg(long)]
    pub agent_arn: Option<String>,

    /// System prompt override
    #[arg(long)]
    pub system_prompt: Option<String>,

    /// Maximum tool rounds per user turn
    #[arg(long, default_value_t = 6)]
    pub max_tool_rounds: u32,
}
