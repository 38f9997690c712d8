mod cli;
mod config;
mod console;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::AppConfig;
use relay_agent::ConversationAgent;
use relay_catalog::{CatalogAuth, HttpConnector, McpToolCatalog};
use relay_model::bedrock::{BedrockConfig, BedrockModel};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli)?;

    info!(endpoint = %config.endpoint, model = %config.model_id, "starting relay console");

    let mut connector = HttpConnector::new(config.endpoint.clone());
    if let Some(token) = &config.bearer_token {
        connector = connector.with_auth(CatalogAuth::bearer(token.clone()));
    }

    let catalog = Arc::new(McpToolCatalog::new(connector));
    catalog.connect().await?;

    let model =
        BedrockModel::new(BedrockConfig::new(config.region.clone(), config.model_id.clone()))
            .await?;

    let agent = ConversationAgent::builder()
        .model(Arc::new(model))
        .catalog(catalog.clone())
        .system_prompt(config.system_prompt.clone())
        .max_tool_rounds(config.max_tool_rounds)
        .build()?;

    let result = console::run_console(agent).await;

    catalog.close().await;
    result
}
