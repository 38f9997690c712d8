//! Amazon Bedrock provider implementation for Relay.
//!
//! Provides access to Bedrock models via the AWS SDK Converse API with
//! IAM/STS authentication. Requires the `bedrock` feature flag (on by
//! default).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use relay_model::bedrock::{BedrockConfig, BedrockModel};
//!
//! let config = BedrockConfig::new("eu-west-1", "eu.anthropic.claude-3-haiku-20240307-v1:0");
//! let model = BedrockModel::new(config).await?;
//! ```
//!
//! # Authentication
//!
//! Credentials are loaded from the standard AWS credential chain
//! (environment variables, `~/.aws/credentials`, IMDS, etc.). No API
//! key is needed.

mod client;
mod config;
pub(crate) mod convert;

pub use client::BedrockModel;
pub use config::BedrockConfig;
