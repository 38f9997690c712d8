//! # relay-agent
//!
//! The conversation agent that drives the multi-round tool-use protocol:
//! send the transcript to the model, execute every tool the model
//! requests through the catalog, fold the results back in, and repeat
//! until the model stops asking or the round cap is hit.
//!
//! ```rust,ignore
//! use relay_agent::ConversationAgent;
//!
//! let mut agent = ConversationAgent::builder()
//!     .model(model)
//!     .catalog(catalog)
//!     .system_prompt("You are a helpful assistant.")
//!     .build()?;
//!
//! let reply = agent.chat("list my files").await?;
//! println!("{}", reply.text);
//! ```

pub mod agent;
pub mod normalize;

pub use agent::{
    ChatReply, ConversationAgent, ConversationAgentBuilder, DEFAULT_SYSTEM_PROMPT, Termination,
};
pub use normalize::{decode_args, objectify};
