//! # relay-catalog
//!
//! MCP tool catalog for Relay agents.
//!
//! [`McpToolCatalog`] owns one live connection to a remote MCP endpoint
//! and implements the `ToolCatalog` seam from relay-core:
//!
//! 1. `connect` establishes the session and fetches the tool list once;
//!    the declaration snapshot is fixed for the rest of the session.
//! 2. `execute` performs a single call with exactly one
//!    reconnect-and-retry cycle on failure.
//! 3. `close` tears the session down; further calls fail as not active.
//!
//! The transport is pluggable through the [`Connector`]/[`McpSession`]
//! traits; [`HttpConnector`] is the rmcp streamable-HTTP implementation
//! used against real servers.

mod auth;
mod catalog;
mod session;
mod transport;

pub use auth::CatalogAuth;
pub use catalog::McpToolCatalog;
pub use session::{Connector, McpSession, RawFragment, RawToolOutput};
pub use transport::HttpConnector;
