//! Holded MCP Server Library
//!
//! Exposes the Holded invoicing and CRM API as a fixed catalog of
//! operations, reachable through MCP tools and a small REST API.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **holded**: outbound HTTP client for the Holded API
//!   - **tools**: operation catalog, validation, routing and dispatch
//!   - **rest**: REST façade over the dispatcher (feature `http`)
//!
//! # Example
//!
//! ```rust,no_run
//! use holded_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::tools::{DispatchError, Dispatcher, OperationRegistry};
