//! Teamdeck Node - Workflow-host node for the Teamdeck REST API.
//!
//! This crate exposes Teamdeck projects, time entries and bookings as
//! declarative resource/operation actions. The host renders the node's
//! property schema, resolves the values per input item and calls
//! [`Node::execute`] once with the whole batch.
//!
//! # Architecture
//!
//! ```text
//!      Workflow host (form, parameter resolution)
//!          ↓  items + resolved parameters
//! ┌─────────────────────────────────────────┐
//! │       Batch runner                       │
//! │  - One item at a time, in order          │
//! │  - Abort, or isolate into error records  │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │       Resource handlers                  │
//! │  - project / timeEntry / booking         │
//! │  - getAll → pagination aggregator        │
//! └─────────────────────────────────────────┘
//!          ↓  RequestHelper (X-Api-Key)
//!       Teamdeck API
//! ```
//!
//! # Core Types
//!
//! - [`Node`] - Trait every node implements
//! - [`TeamdeckNode`] - The Teamdeck node
//! - [`TeamdeckClient`] - reqwest-backed request helper
//! - [`NodeDescription`] - Static property schema
//!
//! # Running a batch
//!
//! ```no_run
//! use teamdeck::credentials::ApiKeyCredentials;
//! use teamdeck::InputItem;
//! use teamdeck_node::{Node, TeamdeckClient, TeamdeckNode};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = TeamdeckClient::with_base_url(
//!     ApiKeyCredentials::new("secret"),
//!     "https://api.teamdeck.io/v1".to_string(),
//! )?;
//! let items: Vec<InputItem> = serde_json::from_str(
//!     r#"[{"json": {}, "parameters": {"resource": "booking", "operation": "getAll", "returnAll": true}}]"#,
//! )?;
//! let output = TeamdeckNode::new().execute(&client, &items, true).await?;
//! println!("{}", output.to_channels()?);
//! # Ok(())
//! # }
//! ```

mod node;
pub mod connectors;
pub mod registry;
pub mod runners;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export public types
pub use connectors::teamdeck::api::{verify_credentials, TeamdeckClient};
pub use connectors::teamdeck::TeamdeckNode;
pub use node::{HandlerOutput, ItemOutcome, ItemProcessor, Node};
pub use runners::batch::{run_batch, ExecutionError};
pub use types::NodeDescription;
