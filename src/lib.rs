// Configuration file and environment overrides
pub mod config;

// API-key credential and its declarative descriptor
pub mod credentials;

// Error taxonomy
pub mod error;

// Input items, output records and error records
pub mod item;

// Host request helper interface
pub mod request;

pub use error::TeamdeckError;
pub use item::{is_blank, ErrorRecord, InputItem, NodeOutput, OutputRecord};
pub use request::{ApiRequest, ApiResponse, HttpMethod, RequestHelper};
