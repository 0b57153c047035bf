//! Teamdeck API-key credential.
//!
//! The host collects a single secret from the user and injects it as the
//! `X-Api-Key` header on every outbound call. Storage and encryption of the
//! secret belong to the host; this module only describes the credential and
//! carries its value for the duration of one execution.
//!
//! # Usage
//!
//! ```no_run
//! use teamdeck::credentials::{ApiKeyCredentials, credential_descriptor};
//!
//! # fn main() -> anyhow::Result<()> {
//! let credentials = ApiKeyCredentials::from_env()?;
//! let descriptor = credential_descriptor();
//! assert_eq!(descriptor.header_name, "X-Api-Key");
//! # let _ = credentials;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;

/// Credential type name referenced by the node description.
pub const CREDENTIAL_NAME: &str = "teamdeckApi";

/// Name of the single secret field.
pub const API_KEY_FIELD: &str = "apiKey";

/// Header the secret is sent in.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Path (relative to the API base URL) used to test a credential.
pub const TEST_PATH: &str = "/me";

/// Environment variable the command-line host reads the key from.
pub const API_KEY_ENV: &str = "TEAMDECK_API_KEY";

/// Declarative description of the credential, rendered by the host as a form.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub documentation_url: &'static str,
    pub properties: Vec<CredentialProperty>,
    /// Header the secret is injected into.
    pub header_name: &'static str,
    /// Request used to check that a credential is accepted.
    pub test_request: CredentialTestRequest,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialProperty {
    pub display_name: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub password: bool,
    pub required: bool,
    pub default: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct CredentialTestRequest {
    pub method: &'static str,
    pub path: &'static str,
}

/// Returns the Teamdeck API credential description.
pub fn credential_descriptor() -> CredentialDescriptor {
    CredentialDescriptor {
        name: CREDENTIAL_NAME,
        display_name: "Teamdeck API",
        documentation_url: "https://teamdeck.io/api-documentation",
        properties: vec![CredentialProperty {
            display_name: "API Key",
            name: API_KEY_FIELD,
            kind: "string",
            password: true,
            required: true,
            default: "",
        }],
        header_name: API_KEY_HEADER,
        test_request: CredentialTestRequest {
            method: "GET",
            path: TEST_PATH,
        },
    }
}

/// Resolved credential value. Never mutated by the node.
#[derive(Clone)]
pub struct ApiKeyCredentials {
    api_key: String,
}

impl ApiKeyCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Load the key from `TEAMDECK_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var(API_KEY_ENV).with_context(|| format!("{} not set", API_KEY_ENV))?;
        if api_key.trim().is_empty() {
            anyhow::bail!("{} is empty", API_KEY_ENV);
        }
        Ok(Self::new(api_key))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for ApiKeyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
