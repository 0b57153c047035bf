//! Error taxonomy shared by every Teamdeck operation.

/// Errors raised while executing a Teamdeck operation for one input item.
///
/// All variants propagate unchanged up to the batch runner, which decides
/// whether to abort the run or turn the failure into an error record.
#[derive(Debug, thiserror::Error)]
pub enum TeamdeckError {
    /// The authenticated call failed: transport error, non-2xx status or an
    /// unparseable body.
    #[error("Teamdeck Error: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
        detail: Option<String>,
    },

    /// Caller-supplied parameters are insufficient or malformed.
    #[error("{0}")]
    Validation(String),

    #[error("Unknown operation: {operation}")]
    UnknownOperation { operation: String, item_index: usize },

    #[error("Unknown resource: {resource}")]
    UnknownResource { resource: String, item_index: usize },

    /// A handler produced an empty result that would otherwise be emitted silently.
    #[error("Invalid API response received")]
    InvalidResponse,
}

impl TeamdeckError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
            detail: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Prefixes the message of an upstream error, keeping status and detail.
    ///
    /// Other variants are returned untouched.
    pub fn with_context(self, context: impl std::fmt::Display) -> Self {
        match self {
            Self::Upstream {
                status,
                message,
                detail,
            } => Self::Upstream {
                status,
                message: format!("{}: {}", context, message),
                detail,
            },
            other => other,
        }
    }

    /// Upstream HTTP status code, when the failure came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => None,
        }
    }

    /// Diagnostic detail reported by the upstream API, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Upstream { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
