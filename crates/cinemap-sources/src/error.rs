use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection, TLS or timeout failure before a status was received
    #[error("request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("{path} returned HTTP {status}: {body}")]
    Status { path: String, status: u16, body: String },

    #[error("failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("no TMDb access token configured (set {} or run `cinemap config token`)", cinemap_config::ACCESS_TOKEN_ENV)]
    MissingToken,
}

impl SourceError {
    pub fn transport(path: &str, err: impl std::fmt::Display) -> Self {
        SourceError::Transport {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    pub fn decode(path: &str, err: impl std::fmt::Display) -> Self {
        SourceError::Decode {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    /// True for 401/403 responses
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SourceError::Status { status: 401 | 403, .. } | SourceError::MissingToken)
    }

    /// Short category for grouping failures in logs
    pub fn category(&self) -> &'static str {
        match self {
            SourceError::Transport { .. } => "transport",
            SourceError::Status { .. } => "status",
            SourceError::Decode { .. } => "decode",
            SourceError::MissingToken => "auth",
        }
    }
}
