use thiserror::Error;

/// Failure of a single call to the backend. The failover layer absorbs every
/// variant; callers of the accessors never see one.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport failure or non-success status.
    #[error("backend unavailable at {endpoint}: {reason}")]
    Unavailable { endpoint: String, reason: String },

    /// The backend answered but the payload did not decode.
    #[error("malformed response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

impl RemoteError {
    pub fn unavailable(endpoint: &str, reason: impl ToString) -> Self {
        Self::Unavailable {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(endpoint: &str, reason: impl ToString) -> Self {
        Self::Malformed {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Errors surfaced to callers. Only a rejected local write qualifies: there is
/// no store beneath the local one to fall back to.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("local store rejected write to {key}")]
    LocalWrite {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    pub(crate) fn local_write(
        key: &str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::LocalWrite {
            key: key.to_string(),
            source: source.into(),
        }
    }
}
