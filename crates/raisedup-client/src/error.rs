/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-2xx response; `message` is the body's `error` field when present.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The profile was still missing after every retry.
    #[error("profile not ready after {attempts} attempts")]
    ProfileNotReady { attempts: u32 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
