/// Body of a successful API call, reduced to what the workflows show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerReply {
    pub message: Option<String>,
}

impl ServerReply {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub(crate) fn message_or(&self, fallback: &str) -> String {
        match self.message.as_deref() {
            Some(message) if !message.trim().is_empty() => message.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Why a request did not produce a [`ServerReply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The server answered with a non-success status.
    Rejected { status: u16, detail: Option<String> },
    /// The request never produced a usable response (network, timeout, bad body).
    Transport { reason: String },
}

impl RequestError {
    /// Text shown to the user: the server's detail when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            RequestError::Rejected {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}
