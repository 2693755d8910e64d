//! Classified failures of a single API call

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, DNS or body read failure
    #[error("server failed to respond: {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-200 response; `message` is the server's error text verbatim
    #[error("{message}")]
    Server { status: StatusCode, message: String },

    /// A 200 response whose body is not the expected JSON
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Build a server error from a status and raw body.
    ///
    /// Falls back to the status line when the body carries no `error` field.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<super::ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_default();
        let message = if message.is_empty() {
            status_line(status)
        } else {
            message
        };
        ClientError::Server { status, message }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decode failures are reported like transport failures
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Transport { .. } | ClientError::Decode { .. }
        )
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ClientError::Decode { .. })
    }

    pub fn is_server(&self) -> bool {
        matches!(self, ClientError::Server { .. })
    }
}

/// Render a status the way `net/http` prints it, e.g. `404 Not Found`
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_should_carry_message_verbatim() {
        let err =
            ClientError::from_response(StatusCode::NOT_FOUND, r#"{"error":"document not found"}"#);
        assert_eq!(err.to_string(), "document not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(err.is_server());
        assert!(!err.is_transport());
    }

    #[test]
    fn server_error_without_body_should_use_status_line() {
        let err = ClientError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.to_string(), "500 Internal Server Error");

        let err = ClientError::from_response(StatusCode::UNAUTHORIZED, "<html>nope</html>");
        assert_eq!(err.to_string(), "401 Unauthorized");
    }

    #[test]
    fn decode_error_counts_as_transport() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ClientError::Decode {
            url: "http://x.io/entries/?page=0".to_string(),
            source,
        };
        assert!(err.is_transport());
        assert!(err.status().is_none());
    }
}
