use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {path} failed: {source}")]
    Transport {
        path: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{0}")]
    Remote(RemoteError),

    #[error("Unexpected response from {path}: {source}")]
    Decode {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode request for {path}: {source}")]
    Encode {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote(r) => Some(r.status),
            _ => None,
        }
    }
}

/// A non-200 reply, with whatever body the service sent back.
#[derive(Debug, Clone)]
pub struct RemoteError {
    pub status: u16,
    pub body: Value,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.body.get("name").and_then(Value::as_str);
        let message = self.body.get("message").and_then(Value::as_str);

        match (name, message) {
            (Some(name), Some(message)) => {
                write!(f, "{name}")?;
                if let Some(code) = self.body.get("code").and_then(Value::as_i64) {
                    write!(f, " (code {code})")?;
                }
                write!(f, ": {message} [HTTP {}]", self.status)
            }
            _ => match &self.body {
                Value::String(s) => write!(f, "HTTP {}: {s}", self.status),
                other => write!(f, "HTTP {}: {other}", self.status),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vendor_error_body_is_readable() {
        let e = RemoteError {
            status: 500,
            body: json!({
                "status": "error",
                "code": -1,
                "name": "Invalid_Key",
                "message": "Invalid API key"
            }),
        };
        assert_eq!(
            e.to_string(),
            "Invalid_Key (code -1): Invalid API key [HTTP 500]"
        );
    }

    #[test]
    fn other_bodies_are_printed_raw() {
        let e = RemoteError {
            status: 404,
            body: json!({"oops": true}),
        };
        assert_eq!(e.to_string(), r#"HTTP 404: {"oops":true}"#);

        let e = RemoteError {
            status: 502,
            body: Value::String("Bad Gateway".into()),
        };
        assert_eq!(e.to_string(), "HTTP 502: Bad Gateway");
    }
}
