use thiserror::Error;

/// Main error type for the itinerary client
#[derive(Error, Debug)]
pub enum TravelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Non-2xx response; the message is the response body verbatim
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TravelError>;

impl TravelError {
    /// HTTP status of an upstream rejection, if this error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            TravelError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TravelError::Config(_) => "CONFIG_ERROR",
            TravelError::Http(_) => "HTTP_ERROR",
            TravelError::Api { .. } => "API_ERROR",
            TravelError::Serialization(_) => "SERIALIZATION_ERROR",
            TravelError::Io(_) => "IO_ERROR",
            TravelError::Validation(_) => "VALIDATION_ERROR",
            TravelError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        });
        if let Some(status) = self.status() {
            payload["error"]["status"] = serde_json::json!(status);
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_body_verbatim() {
        let error = TravelError::Api {
            status: 502,
            message: "upstream planner timed out".to_string(),
        };
        assert_eq!(error.to_string(), "upstream planner timed out");
        assert_eq!(error.status(), Some(502));
    }

    #[test]
    fn test_payload_carries_code_and_status() {
        let payload = TravelError::Api {
            status: 500,
            message: "boom".to_string(),
        }
        .to_error_payload();
        assert_eq!(payload["error"]["code"], "API_ERROR");
        assert_eq!(payload["error"]["status"], 500);

        let payload = TravelError::Config("missing".to_string()).to_error_payload();
        assert_eq!(payload["error"]["code"], "CONFIG_ERROR");
        assert!(payload["error"].get("status").is_none());
    }
}
