use reqwest::StatusCode;
use thiserror::Error;

const PREVIEW_CHARS: usize = 200;

/// Coarse classification of [`ItineraryError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Api,
    MalformedResponse,
}

#[derive(Debug, Error)]
pub enum ItineraryError {
    #[error("{key_env} is not set in the environment")]
    MissingApiKey { key_env: String },

    #[error("{0}")]
    Configuration(String),

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("malformed response envelope: {reason}")]
    MalformedEnvelope { reason: String, body: String },

    #[error("response content is not valid JSON ({source}): {}", preview(.content))]
    MalformedContent {
        #[source]
        source: serde_json::Error,
        content: String,
    },
}

impl ItineraryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingApiKey { .. } | Self::Configuration(_) => ErrorKind::Configuration,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Api { .. } => ErrorKind::Api,
            Self::MalformedEnvelope { .. } | Self::MalformedContent { .. } => {
                ErrorKind::MalformedResponse
            }
        }
    }

    /// HTTP status of an [`ItineraryError::Api`] failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw text that failed to parse, for diagnostics.
    pub fn offending_text(&self) -> Option<&str> {
        match self {
            Self::MalformedEnvelope { body, .. } => Some(body),
            Self::MalformedContent { content, .. } => Some(content),
            _ => None,
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ItineraryError, preview};
    use reqwest::StatusCode;

    #[test]
    fn api_error_reports_status_and_body() {
        let err = ItineraryError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "server error".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(
            err.to_string(),
            "API error 500 Internal Server Error: server error"
        );
    }

    #[test]
    fn both_parse_stages_classify_as_malformed_response() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let content = ItineraryError::MalformedContent {
            source,
            content: "not json".to_string(),
        };
        let envelope = ItineraryError::MalformedEnvelope {
            reason: "missing field `choices`".to_string(),
            body: "{}".to_string(),
        };

        assert_eq!(content.kind(), ErrorKind::MalformedResponse);
        assert_eq!(envelope.kind(), ErrorKind::MalformedResponse);
        assert_eq!(content.offending_text(), Some("not json"));
        assert!(content.to_string().ends_with(": not json"));
    }

    #[test]
    fn missing_key_names_the_variable() {
        let err = ItineraryError::MissingApiKey {
            key_env: "ASI_API_KEY".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "ASI_API_KEY is not set in the environment");
    }

    #[test]
    fn preview_truncates_long_text() {
        let long = "é".repeat(500);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 203);
        assert_eq!(preview("short"), "short");
    }
}
