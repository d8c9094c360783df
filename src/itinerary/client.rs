use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::itinerary::error::ItineraryError;
use crate::itinerary::prompt::SYSTEM_PROMPT;
use crate::itinerary::types::{Itinerary, ItineraryRequest};

pub const DEFAULT_ENDPOINT: &str = "https://api.asi1.ai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "asi1-mini";
pub const API_KEY_ENV: &str = "ASI_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    /// Only logged; providers disagree on its shape.
    #[serde(default)]
    usage: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Connection settings for [`ItineraryClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub model: String,
    /// `None` disables the request timeout.
    pub timeout_secs: Option<u64>,
    pub api_key: Option<String>,
    /// Variable the key was looked up in, used in error messages.
    pub api_key_env: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            api_key: None,
            api_key_env: API_KEY_ENV.to_string(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key_present", &self.api_key.is_some())
            .field("api_key_env", &self.api_key_env)
            .finish()
    }
}

impl ClientConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Builds the `[system, user]` message pair for one request.
pub fn build_messages(request: &ItineraryRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(request.to_user_content()),
    ]
}

/// Full JSON body that is POSTed for `request`.
pub fn request_body(model: &str, request: &ItineraryRequest) -> Value {
    let messages: Vec<Value> = build_messages(request)
        .into_iter()
        .map(|message| json!({ "role": message.role, "content": message.content }))
        .collect();
    json!({ "model": model, "messages": messages })
}

/// Blocking client that turns one travel request into one completion call.
#[derive(Debug, Clone)]
pub struct ItineraryClient {
    config: ClientConfig,
    http: Client,
}

impl ItineraryClient {
    pub fn new(config: ClientConfig) -> Result<Self, ItineraryError> {
        let http = Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|source| ItineraryError::Transport {
                endpoint: config.endpoint.clone(),
                source,
            })?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Generates an itinerary and returns the model's JSON as-is.
    pub fn generate(
        &self,
        location: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Value, ItineraryError> {
        self.generate_request(&ItineraryRequest::new(location, start_date, end_date))
    }

    pub fn generate_request(&self, request: &ItineraryRequest) -> Result<Value, ItineraryError> {
        let content = self.fetch_content(request)?;
        parse_content(content)
    }

    /// Like [`ItineraryClient::generate`], decoding into [`Itinerary`].
    ///
    /// A reply whose shape differs from the documented schema fails with
    /// [`ItineraryError::MalformedContent`] carrying the model's raw text.
    pub fn generate_typed(
        &self,
        location: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Itinerary, ItineraryError> {
        let request = ItineraryRequest::new(location, start_date, end_date);
        let content = self.fetch_content(&request)?;
        match serde_json::from_str(&content) {
            Ok(itinerary) => Ok(itinerary),
            Err(source) => Err(ItineraryError::MalformedContent { source, content }),
        }
    }

    /// Sends one request and returns `choices[0].message.content` unparsed.
    fn fetch_content(&self, request: &ItineraryRequest) -> Result<String, ItineraryError> {
        let api_key = self.api_key()?;
        let payload = request_body(&self.config.model, request);

        debug!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            timeout_secs = ?self.config.timeout_secs,
            "sending itinerary request"
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .map_err(|source| self.transport(source))?;

        let status = response.status();
        let body = response.text().map_err(|source| self.transport(source))?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        if status != StatusCode::OK {
            return Err(ItineraryError::Api { status, body });
        }

        extract_content(body)
    }

    fn api_key(&self) -> Result<&str, ItineraryError> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ItineraryError::MissingApiKey {
                key_env: self.config.api_key_env.clone(),
            })
    }

    fn transport(&self, source: reqwest::Error) -> ItineraryError {
        ItineraryError::Transport {
            endpoint: self.config.endpoint.clone(),
            source,
        }
    }
}

fn extract_content(body: String) -> Result<String, ItineraryError> {
    let envelope: ChatCompletionResponse = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(err) => {
            return Err(ItineraryError::MalformedEnvelope {
                reason: err.to_string(),
                body,
            });
        }
    };

    if let Some(usage) = &envelope.usage {
        debug!(%usage, "token usage");
    }

    let content = envelope
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content);
    match content {
        Some(content) => Ok(content),
        None => Err(ItineraryError::MalformedEnvelope {
            reason: "response did not contain message content".to_string(),
            body,
        }),
    }
}

fn parse_content(content: String) -> Result<Value, ItineraryError> {
    match serde_json::from_str(&content) {
        Ok(value) => Ok(value),
        Err(source) => Err(ItineraryError::MalformedContent { source, content }),
    }
}
