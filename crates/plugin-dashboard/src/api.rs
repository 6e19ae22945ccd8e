use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// `code` value of a successful response.
pub const CODE_OK: i64 = 0;

/// The `{code, data, msg}` envelope every dashboard API call returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// [`CODE_OK`] on success, an error code otherwise.
    pub code: i64,
    /// Payload; may be absent on errors.
    pub data: Option<T>,
    /// Error text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Some endpoints report errors under `message` instead of `msg`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful envelope around `data`.
    pub fn ok(data: T) -> Self {
        Self {
            code: CODE_OK,
            data: Some(data),
            msg: None,
            message: None,
        }
    }

    /// An error envelope.
    pub fn error(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            data: None,
            msg: Some(msg.into()),
            message: None,
        }
    }

    /// Whether `code` is [`CODE_OK`].
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }

    /// The server's error text: `msg`, else `message`, ignoring empty strings.
    pub fn error_text(&self) -> Option<&str> {
        [self.msg.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }
}

/// Plugin ids come back as numbers from some backends and strings from others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginId {
    /// Numeric id.
    Number(u64),
    /// String id.
    Text(String),
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginId::Number(n) => write!(f, "{n}"),
            PluginId::Text(s) => f.write_str(s),
        }
    }
}

/// One plugin as listed by the API. Fields other than `id` are passed through to the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSummary {
    /// Plugin id.
    pub id: PluginId,
    /// Every other field of the listing, as received.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PluginSummary {
    /// One passthrough field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, Error)]
/// The request never produced an API envelope.
pub enum ApiError {
    /// The request could not be completed.
    #[error("request failed: {0}")]
    Transport(String),

    /// The body was not a valid envelope.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// The subset of the dashboard API used by the plugin pages.
#[async_trait]
pub trait PluginApi: Send + Sync {
    /// Plugins developed by the signed-in user.
    async fn my_plugins(&self) -> Result<ApiResponse<Vec<PluginSummary>>, ApiError>;
}

/// Decode a raw JSON body into a plugin list envelope.
pub fn decode_plugin_list(body: &str) -> Result<ApiResponse<Vec<PluginSummary>>, ApiError> {
    Ok(serde_json::from_str(body)?)
}
