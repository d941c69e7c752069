use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Standard backend reply: `{ success, message, data }`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "deserialize_message")]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// HTTP status the envelope arrived with; filled in by the client
    #[serde(skip)]
    pub status: u16,
}

impl<T> ApiEnvelope<T> {
    pub fn new(success: bool, data: Option<T>) -> Self {
        Self {
            success,
            message: None,
            data,
            status: 200,
        }
    }
}

/// Error body. DRF puts either a string, a list or a field map under
/// `detail` or `message`.
#[derive(Clone, PartialEq, Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl ErrorBody {
    /// `detail` wins over `message`; empty values count as absent
    pub fn error_message(&self) -> Option<String> {
        self.detail
            .as_ref()
            .and_then(flatten_message)
            .or_else(|| self.message.as_ref().and_then(flatten_message))
    }
}

/// Collapses a JSON message of any shape into one line
pub fn flatten_message(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(flatten_message)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Object(map) => map
            .values()
            .filter_map(flatten_message)
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn deserialize_message<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(flatten_message))
}
