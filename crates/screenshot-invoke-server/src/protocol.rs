//! Wire types for the `/invoke` endpoint
//!
//! Requests are `{ "method": ..., "params": ... }`. Two methods exist:
//!
//! - `listTools` → [`ListToolsResponse`]
//! - `callTool` → [`CallToolResponse`]
//!
//! `callTool` params come in two shapes, both normalized by
//! [`normalize_params`]:
//!
//! ```json
//! { "name": "capture", "arguments": { ... } }
//! { "data": { "name": "capture", "arguments": { ... } } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tools::ToolDescriptor;

/// Methods understood by the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeMethod {
    /// Describe the available tools
    ListTools,
    /// Run a tool
    CallTool,
}

impl InvokeMethod {
    /// Reads the `method` field of a request body.
    ///
    /// Returns `None` for a missing, non-string or unknown method.
    pub fn from_body(body: &Value) -> Option<Self> {
        match body.get("method").and_then(Value::as_str)? {
            "listTools" => Some(InvokeMethod::ListTools),
            "callTool" => Some(InvokeMethod::CallTool),
            _ => None,
        }
    }
}

/// A tool invocation in canonical form
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Tool name, if one was given as a string
    pub name:      Option<String>,
    /// Tool arguments; `Null` when absent
    pub arguments: Value,
}

/// JavaScript-style truthiness of a JSON value.
///
/// `null`, `false`, `0` and `""` are falsy; everything else, including empty
/// objects and arrays, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Resolves `params` into a [`ToolCall`].
///
/// A truthy `params.data` takes precedence over `params` itself.
///
/// # Examples
///
/// ```
/// use screenshot_invoke_server::protocol::normalize_params;
/// use serde_json::json;
///
/// let direct = json!({ "name": "capture", "arguments": { "region": "full" } });
/// let nested = json!({ "data": { "name": "capture", "arguments": { "region": "full" } } });
///
/// assert_eq!(normalize_params(Some(&direct)), normalize_params(Some(&nested)));
/// ```
pub fn normalize_params(params: Option<&Value>) -> ToolCall {
    static ABSENT: Value = Value::Null;

    let source = match params {
        Some(params) => match params.get("data") {
            Some(data) if is_truthy(data) => data,
            _ => params,
        },
        None => &ABSENT,
    };

    ToolCall {
        name:      source
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string),
        arguments: source.get("arguments").cloned().unwrap_or(Value::Null),
    }
}

/// One element of a tool response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentItem {
    /// Human-readable text
    #[serde(rename = "text")]
    Text {
        /// The text
        text: String,
    },
    /// Raw base64 image data, no data-URI prefix
    #[serde(rename = "base64_image")]
    Base64Image {
        /// Base64 payload
        data: String,
    },
}

impl ContentItem {
    /// Creates a text item
    pub fn text(text: impl Into<String>) -> Self {
        ContentItem::Text { text: text.into() }
    }

    /// Creates a base64 image item
    pub fn base64_image(data: impl Into<String>) -> Self {
        ContentItem::Base64Image { data: data.into() }
    }
}

/// Body of a successful `callTool` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToolResponse {
    /// Response content, text first
    pub content: Vec<ContentItem>,
}

/// Body of a `listTools` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResponse {
    /// Every tool the server offers
    pub tools: Vec<ToolDescriptor>,
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
