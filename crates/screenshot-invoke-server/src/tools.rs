//! The `capture` tool: arguments and descriptor

use schemars::{JsonSchema, schema_for};
use screenshot_core::{
    error::CaptureError,
    model::{CaptureRegion, CaptureRequest, DEFAULT_FORMAT},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the only tool the server offers
pub const CAPTURE_TOOL: &str = "capture";

const CAPTURE_DESCRIPTION: &str = "Captures a screenshot and returns a raw base64-encoded image. \
Options:\n\
- region: 'full' (only full supported)\n\
- format: 'markdown' (default)\n\
- windowName: Optional name of window to focus\n\
- switchToWindow: Whether to switch to the specified window (default: false)\n\
- switchToSubwindow: Whether to press Command+subwindowKey after switching (default: false)\n\
- subwindowKey: Key sent with Command to pick a sub-view, e.g. '2'\n\
- includeBase64: Whether to include base64 image data in response (default: true)\n\
The screenshot is saved to a dated directory in Downloads and returned as raw base64 data.";

/// Arguments of the `capture` tool as they arrive on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CaptureArguments {
    /// Region to capture; only "full" is supported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Output format hint (default: markdown)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Application to focus before capturing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_name: Option<String>,
    /// Whether to activate `windowName` and capture it fullscreen (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_to_window: Option<bool>,
    /// Whether to press Command+`subwindowKey` after activation (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_to_subwindow: Option<bool>,
    /// Key sent together with Command to switch sub-view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subwindow_key: Option<String>,
    /// Whether to return the image inline (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_base64: Option<bool>,
}

impl CaptureArguments {
    /// Parses raw `arguments`; `null` means all defaults.
    pub fn from_value(arguments: Value) -> Result<Self, serde_json::Error> {
        if arguments.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(arguments)
    }

    /// Applies defaults and validates into a [`CaptureRequest`].
    ///
    /// Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// [`CaptureError::InvalidParameter`] when `region` is not "full".
    pub fn into_request(self) -> Result<CaptureRequest, CaptureError> {
        let region = match non_empty(self.region) {
            Some(region) => region.parse::<CaptureRegion>()?,
            None => CaptureRegion::default(),
        };

        let mut request = CaptureRequest {
            region,
            format: non_empty(self.format).unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            switch_to_window: self.switch_to_window.unwrap_or(false),
            switch_to_subwindow: self.switch_to_subwindow.unwrap_or(false),
            subwindow_key: self.subwindow_key.unwrap_or_default(),
            include_base64: self.include_base64.unwrap_or(true),
            ..CaptureRequest::default()
        };
        request.window_name = non_empty(self.window_name);

        Ok(request)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Static description of a tool, as returned by `listTools`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name
    pub name:         String,
    /// Human-readable usage notes
    pub description:  String,
    /// JSON Schema of the tool arguments
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Descriptor of the `capture` tool
pub fn capture_tool_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name:         CAPTURE_TOOL.to_string(),
        description:  CAPTURE_DESCRIPTION.to_string(),
        input_schema: schema_for!(CaptureArguments).to_value(),
    }
}

/// Every tool the server offers
pub fn list_tools() -> Vec<ToolDescriptor> {
    vec![capture_tool_descriptor()]
}
