//! Tool outcomes and their wire shape
//!
//! Both transports serialize an outcome through [`render_tool_result`], so a
//! given call produces byte-for-byte the same result over stdio and HTTP.

use super::widgets::{Presentation, WidgetCatalog};
use serde_json::{json, Map, Value};

/// Transport-neutral result of a tool call
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    /// One-line human-readable summary
    pub text: String,
    /// Machine-readable payload mirroring the store result
    pub structured: Value,
    /// Rendering hint, if the result has a widget
    pub presentation: Option<Presentation>,
}

impl ToolOutcome {
    /// Outcome without a rendering hint
    pub fn new(text: impl Into<String>, structured: Value) -> Self {
        Self {
            text: text.into(),
            structured,
            presentation: None,
        }
    }

    /// Attach a rendering hint
    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = Some(presentation);
        self
    }
}

/// Wire form of a tool result:
/// `{content: [{type: "text", text}], structuredContent, _meta?}`
pub fn render_tool_result(outcome: &ToolOutcome, widgets: &WidgetCatalog) -> Value {
    let mut result = Map::new();
    result.insert(
        "content".to_string(),
        json!([{ "type": "text", "text": outcome.text }]),
    );
    result.insert("structuredContent".to_string(), outcome.structured.clone());
    if let Some(presentation) = &outcome.presentation {
        result.insert(
            "_meta".to_string(),
            Value::Object(widgets.result_meta(presentation)),
        );
    }
    Value::Object(result)
}
