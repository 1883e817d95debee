//! Presentation templates the host client renders tool results with
//!
//! Only the descriptors live here: the widget HTML itself is served by the
//! host application under `<base_url>/widget/...`.

use serde_json::{json, Map, Value};

/// MIME type the host expects for widget resources
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";

const OUTPUT_TEMPLATE_KEY: &str = "openai/outputTemplate";
const INVOKING_KEY: &str = "openai/toolInvocation/invoking";
const INVOKED_KEY: &str = "openai/toolInvocation/invoked";

/// The two presentation templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetTemplate {
    /// Confirmation card for a freshly saved note
    NoteSaved,
    /// List of notes
    NotesList,
}

impl WidgetTemplate {
    /// Every template, in resource listing order
    pub const ALL: [WidgetTemplate; 2] = [WidgetTemplate::NotesList, WidgetTemplate::NoteSaved];

    /// Path below the base URL
    pub fn path(&self) -> &'static str {
        match self {
            Self::NoteSaved => "/widget/note-saved",
            Self::NotesList => "/widget/notes-list",
        }
    }

    /// Resource name advertised to clients
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::NoteSaved => "note-saved-widget",
            Self::NotesList => "notes-list-widget",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::NoteSaved => "Widget confirming note was saved",
            Self::NotesList => "Widget showing list of saved notes",
        }
    }
}

/// Rendering hint attached to a tool outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Template to render the structured payload with
    pub template: WidgetTemplate,
    /// Status line while the call is running
    pub invoking: String,
    /// Status line once the call finished
    pub invoked: String,
}

impl Presentation {
    /// Build a hint
    pub fn new(
        template: WidgetTemplate,
        invoking: impl Into<String>,
        invoked: impl Into<String>,
    ) -> Self {
        Self {
            template,
            invoking: invoking.into(),
            invoked: invoked.into(),
        }
    }
}

/// Resolves templates against the public base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetCatalog {
    base_url: String,
}

impl WidgetCatalog {
    /// Catalog for `base_url`; a trailing slash is ignored
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URI of a template
    pub fn uri(&self, template: WidgetTemplate) -> String {
        format!("{}{}", self.base_url, template.path())
    }

    /// `_meta` for a tool result carrying `presentation`
    pub fn result_meta(&self, presentation: &Presentation) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert(
            OUTPUT_TEMPLATE_KEY.to_string(),
            Value::String(self.uri(presentation.template)),
        );
        meta.insert(
            INVOKING_KEY.to_string(),
            Value::String(presentation.invoking.clone()),
        );
        meta.insert(
            INVOKED_KEY.to_string(),
            Value::String(presentation.invoked.clone()),
        );
        meta
    }

    /// `_meta` for a tool descriptor whose results render with `template`
    pub fn descriptor_meta(&self, template: WidgetTemplate) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert(
            OUTPUT_TEMPLATE_KEY.to_string(),
            Value::String(self.uri(template)),
        );
        meta
    }

    /// Resource descriptors for every template
    pub fn resources(&self) -> Vec<Value> {
        WidgetTemplate::ALL
            .iter()
            .map(|template| {
                json!({
                    "uri": self.uri(*template),
                    "name": template.resource_name(),
                    "description": template.description(),
                    "mimeType": WIDGET_MIME_TYPE,
                })
            })
            .collect()
    }
}
