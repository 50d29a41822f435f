//! The sink that receives finished text runs.

use crate::properties::CharProperties;
use serde::Serialize;

/// Accepts text runs together with the properties they are rendered with.
pub trait LayoutSink {
    fn append_run(&mut self, text: String, properties: CharProperties);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub properties: CharProperties,
}

/// In-memory layout input: the runs of one label, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextLayout {
    runs: Vec<TextRun>,
}

impl TextLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// The label text with run boundaries removed.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

impl LayoutSink for TextLayout {
    fn append_run(&mut self, text: String, properties: CharProperties) {
        self.runs.push(TextRun { text, properties });
    }
}
