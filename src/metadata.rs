//! Document-level metadata rendered into the page head.

use serde::Serialize;

use crate::ui::markup::{escape_attr, escape_text};

/// Static title and description for the document head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: &'static str,
    pub description: &'static str,
}

/// Metadata exported by the root shell.
pub const METADATA: PageMetadata = PageMetadata {
    title: "Devies GPT",
    description: "Chatbot for Devies",
};

impl PageMetadata {
    /// `<title>` and `<meta name="description">` tags.
    #[must_use]
    pub fn head_tags(&self) -> String {
        format!(
            "<title>{}</title>\n<meta name=\"description\" content=\"{}\">",
            escape_text(self.title),
            escape_attr(self.description),
        )
    }
}

impl Default for PageMetadata {
    fn default() -> Self {
        METADATA
    }
}
