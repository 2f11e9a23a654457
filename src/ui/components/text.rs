//! Paragraph component using the body font.

use crate::theme::{FontRole, ThemeConfig};
use crate::ui::markup::{Component, escape_attr, escape_text};

/// Text tone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextTone {
    #[default]
    Default,
    Muted,
}

impl TextTone {
    /// Get CSS classes for this tone.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Default => "text-sm text-white",
            Self::Muted => "text-sm text-gray-400",
        }
    }
}

/// Paragraph of body text.
#[derive(Debug, Clone)]
pub struct Text {
    text: String,
    tone: TextTone,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: TextTone::default(),
        }
    }

    #[must_use]
    pub fn tone(mut self, tone: TextTone) -> Self {
        self.tone = tone;
        self
    }
}

impl Component for Text {
    fn render(&self, theme: &ThemeConfig, out: &mut String) {
        out.push_str(&format!(
            "<p class=\"{}\" style=\"font-family: {}\">{}</p>",
            self.tone.classes(),
            escape_attr(theme.font(FontRole::Body)),
            escape_text(&self.text),
        ));
    }
}
