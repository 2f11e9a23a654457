//! Heading component that renders in the theme's heading font.

use crate::theme::{FontRole, ThemeConfig};
use crate::ui::markup::{Component, escape_attr, escape_text};

/// Heading level and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeadingLevel {
    /// Page title.
    H1,
    /// Section title.
    #[default]
    H2,
    /// Sub-section title.
    H3,
}

impl HeadingLevel {
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
        }
    }

    /// Get CSS classes for this level.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::H1 => "text-2xl font-bold",
            Self::H2 => "text-lg font-semibold",
            Self::H3 => "text-base font-semibold",
        }
    }
}

/// Heading text.
///
/// # Example
///
/// ```rust,ignore
/// let heading = Heading::new("Devies GPT").level(HeadingLevel::H1);
/// let html = heading.render_to_string(&theme);
/// ```
#[derive(Debug, Clone)]
pub struct Heading {
    text: String,
    level: HeadingLevel,
}

impl Heading {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: HeadingLevel::default(),
        }
    }

    #[must_use]
    pub fn level(mut self, level: HeadingLevel) -> Self {
        self.level = level;
        self
    }
}

impl Component for Heading {
    fn render(&self, theme: &ThemeConfig, out: &mut String) {
        let tag = self.level.tag();
        out.push_str(&format!(
            "<{tag} class=\"{}\" style=\"font-family: {}\">{}</{tag}>",
            self.level.classes(),
            escape_attr(theme.font(FontRole::Heading)),
            escape_text(&self.text),
        ));
    }
}
