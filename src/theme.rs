//! Theme definition.
//!
//! A theme maps semantic font roles to CSS font tokens. The application theme
//! is built once at startup by extending the base theme with a partial
//! override, then shared immutably with every render function that needs it.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::Serialize;

/// Font token bound to the Fira Sans CSS variable.
pub const FIRA_SANS_TOKEN: &str = "var(--font-fira-sans)";

const SYSTEM_SANS_STACK: &str = "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Helvetica, Arial, \
                                 sans-serif, \"Apple Color Emoji\", \"Segoe UI Emoji\", \"Segoe UI Symbol\"";

const SYSTEM_MONO_STACK: &str =
    "SFMono-Regular, Menlo, Monaco, Consolas, \"Liberation Mono\", \"Courier New\", monospace";

/// Semantic role a font token is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    /// Headings and titles.
    Heading,
    /// Running text.
    Body,
    /// Code and preformatted text.
    Mono,
}

impl FontRole {
    /// Every role, in render order.
    pub const ALL: [Self; 3] = [Self::Heading, Self::Body, Self::Mono];

    /// Override key for this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Body => "body",
            Self::Mono => "mono",
        }
    }

    /// Parse an override key. Keys are trimmed and case-insensitive.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "heading" => Some(Self::Heading),
            "body" => Some(Self::Body),
            "mono" => Some(Self::Mono),
            _ => None,
        }
    }

    /// CSS custom property that exposes this role on `:root`.
    #[must_use]
    pub fn css_variable(self) -> &'static str {
        match self {
            Self::Heading => "--chakra-fonts-heading",
            Self::Body => "--chakra-fonts-body",
            Self::Mono => "--chakra-fonts-mono",
        }
    }
}

/// Resolved font tokens, one per role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeFonts {
    pub heading: String,
    pub body: String,
    pub mono: String,
}

/// Immutable theme shared by the whole render tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeConfig {
    fonts: ThemeFonts,
}

impl ThemeConfig {
    /// The UI library's default theme.
    #[must_use]
    pub fn base() -> Self {
        Self {
            fonts: ThemeFonts {
                heading: SYSTEM_SANS_STACK.to_string(),
                body: SYSTEM_SANS_STACK.to_string(),
                mono: SYSTEM_MONO_STACK.to_string(),
            },
        }
    }

    /// Resolve the token for a role.
    #[must_use]
    pub fn font(&self, role: FontRole) -> &str {
        match role {
            FontRole::Heading => &self.fonts.heading,
            FontRole::Body => &self.fonts.body,
            FontRole::Mono => &self.fonts.mono,
        }
    }

    #[must_use]
    pub fn fonts(&self) -> &ThemeFonts {
        &self.fonts
    }

    /// Render the theme as `:root` custom properties.
    #[must_use]
    pub fn css_variables(&self) -> String {
        let mut css = String::from(":root{");
        for role in FontRole::ALL {
            let _ = write!(css, "{}:{};", role.css_variable(), self.font(role));
        }
        css.push('}');
        css
    }

    fn font_mut(&mut self, role: FontRole) -> &mut String {
        match role {
            FontRole::Heading => &mut self.fonts.heading,
            FontRole::Body => &mut self.fonts.body,
            FontRole::Mono => &mut self.fonts.mono,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::base()
    }
}

/// Partial set of font tokens to lay over a base theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeOverride {
    fonts: HashMap<FontRole, String>,
}

impl ThemeOverride {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a role to a token.
    ///
    /// Blank tokens, and tokens that could escape a CSS declaration, are ignored.
    #[must_use]
    pub fn with_font(mut self, role: FontRole, token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        if is_valid_token(token) {
            self.fonts.insert(role, token.to_string());
        }
        self
    }

    /// Build an override from loosely typed key/value pairs.
    ///
    /// Unknown keys and malformed values are skipped.
    pub fn from_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        entries
            .into_iter()
            .fold(Self::new(), |acc, (key, value)| match FontRole::parse(key.as_ref()) {
                Some(role) => acc.with_font(role, value),
                None => {
                    tracing::debug!(key = key.as_ref(), "ignoring unknown theme font key");
                    acc
                }
            })
    }

    #[must_use]
    pub fn font(&self, role: FontRole) -> Option<&str> {
        self.fonts.get(&role).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && !token.contains(['{', '}', ';', '<', '>'])
}

/// Merge `overrides` over `base`. Roles not present in `overrides` keep the
/// base value.
#[must_use]
pub fn extend_theme(base: &ThemeConfig, overrides: &ThemeOverride) -> ThemeConfig {
    let mut theme = base.clone();
    for (role, token) in &overrides.fonts {
        theme.font_mut(*role).clone_from(token);
    }
    theme
}

/// The Devies GPT theme: headings and body text use Fira Sans.
#[must_use]
pub fn devies_theme() -> ThemeConfig {
    let overrides = ThemeOverride::new()
        .with_font(FontRole::Heading, FIRA_SANS_TOKEN)
        .with_font(FontRole::Body, FIRA_SANS_TOKEN);
    extend_theme(&ThemeConfig::base(), &overrides)
}
