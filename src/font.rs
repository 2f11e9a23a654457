//! Variable font resources and the loader that resolves them.
//!
//! A [`FontResource`] describes what the page wants (family, weights, subsets,
//! CSS variable, display policy). A [`FontLoader`] turns it into a
//! [`LoadedFont`]: generated class names plus the stylesheet that declares the
//! `@font-face` rules. Loading happens once at startup; the page is rendered
//! immediately with a fallback family and the browser swaps in the real face
//! when it arrives.

use std::fmt::{self, Write as _};
use std::hash::{DefaultHasher, Hash, Hasher};

use serde::Serialize;

/// Public mirror of the Fira Sans files, laid out as `{slug}-{subset}-{weight}-normal.woff2`.
pub const DEFAULT_FONT_BASE_URL: &str = "https://cdn.jsdelivr.net/npm/@fontsource/fira-sans@5/files";

/// Characters that would let a name escape its CSS string or the `<style>` element.
const FORBIDDEN_NAME_CHARS: [char; 7] = ['\'', '"', '{', '}', ';', '<', '>'];

/// Errors raised while resolving a font resource.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// The family name is blank.
    #[error("font family name is empty")]
    EmptyFamily,

    /// No weights were requested.
    #[error("font `{family}` requests no weights")]
    NoWeights { family: String },

    /// A requested weight is outside the variable axis of the family.
    #[error("font `{family}` does not offer weight {weight}")]
    UnsupportedWeight { family: String, weight: u16 },

    /// No character subsets were requested.
    #[error("font `{family}` requests no subsets")]
    NoSubsets { family: String },

    /// A family or fallback name contains characters that break out of CSS.
    #[error("invalid font name `{0}`: quotes, braces, semicolons and angle brackets are not allowed")]
    InvalidName(String),

    /// The CSS variable name is not a custom property.
    #[error("invalid CSS variable name `{0}`: expected `--` followed by [a-z0-9-]")]
    InvalidVariable(String),
}

/// How the page behaves while the font is still loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontDisplay {
    Auto,
    Block,
    /// Render with the fallback immediately, swap when the face is ready.
    #[default]
    Swap,
    Fallback,
    Optional,
}

impl FontDisplay {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Block => "block",
            Self::Swap => "swap",
            Self::Fallback => "fallback",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for FontDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Character range restriction for a font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSubset {
    Latin,
    LatinExt,
    Greek,
    Cyrillic,
}

impl FontSubset {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latin => "latin",
            Self::LatinExt => "latin-ext",
            Self::Greek => "greek",
            Self::Cyrillic => "cyrillic",
        }
    }

    /// `unicode-range` descriptor for the subset.
    #[must_use]
    pub fn unicode_range(self) -> &'static str {
        match self {
            Self::Latin => {
                "U+0000-00FF, U+0131, U+0152-0153, U+02BB-02BC, U+02C6, U+02DA, U+02DC, U+0304, \
                 U+0308, U+0329, U+2000-206F, U+20AC, U+2122, U+2191, U+2193, U+2212, U+2215, \
                 U+FEFF, U+FFFD"
            }
            Self::LatinExt => {
                "U+0100-02BA, U+02BD-02C5, U+02C7-02CC, U+02CE-02D7, U+02DD-02FF, U+0304, U+0308, \
                 U+0329, U+1D00-1DBF, U+1E00-1E9F, U+1EF2-1EFF, U+2020, U+20A0-20AB, \
                 U+20AD-20C0, U+2113, U+2C60-2C7F, U+A720-A7FF"
            }
            Self::Greek => "U+0370-0377, U+037A-037F, U+0384-038A, U+038C, U+038E-03A1, U+03A3-03FF",
            Self::Cyrillic => "U+0301, U+0400-045F, U+0490-0491, U+04B0-04B1, U+2116",
        }
    }
}

/// Descriptor of a font the page wants to use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontResource {
    family: String,
    weights: Vec<u16>,
    subsets: Vec<FontSubset>,
    variable: String,
    display: FontDisplay,
    fallback: String,
}

impl FontResource {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            weights: Vec::new(),
            subsets: Vec::new(),
            variable: String::new(),
            display: FontDisplay::default(),
            fallback: "Arial".to_string(),
        }
    }

    #[must_use]
    pub fn weights(mut self, weights: impl IntoIterator<Item = u16>) -> Self {
        self.weights = weights.into_iter().collect();
        self
    }

    #[must_use]
    pub fn subsets(mut self, subsets: impl IntoIterator<Item = FontSubset>) -> Self {
        self.subsets = subsets.into_iter().collect();
        self
    }

    #[must_use]
    pub fn variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    #[must_use]
    pub fn display(mut self, display: FontDisplay) -> Self {
        self.display = display;
        self
    }

    /// Local face used until the real one is ready.
    #[must_use]
    pub fn fallback(mut self, local_family: impl Into<String>) -> Self {
        self.fallback = local_family.into();
        self
    }

    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    #[must_use]
    pub fn variable_name(&self) -> &str {
        &self.variable
    }

    #[must_use]
    pub fn display_policy(&self) -> FontDisplay {
        self.display
    }

    fn validate(&self) -> Result<(), FontError> {
        if self.family.trim().is_empty() {
            return Err(FontError::EmptyFamily);
        }
        for name in [&self.family, &self.fallback] {
            if name.trim().is_empty() || name.contains(FORBIDDEN_NAME_CHARS) {
                return Err(FontError::InvalidName(name.clone()));
            }
        }
        if self.weights.is_empty() {
            return Err(FontError::NoWeights {
                family: self.family.clone(),
            });
        }
        if let Some(&weight) = self
            .weights
            .iter()
            .find(|w| !(100..=900).contains(*w) || **w % 100 != 0)
        {
            return Err(FontError::UnsupportedWeight {
                family: self.family.clone(),
                weight,
            });
        }
        if self.subsets.is_empty() {
            return Err(FontError::NoSubsets {
                family: self.family.clone(),
            });
        }
        let valid_variable = self.variable.len() > 2
            && self.variable.starts_with("--")
            && self.variable[2..]
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
        if !valid_variable {
            return Err(FontError::InvalidVariable(self.variable.clone()));
        }
        Ok(())
    }

    /// Stable short id derived from the descriptor.
    fn fingerprint(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        format!("{:06x}", hasher.finish() & 0x00ff_ffff)
    }

    /// Lowercase, dash separated family name used in file names.
    fn slug(&self) -> String {
        self.family
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// The Fira Sans resource used by the shell.
#[must_use]
pub fn fira_sans() -> FontResource {
    FontResource::new("Fira Sans")
        .weights([400, 700])
        .subsets([FontSubset::Latin])
        .variable("--font-fira-sans")
        .display(FontDisplay::Swap)
}

/// A font resolved for use at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedFont {
    /// Family name as declared in `@font-face`.
    pub family: String,
    /// Class that applies the font family and defines the CSS variable.
    pub class_name: String,
    /// Class that only defines the CSS variable.
    pub variable_class_name: String,
    /// CSS variable name, e.g. `--font-fira-sans`.
    pub variable: String,
    pub display: FontDisplay,
    /// `@font-face` rules and class rules.
    #[serde(skip)]
    pub stylesheet: String,
}

impl LoadedFont {
    /// `font-family` value: the real face first, then its fallback.
    #[must_use]
    pub fn font_stack(&self) -> String {
        format!("'{0}', '{0} Fallback'", self.family)
    }
}

/// Resolves font resources into class names and stylesheets.
pub trait FontLoader: Send + Sync + fmt::Debug {
    fn load(&self, resource: &FontResource) -> Result<LoadedFont, FontError>;

    /// Loader name for logging.
    fn loader_name(&self) -> &'static str;
}

/// Loader for font files served under a base URL.
///
/// The base is either the application's own `/static/fonts` directory or a
/// mirror such as [`DEFAULT_FONT_BASE_URL`]. Files are expected at
/// `{base_url}/{slug}-{subset}-{weight}-normal.woff2`. A missing file is not an
/// error: the browser keeps the fallback face.
#[derive(Debug, Clone)]
pub struct UrlFontLoader {
    base_url: String,
}

impl UrlFontLoader {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for UrlFontLoader {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_BASE_URL)
    }
}

impl FontLoader for UrlFontLoader {
    fn load(&self, resource: &FontResource) -> Result<LoadedFont, FontError> {
        resource.validate()?;

        let id = resource.fingerprint();
        let family = resource.family.trim().to_string();
        let slug = resource.slug();
        let class_name = format!("__className_{id}");
        let variable_class_name = format!("__variable_{id}");
        let stack = format!("'{family}', '{family} Fallback'");

        let mut css = String::new();
        for subset in &resource.subsets {
            for weight in &resource.weights {
                let _ = writeln!(
                    css,
                    "@font-face{{font-family:'{family}';font-style:normal;font-weight:{weight};\
                     font-display:{display};src:url({base}/{slug}-{subset}-{weight}-normal.woff2) \
                     format('woff2');unicode-range:{range};}}",
                    display = resource.display,
                    base = self.base_url,
                    subset = subset.as_str(),
                    range = subset.unicode_range(),
                );
            }
        }
        let _ = writeln!(
            css,
            "@font-face{{font-family:'{family} Fallback';src:local(\"{fallback}\");}}",
            fallback = resource.fallback,
        );
        let _ = writeln!(
            css,
            ".{class_name}{{font-family:{stack};font-style:normal;{var}:{stack};}}",
            var = resource.variable,
        );
        let _ = writeln!(
            css,
            ".{variable_class_name}{{{var}:{stack};}}",
            var = resource.variable,
        );

        tracing::info!(
            name: "font.loaded",
            family = %family,
            class_name = %class_name,
            display = %resource.display,
            loader = self.loader_name(),
            "Font resource resolved"
        );

        Ok(LoadedFont {
            family,
            class_name,
            variable_class_name,
            variable: resource.variable.clone(),
            display: resource.display,
            stylesheet: css,
        })
    }

    fn loader_name(&self) -> &'static str {
        "url"
    }
}
