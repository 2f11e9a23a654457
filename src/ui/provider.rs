//! Theme provider and render-mode registration.
//!
//! The provider hands its theme to every descendant explicitly. It also
//! declares that it needs an interactive runtime; that requirement is checked
//! when the composition is registered against the runtime's capabilities, so
//! a mismatch fails at startup rather than degrading at render time.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::theme::ThemeConfig;
use crate::ui::markup::Component;

/// How a page is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// HTML only, no client bundle.
    Static,
    /// HTML plus the client bundle that subscribes to runtime state.
    Interactive,
}

impl RenderMode {
    /// Whether a runtime in this mode can host a composition requiring `required`.
    #[must_use]
    pub fn supports(self, required: RenderMode) -> bool {
        match self {
            Self::Interactive => true,
            Self::Static => required == Self::Static,
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => f.write_str("static"),
            Self::Interactive => f.write_str("interactive"),
        }
    }
}

/// Registration failures.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("composition `{name}` requires {required} rendering but the runtime only supports {available}")]
    UnsupportedMode {
        name: &'static str,
        required: RenderMode,
        available: RenderMode,
    },
}

/// A unit of page composition with an execution-mode requirement.
pub trait Composition {
    fn name(&self) -> &'static str;

    fn required_mode(&self) -> RenderMode {
        RenderMode::Static
    }
}

/// What the hosting runtime can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeCapabilities {
    mode: RenderMode,
}

impl RuntimeCapabilities {
    #[must_use]
    pub fn new(mode: RenderMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Check a composition's requirement against this runtime.
    pub fn register<C: Composition>(&self, composition: C) -> Result<Registered<C>, RegistrationError> {
        let required = composition.required_mode();
        if !self.mode.supports(required) {
            return Err(RegistrationError::UnsupportedMode {
                name: composition.name(),
                required,
                available: self.mode,
            });
        }

        tracing::debug!(
            name: "composition.registered",
            composition = composition.name(),
            required = %required,
            runtime = %self.mode,
            "Composition registered"
        );

        Ok(Registered {
            inner: composition,
            mode: self.mode,
        })
    }
}

/// A composition that passed registration.
#[derive(Debug, Clone)]
pub struct Registered<C> {
    inner: C,
    mode: RenderMode,
}

impl<C> Registered<C> {
    /// Mode of the runtime it was registered with.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }
}

impl<C> Deref for Registered<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}

/// Supplies a theme to a subtree.
#[derive(Debug, Clone)]
pub struct ThemeProvider {
    theme: Arc<ThemeConfig>,
}

impl ThemeProvider {
    #[must_use]
    pub fn new(theme: Arc<ThemeConfig>) -> Self {
        Self { theme }
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    /// Emit the theme's CSS variables, then render `children` with the theme.
    pub fn render(&self, children: &dyn Component, out: &mut String) {
        out.push_str("<style data-theme-provider>");
        out.push_str(&self.theme.css_variables());
        out.push_str("</style>");
        children.render(&self.theme, out);
    }
}

impl Composition for ThemeProvider {
    fn name(&self) -> &'static str {
        "theme-provider"
    }

    fn required_mode(&self) -> RenderMode {
        RenderMode::Interactive
    }
}
