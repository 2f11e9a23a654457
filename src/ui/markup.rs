//! Minimal HTML composition primitives.
//!
//! Every [`Component`] receives the theme explicitly when it renders. There is
//! no ambient theme lookup: a component rendered outside a
//! [`ThemeProvider`](crate::ui::provider::ThemeProvider) is handed the base
//! theme by [`render_standalone`].

use crate::theme::ThemeConfig;

/// Something that can write itself as HTML.
pub trait Component: Send + Sync {
    /// Append this component's HTML to `out`.
    fn render(&self, theme: &ThemeConfig, out: &mut String);

    fn render_to_string(&self, theme: &ThemeConfig) -> String {
        let mut out = String::new();
        self.render(theme, &mut out);
        out
    }
}

/// Plain strings render as escaped text nodes.
impl Component for str {
    fn render(&self, _theme: &ThemeConfig, out: &mut String) {
        push_escaped(out, self, false);
    }
}

impl Component for String {
    fn render(&self, theme: &ThemeConfig, out: &mut String) {
        self.as_str().render(theme, out);
    }
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn render(&self, theme: &ThemeConfig, out: &mut String) {
        (**self).render(theme, out);
    }
}

impl<C: Component + ?Sized> Component for &C {
    fn render(&self, theme: &ThemeConfig, out: &mut String) {
        (**self).render(theme, out);
    }
}

/// Trusted, pre-rendered HTML. Written out verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw(pub String);

impl Component for Raw {
    fn render(&self, _theme: &ThemeConfig, out: &mut String) {
        out.push_str(&self.0);
    }
}

/// Sequence of sibling components.
#[derive(Default)]
pub struct Fragment(Vec<Box<dyn Component>>);

impl Fragment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn child(mut self, child: impl Component + 'static) -> Self {
        self.0.push(Box::new(child));
        self
    }
}

impl std::fmt::Debug for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fragment")
            .field("children", &self.0.len())
            .finish()
    }
}

impl Component for Fragment {
    fn render(&self, theme: &ThemeConfig, out: &mut String) {
        for child in &self.0 {
            child.render(theme, out);
        }
    }
}

/// Render a component with the base theme, as if no provider were mounted.
pub fn render_standalone(component: &dyn Component) -> String {
    component.render_to_string(&ThemeConfig::base())
}

/// Escape text content (`&`, `<`, `>`).
#[must_use]
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    push_escaped(&mut out, value, false);
    out
}

/// Escape an attribute value (text escapes plus both quote kinds).
#[must_use]
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    push_escaped(&mut out, value, true);
    out
}

fn push_escaped(out: &mut String, value: &str, quotes: bool) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            '\'' if quotes => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_escaped_raw_is_not() {
        let theme = ThemeConfig::base();
        assert_eq!("<b>".render_to_string(&theme), "&lt;b&gt;");
        assert_eq!(Raw("<b>".into()).render_to_string(&theme), "<b>");
    }

    #[test]
    fn fragment_renders_children_in_order() {
        let fragment = Fragment::new()
            .child("a & b")
            .child(Raw("<hr>".into()))
            .child(String::from("c"));
        assert_eq!(render_standalone(&fragment), "a &amp; b<hr>c");
    }

    #[test]
    fn attribute_escaping_covers_quotes() {
        assert_eq!(escape_attr(r#"a"b'c"#), "a&quot;b&#x27;c");
        assert_eq!(escape_text(r#"a"b"#), r#"a"b"#);
    }
}
