//! Root document shell.

use std::sync::Arc;

use crate::error::ShellError;
use crate::font::{FontLoader, LoadedFont, fira_sans};
use crate::metadata::{METADATA, PageMetadata};
use crate::theme::ThemeConfig;
use crate::ui::markup::{Component, escape_attr};
use crate::ui::provider::{Registered, RenderMode, RuntimeCapabilities, ThemeProvider};

/// Background of the page container.
pub const PAGE_BACKGROUND: &str = "rgb(38, 38, 41)";

/// Utility classes used by the shell markup.
const LAYOUT_STYLES: &str = "html,body{margin:0}\
.h-full{height:100%}\
.flex{display:flex}\
.flex-col{flex-direction:column}\
@media (min-width:768px){.md\\:p-8{padding:2rem}}";

/// Shell construction options.
#[derive(Debug, Clone, Default)]
pub struct ShellOptions {
    /// Client bundle referenced from the head. Required in interactive mode.
    pub client_bundle: Option<String>,
}

/// Top-level page scaffold.
///
/// Built once at startup; [`RootShell::render`] is pure and can be called for
/// every request.
#[derive(Debug, Clone)]
pub struct RootShell {
    metadata: PageMetadata,
    font: LoadedFont,
    provider: Registered<ThemeProvider>,
    client_bundle: Option<String>,
}

impl RootShell {
    /// Resolve the font and register the theme provider against the runtime.
    ///
    /// An interactive runtime must be given a non-blank client bundle.
    pub fn build(
        theme: Arc<ThemeConfig>,
        loader: &dyn FontLoader,
        capabilities: &RuntimeCapabilities,
        options: ShellOptions,
    ) -> Result<Self, ShellError> {
        let font = loader.load(&fira_sans())?;
        let provider = capabilities.register(ThemeProvider::new(theme))?;
        let client_bundle = options
            .client_bundle
            .filter(|bundle| !bundle.trim().is_empty());
        if provider.mode() == RenderMode::Interactive && client_bundle.is_none() {
            return Err(ShellError::MissingClientBundle);
        }

        Ok(Self {
            metadata: METADATA,
            font,
            provider,
            client_bundle,
        })
    }

    #[must_use]
    pub fn metadata(&self) -> &PageMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn font(&self) -> &LoadedFont {
        &self.font
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeConfig {
        self.provider.theme()
    }

    /// Render the full document around `children`.
    pub fn render(&self, children: &dyn Component) -> String {
        let class = escape_attr(&format!("{} h-full", self.font.class_name));
        let mut out = String::with_capacity(4096);

        out.push_str("<!DOCTYPE html>\n");
        out.push_str(&format!("<html lang=\"en\" class=\"{class}\">\n"));
        out.push_str("<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        out.push_str(&self.metadata.head_tags());
        out.push('\n');
        out.push_str("<style data-font>");
        out.push_str(&self.font.stylesheet);
        out.push_str("</style>\n");
        out.push_str("<style data-layout>");
        out.push_str(LAYOUT_STYLES);
        out.push_str("</style>\n");
        if let Some(bundle) = &self.client_bundle {
            out.push_str(&format!(
                "<script type=\"module\" src=\"{}\"></script>\n",
                escape_attr(bundle)
            ));
        }
        out.push_str("</head>\n");
        out.push_str(&format!("<body class=\"{class}\">\n"));
        self.provider.render(&PageContainer { children }, &mut out);
        out.push_str("\n</body>\n</html>\n");

        tracing::debug!(name: "shell.rendered", bytes = out.len(), "Root shell rendered");
        out
    }
}

/// Full-height flex column holding the page content.
struct PageContainer<'a> {
    children: &'a dyn Component,
}

impl Component for PageContainer<'_> {
    fn render(&self, theme: &ThemeConfig, out: &mut String) {
        out.push_str(&format!(
            "<div class=\"flex flex-col h-full md:p-8\" style=\"background: {PAGE_BACKGROUND}\">"
        ));
        self.children.render(theme, out);
        out.push_str("</div>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::UrlFontLoader;
    use crate::theme::devies_theme;
    use crate::ui::markup::Raw;

    fn shell(mode: RenderMode) -> Result<RootShell, ShellError> {
        RootShell::build(
            Arc::new(devies_theme()),
            &UrlFontLoader::default(),
            &RuntimeCapabilities::new(mode),
            ShellOptions {
                client_bundle: Some("/static/main.js".to_string()),
            },
        )
    }

    #[test]
    fn hello_scenario() {
        let shell = shell(RenderMode::Interactive).unwrap();
        let html = shell.render(&"Hello");
        let class = format!("class=\"{} h-full\"", shell.font().class_name);

        let html_tag = format!("<html lang=\"en\" {class}>");
        let body_tag = format!("<body {class}>");
        assert!(html.contains(&html_tag));
        assert!(html.contains(&body_tag));
        assert!(html.contains(
            "<div class=\"flex flex-col h-full md:p-8\" style=\"background: rgb(38, 38, 41)\">Hello</div>"
        ));

        // container sits inside the body, after the provider's theme variables
        let body_at = html.find(&body_tag).unwrap();
        let vars_at = html.find("<style data-theme-provider>").unwrap();
        let container_at = html.find("<div class=\"flex flex-col").unwrap();
        assert!(body_at < vars_at && vars_at < container_at);
        assert!(html.trim_end().ends_with("</body>\n</html>"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let shell = shell(RenderMode::Interactive).unwrap();
        let children = Raw("<section id=\"chat\"></section>".into());
        assert_eq!(shell.render(&children), shell.render(&children));

        let rebuilt = self::shell(RenderMode::Interactive).unwrap();
        assert_eq!(shell.render(&children), rebuilt.render(&children));
    }

    #[test]
    fn metadata_does_not_depend_on_children() {
        let shell = shell(RenderMode::Interactive).unwrap();
        for children in ["", "Hello", "<title>spoof</title>"] {
            let html = shell.render(&children);
            assert!(html.contains("<title>Devies GPT</title>"));
            assert!(html.contains("<meta name=\"description\" content=\"Chatbot for Devies\">"));
        }
        assert_eq!(shell.metadata(), &METADATA);
    }

    #[test]
    fn head_carries_font_swap_and_client_bundle() {
        let html = shell(RenderMode::Interactive).unwrap().render(&"x");
        assert!(html.contains("font-display:swap"));
        assert!(html.contains("<script type=\"module\" src=\"/static/main.js\"></script>"));
        assert!(html.contains(".md\\:p-8{padding:2rem}"));
    }

    #[test]
    fn interactive_runtime_requires_a_client_bundle() {
        for client_bundle in [None, Some("  ".to_string())] {
            let err = RootShell::build(
                Arc::new(devies_theme()),
                &UrlFontLoader::default(),
                &RuntimeCapabilities::new(RenderMode::Interactive),
                ShellOptions { client_bundle },
            )
            .unwrap_err();
            assert!(matches!(err, ShellError::MissingClientBundle));
        }

        let err = RootShell::build(
            Arc::new(devies_theme()),
            &UrlFontLoader::default(),
            &RuntimeCapabilities::new(RenderMode::Interactive),
            ShellOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ShellError::MissingClientBundle));
    }

    #[test]
    fn static_runtime_cannot_host_the_shell() {
        let err = shell(RenderMode::Static).unwrap_err();
        assert!(matches!(err, ShellError::Registration(_)));
    }
}
