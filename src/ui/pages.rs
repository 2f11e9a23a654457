//! Page bodies mounted inside the root shell.

use crate::ui::components::{Heading, HeadingLevel, Text, TextTone};
use crate::ui::markup::{Fragment, Raw};

/// Landing page: title, tagline and the mount point for the chat client.
#[must_use]
pub fn chat_page() -> Fragment {
    Fragment::new()
        .child(Heading::new("Devies GPT").level(HeadingLevel::H1))
        .child(Text::new("Ask me anything about Devies.").tone(TextTone::Muted))
        .child(Raw(
            "<main id=\"chat-root\" class=\"flex flex-col h-full\"></main>".to_string(),
        ))
}

/// Body for unknown paths.
#[must_use]
pub fn not_found_page() -> Fragment {
    Fragment::new()
        .child(Heading::new("404").level(HeadingLevel::H1))
        .child(Text::new("Page not found").tone(TextTone::Muted))
        .child(Raw("<a href=\"/\" class=\"text-sm text-white\">Go home</a>".to_string()))
}
