//! Themed UI components.
//!
//! Components read their fonts from the [`ThemeConfig`](crate::theme::ThemeConfig)
//! they are rendered with.
//!
//! # Components
//!
//! - [`Heading`]: Title text in the heading font
//! - [`Text`]: Paragraph in the body font

mod heading;
mod text;

pub use heading::{Heading, HeadingLevel};
pub use text::{Text, TextTone};
