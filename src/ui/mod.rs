//! Page composition.
//!
//! Server-side rendering of the application shell. Components receive the
//! theme as an explicit argument rather than looking it up from an ambient
//! context.
//!
//! # Structure
//!
//! - [`markup`]: Component trait, escaping and basic nodes
//! - [`components`]: Themed building blocks
//! - [`provider`]: Theme provider and render-mode registration
//! - [`shell`]: Root document scaffold
//! - [`pages`]: Page bodies mounted inside the shell

pub mod components;
pub mod markup;
pub mod pages;
pub mod provider;
pub mod shell;
