//! Devies GPT page shell
//!
//! Server-rendered root layout for the Devies GPT chat client: global font,
//! theme, provider wiring and the HTTP service that serves them.
//!
//! # Architecture
//!
//! - **Theme**: font tokens per role, merged over the base theme
//! - **Fonts**: variable font descriptor resolved to class names and `@font-face` CSS
//! - **UI**: explicit-theme components, the theme provider and the root shell
//! - **Server**: Axum router serving the shell, health check and static assets
//!
//! # Modules
//!
//! - [`theme`]: Theme definition and merge
//! - [`font`]: Font resources and the URL font loader
//! - [`metadata`]: Page title and description
//! - [`ui`]: Composition, provider and shell
//! - [`server`]: HTTP routes

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod config;
pub mod error;
pub mod font;
pub mod metadata;
pub mod server;
pub mod telemetry;
pub mod theme;
pub mod ui;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::ShellError;
use crate::font::UrlFontLoader;
use crate::theme::devies_theme;
use crate::ui::provider::RuntimeCapabilities;
use crate::ui::shell::{RootShell, ShellOptions};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Root shell, built once at startup.
    pub shell: Arc<RootShell>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the theme, resolve the font and register the shell for the
    /// configured render mode.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, ShellError> {
        let loader = UrlFontLoader::new(config.fonts.base_url.clone());
        let capabilities = RuntimeCapabilities::new(config.render.mode());
        let shell = RootShell::build(
            Arc::new(devies_theme()),
            &loader,
            &capabilities,
            ShellOptions {
                client_bundle: config.render.client_bundle.clone(),
            },
        )?;

        Ok(Self {
            shell: Arc::new(shell),
            config,
        })
    }
}
