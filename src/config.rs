use std::path::Path;

use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::font::DEFAULT_FONT_BASE_URL;
use crate::ui::provider::RenderMode;

/// Config file picked up from the working directory when none is given.
const CWD_CONFIG_FILE: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory served under /static
    #[arg(long)]
    pub static_dir: Option<String>,

    /// Declare an HTML-only runtime. Startup fails with this flag set, since
    /// the theme provider needs the interactive runtime.
    #[arg(long)]
    pub static_only: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub render: RenderConfig,
    pub fonts: FontsConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RenderConfig {
    pub interactive: bool,
    pub client_bundle: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FontsConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub json: bool,
}

impl RenderConfig {
    #[must_use]
    pub fn mode(&self) -> RenderMode {
        if self.interactive {
            RenderMode::Interactive
        } else {
            RenderMode::Static
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Layered load. Priority: CLI flag > CLI env var > `DEVIES_` env > config file > defaults.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.static_dir", "static")?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("render.interactive", true)?
            .set_default("render.client_bundle", "/static/main.js")?
            .set_default("fonts.base_url", DEFAULT_FONT_BASE_URL)?
            .set_default("telemetry.json", false)?;

        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        } else if Path::new(CWD_CONFIG_FILE).exists() {
            builder = builder.add_source(File::new(CWD_CONFIG_FILE, FileFormat::Yaml));
        }

        // E.g. DEVIES_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("DEVIES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(dir) = cli.static_dir {
            builder = builder.set_override("server.static_dir", dir)?;
        }
        if cli.static_only {
            builder = builder.set_override("render.interactive", false)?;
        }
        if cli.json_logs {
            builder = builder.set_override("telemetry.json", true)?;
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_mode_follows_interactive_flag() {
        let mut render = RenderConfig {
            interactive: true,
            client_bundle: None,
        };
        assert_eq!(render.mode(), RenderMode::Interactive);
        render.interactive = false;
        assert_eq!(render.mode(), RenderMode::Static);
    }

    #[test]
    fn unknown_flag_is_a_config_error() {
        let err = AppConfig::load_from_args(["devies-gpt", "--no-such-flag"]).unwrap_err();
        assert!(matches!(err, config::ConfigError::Message(_)));
    }
}
