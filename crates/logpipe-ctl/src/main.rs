//! `logpipe-ctl`: render logging pipelines into fluentd configuration.
//!
//! ```text
//! logpipe-ctl render pipeline.yaml --secrets-dir /etc/logpipe/secrets > fluent.conf
//! logpipe-ctl plugin s3-output.yaml --set pattern=nginx
//! logpipe-ctl templates --template-dir ./templates
//! ```

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use logpipe_render::SecretErrorMode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "logpipe-ctl",
    version,
    about = "Render logging pipelines into log-agent configuration",
    styles = output::clap_styles()
)]
pub(crate) struct Cli {
    /// Config file (default: ./.logpipe.toml, then ~/.config/logpipe.toml)
    #[arg(long, global = true, env = "LOGPIPE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Render a whole pipeline document (input, filters, outputs)
    Render {
        /// Pipeline document (YAML or JSON)
        pipeline: PathBuf,

        #[command(flatten)]
        options: RenderOptions,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Config)]
        format: OutputFormat,
    },

    /// Render a single plugin document
    Plugin {
        /// Plugin document (YAML or JSON)
        plugin: PathBuf,

        #[command(flatten)]
        options: RenderOptions,

        /// Base context entry, repeatable (e.g. --set pattern=nginx)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        set: Vec<(String, String)>,
    },

    /// List the plugin types templates are available for
    Templates {
        /// Extra template directory, searched before the builtins (repeatable)
        #[arg(long = "template-dir", value_name = "DIR")]
        template_dirs: Vec<String>,
    },
}

/// Overrides for the loaded configuration.
#[derive(Debug, Clone, Args)]
pub(crate) struct RenderOptions {
    /// Namespace secret lookups are scoped to
    #[arg(long, env = "LOGPIPE_NAMESPACE")]
    pub namespace: Option<String>,

    /// Root of the directory-backed secret store
    #[arg(long, env = "LOGPIPE_SECRETS_DIR")]
    pub secrets_dir: Option<String>,

    /// Extra template directory, searched before the builtins (repeatable)
    #[arg(long = "template-dir", value_name = "DIR")]
    pub template_dirs: Vec<String>,

    /// What to do when a secret lookup fails: degrade, default or fail
    #[arg(long)]
    pub on_secret_error: Option<SecretErrorMode>,

    /// Value substituted when --on-secret-error=default
    #[arg(long)]
    pub secret_default: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// fluentd configuration text
    Config,
    /// Rendered sections as JSON
    Json,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("logpipe=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
