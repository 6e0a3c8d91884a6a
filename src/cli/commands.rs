use std::env;
use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::client::{GeminiBackend, SearchClient};
use crate::config::AppConfig;
use crate::i18n::Language;
use crate::session::SearchSession;
use crate::tui;

#[derive(Parser)]
#[command(name = "memoria-explorer")]
#[command(version = "0.1.0")]
#[command(about = "Search Spanish historical memory archives", long_about = None)]
pub struct Cli {
    /// Interface and response language: "es" or "en". Defaults to $LANG,
    /// then Spanish.
    #[arg(long)]
    pub language: Option<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let language = resolve_language(cli.language.as_deref());
    let config = AppConfig::from_env(language)?;

    let backend = GeminiBackend::new(config)?;
    let client = SearchClient::new(Arc::new(backend));
    let session = SearchSession::new(client, language);

    tui::run_interactive(session)
}

/// Log to stderr, filtered by RUST_LOG. Silent by default so log lines
/// never bleed into the TUI.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

fn resolve_language(flag: Option<&str>) -> Language {
    flag.and_then(Language::parse)
        .or_else(|| env::var("LANG").ok().as_deref().and_then(Language::parse))
        .unwrap_or(Language::Spanish)
}
