//! sitesearch - Entry Point

use clap::Parser;
use sitesearch::view::{ColorConfig, CommandOpener, RecordSelection, UiOptions};
use std::path::PathBuf;
use tracing::info;

/// sitesearch - search a static site's content corpus from the terminal
#[derive(Parser, Debug)]
#[command(name = "sitesearch")]
#[command(version)]
#[command(about = "Keyboard-driven search modal for static site content")]
pub struct Args {
    /// Path to the search corpus JSON (`-` reads from stdin)
    pub corpus: Option<PathBuf>,

    /// Start with this query typed in
    #[arg(short, long)]
    pub query: Option<String>,

    /// Open the search modal on startup
    #[arg(long)]
    pub open: bool,

    /// Base URL prepended to result slugs
    #[arg(long)]
    pub base_url: Option<String>,

    /// Command used to open activated results (e.g. `xdg-open`)
    #[arg(long)]
    pub open_command: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = sitesearch::config::load_config_with_precedence(args.config.clone())?;
        let merged = sitesearch::config::merge_config(config_file);
        let with_env = sitesearch::config::apply_env_overrides(merged);
        let start_open_override = if args.open { Some(true) } else { None };

        sitesearch::config::apply_cli_overrides(
            with_env,
            args.corpus.clone(),
            args.base_url.clone(),
            args.open_command.clone(),
            start_open_override,
        )
    };

    let _guard = sitesearch::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let source = sitesearch::source::CorpusSource::from_path(&config.corpus_path);
    let corpus = sitesearch::source::load_corpus(&source);

    let options = UiOptions {
        initial_query: args.query.clone(),
        start_open: config.start_open,
        color: ColorConfig::from_env_and_args(args.no_color),
    };

    let opener = config
        .open_command
        .as_deref()
        .and_then(|command| CommandOpener::parse(command, config.base_url.clone()));

    match opener {
        Some(opener) => {
            let opener = sitesearch::view::run_search(corpus, options, opener)?;
            info!(launched = opener.launched(), "Exiting");
        }
        None => {
            let selection = sitesearch::view::run_search(
                corpus,
                options,
                RecordSelection::new(config.base_url.clone()),
            )?;
            for link in selection.links() {
                println!("{link}");
            }
        }
    }

    Ok(())
}
