mod app;
mod cli;
mod config;
mod event;
mod site;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use config::SiteConfig;
use site::SiteData;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = SiteConfig::load();
    init_tracing(config.debug);

    let site = SiteData::load(&config).await;
    let mut app = App::new(site, config.site_dir.display().to_string());

    // Pipes and CI get the report instead of the UI
    if args.headless || !is_terminal() {
        return event::run_headless(&app, args.json);
    }

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app);
    terminal::cleanup_terminal_state(true, true);

    result
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked by `--debug`.
fn init_tracing(debug: bool) {
    let default = if debug {
        "world_archive_tui=debug,world_archive_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
