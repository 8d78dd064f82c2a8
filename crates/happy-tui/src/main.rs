// ABOUTME: Entry point for the happy-thoughts application.
// ABOUTME: Parses CLI args and launches TUI or runs subcommands.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use happy_client::{HttpThoughtsApi, LikeAction, ThoughtStore, ThoughtsApi};
use happy_tui::cli::{self, Cli, Command, ConfigAction};
use happy_tui::config::{Config, Overrides};

fn main() {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it logs to a file
    if cli.command.is_none() {
        happy_log::init_file("happy-thoughts");
    } else {
        happy_log::init();
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Commands that need no config
    match &cli.command {
        Some(Command::Version) => {
            println!("happy-thoughts {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(Command::Completion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "happy-thoughts", &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    // Load config with CLI overrides
    let config = Config::load(&Overrides {
        api_url: cli.api_url.as_deref(),
        session: cli.session.as_deref(),
    })
    .context("Error loading config")?;

    tracing::debug!(?config, "Loaded configuration");

    let mut stdout = std::io::stdout();
    match cli.command {
        Some(Command::List(args)) => {
            let mut store = open_store(&config)?;
            block_on(cli::list::run(
                &mut store,
                args.filter(),
                args.json,
                &mut stdout,
            ))?;
        }
        Some(Command::Post { message }) => {
            let mut store = open_store(&config)?;
            block_on(cli::post::run(&mut store, &message, &mut stdout))?;
        }
        Some(Command::Like { id, unlike }) => {
            let action = if unlike {
                LikeAction::Unlike
            } else {
                LikeAction::Like
            };
            let mut store = open_store(&config)?;
            block_on(cli::like::run(&mut store, &id, action, &mut stdout))?;
        }
        Some(Command::Config { action }) => handle_config_command(action, &config)?,
        Some(Command::Session { action }) => {
            cli::session::run(action, &config.session, &mut stdout)?;
        }
        Some(Command::Version) | Some(Command::Completion { .. }) => {}
        None => {
            block_on(happy_tui::run::run_tui(&config))?;
        }
    }
    Ok(())
}

fn open_store(config: &Config) -> anyhow::Result<ThoughtStore> {
    let api: Arc<dyn ThoughtsApi> = Arc::new(
        HttpThoughtsApi::new(&config.api.base_url, config.api.timeout())
            .context("Failed to create API client")?,
    );
    Ok(ThoughtStore::restore(api, config.session.open_storage()))
}

fn block_on<F, T, E>(future: F) -> anyhow::Result<T>
where
    F: Future<Output = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    Ok(rt.block_on(future)?)
}

fn handle_config_command(action: Option<ConfigAction>, config: &Config) -> anyhow::Result<()> {
    match action {
        Some(ConfigAction::Path) => {
            println!("{}", Config::config_path()?.display());
        }
        Some(ConfigAction::Show) | None => {
            let content = toml::to_string_pretty(config).context("Failed to render config")?;
            print!("{}", content);
        }
    }
    Ok(())
}
