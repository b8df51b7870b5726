//! Stacks CLI
//!
//! Runs one Stacks command against a JSON registry file and the JSON data
//! directory, prints the response, and writes live stack sizes back to the
//! registry file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stacks::core::ItemId;
use stacks::perms::{Actor, GrantTable};
use stacks::store::JsonStore;
use stacks::{dispatch, Config, FileRegistry, Messages, StackController};

#[derive(Parser)]
#[command(name = "stacks")]
#[command(about = "Manage per-item maximum stack sizes")]
#[command(version)]
struct Cli {
    /// Data directory holding the persisted index and interchange file
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// JSON registry file listing item types
    #[arg(long, default_value = "registry.json")]
    registry: PathBuf,

    /// Config file (default: <data-dir>/Stacks.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Id of the invoking actor
    #[arg(long, default_value = stacks::perms::CONSOLE_ID)]
    actor: String,

    /// Treat the actor as a host administrator
    #[arg(long)]
    admin: bool,

    /// Item the actor is holding
    #[arg(long)]
    held: Option<String>,

    /// JSON file of permission grants (actor id -> permissions)
    #[arg(long)]
    grants: Option<PathBuf>,

    /// JSON language file overriding message templates
    #[arg(long)]
    lang: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Command name: stack, stcat, stimport, stexport
    command: String,

    /// Command arguments
    args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.data_dir.join("Stacks.json"));
    let existing = Config::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    init_tracing(cli.verbose || existing.as_ref().is_some_and(|config| config.options.debug));
    let config = Config::init(&config_path, existing)
        .with_context(|| format!("writing config {}", config_path.display()))?;

    let registry = open_registry(&cli)?;

    let store = JsonStore::open(&cli.data_dir)
        .with_context(|| format!("opening data directory {}", cli.data_dir.display()))?;

    let grants = match &cli.grants {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading grants {}", path.display()))?;
            GrantTable::from_json(&raw)
                .with_context(|| format!("parsing grants {}", path.display()))?
        }
        None => GrantTable::new(),
    };

    let messages = match &cli.lang {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading language file {}", path.display()))?;
            Messages::with_overrides_json(&raw)
                .with_context(|| format!("parsing language file {}", path.display()))?
        }
        None => Messages::default(),
    };

    let actor = if cli.actor == stacks::perms::CONSOLE_ID {
        Actor::console()
    } else if cli.admin {
        Actor::admin(cli.actor.clone())
    } else {
        Actor::player(cli.actor.clone())
    };

    let mut controller = StackController::start(registry, store, grants, config);

    match dispatch(&mut controller, &actor, &cli.command, &cli.args) {
        Some(response) => println!("{}", messages.render(&response)),
        None => anyhow::bail!("unknown command: {}", cli.command),
    }

    let (registry, _, _) = controller.shutdown().context("saving item index")?;
    registry.save().context("saving registry")?;

    Ok(())
}

/// Load the registry file and record the actor's held item, as given.
fn open_registry(cli: &Cli) -> Result<FileRegistry> {
    let mut registry = FileRegistry::open(&cli.registry)
        .with_context(|| format!("loading registry {}", cli.registry.display()))?;
    if let Some(held) = &cli.held {
        registry.hold(cli.actor.clone(), ItemId::new(held.as_str()));
    }
    Ok(registry)
}

fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_env("STACKS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if debug {
            "stacks=debug,stacks_core=debug,stacks_store=debug,info"
        } else {
            "stacks=info,warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
