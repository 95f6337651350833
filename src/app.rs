use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Commands, MappingCommands};
use crate::commands;
use crate::db::Database;
use crate::git::Git;

pub struct AppContext {
    git: Git,
    db: Database,
}

impl AppContext {
    fn build(cli: &Cli) -> Result<Self> {
        let git = Git::discover()?;
        let db_path = match &cli.global.db {
            Some(path) => path.clone(),
            None => git.git_dir()?.join("open-in-git-host.db"),
        };
        debug!(root = %git.root().display(), db = %db_path.display(), "opened repository");
        let db = Database::open(&db_path)?;
        Ok(Self { git, db })
    }
}

pub fn run() -> Result<()> {
    // Dialoguer Ctrl-C workaround from console-rs/dialoguer#294.
    // We keep SIGINT handler no-op and recover cursor state on prompt errors.
    ctrlc::set_handler(|| {
        // Intentionally no-op: let dialoguer return an interrupted error.
    })
    .context("failed to install Ctrl-C handler")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    dispatch(&cli)
}

fn dispatch(cli: &Cli) -> Result<()> {
    let porcelain = cli.global.porcelain;
    let yes = cli.global.yes;

    match &cli.command {
        Commands::Hosts => return commands::hosts::run(porcelain),
        Commands::Completions(args) => return commands::completions::run(args.shell),
        Commands::Url(_) | Commands::Mapping(_) => {}
    }

    let ctx = AppContext::build(cli)?;
    match &cli.command {
        Commands::Url(args) => commands::url::run(&ctx.db, &ctx.git, args, porcelain),
        Commands::Mapping(MappingCommands::Add(args)) => {
            commands::mapping::add(&ctx.db, &ctx.git, args, porcelain)
        }
        Commands::Mapping(MappingCommands::Infer(args)) => {
            commands::mapping::infer(&ctx.db, &ctx.git, args, porcelain)
        }
        Commands::Mapping(MappingCommands::List) => commands::mapping::list(&ctx.db, porcelain),
        Commands::Mapping(MappingCommands::Remove(args)) => {
            commands::mapping::remove(&ctx.db, &ctx.git, args.base_dir.as_deref(), porcelain, yes)
        }
        Commands::Hosts | Commands::Completions(_) => Ok(()),
    }
}
