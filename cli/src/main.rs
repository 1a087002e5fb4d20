use anyhow::Result;
use clap::{Parser, Subcommand};
use skillset_core::{Category, Editor};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod init;
mod ui;

use commands::Context;
use init::InitOptions;

#[derive(Parser)]
#[command(name = "skills")]
#[command(version, about = "Install curated AI coding skills and agents into your project", long_about = None)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use a local catalog archive (.tar.gz) instead of downloading one
    #[arg(long, global = true, env = "SKILLS_CATALOG_ARCHIVE", value_name = "FILE")]
    archive: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up skills, agents and editor files for this project
    Init {
        /// Target editor (claude, cursor, copilot, antigravity)
        #[arg(long)]
        editor: Option<Editor>,
        /// Skill preset (nextjs, react, node, full)
        #[arg(long)]
        preset: Option<String>,
        /// Accept defaults without prompting
        #[arg(short, long)]
        yes: bool,
        /// Skip the agent memory directory
        #[arg(long)]
        no_memory: bool,
    },
    /// List catalog items, or the ones installed locally
    List {
        #[arg(long)]
        local: bool,
        /// List agents instead of skills
        #[arg(long)]
        agents: bool,
    },
    /// Add a skill (or agent) to the project
    Add {
        id: String,
        #[arg(long)]
        agent: bool,
    },
    /// Remove a skill (or agent) from the project
    Remove {
        id: String,
        #[arg(long)]
        agent: bool,
    },
}

fn category(agent: bool) -> Category {
    if agent {
        Category::Agents
    } else {
        Category::Skills
    }
}

fn init_tracing(verbose: bool) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = Context {
        project_root: std::env::current_dir()?,
        archive: cli.archive,
    };

    match cli.command {
        Commands::Init {
            editor,
            preset,
            yes,
            no_memory,
        } => {
            init::run_init(
                &ctx,
                InitOptions {
                    editor,
                    preset,
                    yes,
                    no_memory,
                },
            )
            .await
        }
        Commands::List { local, agents } => commands::list(&ctx, local, category(agents)).await,
        Commands::Add { id, agent } => commands::add(&ctx, &id, category(agent)).await,
        Commands::Remove { id, agent } => commands::remove(&ctx, &id, category(agent)),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        error::report(&e);
        std::process::exit(1);
    }
}
