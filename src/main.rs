//! crxgen - Chrome extension scaffolding
//!
//! Collects answers about an extension, synthesizes its manifest and writes
//! the project skeleton.

use clap::{Args, Parser, Subcommand};
use crxgen::commands;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "crxgen")]
#[command(author, version, about = "Generate Chrome extension projects")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default ~/.crxgen/config.toml
    Init,

    /// Generate a new extension project
    New {
        /// Target directory
        dir: PathBuf,

        #[command(flatten)]
        answers: AnswerArgs,

        /// Generate a Sass stylesheet instead of plain CSS
        #[arg(long)]
        compass: bool,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Print the synthesized manifest fields without writing files
    Preview {
        #[command(flatten)]
        answers: AnswerArgs,

        /// Output the full manifest configuration as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct AnswerArgs {
    /// Extension name
    #[arg(short, long)]
    name: Option<String>,

    /// Extension description
    #[arg(short, long)]
    description: Option<String>,

    /// UI action: none, browser, or page
    #[arg(short, long)]
    action: Option<String>,

    /// UI feature: options, contentscript, omnibox (repeatable)
    #[arg(long = "ui")]
    ui_features: Vec<String>,

    /// Permission: tabs, bookmarks, cookies, history, management (repeatable)
    #[arg(short, long = "permission")]
    permissions: Vec<String>,

    /// Read answers from a .toml or .json file
    #[arg(long = "answers")]
    answers_file: Option<PathBuf>,
}

impl From<AnswerArgs> for commands::AnswerInput {
    fn from(args: AnswerArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            action: args.action,
            ui_features: args.ui_features,
            permissions: args.permissions,
            answers_file: args.answers_file,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    match cli.command {
        Commands::Init => {
            commands::init()?;
        }
        Commands::New {
            dir,
            answers,
            compass,
            force,
        } => {
            commands::new_project(&dir, &answers.into(), compass, force)?;
        }
        Commands::Preview { answers, json } => {
            let format = if json {
                commands::OutputFormat::Json
            } else {
                commands::OutputFormat::Fragment
            };
            commands::preview(&answers.into(), format)?;
        }
    }

    Ok(())
}
