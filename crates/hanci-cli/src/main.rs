//! hanci CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hanci", version, about = "Chinese vocabulary flashcard trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Review the words that are due
    Review {
        /// Path to the word database file
        file: PathBuf,

        /// Review mode: "passive"/"p" shows the hanzi first, "active"/"a"
        /// asks you to produce it
        #[arg(short, long, default_value = "passive")]
        mode: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Dictionary file (overrides the configured one)
        #[arg(long)]
        dictionary: Option<PathBuf>,

        /// Shuffle seed for a reproducible session order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List every word with its due date
    List {
        /// Path to the word database file
        file: PathBuf,

        /// Which mode's due dates to show
        #[arg(short, long, default_value = "passive")]
        mode: String,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Create a starter word list and config
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hanci_core=info".parse().unwrap())
                .add_directive("hanci_dict=info".parse().unwrap())
                .add_directive("hanci_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Review {
            file,
            mode,
            config,
            dictionary,
            seed,
        } => commands::review::execute(file, mode, config, dictionary, seed),
        Commands::List { file, mode, format } => commands::list::execute(file, mode, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
