use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "burnline", version, about = "Braille cost chart and session status line")]
struct Cli {
    /// Usage log to read (JSON lines); stdin when omitted
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Config file to use instead of ~/.config/burnline/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Draw the chart without color escapes
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full status line: chart, session start and today's cost
    Line {
        /// Print the report as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Chart only
    Chart,
    /// Current session start (RFC 3339), empty when there is none
    Session,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("BURNLINE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = commands::GlobalOpts {
        input: cli.input,
        config: cli.config,
        plain: cli.plain,
    };

    let result = match cli.command.unwrap_or(Commands::Line { json: false }) {
        Commands::Line { json } => commands::line::run_line(&opts, json),
        Commands::Chart => commands::line::run_chart(&opts),
        Commands::Session => commands::line::run_session(&opts),
        Commands::Config { action } => commands::config::run(&opts, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
