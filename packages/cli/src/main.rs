mod commands;
mod config;
mod manifest;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{attributes, generate, init, AttributesArgs, GenerateArgs, InitArgs};
use tracing_subscriber::EnvFilter;

/// Propforge CLI - observable properties and concrete types for C#
#[derive(Parser, Debug)]
#[command(name = "propforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log generator decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Propforge project
    Init(InitArgs),

    /// Generate sources from declaration manifests
    Generate(GenerateArgs),

    /// Print or write the marker attribute source
    Attributes(AttributesArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Generate(args) => generate(args, &cwd),
        Command::Attributes(args) => attributes(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
