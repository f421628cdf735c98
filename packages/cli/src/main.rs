mod commands;
mod config;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use commands::{generate, init, GenerateArgs, InitArgs};
use tracing_subscriber::EnvFilter;

/// Panelgen CLI - TypeScript declarations from host object snapshots
#[derive(Parser, Debug)]
#[command(name = "panelgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a starter panelgen.config.json
    Init(InitArgs),

    /// Generate declarations from a snapshot file or directory
    Generate(GenerateArgs),
}

fn init_tracing(verbose: u8) {
    // RUST_LOG applies unless -v asks for something explicit
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Generate(args) => generate(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "panelgen", "-vv", "generate", "window.json", "--global", "panel", "--out", "panel.d.ts",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.global.as_deref(), Some("panel"));
                assert_eq!(args.out.as_deref(), Some(std::path::Path::new("panel.d.ts")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_out_conflicts_with_out_dir() {
        let result = Cli::try_parse_from([
            "panelgen", "generate", "snapshots", "--out", "a.d.ts", "--out-dir", "types",
        ]);
        assert!(result.is_err());
    }
}
