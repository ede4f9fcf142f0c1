mod commands;

use std::process::ExitCode;

use clap::Parser;

use cmdchain::chain::dispatcher::ChainDispatcher;
use cmdchain::chain::registry::ChainRegistry;
use cmdchain::config_file::ConfigError;
use cmdchain::console::app::Console;
use cmdchain::console::lifecycle::{CommandListener, dispatch};
use cmdchain::console::output::StdoutOutput;
use cmdchain::load_config;

#[derive(Parser, Debug)]
#[command(name = "cmdchain", about = "Console command runner with configurable command chains")]
struct Cli {
    /// Path to config file (auto-detected if not specified)
    #[arg(short, long)]
    config: Option<String>,

    /// Log file path (logs go to stderr if not specified)
    #[arg(long)]
    log_file: Option<String>,

    /// Name of the command to run (lists available commands if omitted)
    command: Option<String>,

    /// Arguments passed through to the command
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_file = match &cli.log_file {
        Some(path) => Some(std::fs::File::create(path)?),
        None => None,
    };
    cmdchain::logger::init(log_file);

    let registry = match load_config(cli.config.as_deref()) {
        Ok((registry, _)) => registry,
        // No config file anywhere just means no chains are configured
        Err(ConfigError::ConfigNotFound(_)) if cli.config.is_none() => ChainRegistry::default(),
        Err(e) => return Err(e.into()),
    };

    let mut console = Console::new();
    commands::register_all(&mut console);

    let Some(name) = cli.command else {
        print_commands(&console, &registry);
        return Ok(ExitCode::SUCCESS);
    };

    let mut dispatcher = ChainDispatcher::new(registry);
    let mut output = StdoutOutput::default();
    let mut listeners: [&mut dyn CommandListener; 1] = [&mut dispatcher];
    dispatch(&console, &mut listeners, &name, &cli.args, &mut output)?;

    Ok(ExitCode::SUCCESS)
}

fn print_commands(console: &Console, registry: &ChainRegistry) {
    println!("Available commands:");
    for command in console.commands() {
        println!("  {:<16} {}", command.name(), command.description());
    }
    if !registry.is_empty() {
        println!();
        println!("Configured chains:");
        for (master, members) in registry.chains() {
            println!("  {master} -> {}", members.join(", "));
        }
    }
}
