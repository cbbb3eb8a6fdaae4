//! TDOP parser CLI
//!
//! Entry point for the `tdop` binary. Parses CLI arguments, installs the
//! logger and delegates to the Driver.

use clap::Parser as ClapParser;
use tdop_cli::{Cli, CliError, Driver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let driver = Driver::new()
        .with_json(cli.json)
        .with_print_tokens(cli.tokens);

    let result = if let Some(file) = &cli.file {
        driver.process_file(file)
    } else if let Some(code) = &cli.eval {
        driver.process(code)
    } else if cli.repl {
        driver.repl()?;
        return Ok(());
    } else {
        println!("TDOP parser v{}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Usage:");
        println!("  tdop --file <FILE>     Parse a source file");
        println!("  tdop --eval <CODE>     Parse inline source text");
        println!("  tdop --repl            Start interactive REPL");
        println!();
        println!("Run 'tdop --help' for more options.");
        return Ok(());
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(CliError::Io(e)) => {
            let file = cli.file.as_deref().unwrap_or_default();
            eprintln!("Error: Could not read file '{}': {}", file, e);
            std::process::exit(1);
        }
        Err(CliError::Parse(e)) => {
            eprintln!("Syntax Error: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
