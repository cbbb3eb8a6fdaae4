//! Command-line arguments

use clap::{ArgAction, Parser};

/// Parse JS-like source with a top-down operator precedence parser and
/// print the resulting syntax tree
#[derive(Debug, Clone, Parser)]
#[command(name = "tdop", version, about)]
pub struct Cli {
    /// Source file to parse
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<String>,

    /// Parse inline source text
    #[arg(short, long, value_name = "CODE", conflicts_with = "file")]
    pub eval: Option<String>,

    /// Start interactive REPL
    #[arg(short, long)]
    pub repl: bool,

    /// Print the tree as JSON instead of an S-expression
    #[arg(long)]
    pub json: bool,

    /// Print the lexeme stream before parsing
    #[arg(long)]
    pub tokens: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Arguments for parsing a single file with default output
    pub fn with_file(file: String) -> Self {
        Self {
            file: Some(file),
            eval: None,
            repl: false,
            json: false,
            tokens: false,
            verbose: 0,
        }
    }

    /// Default `env_logger` filter for the requested verbosity;
    /// `RUST_LOG` takes precedence
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
