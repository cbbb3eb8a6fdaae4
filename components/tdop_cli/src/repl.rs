//! REPL (Read-Eval-Print Loop) implementation

use crate::driver::{format_tokens, Driver};
use crate::error::{CliError, CliResult};
use core_types::{ErrorKind, ParseError};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Run the interactive REPL
///
/// Each complete entry is parsed on its own with a fresh scope.
///
/// # Arguments
/// * `driver` - The Driver used for parsing and rendering
///
/// # Returns
/// `Ok(())` when REPL exits normally
pub fn run_repl(driver: &Driver) -> CliResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Repl(format!("Failed to initialize editor: {}", e)))?;

    println!("TDOP parser v{}", env!("CARGO_PKG_VERSION"));
    println!("Type statements to see their tree, or 'exit' to quit.");
    println!();

    let mut line_buffer = String::new();
    let mut in_multiline = false;

    loop {
        let prompt = if in_multiline { "... " } else { "> " };

        match editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if !in_multiline && (trimmed == "exit" || trimmed == ".exit" || trimmed == "quit") {
                    println!("Goodbye!");
                    break;
                }

                if !in_multiline && trimmed.starts_with('.') {
                    handle_repl_command(trimmed, driver);
                    continue;
                }

                if in_multiline {
                    line_buffer.push('\n');
                }
                line_buffer.push_str(&line);

                if !is_input_complete(&line_buffer) {
                    in_multiline = true;
                    continue;
                }

                match driver.process(&line_buffer) {
                    Ok(output) => {
                        if !output.is_empty() {
                            println!("{}", output);
                        }
                    }
                    Err(CliError::Parse(e)) if needs_more_input(&e) => {
                        in_multiline = true;
                        continue;
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }

                let _ = editor.add_history_entry(&line_buffer);
                line_buffer.clear();
                in_multiline = false;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C
                if in_multiline {
                    println!("^C");
                    line_buffer.clear();
                    in_multiline = false;
                } else {
                    println!("Press Ctrl-D or type 'exit' to quit");
                }
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                return Err(CliError::Repl(format!("Readline error: {}", err)));
            }
        }
    }

    Ok(())
}

/// Handle special REPL commands
fn handle_repl_command(command: &str, driver: &Driver) {
    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };
    match name {
        ".help" => {
            println!("REPL Commands:");
            println!("  .help          - Show this help message");
            println!("  .clear         - Clear the screen");
            println!("  .tokens <code> - List the lexemes of <code>");
            println!("  .format        - Show the output format");
            println!("  .exit          - Exit the REPL");
            println!("  exit           - Exit the REPL");
            println!("  quit           - Exit the REPL");
        }
        ".clear" => {
            print!("\x1B[2J\x1B[1;1H");
        }
        ".tokens" => {
            print!("{}", format_tokens(argument));
        }
        ".format" => {
            println!(
                "Output format: {}",
                if driver.is_json_enabled() {
                    "json"
                } else {
                    "s-expression"
                }
            );
        }
        _ => {
            println!("Unknown command: {}", command);
            println!("Type .help for available commands");
        }
    }
}

/// Check if the input appears to be complete
///
/// Balanced braces, brackets and parens outside string literals
fn is_input_complete(input: &str) -> bool {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }
        if in_string {
            match c {
                '\\' => escape_next = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth -= 1,
            _ => {}
        }
    }

    depth <= 0 && !in_string
}

/// A parse that failed at the end sentinel was cut short, not malformed
fn needs_more_input(error: &ParseError) -> bool {
    error.text == tdop_parser::rules::END
        && matches!(
            error.kind,
            ErrorKind::ExpectedSpelling | ErrorKind::UndefinedPrefixUse
        )
}
