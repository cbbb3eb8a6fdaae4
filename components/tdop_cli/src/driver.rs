//! Parse orchestration for the CLI
//!
//! The Driver owns one [`Parser`] and turns source text into printable
//! output: an optional lexeme listing followed by the tree rendered as an
//! S-expression or JSON.

use crate::error::CliResult;
use log::info;
use tdop_parser::{tokenize, Node, Parser};

/// Main driver that runs the parser over files and strings
pub struct Driver {
    parser: Parser,
    /// Whether to render trees as JSON
    json: bool,
    /// Whether to list lexemes before the tree
    print_tokens: bool,
}

impl Driver {
    /// Create a driver for the standard grammar
    ///
    /// # Example
    /// ```
    /// use tdop_cli::Driver;
    ///
    /// let driver = Driver::new();
    /// assert_eq!(driver.process("x = 1;").unwrap(), "(= x 1)");
    /// ```
    pub fn new() -> Self {
        Self::with_parser(Parser::new())
    }

    /// Create a driver around an already configured parser
    pub fn with_parser(parser: Parser) -> Self {
        Self {
            parser,
            json: false,
            print_tokens: false,
        }
    }

    /// Enable JSON output
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Enable the lexeme listing
    pub fn with_print_tokens(mut self, enabled: bool) -> Self {
        self.print_tokens = enabled;
        self
    }

    /// Check if JSON output is enabled
    pub fn is_json_enabled(&self) -> bool {
        self.json
    }

    /// Check if the lexeme listing is enabled
    pub fn is_print_tokens_enabled(&self) -> bool {
        self.print_tokens
    }

    /// Parse a source file
    ///
    /// # Errors
    /// Returns `CliError` if the file cannot be read or does not parse
    ///
    /// # Example
    /// ```no_run
    /// use tdop_cli::Driver;
    ///
    /// let tree = Driver::new().parse_file("program.js").unwrap();
    /// ```
    pub fn parse_file(&self, path: &str) -> CliResult<Option<Node>> {
        let source = std::fs::read_to_string(path)?;
        info!("parsing {} ({} bytes)", path, source.len());
        self.parse_string(&source)
    }

    /// Parse source text
    pub fn parse_string(&self, source: &str) -> CliResult<Option<Node>> {
        Ok(self.parser.parse_str(source)?)
    }

    /// Render a parse result in the configured format.
    ///
    /// An empty program renders as an empty string, or `null` in JSON.
    pub fn render(&self, tree: Option<&Node>) -> CliResult<String> {
        if self.json {
            return Ok(serde_json::to_string_pretty(&tree)?);
        }
        Ok(tree.map(Node::to_string).unwrap_or_default())
    }

    /// Parse source text and produce the full printable output
    pub fn process(&self, source: &str) -> CliResult<String> {
        let mut output = String::new();
        if self.print_tokens {
            output.push_str(&format_tokens(source));
        }
        let tree = self.parse_string(source)?;
        output.push_str(&self.render(tree.as_ref())?);
        Ok(output)
    }

    /// Read a file and produce the full printable output
    pub fn process_file(&self, path: &str) -> CliResult<String> {
        let source = std::fs::read_to_string(path)?;
        info!("parsing {} ({} bytes)", path, source.len());
        self.process(&source)
    }

    /// Start the REPL (Read-Eval-Print Loop)
    ///
    /// # Example
    /// ```no_run
    /// use tdop_cli::Driver;
    ///
    /// Driver::new().repl().unwrap();
    /// ```
    pub fn repl(&self) -> CliResult<()> {
        crate::repl::run_repl(self)
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per lexeme: position, kind and text
pub fn format_tokens(source: &str) -> String {
    let mut listing = String::new();
    for lexeme in tokenize(source) {
        listing.push_str(&format!(
            "{:<8} {:<12} {}\n",
            lexeme.position.to_string(),
            format!("{:?}", lexeme.kind),
            lexeme.text
        ));
    }
    listing
}
