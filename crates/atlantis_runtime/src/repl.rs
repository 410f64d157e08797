//! The interactive orders REPL.
//!
//! Each line typed is parsed as one order. The recognized order is echoed
//! back, or the parse error is shown. Lines starting with `:` are REPL
//! commands.

use crate::config::OutputFormat;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::render::{describe_error, order_line, render_orders};
use crate::session::Session;
use atlantis_foundation::{Error, Result};
use atlantis_orders::RecordedOrder;
use std::io::{self, Write};

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Orders entered so far.
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

/// What a line asked the REPL to do.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Quit,
    List,
    Json,
    Clear,
    Unknown(String),
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        let name = input.strip_prefix(':')?.trim();
        Some(match name {
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            "orders" | "list" => Self::List,
            "json" => Self::Json,
            "clear" => Self::Clear,
            other => Self::Unknown(other.to_string()),
        })
    }
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: Session::default(),
            show_banner: true,
            prompt: "orders> ".to_string(),
        }
    }

    /// Sets the session for this REPL.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let input = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }
        self.editor.add_history(&input);

        if let Some(command) = Command::parse(trimmed) {
            return Ok(self.run_command(command));
        }

        let (orders, result) = self.eval(&input);
        for order in &orders {
            println!("\x1b[1m{}\x1b[0m", order_line(order));
        }
        if let Err(e) = result {
            self.print_error(&e);
        }
        Ok(true)
    }

    /// Parses one order line.
    ///
    /// Returns the orders the line recorded together with the parse
    /// result. A deprecated order is both recorded and reported.
    pub fn eval(&mut self, input: &str) -> (Vec<RecordedOrder>, Result<()>) {
        let before = self.session.orders().len();
        let result = self.session.order_line(input).map(|_| ());
        (self.session.orders()[before..].to_vec(), result)
    }

    /// Runs a `:` command. Returns `false` to exit.
    fn run_command(&mut self, command: Command) -> bool {
        match command {
            Command::Help => self.print_help(),
            Command::Quit => return false,
            Command::List => self.print_orders(OutputFormat::Text),
            Command::Json => self.print_orders(OutputFormat::Json),
            Command::Clear => {
                self.session.clear();
                println!("Cleared.");
            }
            Command::Unknown(name) => {
                eprintln!("\x1b[31mUnknown command :{name}. Type :help for a list.\x1b[0m");
            }
        }
        true
    }

    fn print_orders(&self, format: OutputFormat) {
        match render_orders(self.session.orders(), format) {
            Ok(text) => print!("{text}"),
            Err(e) => self.print_error(&e),
        }
        let _ = io::stdout().flush();
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        let color = if error.is_fatal() { "31" } else { "33" };
        eprintln!("\x1b[{color}m{}\x1b[0m", describe_error(error));
    }

    #[allow(clippy::unused_self)]
    fn print_help(&self) {
        println!(
            "Type an order line, for example \x1b[1mgive 12 5 silv\x1b[0m.

  :help     Show this help
  :orders   List the orders entered so far
  :json     Print the orders entered so far as JSON
  :clear    Forget the orders entered so far
  :quit     Leave the REPL (or press Ctrl+D)"
        );
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mAtlantis orders REPL v{}\x1b[0m", env!("CARGO_PKG_VERSION"));
        println!("Type orders to check them. Use :help for commands, Ctrl+D to exit.\n");

        let _ = io::stdout().flush();
    }
}
