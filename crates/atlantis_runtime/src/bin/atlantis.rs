//! Atlantis CLI entry point.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use atlantis_foundation::Result;
use atlantis_runtime::render::{describe_error, render_session};
use atlantis_runtime::{OutputFormat, Repl, RuntimeConfig, Session};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Turn report and orders parser for Atlantis.
#[derive(Parser)]
#[command(name = "atlantis", version, about = "Turn report and orders parser for Atlantis")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true)]
    log: Option<String>,

    /// Stop at the first bad order line
    #[arg(long, global = true)]
    strict: bool,

    /// Include raw report lines in the output
    #[arg(long, global = true)]
    lines: bool,

    /// Debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a turn report
    Report {
        /// Path to the report file
        file: PathBuf,
        /// Also parse the orders template at the end of the report
        #[arg(long)]
        with_template: bool,
    },

    /// Parse an orders file
    Orders {
        /// Path to the orders file
        file: PathBuf,
    },

    /// Check orders interactively
    Repl,
}

impl Cli {
    fn config(&self) -> RuntimeConfig {
        let config = if self.verbose {
            RuntimeConfig::verbose()
        } else if self.quiet {
            RuntimeConfig::quiet()
        } else {
            RuntimeConfig::default()
        };
        let config = match &self.log {
            Some(filter) => config.with_log_filter(filter.clone()),
            None => config,
        };
        let show_lines = self.lines || config.show_lines;
        config
            .with_output(self.output)
            .with_strict(self.strict)
            .with_lines(show_lines)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31m{}\x1b[0m", describe_error(&e));
            ExitCode::FAILURE
        }
    }
}

/// Returns `false` if any order line was rejected.
fn run(cli: &Cli) -> Result<bool> {
    let config = cli.config();
    config.validate()?;
    init_tracing(&config.log_filter);

    let mut session = Session::new(config);
    match &cli.command {
        Commands::Report {
            file,
            with_template,
        } => session.load_report(file, *with_template)?,
        Commands::Orders { file } => session.load_orders(file)?,
        Commands::Repl => {
            let mut repl = Repl::new()?.with_session(session);
            repl.run()?;
            return Ok(true);
        }
    }

    print!("{}", render_session(&session, cli.output)?);
    for err in session.errors() {
        eprintln!("{}", describe_error(err));
    }
    Ok(!session.has_fatal_errors())
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}
