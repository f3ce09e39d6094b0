mod cli;
mod repl;
mod rlpl;
mod rppl;

use clap::{Args, Parser, Subcommand};
use calc_core::utils::prelude::{Warning, WarningEmitterIO};

#[derive(Parser)]
#[command(about = "Interactive integer calculator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluates lines against a store kept for the whole session (default)
    Repl(ReplArgs),
    /// Runs Read Lex Print Loop
    Lex,
    /// Runs Read Parse Print Loop
    Parse {
        /// Print ast instead of parsed source code
        #[arg(long, default_value_t = false)]
        ast: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ReplArgs {
    /// Reject lines longer than this many characters
    #[arg(long, default_value_t = repl::MAX_CODE_LENGTH)]
    max_length: usize,
    /// Fail a `while` loop after this many iterations
    #[arg(long)]
    loop_limit: Option<usize>,
    /// Print the variable store after every evaluated line
    #[arg(long, default_value_t = false)]
    show_store: bool,
    /// Print how long each line took
    #[arg(long, default_value_t = false)]
    timings: bool,
}

impl Default for ReplArgs {
    fn default() -> Self {
        Self {
            max_length: repl::MAX_CODE_LENGTH,
            loop_limit: None,
            show_store: false,
            timings: false,
        }
    }
}

fn main() {
    let result = match Cli::parse().command {
        Some(Command::Repl(args)) => repl::start(&args),
        None => repl::start(&ReplArgs::default()),
        Some(Command::Lex) => rlpl::start(),
        Some(Command::Parse { ast }) => rppl::start(ast),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleWarningEmitter;

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        let buffer_writer = crate::cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        warning.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing warning to stderr");
    }
}
