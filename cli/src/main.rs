//! Command-line entry point (§5, §6 of the specification): reads a source
//! file and runs it through the lexer, parser, and interpreter in order,
//! optionally stopping early at an intermediate stage.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Stage {
    Lexer,
    Parser,
    Execution,
}

/// The Timon interpreter.
#[derive(Debug, Parser)]
#[command(name = "timon", version, about, long_about = None)]
struct Args {
    /// Path to the Timon source file.
    source: PathBuf,

    /// Which pipeline stage to run and report, truncating after it.
    #[arg(long = "stage", value_enum, default_value_t = Stage::Execution)]
    stage: Stage,

    /// Logging level for diagnostics written to stderr.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(source: &str, stage: Stage) -> timon_errors::Result<()> {
    if stage == Stage::Lexer {
        let tokens = timon_parser::tokenize_all(source)?;
        for (token, span) in &tokens {
            match timon_parser::payload(token) {
                Some(payload) => {
                    println!("{} {} {payload}", span.start, timon_parser::kind_name(token))
                }
                None => println!("{} {}", span.start, timon_parser::kind_name(token)),
            }
        }
        return Ok(());
    }

    let program = timon_parser::parse_program(source)?;

    if stage == Stage::Parser {
        println!("{}", timon_ast::program_tree(&program));
        return Ok(());
    }

    let mut stdout = io::stdout();
    timon_interpreter::run(&program, &mut stdout)
}

const EXIT_IO_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let source = match fs::read_to_string(&args.source) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("could not read '{}': {err}", args.source.display());
            return ExitCode::from(EXIT_IO_FAILURE);
        }
    };

    match run(&source, args.stage) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "timon run failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
