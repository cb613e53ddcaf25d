mod cli;
mod repl;

use std::{path::{Path, PathBuf}, sync::Once, time::Instant};

use clap::{Parser, Subcommand};
use cli::{print_failed, print_finished, print_running, report};
use minilang_core::{
    environment::prelude::Environment,
    lexer::prelude::tokenize,
    runner::{parse_source, read_source, run_source},
    utils::prelude::Error
};

#[derive(Parser)]
#[command(name = "minilang", version, about = "Interpreter for the MiniLang scripting language")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Executes a source file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Do not print status lines
        #[arg(short, long, default_value_t = false)]
        quiet: bool,
    },
    /// Starts the interactive prompt (default)
    Repl,
    /// Prints the token stream of a source file
    Tokens {
        /// Path of source file
        path: PathBuf,
    },
    /// Prints the parsed program of a source file
    Ast {
        /// Path of source file
        path: PathBuf,
        /// Print the syntax tree instead of source form
        #[arg(long, default_value_t = false)]
        debug: bool,
    },
}

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() {
    init_tracing();

    let code = match Args::parse().command.unwrap_or(Command::Repl) {
        Command::Run { path, quiet } => run_file(&path, quiet),
        Command::Repl => match repl::start() {
            Ok(()) => 0,
            Err(err) => report(&Error::from(err)),
        },
        Command::Tokens { path } => print_tokens(&path),
        Command::Ast { path, debug } => print_ast(&path, debug),
    };

    std::process::exit(code);
}

fn run_file(path: &Path, quiet: bool) -> i32 {
    if !quiet {
        print_running(&path.display().to_string());
    }

    let start = Instant::now();

    let result = read_source(path).and_then(|src| {
        let stdout = std::io::stdout();
        run_source(path, &src, &Environment::global(), stdout.lock())
    });

    match result {
        Ok(()) => {
            if !quiet {
                print_finished(start.elapsed());
            }

            0
        },
        Err(err) => {
            let code = report(&err);

            if !quiet {
                print_failed(start.elapsed());
            }

            code
        }
    }
}

fn print_tokens(path: &Path) -> i32 {
    let result = read_source(path).and_then(|src| {
        tokenize(&src).map_err(|error| Error::Lex {
            path: path.to_path_buf(),
            src: src.clone(),
            error
        })
    });

    match result {
        Ok(tokens) => {
            for token in tokens {
                println!("{token}");
            }

            0
        },
        Err(err) => report(&err)
    }
}

fn print_ast(path: &Path, debug: bool) -> i32 {
    let result = read_source(path).and_then(|src| parse_source(path, &src));

    match result {
        Ok(program) if debug => {
            println!("{program:#?}");
            0
        },
        Ok(program) => {
            println!("{program}");
            0
        },
        Err(err) => report(&err)
    }
}
