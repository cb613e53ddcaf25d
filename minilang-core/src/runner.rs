use std::{cell::RefCell, fs::File, io::{BufReader, Write}, path::{Path, PathBuf}, rc::Rc};

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::Environment,
    eval::prelude::Interpreter,
    lexer::prelude::tokenize,
    parser::prelude::{parse, Program},
    utils::prelude::Error
};

/// Reads a whole source file, decoding it as UTF-8 while streaming.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, Error> {
    let file = File::open(path.as_ref())?;
    let capacity = file.metadata().map(|meta| meta.len() as usize).unwrap_or_default();

    let mut src = String::with_capacity(capacity);
    let mut reader = BufReader::new(file);

    for ch in reader.chars() {
        src.push(ch?);
    }

    tracing::debug!(path = %path.as_ref().display(), bytes = src.len(), "read source");

    Ok(src)
}

/// Lexes and parses `src`, tagging failures with `path` for diagnostics.
pub fn parse_source(path: impl Into<PathBuf>, src: &str) -> Result<Program, Error> {
    let path = path.into();

    let tokens = tokenize(src).map_err(|error| Error::Lex {
        path: path.clone(),
        src: src.to_string(),
        error
    })?;

    parse(tokens).map_err(|error| Error::Parse {
        path,
        src: src.to_string(),
        error
    })
}

/// Runs `src` against `env`, writing `print` output to `out`.
///
/// Bindings made before a runtime error stay in `env`, as do any lines
/// already written to `out`.
pub fn run_source<W: Write>(
    path: impl Into<PathBuf>,
    src: &str,
    env: &Rc<RefCell<Environment>>,
    out: W
) -> Result<(), Error> {
    let path = path.into();
    let program = parse_source(path.clone(), src)?;

    let mut interpreter = Interpreter::new(out);

    interpreter.run(&program, env).map_err(|error| Error::Runtime {
        path,
        src: src.to_string(),
        error
    })
}
