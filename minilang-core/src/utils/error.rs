use std::{io, path::{Path, PathBuf}};

use termcolor::{Buffer, WriteColor};
use thiserror::Error;

use crate::{
    eval::prelude::RuntimeError,
    lexer::prelude::LexicalError,
    parser::prelude::ParseError,
    utils::prelude::SrcSpan
};
use super::diagnostic::{Diagnostic, Label, Location, Severity};

/// Any failure of the pipeline, with enough context to render a diagnostic.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to tokenize source code")]
    Lex {
        path: PathBuf,
        src: String,
        error: LexicalError
    },
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("program failed at runtime")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("IO operation failed")]
    StdIo {
        err: io::ErrorKind
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::StdIo { err: err.kind() }
    }
}

impl Error {
    /// Process exit status for this kind of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Lex { .. } | Error::Parse { .. } => 65,
            Error::Runtime { .. } => 70,
            Error::StdIo { .. } => 74,
        }
    }

    /// The `[line L:C] message` form of the wrapped error.
    pub fn summary(&self) -> String {
        match self {
            Error::Lex { error, .. } => error.to_string(),
            Error::Parse { error, .. } => error.to_string(),
            Error::Runtime { error, .. } => error.to_string(),
            Error::StdIo { err } => format!("{self}: {err}"),
        }
    }

    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();

        match self.pretty(&mut nocolor) {
            Ok(()) => String::from_utf8_lossy(nocolor.as_slice()).into_owned(),
            Err(_) => self.summary()
        }
    }

    pub fn pretty(&self, buf: &mut impl WriteColor) -> io::Result<()> {
        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf)?;
            writeln!(buf)?;
        }

        Ok(())
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Lex { path, src, error } => {
                let (label, extra) = error.details();

                vec![spanned("Lexical error", extra.join("\n"), path, src, label, error.location)]
            },
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();

                vec![spanned("Syntax error", extra.join("\n"), path, src, label, error.location)]
            },
            Error::Runtime { path, src, error } => {
                let (title, label) = error.details();

                vec![spanned(title, String::new(), path, src, label, error.location)]
            },
            Error::StdIo { err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    severity: Severity::Error,
                    location: None,
                }]
            }
        }
    }
}

fn spanned<'a>(
    title: &str,
    text: String,
    path: &Path,
    src: &'a str,
    label: String,
    span: SrcSpan
) -> Diagnostic<'a> {
    let end = (src.len() as u32).min(span.end);
    let start = span.start.min(end);

    Diagnostic {
        title: title.into(),
        text,
        severity: Severity::Error,
        location: Some(Location {
            src,
            path: path.to_path_buf(),
            label: Label {
                text: Some(label),
                span: SrcSpan { start, end, ..span },
            },
        }),
    }
}
