use std::io;

use crate::{environment::prelude::Environment, runner::{parse_source, run_source}};

use super::prelude::*;

fn runtime_error(src: &str) -> Error {
    run_source("test.ml", src, &Environment::global(), io::sink()).unwrap_err()
}

#[test]
fn test_lex_error_diagnostic() {
    let err = parse_source("test.ml", "print @;").unwrap_err();

    assert!(matches!(err, Error::Lex { .. }));
    assert_eq!(65, err.exit_code());
    assert_eq!("[line 1:7] Unexpected character '@'", err.summary());

    let pretty = err.pretty_string();

    assert!(pretty.contains("error: Lexical error"), "{pretty}");
    assert!(pretty.contains("test.ml:1:7"), "{pretty}");
    assert!(pretty.contains("print @;"), "{pretty}");
}

#[test]
fn test_parse_error_diagnostic() {
    let err = parse_source("test.ml", "var x = 1;\nif (x { }").unwrap_err();

    assert!(matches!(err, Error::Parse { .. }));
    assert_eq!(65, err.exit_code());
    assert_eq!("[line 2:7] Expected `)`, found `{`", err.summary());

    let pretty = err.pretty_string();

    assert!(pretty.contains("error: Syntax error"), "{pretty}");
    assert!(pretty.contains("test.ml:2:7"), "{pretty}");
    assert!(pretty.contains("- `)`"), "{pretty}");
}

#[test]
fn test_error_at_end_of_input() {
    let err = parse_source("test.ml", "print 1").unwrap_err();
    let pretty = err.pretty_string();

    assert!(pretty.contains("error: Syntax error"), "{pretty}");
    assert!(pretty.contains("end of input"), "{pretty}");
}

#[test]
fn test_runtime_error_diagnostic() {
    let err = runtime_error("var a = 1;\nprint a / 0;");

    assert!(matches!(err, Error::Runtime { .. }));
    assert_eq!(70, err.exit_code());
    assert_eq!("[line 2:9] Division by zero", err.summary());

    let pretty = err.pretty_string();

    assert!(pretty.contains("error: Arithmetic error"), "{pretty}");
    assert!(pretty.contains("test.ml:2:9"), "{pretty}");

    let err = runtime_error("print nope;");
    assert!(err.pretty_string().contains("Undefined variable `nope`"));
}

#[test]
fn test_io_error() {
    let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));

    assert_eq!(Error::StdIo { err: io::ErrorKind::NotFound }, err);
    assert_eq!(74, err.exit_code());

    let pretty = err.pretty_string();
    assert!(pretty.contains("error: Standard IO error"), "{pretty}");
}

#[test]
fn test_span_join() {
    let start = SrcSpan::from(4, 5, 1, 5);
    let end = SrcSpan::from(10, 12, 2, 3);

    assert_eq!(SrcSpan::from(4, 12, 1, 5), start.to(end));
    assert_eq!(SrcSpan::from(4, 12, 1, 5), start.to(end).to(start));
    assert_eq!("1:5", start.to_string());
}
