use std::{
    io::{self, IsTerminal, Write},
    time::Duration,
};

use minilang_core::utils::prelude::Error;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

pub(crate) fn print_running(text: &str) {
    print_colourful_prefix("Running", Color::Green, text)
}

pub(crate) fn print_finished(duration: Duration) {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_failed(duration: Duration) {
    print_colourful_prefix("Failed", Color::Red, &format!("after {}", seconds(duration)))
}

/// Renders `err` as a diagnostic on stderr and returns the exit code it maps to.
pub(crate) fn report(err: &Error) -> i32 {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    let written = err.pretty(&mut buffer)
        .and_then(|()| buffer_writer.print(&buffer));

    if let Err(io_err) = written {
        tracing::warn!(error = %io_err, "failed to render diagnostic");
        eprintln!("{}", err.summary());
    }

    err.exit_code()
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    if let Err(err) = write_colourful_prefix(prefix, color, text) {
        tracing::warn!(error = %err, "failed to write status line");
    }
}

fn write_colourful_prefix(prefix: &str, color: Color, text: &str) -> io::Result<()> {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    buffer.set_color(
        ColorSpec::new()
            .set_intense(true)
            .set_bold(true)
            .set_fg(Some(color)),
    )?;
    write!(buffer, "{prefix: >11}")?;
    buffer.reset()?;
    writeln!(buffer, " {text}")?;

    buffer_writer.print(&buffer)
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    std::env::var("FORCE_COLOR").is_ok_and(|force| !force.is_empty())
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
