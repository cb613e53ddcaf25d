use std::{io, path::PathBuf};

pub use codespan_reporting::diagnostic::{LabelStyle, Severity};
use codespan_reporting::{diagnostic::Label as CodespanLabel, files::SimpleFiles};
use termcolor::{Color, ColorSpec, WriteColor};

use super::src_span::SrcSpan;

pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn to_codespan_label(&self, file_id: usize, label_style: Option<LabelStyle>) -> CodespanLabel<usize> {
        let label = CodespanLabel::new(
            label_style.unwrap_or(LabelStyle::Primary),
            file_id,
            (self.span.start as usize)..(self.span.end as usize),
        );

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
}

pub struct Diagnostic<'a> {
    pub title: String,
    pub text: String,
    pub severity: Severity,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut impl WriteColor) -> io::Result<()> {
        match &self.location {
            Some(location) => self.write_span(location, buf)?,
            None => self.write_title(buf)?,
        }

        if !self.text.is_empty() {
            writeln!(buf, "{}", self.text)?;
        }

        Ok(())
    }

    pub fn write_span(&self, location: &Location, buf: &mut impl WriteColor) -> io::Result<()> {
        let mut files = SimpleFiles::new();

        let location_path = location.path.display().to_string();
        let file_id = files.add(location_path, location.src);

        let label = location.label.to_codespan_label(file_id, None);

        let diagnostic = codespan_reporting::diagnostic::Diagnostic::new(self.severity)
            .with_message(&self.title)
            .with_labels(vec![label]);

        let config = codespan_reporting::term::Config::default();

        codespan_reporting::term::emit(buf, &config, &files, &diagnostic)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))
    }

    pub fn write_title(&self, buf: &mut impl WriteColor) -> io::Result<()> {
        let (kind, colour) = match self.severity {
            Severity::Bug | Severity::Error => ("error", Color::Red),
            Severity::Warning => ("warning", Color::Yellow),
            Severity::Note | Severity::Help => ("note", Color::Blue),
        };

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(colour)))?;
        write!(buf, "{kind}")?;

        buf.set_color(ColorSpec::new().set_bold(true))?;
        write!(buf, ": {}\n\n", self.title)?;

        buf.reset()
    }
}
