use std::{
	io::{self, Write},
	sync::atomic::{AtomicBool, Ordering},
};

use minilang_core::{environment::prelude::Environment, runner::run_source};

use crate::cli::report;

const PROMPT: &str = "ml> ";
const CONTINUATION_PROMPT: &str = "... ";
const INTERRUPT_HINT: &str = "(use 'exit' to quit)";

static EVALUATING: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Lines typed so far for one submission, kept until every `{` is closed.
#[derive(Debug, Default)]
pub struct InputBuffer {
	source: String,
	depth: i64,
}

impl InputBuffer {
	/// Appends a line. Returns the complete submission once braces balance.
	pub fn push_line(&mut self, line: &str) -> Option<String> {
		self.source.push_str(line);
		self.source.push('\n');

		self.depth += line.matches('{').count() as i64;
		self.depth -= line.matches('}').count() as i64;

		if self.depth > 0 {
			return None;
		}

		let source = std::mem::take(&mut self.source);
		self.depth = 0;

		Some(source)
	}

	pub fn is_continuing(&self) -> bool {
		self.depth > 0
	}

	pub fn clear(&mut self) {
		self.source.clear();
		self.depth = 0;
	}

	fn prompt(&self) -> &'static str {
		if self.is_continuing() { CONTINUATION_PROMPT } else { PROMPT }
	}
}

fn install_interrupt_handler() {
	let installed = ctrlc::set_handler(|| {
		if EVALUATING.load(Ordering::SeqCst) {
			std::process::exit(130);
		}

		INTERRUPTED.store(true, Ordering::SeqCst);

		print!("\n{INTERRUPT_HINT}\n{PROMPT}");
		let _ = io::stdout().flush();
	});

	if let Err(err) = installed {
		tracing::warn!(error = %err, "could not install Ctrl-C handler");
	}
}

pub fn start() -> io::Result<()> {
	install_interrupt_handler();

	let stdin = io::stdin();
	let env = Environment::global();
	let mut buffer = InputBuffer::default();

	println!("MiniLang REPL. Type 'exit' to quit.");

	loop {
		let mut input = String::new();

		print!("{}", buffer.prompt());
		io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			println!();
			return Ok(());
		}

		if INTERRUPTED.swap(false, Ordering::SeqCst) {
			buffer.clear();
		}

		let line = input.trim_end_matches(['\n', '\r']);

		if !buffer.is_continuing() && matches!(line.trim(), "exit" | "quit") {
			return Ok(());
		}

		let source = match buffer.push_line(line) {
			Some(source) => source,
			None => continue
		};

		if source.trim().is_empty() {
			continue;
		}

		tracing::debug!(bytes = source.len(), "evaluating submission");

		EVALUATING.store(true, Ordering::SeqCst);
		let result = run_source("<repl>", &source, &env, io::stdout().lock());
		EVALUATING.store(false, Ordering::SeqCst);

		if let Err(err) = result {
			report(&err);
		}
	}
}
