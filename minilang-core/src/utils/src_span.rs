use std::fmt::Display;

/// Byte range in the source plus the 1-based line and column of `start`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub column: u32,
}

impl SrcSpan {
	pub fn from(start: u32, end: u32, line: u32, column: u32) -> Self {
		Self { start, end, line, column }
	}

	/// Span covering `self` up to the end of `other`.
	pub fn to(&self, other: SrcSpan) -> Self {
		Self {
			start: self.start,
			end: other.end.max(self.end),
			line: self.line,
			column: self.column,
		}
	}
}

impl Display for SrcSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}
