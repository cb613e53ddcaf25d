use std::fmt::Display;

use thiserror::Error;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexicalErrorType {
    #[error("Unexpected character {tok:?}")]
    UnrecognizedToken { tok: char },
    #[error("Unterminated string")]
    UnterminatedString,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn line(&self) -> u32 {
        self.location.line
    }

    pub fn column(&self) -> u32 {
        self.location.column
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn details(&self) -> (String, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { .. } => (self.message(), vec![]),
            LexicalErrorType::UnterminatedString => {
                (self.message(), vec!["Strings must be closed with `\"`".to_string()])
            }
        }
    }
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] {}", self.location, self.error)
    }
}

impl std::error::Error for LexicalError {}
