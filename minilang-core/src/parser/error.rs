use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::prelude::TokenKind, utils::prelude::SrcSpan};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("Expected {}, found {found}", .expected.join(" or "))]
    UnexpectedToken {
        token: TokenKind,
        found: String,
        expected: Vec<String>,
    },
    #[error("Expected expression, found {found}")]
    ExpectedExpression { found: String },
    #[error("Expected variable name, found {found}")]
    ExpectedIdent { found: String },
    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("Nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub location: SrcSpan
}

impl ParseError {
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
        match &self.error {
            ParseErrorType::UnexpectedToken { found, expected, .. } => {
                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Unexpected token".to_string(), messages)
            },
            ParseErrorType::InvalidAssignmentTarget => (
                self.message(),
                vec!["Only a variable name can appear on the left of `=`".to_string()]
            ),
            ParseErrorType::NestingTooDeep { .. } => (
                self.message(),
                vec!["Split the expression or block into smaller parts".to_string()]
            ),
            ParseErrorType::ExpectedExpression { .. }
            | ParseErrorType::ExpectedIdent { .. } => (self.message(), vec![])
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] {}", self.location, self.error)
    }
}

impl std::error::Error for ParseError {}
