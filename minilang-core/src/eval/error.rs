use std::fmt::Display;

use thiserror::Error;

use crate::{
    environment::prelude::{NameError, ValueType},
    parser::prelude::{InfixOperator, PrefixOperator},
    utils::prelude::SrcSpan
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Operand of `{operator}` must be a number, got {got}")]
    OperandMustBeNumber {
        operator: PrefixOperator,
        got: ValueType,
    },
    #[error("Operands of `{operator}` must be {expected}, got {left} and {right}")]
    InvalidOperands {
        operator: InfixOperator,
        expected: &'static str,
        left: ValueType,
        right: ValueType,
    },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("Division by zero")]
    DivisionByZero,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeErrorType {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error("Evaluation nested deeper than {limit} levels")]
    DepthExceeded { limit: usize },
    #[error("Failed to write output: {kind}")]
    Output { kind: std::io::ErrorKind },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}

impl RuntimeError {
    pub fn new(error: impl Into<RuntimeErrorType>, location: SrcSpan) -> Self {
        Self {
            error: error.into(),
            location
        }
    }

    pub fn line(&self) -> u32 {
        self.location.line
    }

    pub fn column(&self) -> u32 {
        self.location.column
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn details(&self) -> (&'static str, String) {
        let title = match &self.error {
            RuntimeErrorType::Name(_) => "Undefined variable",
            RuntimeErrorType::Type(_) => "Type error",
            RuntimeErrorType::Arithmetic(_) => "Arithmetic error",
            RuntimeErrorType::DepthExceeded { .. } => "Evaluation too deep",
            RuntimeErrorType::Output { .. } => "Output error",
        };

        (title, self.message())
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] {}", self.location, self.error)
    }
}

impl std::error::Error for RuntimeError {}
