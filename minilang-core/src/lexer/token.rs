use std::fmt::Display;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // <letter|_>{<letter>|<digit>|_}
    Ident,
    // <digits>[.<digits>]
    Number(f64),
    // "..." without escapes
    String(String),

    // Keywords
    Var, // var, let
    If,
    Else,
    While,
    Print,
    True,
    False,
    Nil, // nil, null
    And,
    Or,
    Not,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,

    // Comparison
    Equal, // ==
    NotEqual, // !=
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    Bang,
    Assign, // =

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,

    Eof,
}

impl TokenKind {
    pub fn is_reserved_word(&self) -> bool {
        matches!(self,
            TokenKind::Var
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::While
            | TokenKind::Print
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Nil
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::Not
        )
    }

    /// Canonical spelling, used when reporting what the parser expected.
    pub fn as_literal(&self) -> String {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Number(_) => "number",
            TokenKind::String(_) => "string",

            TokenKind::Var => "var",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Print => "print",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Nil => "nil",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",

            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::LessThan => "<",
            TokenKind::LessThanOrEqual => "<=",
            TokenKind::GreaterThan => ">",
            TokenKind::GreaterThanOrEqual => ">=",
            TokenKind::Bang => "!",
            TokenKind::Assign => "=",

            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",

            TokenKind::Eof => "end of input",
        }.to_string()
    }

    /// Same variant, ignoring literal payloads.
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

pub fn str_to_keyword(word: &str) -> Option<TokenKind> {
    Some(match word {
        "var" | "let" => TokenKind::Var,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "print" => TokenKind::Print,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "nil" | "null" => TokenKind::Nil,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        _ => return None
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SrcSpan,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SrcSpan) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn line(&self) -> u32 {
        self.location.line
    }

    pub fn column(&self) -> u32 {
        self.location.column
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {:?} {:?}", self.location, self.kind, self.lexeme)
    }
}
