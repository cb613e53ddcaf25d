use crate::{lexer::prelude::{Token, TokenKind}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{
    Assignment, Block, Conditional, ConditionalLoop, Declaration, Expression, ExpressionStatement,
    Identifier, Infix, InfixOperator, Logical, LogicalOperator, Output, Prefix, PrefixOperator, Primitive,
    Program, Statement
};

/// Deepest nesting of groupings, operator chains and statements the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 128;

const LOWEST_PRECEDENCE: u8 = 1;

#[derive(Debug, Clone, Copy)]
enum BinaryOperator {
    Infix(InfixOperator),
    Logical(LogicalOperator),
}

/// Operator and precedence of a binary token; higher binds tighter.
fn binding_power(kind: &TokenKind) -> Option<(BinaryOperator, u8)> {
    let binding = match kind {
        TokenKind::Or => (BinaryOperator::Logical(LogicalOperator::Or), 1),
        TokenKind::And => (BinaryOperator::Logical(LogicalOperator::And), 2),
        TokenKind::Equal => (BinaryOperator::Infix(InfixOperator::Equal), 3),
        TokenKind::NotEqual => (BinaryOperator::Infix(InfixOperator::NotEqual), 3),
        TokenKind::LessThan => (BinaryOperator::Infix(InfixOperator::Less), 4),
        TokenKind::LessThanOrEqual => (BinaryOperator::Infix(InfixOperator::LessEqual), 4),
        TokenKind::GreaterThan => (BinaryOperator::Infix(InfixOperator::Greater), 4),
        TokenKind::GreaterThanOrEqual => (BinaryOperator::Infix(InfixOperator::GreaterEqual), 4),
        TokenKind::Plus => (BinaryOperator::Infix(InfixOperator::Add), 5),
        TokenKind::Minus => (BinaryOperator::Infix(InfixOperator::Subtract), 5),
        TokenKind::Star => (BinaryOperator::Infix(InfixOperator::Multiply), 6),
        TokenKind::Slash => (BinaryOperator::Infix(InfixOperator::Divide), 6),
        _ => return None
    };

    Some(binding)
}

pub trait Parse<T: Iterator<Item = Token>>
    where Self: Sized,
{
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError>;
}

/// Parses a complete token sequence into a program.
pub fn parse(tokens: impl IntoIterator<Item = Token>) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens.into_iter());
    let program = parser.parse()?;

    tracing::debug!(statements = program.statements.len(), "parsed program");

    Ok(program)
}

pub struct Parser<T: Iterator<Item = Token>> {
    pub current_token: Token,
    pub previous_location: SrcSpan,

    tokens: T,
    depth: usize,
}

impl<T: Iterator<Item = Token>> Parser<T> {
    pub fn new(mut input: T) -> Self {
        let current_token = input.next()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, "", SrcSpan::from(0, 0, 1, 1)));

        Self {
            previous_location: current_token.location,
            current_token,

            tokens: input,
            depth: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Program, ParseError> {
        Program::parse(self)
    }

    /// Consumes the current token. A stream that ends without `Eof` behaves as if it had one.
    pub fn step(&mut self) -> Token {
        if self.current_token.is_eof() {
            return self.current_token.clone();
        }

        let end = self.current_token.location;
        let next = self.tokens.next().unwrap_or_else(|| Token::new(
            TokenKind::Eof,
            "",
            SrcSpan { start: end.end, ..end }
        ));

        let token = std::mem::replace(&mut self.current_token, next);
        self.previous_location = token.location;

        token
    }

    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_token.kind.same_kind(kind)
    }

    pub fn eat(&mut self, kind: &TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.step())
        } else {
            None
        }
    }

    pub fn expect_one(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(&kind) {
            return Ok(self.step());
        }

        parse_error(
            ParseErrorType::UnexpectedToken {
                token: self.current_token.kind.clone(),
                found: self.describe_current(),
                expected: vec![format!("`{}`", kind.as_literal())],
            },
            self.current_token.location
        )
    }

    pub fn expect_ident(&mut self) -> Result<Identifier, ParseError> {
        if !self.check(&TokenKind::Ident) {
            return parse_error(
                ParseErrorType::ExpectedIdent { found: self.describe_current() },
                self.current_token.location
            );
        }

        let token = self.step();

        Ok(Identifier {
            value: token.lexeme,
            location: token.location
        })
    }

    fn describe_current(&self) -> String {
        match &self.current_token.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Ident => format!("identifier `{}`", self.current_token.lexeme),
            kind if kind.is_reserved_word() => format!("the keyword `{}`", self.current_token.lexeme),
            _ => format!("`{}`", self.current_token.lexeme)
        }
    }

    /// Records one more level of nesting. Callers restore `depth` once the level is done.
    fn descend(&mut self, location: SrcSpan) -> Result<(), ParseError> {
        self.depth += 1;

        if self.depth > MAX_NESTING_DEPTH {
            return parse_error(
                ParseErrorType::NestingTooDeep { limit: MAX_NESTING_DEPTH },
                location
            );
        }

        Ok(())
    }

    pub fn expression(&mut self) -> Result<Expression, ParseError> {
        self.assignment()
    }

    // assignment -> <identifier> = <assignment> | <binary>
    fn assignment(&mut self) -> Result<Expression, ParseError> {
        let target = self.binary(LOWEST_PRECEDENCE)?;

        let equals = match self.eat(&TokenKind::Assign) {
            Some(equals) => equals,
            None => return Ok(target)
        };

        let identifier = match target {
            Expression::Identifier(identifier) => identifier,
            _ => return parse_error(ParseErrorType::InvalidAssignmentTarget, equals.location)
        };

        let depth = self.depth;
        self.descend(equals.location)?;
        let value = self.assignment()?;
        self.depth = depth;

        Ok(Expression::Assignment(Assignment {
            location: identifier.location.to(value.location()),
            identifier,
            value: Box::new(value),
        }))
    }

    // binary -> <unary> { <operator> <unary> }, climbing `binding_power` from `min_precedence` up.
    // Each operator in a chain counts as one more nesting level, since the tree it builds is left-deep.
    fn binary(&mut self, min_precedence: u8) -> Result<Expression, ParseError> {
        let depth = self.depth;
        let mut left = self.unary()?;

        while let Some((operator, precedence)) = binding_power(&self.current_token.kind)
            .filter(|(_, precedence)| *precedence >= min_precedence)
        {
            let token = self.step();
            self.descend(token.location)?;

            let right = self.binary(precedence + 1)?;
            let location = left.location().to(right.location());

            left = match operator {
                BinaryOperator::Infix(operator) => Expression::Infix(Infix {
                    left: Box::new(left),
                    operator,
                    operator_location: token.location,
                    right: Box::new(right),
                    location,
                }),
                BinaryOperator::Logical(operator) => Expression::Logical(Logical {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                    location,
                }),
            };
        }

        self.depth = depth;

        Ok(left)
    }

    // unary -> (! | not | -) <unary> | <primary>
    fn unary(&mut self) -> Result<Expression, ParseError> {
        let operator = match self.current_token.kind {
            TokenKind::Bang | TokenKind::Not => PrefixOperator::Not,
            TokenKind::Minus => PrefixOperator::Negate,
            _ => return self.primary()
        };

        let token = self.step();

        let depth = self.depth;
        self.descend(token.location)?;
        let expression = self.unary()?;
        self.depth = depth;

        Ok(Expression::Prefix(Prefix {
            operator,
            location: token.location.to(expression.location()),
            expression: Box::new(expression),
        }))
    }

    fn primary(&mut self) -> Result<Expression, ParseError> {
        let location = self.current_token.location;

        let primitive = match self.current_token.kind.clone() {
            TokenKind::Number(value) => Primitive::Number { value, location },
            TokenKind::String(value) => Primitive::String { value, location },
            TokenKind::True => Primitive::Bool { value: true, location },
            TokenKind::False => Primitive::Bool { value: false, location },
            TokenKind::Nil => Primitive::Nil { location },
            TokenKind::Ident => {
                let token = self.step();

                return Ok(Expression::Identifier(Identifier {
                    value: token.lexeme,
                    location
                }));
            },
            TokenKind::LParen => {
                self.step();

                let depth = self.depth;
                self.descend(location)?;
                let expression = self.expression()?;
                let closing = self.expect_one(TokenKind::RParen)?;
                self.depth = depth;

                return Ok(Expression::Nested {
                    expression: Box::new(expression),
                    location: location.to(closing.location)
                });
            },
            _ => return parse_error(
                ParseErrorType::ExpectedExpression { found: self.describe_current() },
                location
            )
        };

        self.step();

        Ok(Expression::Primitive(primitive))
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for Program {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let start = parser.current_token.location;
        let mut statements = vec![];

        while !parser.current_token.is_eof() {
            statements.push(Statement::parse(parser)?);
        }

        Ok(Self {
            statements,
            location: start.to(parser.current_token.location)
        })
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for Statement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let statement = match parser.current_token.kind {
            TokenKind::LBrace => Self::Block(Block::parse(parser)?),
            TokenKind::If => Self::Conditional(Conditional::parse(parser)?),
            TokenKind::While => Self::ConditionalLoop(ConditionalLoop::parse(parser)?),
            TokenKind::Var => Self::Declaration(Declaration::parse(parser)?),
            TokenKind::Print => Self::Output(Output::parse(parser)?),
            _ => Self::Expression(ExpressionStatement::parse(parser)?),
        };

        Ok(statement)
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for Block {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let open = parser.expect_one(TokenKind::LBrace)?;

        let depth = parser.depth;
        parser.descend(open.location)?;

        let mut statements = vec![];

        while !parser.check(&TokenKind::RBrace) && !parser.current_token.is_eof() {
            statements.push(Statement::parse(parser)?);
        }

        let close = parser.expect_one(TokenKind::RBrace)?;
        parser.depth = depth;

        Ok(Self {
            statements,
            location: open.location.to(close.location)
        })
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for Conditional {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let keyword = parser.expect_one(TokenKind::If)?;

        parser.expect_one(TokenKind::LParen)?;
        let condition = parser.expression()?;
        parser.expect_one(TokenKind::RParen)?;

        let depth = parser.depth;
        parser.descend(keyword.location)?;

        let resolution = Box::new(Statement::parse(parser)?);

        let alternative = match parser.eat(&TokenKind::Else) {
            Some(_) => Some(Box::new(Statement::parse(parser)?)),
            None => None
        };

        parser.depth = depth;

        Ok(Self {
            condition,
            resolution,
            alternative,
            location: keyword.location.to(parser.previous_location)
        })
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for ConditionalLoop {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let keyword = parser.expect_one(TokenKind::While)?;

        parser.expect_one(TokenKind::LParen)?;
        let condition = parser.expression()?;
        parser.expect_one(TokenKind::RParen)?;

        let depth = parser.depth;
        parser.descend(keyword.location)?;
        let block = Box::new(Statement::parse(parser)?);
        parser.depth = depth;

        Ok(Self {
            condition,
            block,
            location: keyword.location.to(parser.previous_location)
        })
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for Declaration {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let keyword = parser.expect_one(TokenKind::Var)?;
        let identifier = parser.expect_ident()?;

        let initializer = match parser.eat(&TokenKind::Assign) {
            Some(_) => Some(parser.expression()?),
            None => None
        };

        let semicolon = parser.expect_one(TokenKind::Semicolon)?;

        Ok(Self {
            identifier,
            initializer,
            location: keyword.location.to(semicolon.location)
        })
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for Output {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let keyword = parser.expect_one(TokenKind::Print)?;
        let expression = parser.expression()?;
        let semicolon = parser.expect_one(TokenKind::Semicolon)?;

        Ok(Self {
            expression,
            location: keyword.location.to(semicolon.location)
        })
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for ExpressionStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let expression = parser.expression()?;
        let semicolon = parser.expect_one(TokenKind::Semicolon)?;

        Ok(Self {
            location: expression.location().to(semicolon.location),
            expression,
        })
    }
}

pub fn parse_error<T>(error: ParseErrorType, location: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, location })
}
