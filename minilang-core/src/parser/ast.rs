use std::fmt::Display;

use crate::{environment::prelude::format_number, utils::prelude::SrcSpan};

// program -> { <statement> } EOF
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join("\n"))
    }
}

// statement -> <block> | <conditional> | <conditional_loop> | <output> | <declaration> | <expression> ;
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(ExpressionStatement),
    Declaration(Declaration),
    Block(Block),
    Conditional(Conditional),
    ConditionalLoop(ConditionalLoop),
    Output(Output),
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expression(statement) => write!(f, "{statement}"),
            Self::Declaration(declaration) => write!(f, "{declaration}"),
            Self::Block(block) => write!(f, "{block}"),
            Self::Conditional(conditional) => write!(f, "{conditional}"),
            Self::ConditionalLoop(loop_) => write!(f, "{loop_}"),
            Self::Output(output) => write!(f, "{output}"),
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Expression(statement) => statement.location,
            Self::Declaration(declaration) => declaration.location,
            Self::Block(block) => block.location,
            Self::Conditional(conditional) => conditional.location,
            Self::ConditionalLoop(loop_) => loop_.location,
            Self::Output(output) => output.location,
        }
    }
}

// expression_statement -> <expression> ;
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub location: SrcSpan
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};", self.expression)
    }
}

// declaration -> (var | let) <identifier> [= <expression>] ;
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub identifier: Identifier,
    pub initializer: Option<Expression>,
    pub location: SrcSpan
}

impl Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.initializer {
            Some(initializer) => write!(f, "var {} = {};", self.identifier, initializer),
            None => write!(f, "var {};", self.identifier)
        }
    }
}

// block -> { {<statement>} }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }

        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{{ {} }}", statements.join(" "))
    }
}

// conditional -> if ( <expression> ) <statement> [else <statement>]
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Expression,
    pub resolution: Box<Statement>,
    pub alternative: Option<Box<Statement>>,
    pub location: SrcSpan
}

impl Display for Conditional {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.resolution)?;

        if let Some(alternative) = &self.alternative {
            write!(f, " else {alternative}")?;
        }

        Ok(())
    }
}

// conditional_loop -> while ( <expression> ) <statement>
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalLoop {
    pub condition: Expression,
    pub block: Box<Statement>,
    pub location: SrcSpan
}

impl Display for ConditionalLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while ({}) {}", self.condition, self.block)
    }
}

// output -> print <expression> ;
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub expression: Expression,
    pub location: SrcSpan
}

impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "print {};", self.expression)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Primitive(Primitive),
    Identifier(Identifier),
    Assignment(Assignment),
    Prefix(Prefix),
    Infix(Infix),
    Logical(Logical),
    Nested {
        expression: Box<Expression>,
        location: SrcSpan
    },
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Identifier(identifier) => write!(f, "{identifier}"),
            Self::Assignment(assignment) => write!(f, "{assignment}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::Logical(logical) => write!(f, "{logical}"),
            Self::Nested { expression, .. } => write!(f, "({expression})"),
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Primitive(primitive) => primitive.location(),
            Self::Identifier(identifier) => identifier.location,
            Self::Assignment(assignment) => assignment.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Infix(infix) => infix.location,
            Self::Logical(logical) => logical.location,
            Self::Nested { location, .. } => *location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Number { value: f64, location: SrcSpan },
    String { value: String, location: SrcSpan },
    Bool { value: bool, location: SrcSpan },
    Nil { location: SrcSpan },
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{}", format_number(*value)),
            Self::String { value, .. } => write!(f, "\"{value}\""),
            Self::Bool { value, .. } => write!(f, "{value}"),
            Self::Nil { .. } => write!(f, "nil"),
        }
    }
}

impl Primitive {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Number { location, .. }
            | Self::String { location, .. }
            | Self::Bool { location, .. }
            | Self::Nil { location } => *location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

// assignment -> <identifier> = <assignment>
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub identifier: Identifier,
    pub value: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.identifier, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Negate,
    Not,
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: PrefixOperator,
    pub expression: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.operator, self.expression)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        };

        write!(f, "{operator}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub left: Box<Expression>,
    pub operator: InfixOperator,
    pub operator_location: SrcSpan,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

/// `and` / `or`, which may skip their right operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl Display for LogicalOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Logical {
    pub left: Box<Expression>,
    pub operator: LogicalOperator,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Logical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}
