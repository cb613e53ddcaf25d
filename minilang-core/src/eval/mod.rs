pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        interpret,
        Interpreter,
        MAX_EVAL_DEPTH
    };
}

#[cfg(test)]
mod tests;

use std::{cell::RefCell, io::Write, rc::Rc};

use crate::{
    parser::prelude::{
        Expression, Infix, InfixOperator, Logical, LogicalOperator, Prefix, PrefixOperator, Primitive, Program,
        Statement
    },
    environment::prelude::{Environment, Value, NIL},
    utils::prelude::SrcSpan
};
use error::{ArithmeticError, RuntimeError, RuntimeErrorType, TypeError};

/// Deepest statement/expression recursion the interpreter allows.
pub const MAX_EVAL_DEPTH: usize = 256;

/// Runs `program` against `env`, printing to standard output.
pub fn interpret(program: &Program, env: &Rc<RefCell<Environment>>) -> Result<(), RuntimeError> {
    let stdout = std::io::stdout();
    let mut interpreter = Interpreter::new(stdout.lock());

    interpreter.run(program, env)
}

/// Tree-walking evaluator. `print` output goes to `out`.
#[derive(Debug)]
pub struct Interpreter<W: Write> {
    out: W,
    depth: usize,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self { out, depth: 0 }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn run(&mut self, program: &Program, env: &Rc<RefCell<Environment>>) -> Result<(), RuntimeError> {
        for statement in &program.statements {
            self.eval_statement(statement, env)?;
        }

        self.out.flush()
            .map_err(|err| RuntimeError::new(RuntimeErrorType::Output { kind: err.kind() }, program.location))?;

        tracing::debug!(statements = program.statements.len(), "program finished");

        Ok(())
    }

    pub fn evaluate(&mut self, expression: &Expression, env: &Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
        self.eval_expression(expression, env)
    }

    fn enter(&mut self, location: SrcSpan) -> Result<(), RuntimeError> {
        if self.depth >= MAX_EVAL_DEPTH {
            return Err(RuntimeError::new(
                RuntimeErrorType::DepthExceeded { limit: MAX_EVAL_DEPTH },
                location
            ));
        }

        self.depth += 1;

        Ok(())
    }

    fn eval_statement(&mut self, statement: &Statement, env: &Rc<RefCell<Environment>>) -> Result<(), RuntimeError> {
        self.enter(statement.location())?;
        let result = self.exec(statement, env);
        self.depth -= 1;

        result
    }

    fn exec(&mut self, statement: &Statement, env: &Rc<RefCell<Environment>>) -> Result<(), RuntimeError> {
        tracing::trace!(location = %statement.location(), "executing statement");

        match statement {
            Statement::Expression(statement) => {
                self.eval_expression(&statement.expression, env)?;
            },
            Statement::Declaration(declaration) => {
                let value = match &declaration.initializer {
                    Some(initializer) => self.eval_expression(initializer, env)?,
                    None => NIL
                };

                env.borrow_mut().define(declaration.identifier.value.clone(), value);
            },
            Statement::Block(block) => {
                let scope = Environment::child(env);
                tracing::trace!(depth = scope.borrow().depth(), "entered block scope");

                for statement in &block.statements {
                    self.eval_statement(statement, &scope)?;
                }

                tracing::trace!("left block scope");
            },
            Statement::Conditional(conditional) => {
                if self.eval_expression(&conditional.condition, env)?.is_truthy() {
                    self.eval_statement(&conditional.resolution, env)?;
                } else if let Some(alternative) = &conditional.alternative {
                    self.eval_statement(alternative, env)?;
                }
            },
            Statement::ConditionalLoop(loop_) => {
                while self.eval_expression(&loop_.condition, env)?.is_truthy() {
                    self.eval_statement(&loop_.block, env)?;
                }
            },
            Statement::Output(output) => {
                let value = self.eval_expression(&output.expression, env)?;

                writeln!(self.out, "{value}")
                    .map_err(|err| RuntimeError::new(RuntimeErrorType::Output { kind: err.kind() }, output.location))?;
            }
        }

        Ok(())
    }

    fn eval_expression(&mut self, expression: &Expression, env: &Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
        self.enter(expression.location())?;
        let result = self.eval(expression, env);
        self.depth -= 1;

        result
    }

    fn eval(&mut self, expression: &Expression, env: &Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
        match expression {
            Expression::Primitive(primitive) => Ok(match primitive {
                Primitive::Number { value, .. } => Value::Number { value: *value },
                Primitive::String { value, .. } => Value::String { value: value.clone() },
                Primitive::Bool { value, .. } => Value::Boolean { value: *value },
                Primitive::Nil { .. } => NIL
            }),
            Expression::Identifier(ident) => env.borrow()
                .get(&ident.value)
                .map_err(|err| RuntimeError::new(err, ident.location)),
            Expression::Assignment(assignment) => {
                let value = self.eval_expression(&assignment.value, env)?;

                env.borrow_mut()
                    .assign(&assignment.identifier.value, value.clone())
                    .map_err(|err| RuntimeError::new(err, assignment.identifier.location))?;

                Ok(value)
            },
            Expression::Prefix(prefix) => self.eval_prefix(prefix, env),
            Expression::Infix(infix) => self.eval_infix(infix, env),
            Expression::Logical(logical) => self.eval_logical(logical, env),
            Expression::Nested { expression, .. } => self.eval_expression(expression, env)
        }
    }

    fn eval_prefix(&mut self, prefix: &Prefix, env: &Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
        let value = self.eval_expression(&prefix.expression, env)?;

        match prefix.operator {
            PrefixOperator::Negate => match value {
                Value::Number { value } => Ok(Value::Number { value: -value }),
                value => Err(RuntimeError::new(
                    TypeError::OperandMustBeNumber { operator: prefix.operator, got: value._type() },
                    prefix.location
                ))
            },
            PrefixOperator::Not => Ok(Value::from(!value.is_truthy()))
        }
    }

    fn eval_infix(&mut self, infix: &Infix, env: &Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
        let left = self.eval_expression(&infix.left, env)?;
        let right = self.eval_expression(&infix.right, env)?;

        binary(infix.operator, left, right)
            .map_err(|err| RuntimeError::new(err, infix.operator_location))
    }

    // Yields the deciding operand; the right side runs only when the left one does not decide.
    fn eval_logical(&mut self, logical: &Logical, env: &Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
        let left = self.eval_expression(&logical.left, env)?;

        let decided = match logical.operator {
            LogicalOperator::And => !left.is_truthy(),
            LogicalOperator::Or => left.is_truthy(),
        };

        if decided {
            Ok(left)
        } else {
            self.eval_expression(&logical.right, env)
        }
    }
}

fn binary(operator: InfixOperator, left: Value, right: Value) -> Result<Value, RuntimeErrorType> {
    let value = match operator {
        InfixOperator::Equal => Value::from(left.equals(&right)),
        InfixOperator::NotEqual => Value::from(!left.equals(&right)),
        InfixOperator::Add => match (left, right) {
            (
                Value::Number { value: left_value },
                Value::Number { value: right_value }
            ) => Value::Number { value: left_value + right_value },
            (
                Value::String { value: left_value },
                Value::String { value: right_value }
            ) => Value::String { value: format!("{left_value}{right_value}") },
            (left, right) => return Err(TypeError::InvalidOperands {
                operator,
                expected: "two numbers or two strings",
                left: left._type(),
                right: right._type()
            }.into())
        },
        InfixOperator::Subtract => {
            let (left, right) = numbers(operator, &left, &right)?;
            Value::from(left - right)
        },
        InfixOperator::Multiply => {
            let (left, right) = numbers(operator, &left, &right)?;
            Value::from(left * right)
        },
        InfixOperator::Divide => match numbers(operator, &left, &right)? {
            (_, right) if right == 0.0 => return Err(ArithmeticError::DivisionByZero.into()),
            (left, right) => Value::from(left / right)
        },
        InfixOperator::Less => {
            let (left, right) = numbers(operator, &left, &right)?;
            Value::from(left < right)
        },
        InfixOperator::LessEqual => {
            let (left, right) = numbers(operator, &left, &right)?;
            Value::from(left <= right)
        },
        InfixOperator::Greater => {
            let (left, right) = numbers(operator, &left, &right)?;
            Value::from(left > right)
        },
        InfixOperator::GreaterEqual => {
            let (left, right) = numbers(operator, &left, &right)?;
            Value::from(left >= right)
        },
    };

    Ok(value)
}

fn numbers(operator: InfixOperator, left: &Value, right: &Value) -> Result<(f64, f64), TypeError> {
    match (left, right) {
        (
            Value::Number { value: left_value },
            Value::Number { value: right_value }
        ) => Ok((*left_value, *right_value)),
        _ => Err(TypeError::InvalidOperands {
            operator,
            expected: "numbers",
            left: left._type(),
            right: right._type()
        })
    }
}
