use std::{cell::RefCell, rc::Rc};

use pretty_assertions::assert_eq;

use crate::{
    environment::prelude::{Environment, Value, ValueType, TRUE},
    lexer::prelude::tokenize,
    parser::prelude::{parse, Expression, Prefix, PrefixOperator, Primitive, MAX_NESTING_DEPTH},
    utils::prelude::SrcSpan
};

use super::prelude::*;

fn run_in(input: &str, env: &Rc<RefCell<Environment>>) -> (String, Result<(), RuntimeError>) {
    let tokens = tokenize(input).expect("test input should lex");
    let program = parse(tokens).expect("test input should parse");

    let mut interpreter = Interpreter::new(Vec::new());
    let result = interpreter.run(&program, env);

    let output = String::from_utf8(interpreter.into_output()).expect("output is utf-8");

    (output, result)
}

fn run(input: &str) -> (String, Result<(), RuntimeError>) {
    run_in(input, &Environment::global())
}

fn output_of(input: &str) -> String {
    let (output, result) = run(input);

    assert_eq!(Ok(()), result);

    output
}

fn error_of(input: &str) -> RuntimeError {
    run(input).1.expect_err("program should fail at runtime")
}

#[test]
fn test_block_shadowing_leaves_outer_binding() {
    let input = r#"
        var x = 1;
        {
            var x = 2;
        }
        print x;
    "#;

    assert_eq!("1\n", output_of(input));
}

#[test]
fn test_assignment_in_block_reaches_outer_binding() {
    let input = r#"
        var x = 1;
        {
            x = 2;
        }
        print x;
    "#;

    assert_eq!("2\n", output_of(input));
}

#[test]
fn test_while_loop() {
    let input = r#"
        var i = 0;
        while (i < 3) {
            print i;
            i = i + 1;
        }
    "#;

    assert_eq!("0\n1\n2\n", output_of(input));
}

#[test]
fn test_if_else() {
    let input = r#"
        if (1 > 2) print "then"; else print "else";
        if (nil) print "skipped";
        if (0) { print "zero is truthy"; }
    "#;

    assert_eq!("else\nzero is truthy\n", output_of(input));
}

#[test]
fn test_declaration_without_initializer_binds_nil() {
    assert_eq!("nil\n", output_of("var a; print a;"));
    assert_eq!("nil\n", output_of("let b = null; print b;"));
}

#[test]
fn test_chained_assignment() {
    let input = r#"
        var a;
        var b;
        a = b = 3;
        print a;
        print b;
        print a = 4;
    "#;

    assert_eq!("3\n3\n4\n", output_of(input));
}

#[test]
fn test_arithmetic_and_precedence() {
    let input = r#"
        print 1 + 2 * 3;
        print (1 + 2) * 3;
        print 10 - 4 - 3;
        print 7 / 2;
        print -3 + 1;
        print 0.1 + 0.2;
    "#;

    assert_eq!("7\n9\n3\n3.5\n-2\n0.30000000000000004\n", output_of(input));
}

#[test]
fn test_string_concatenation() {
    let input = r#"
        var greeting = "hello";
        print greeting + ", " + "world";
    "#;

    assert_eq!("hello, world\n", output_of(input));
}

#[test]
fn test_comparison_and_equality() {
    let input = r#"
        print 1 < 2;
        print 2 <= 2;
        print 3 > 4;
        print 1 == 1;
        print "a" == "a";
        print 1 == "1";
        print nil == false;
        print nil != nil;
    "#;

    assert_eq!("true\ntrue\nfalse\ntrue\ntrue\nfalse\nfalse\nfalse\n", output_of(input));
}

#[test]
fn test_logical_operators_short_circuit() {
    let input = r#"
        print nil or "default";
        print 1 and 2;
        print false and undefined_name;
        print true or undefined_name;
        print !nil;
        print not 0;
    "#;

    assert_eq!("default\n2\nfalse\ntrue\ntrue\nfalse\n", output_of(input));
}

#[test]
fn test_division_by_zero() {
    let err = error_of("print 1 / 0;");

    assert_eq!(RuntimeErrorType::Arithmetic(ArithmeticError::DivisionByZero), err.error);
    assert_eq!(SrcSpan::from(8, 9, 1, 9), err.location);
    assert_eq!("Division by zero", err.message());
}

#[test]
fn test_undefined_variable() {
    let err = error_of("print missing;");

    match &err.error {
        RuntimeErrorType::Name(name) => assert_eq!("missing", name.name),
        other => panic!("expected a name error, got {other:?}")
    }

    assert_eq!(1, err.line());
    assert_eq!(7, err.column());
}

#[test]
fn test_assignment_to_undeclared_name() {
    let env = Environment::global();
    let (_, result) = run_in("{ ghost = 1; }", &env);

    assert!(matches!(result, Err(RuntimeError { error: RuntimeErrorType::Name(_), .. })));
    assert!(env.borrow().get("ghost").is_err());
}

#[test]
fn test_type_errors() {
    let err = error_of("print 1 + \"a\";");
    assert_eq!(
        RuntimeErrorType::Type(TypeError::InvalidOperands {
            operator: crate::parser::prelude::InfixOperator::Add,
            expected: "two numbers or two strings",
            left: ValueType::Number,
            right: ValueType::String
        }),
        err.error
    );

    let err = error_of("print -\"a\";");
    assert_eq!(
        RuntimeErrorType::Type(TypeError::OperandMustBeNumber {
            operator: PrefixOperator::Negate,
            got: ValueType::String
        }),
        err.error
    );

    let err = error_of("print true < 1;");
    assert_eq!("Operands of `<` must be numbers, got boolean and number", err.message());
}

#[test]
fn test_output_before_error_is_kept() {
    let (output, result) = run("print 1; print 2 / 0; print 3;");

    assert_eq!("1\n", output);
    assert!(result.is_err());
}

#[test]
fn test_state_persists_across_runs() {
    let env = Environment::global();

    let (_, result) = run_in("var counter = 1;", &env);
    assert_eq!(Ok(()), result);

    let (_, result) = run_in("print undefined;", &env);
    assert!(result.is_err());

    let (output, result) = run_in("counter = counter + 1; print counter;", &env);
    assert_eq!(Ok(()), result);
    assert_eq!("2\n", output);
}

#[test]
fn test_pure_expression_is_idempotent() {
    let env = Environment::global();
    env.borrow_mut().define("x", Value::from(4.0));

    let program = parse(tokenize("(x * 2 + 1) / 3 == 3 and \"s\" + \"t\";").unwrap()).unwrap();
    let expression = match &program.statements[0] {
        crate::parser::prelude::Statement::Expression(statement) => statement.expression.clone(),
        other => panic!("expected an expression statement, got {other:?}")
    };

    let mut interpreter = Interpreter::new(Vec::new());
    let first = interpreter.evaluate(&expression, &env).unwrap();
    let second = interpreter.evaluate(&expression, &env).unwrap();

    assert_eq!(Value::from("st"), first);
    assert_eq!(first, second);
}

#[test]
fn test_number_literals_print_canonically() {
    for (literal, expected) in [("42", "42"), ("3.25", "3.25"), ("007", "7"), ("1.0", "1"), ("0.5", "0.5")] {
        assert_eq!(format!("{expected}\n"), output_of(&format!("print {literal};")));
    }
}

#[test]
fn test_evaluation_depth_is_bounded() {
    let negations = |levels: usize| {
        let mut expression = Expression::Primitive(Primitive::Bool { value: true, location: SrcSpan::default() });

        for _ in 0..levels {
            expression = Expression::Prefix(Prefix {
                operator: PrefixOperator::Not,
                expression: Box::new(expression),
                location: SrcSpan::default()
            });
        }

        expression
    };

    let env = Environment::global();
    let mut interpreter = Interpreter::new(Vec::new());

    let err = interpreter.evaluate(&negations(MAX_EVAL_DEPTH + 10), &env).unwrap_err();
    assert_eq!(RuntimeErrorType::DepthExceeded { limit: MAX_EVAL_DEPTH }, err.error);

    // The counter unwinds with the error, so the same interpreter keeps working.
    assert_eq!(Ok(TRUE), interpreter.evaluate(&negations(MAX_EVAL_DEPTH - 2), &env));
    assert_eq!(Ok(Value::from(false)), interpreter.evaluate(&negations(1), &env));
}

#[test]
fn test_deepest_parsed_program_evaluates() {
    let depth = MAX_NESTING_DEPTH;
    let input = format!(
        "{}print {}1{};{}",
        "{".repeat(depth / 2),
        "-(".repeat(depth / 4),
        ")".repeat(depth / 4),
        "}".repeat(depth / 2)
    );

    assert_eq!("1\n", output_of(&input));

    let chain = format!("print 0{};", " + 1".repeat(MAX_NESTING_DEPTH));
    assert_eq!(format!("{MAX_NESTING_DEPTH}\n"), output_of(&chain));
}
