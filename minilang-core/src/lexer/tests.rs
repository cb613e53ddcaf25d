use pretty_assertions::assert_eq;

use super::prelude::{tokenize, Lexer, LexicalError, LexicalErrorType, TokenKind};

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_numbers() -> std::result::Result<(), LexicalError> {
    let input = r#"
        10
        0
        1.5
        007.25
        3.
    "#;

    let tokens = tokenize(input);

    // `3.` ends at the period, which is not a valid token on its own.
    let err = tokens.unwrap_err();
    assert_eq!(err.error, LexicalErrorType::UnrecognizedToken { tok: '.' });
    assert_eq!((err.line(), err.column()), (6, 10));

    let tokens = tokenize("10 0 1.5 007.25")?;
    let expected = vec![
        TokenKind::Number(10.0),
        TokenKind::Number(0.0),
        TokenKind::Number(1.5),
        TokenKind::Number(7.25),
        TokenKind::Eof,
    ];

    assert_eq!(expected, tokens.iter().map(|t| t.kind.clone()).collect::<Vec<_>>());
    assert_eq!("007.25", tokens[3].lexeme);

    Ok(())
}

#[test]
fn test_second_period_ends_number() {
    let mut lexer = Lexer::new("1.2.3".char_indices().map(|(i, c)| (i as u32, c)));

    let first = lexer.next_token().unwrap();
    assert_eq!(TokenKind::Number(1.2), first.kind);
    assert_eq!("1.2", first.lexeme);

    let err = lexer.next_token().unwrap_err();
    assert_eq!(LexicalErrorType::UnrecognizedToken { tok: '.' }, err.error);
    assert_eq!(4, err.column());
}

#[test]
fn test_operators_prefer_longest_match() {
    assert_eq!(
        vec![
            TokenKind::Equal,
            TokenKind::Assign,
            TokenKind::NotEqual,
            TokenKind::Bang,
            TokenKind::LessThanOrEqual,
            TokenKind::LessThan,
            TokenKind::GreaterThanOrEqual,
            TokenKind::GreaterThan,
            TokenKind::Eof,
        ],
        kinds("== = != ! <= < >= >")
    );

    // `===` is `==` followed by `=`
    assert_eq!(
        vec![TokenKind::Equal, TokenKind::Assign, TokenKind::Eof],
        kinds("===")
    );
}

#[test]
fn test_punctuation() {
    assert_eq!(
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Eof,
        ],
        kinds("(){};,+-*/")
    );
}

#[test]
fn test_keywords_and_identifiers() {
    let tokens = tokenize("var let if else while print true false nil null and or not _x x1 variable").unwrap();

    let expected = vec![
        TokenKind::Var,
        TokenKind::Var,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::While,
        TokenKind::Print,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Nil,
        TokenKind::Nil,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Not,
        TokenKind::Ident,
        TokenKind::Ident,
        TokenKind::Ident,
        TokenKind::Eof,
    ];

    assert_eq!(expected, tokens.iter().map(|t| t.kind.clone()).collect::<Vec<_>>());
    assert_eq!("_x", tokens[13].lexeme);
    assert_eq!("variable", tokens[15].lexeme);
}

#[test]
fn test_positions() {
    let input = "var a = 1;\n  print a;";
    let tokens = tokenize(input).unwrap();

    let positions = tokens.iter()
        .map(|t| (t.lexeme.as_str(), t.line(), t.column()))
        .collect::<Vec<_>>();

    assert_eq!(
        vec![
            ("var", 1, 1),
            ("a", 1, 5),
            ("=", 1, 7),
            ("1", 1, 9),
            (";", 1, 10),
            ("print", 2, 3),
            ("a", 2, 9),
            (";", 2, 10),
            ("", 2, 11),
        ],
        positions
    );

    assert_eq!((13, 18), (tokens[5].location.start, tokens[5].location.end));
}

#[test]
fn test_comments_and_whitespace_are_skipped() {
    let input = r#"
        // leading comment
        print 1; // trailing comment
        // print 2;
    "#;

    assert_eq!(
        vec![
            TokenKind::Print,
            TokenKind::Number(1.0),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ],
        kinds(input)
    );

    assert_eq!(vec![TokenKind::Slash, TokenKind::Number(2.0), TokenKind::Eof], kinds("/ 2"));
}

#[test]
fn test_strings() {
    let tokens = tokenize("\"hello world\" \"\" \"two\nlines\" x").unwrap();

    assert_eq!(TokenKind::String("hello world".into()), tokens[0].kind);
    assert_eq!("\"hello world\"", tokens[0].lexeme);
    assert_eq!(TokenKind::String("".into()), tokens[1].kind);
    assert_eq!(TokenKind::String("two\nlines".into()), tokens[2].kind);
    assert_eq!((2, 8), (tokens[3].line(), tokens[3].column()));
}

#[test]
fn test_unterminated_string() {
    let err = tokenize("print \"oops;\nprint 1;").unwrap_err();

    assert_eq!(LexicalErrorType::UnterminatedString, err.error);
    assert_eq!((1, 7), (err.line(), err.column()));
    assert_eq!("[line 1:7] Unterminated string", err.to_string());
}

#[test]
fn test_unrecognized_characters() {
    let fails = vec![
        ("@", '@', 1, 1),
        ("a & b", '&', 1, 3),
        ("x;\n  #", '#', 2, 3),
        ("é", 'é', 1, 1),
    ];

    for (input, tok, line, column) in fails {
        let err = tokenize(input).unwrap_err();

        assert_eq!(LexicalErrorType::UnrecognizedToken { tok }, err.error, "input {input:?}");
        assert_eq!((line, column), (err.line(), err.column()), "input {input:?}");
    }
}

#[test]
fn test_empty_input_has_single_eof() {
    let tokens = tokenize("").unwrap();

    assert_eq!(1, tokens.len());
    assert!(tokens[0].is_eof());

    assert_eq!(vec![TokenKind::Eof], kinds("   // only a comment"));
}

#[test]
fn test_iterator_is_fused_after_eof() {
    let mut lexer = Lexer::new("1".char_indices().map(|(i, c)| (i as u32, c)));

    assert!(matches!(lexer.next(), Some(Ok(ref t)) if t.kind == TokenKind::Number(1.0)));
    assert!(matches!(lexer.next(), Some(Ok(ref t)) if t.is_eof()));
    assert!(lexer.next().is_none());
    assert!(lexer.next().is_none());
}

#[test]
fn test_iterator_stops_after_error() {
    let lexer = Lexer::new("1 $ 2".char_indices().map(|(i, c)| (i as u32, c)));
    let results = lexer.collect::<Vec<_>>();

    assert_eq!(2, results.len());
    assert!(results[1].is_err());
}

#[test]
fn test_tokenize_is_restartable() {
    let input = "while (i < 3) { i = i + 1; }";

    assert_eq!(tokenize(input).unwrap(), tokenize(input).unwrap());
}
