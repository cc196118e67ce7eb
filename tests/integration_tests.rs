//! End-to-end tests driving the full tokenize -> parse -> print pipeline.

use std::rc::Rc;

use emojilang::{
    ast::statements::Program,
    errors::errors::Error,
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
};

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.emo".to_string()))?;
    parse(tokens, Rc::new("test.emo".to_string()))
}

/// Asserts that printing a parse of `source` yields a token stream with the
/// same kinds and values as the input.
fn assert_print_round_trip(source: &str) {
    let program = parse_source(source).unwrap();
    let printed = program.to_string();

    let original_tokens = tokenize(source.to_string(), None).unwrap();
    let printed_tokens = tokenize(printed.clone(), None).unwrap();

    let lex = |tokens: Vec<emojilang::lexer::tokens::Token>| -> Vec<(TokenKind, String)> {
        tokens
            .into_iter()
            .map(|token| (token.kind, token.value))
            .collect()
    };

    assert_eq!(
        lex(original_tokens),
        lex(printed_tokens),
        "printed form {:?} does not re-tokenize like {:?}",
        printed,
        source
    );
}

#[test]
fn test_round_trip_operators_and_literals() {
    assert_print_round_trip("1 + 2 * 3");
    assert_print_round_trip("(1 + 2) * 3");
    assert_print_round_trip("a || b && !c");
    assert_print_round_trip("a < b == c >= d");
    assert_print_round_trip("-5 % 2");
}

#[test]
fn test_round_trip_conditional_and_iteration() {
    assert_print_round_trip("a ?? b :: c ?? d :: e");
    assert_print_round_trip("@@items >> ~~f");
    assert_print_round_trip("@@data.rows[0] >> $$transform");
}

#[test]
fn test_round_trip_postfix_chains() {
    assert_print_round_trip("a[0](x, y).z[1:2]");
    assert_print_round_trip("f()(1)(2)");
    assert_print_round_trip("m.a.b.c");
}

#[test]
fn test_round_trip_slices() {
    assert_print_round_trip("a[:]");
    assert_print_round_trip("a[1:]");
    assert_print_round_trip("a[:5]");
    assert_print_round_trip("a[1:5]");
    assert_print_round_trip("a[1:5:2]");
    assert_print_round_trip("a[::2]");
    assert_print_round_trip("a[1::2]");
    assert_print_round_trip("a[(i + 1):]");
}

#[test]
fn test_round_trip_collections() {
    assert_print_round_trip("#[1, 2, 3]");
    assert_print_round_trip("#[]");
    assert_print_round_trip("#{a: 1, \"b c\": #[true, false]}");
    assert_print_round_trip("#{}");
}

#[test]
fn test_round_trip_statements() {
    assert_print_round_trip("x + 1 => y");
    assert_print_round_trip("{ a => b b + 1 => c }");
    assert_print_round_trip("1 2 3");
}

#[test]
fn test_round_trip_number_lexemes() {
    // Non-canonical spellings must survive printing verbatim
    assert_print_round_trip("1.50 + 2.0");
    assert_print_round_trip("007 * 0.10");
}

#[test]
fn test_round_trip_strings_with_embedded_quotes() {
    assert_print_round_trip("\"it's fine\"");
    assert_print_round_trip("'say \"hi\"'");
}

#[test]
fn test_comments_and_continuations_are_invisible() {
    let plain = parse_source("1 + 2").unwrap();
    let commented = parse_source("1 + /* gap */ 2 // trailing").unwrap();
    let continued = parse_source("1 +\\\n2").unwrap();

    assert_eq!(plain.to_string(), commented.to_string());
    assert_eq!(plain.to_string(), continued.to_string());
}

#[test]
fn test_full_program() {
    let source = "\
// pipeline setup
#[1, 2, 3] => xs
@@xs >> ~~double => ys
ys[0] ?? (ys[1:]) :: #{empty: true} => out
";
    let program = parse_source(source).unwrap();
    assert_eq!(program.body.len(), 3);
    assert_print_round_trip(source);
}

#[test]
fn test_lex_failure_propagates_through_pipeline() {
    assert!(parse_source("xs ~ ys").is_err());
}

#[test]
fn test_parse_failure_carries_file_name() {
    let error = parse_source("a ?? b").unwrap_err();
    assert_eq!(*error.get_position().1, "test.emo");
}
