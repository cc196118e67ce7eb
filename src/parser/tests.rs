//! Unit tests for the parser module.
//!
//! These tests pin the parse shapes the grammar promises: precedence,
//! associativity, the postfix chain order, slice bound optionality, and
//! the statement-level dataflow form.

use std::rc::Rc;

use crate::{
    ast::{
        expressions::{Expr, MapKey, Strategy},
        statements::{Program, Stmt},
    },
    errors::errors::{Error, ParseErrorKind},
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
};

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.emo".to_string()))?;
    parse(tokens, Rc::new("test.emo".to_string()))
}

fn parse_single_expr(source: &str) -> Expr {
    let program = parse_source(source).unwrap();
    assert_eq!(program.body.len(), 1, "expected a single statement");

    match program.body.into_iter().next().unwrap() {
        Stmt::Expression { expression, .. } => expression,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn parse_error_kind(source: &str) -> ParseErrorKind {
    match parse_source(source) {
        Err(Error::Parse { kind, .. }) => kind,
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    let expr = parse_single_expr("1 + 2 * 3");

    match expr {
        Expr::Binary {
            operator, right, ..
        } => {
            assert_eq!(operator.kind, TokenKind::Plus);
            match *right {
                Expr::Binary { operator, .. } => assert_eq!(operator.kind, TokenKind::Star),
                other => panic!("expected multiplicative right child, got {:?}", other),
            }
        }
        other => panic!("expected additive root, got {:?}", other),
    }
}

#[test]
fn test_additive_folds_left() {
    let expr = parse_single_expr("1 - 2 - 3");

    match expr {
        Expr::Binary { left, .. } => {
            assert!(matches!(*left, Expr::Binary { .. }));
        }
        other => panic!("expected binary root, got {:?}", other),
    }
}

#[test]
fn test_logical_precedence() {
    // && binds tighter than ||
    let expr = parse_single_expr("a || b && c");

    match expr {
        Expr::Binary {
            operator, right, ..
        } => {
            assert_eq!(operator.kind, TokenKind::Or);
            match *right {
                Expr::Binary { operator, .. } => assert_eq!(operator.kind, TokenKind::And),
                other => panic!("expected && right child, got {:?}", other),
            }
        }
        other => panic!("expected || root, got {:?}", other),
    }
}

#[test]
fn test_conditional_is_right_associative() {
    let expr = parse_single_expr("a ?? b :: c ?? d :: e");

    match expr {
        Expr::Conditional {
            condition,
            alternative,
            ..
        } => {
            assert!(matches!(*condition, Expr::Symbol { ref name, .. } if name == "a"));
            match *alternative {
                Expr::Conditional { condition, .. } => {
                    assert!(matches!(*condition, Expr::Symbol { ref name, .. } if name == "c"));
                }
                other => panic!("expected nested conditional alternative, got {:?}", other),
            }
        }
        other => panic!("expected conditional root, got {:?}", other),
    }
}

#[test]
fn test_conditional_condition_is_binary_level() {
    let expr = parse_single_expr("x || y ?? a :: b");

    match expr {
        Expr::Conditional { condition, .. } => {
            assert!(matches!(*condition, Expr::Binary { .. }));
        }
        other => panic!("expected conditional root, got {:?}", other),
    }
}

#[test]
fn test_conditional_missing_alternative_fails() {
    assert!(matches!(
        parse_error_kind("a ?? b"),
        ParseErrorKind::UnexpectedEof
    ));
}

#[test]
fn test_comparison_chains_fold_left() {
    let expr = parse_single_expr("a < b < c");

    match expr {
        Expr::Binary {
            left,
            operator,
            right,
            ..
        } => {
            assert_eq!(operator.kind, TokenKind::Less);
            assert!(matches!(*left, Expr::Binary { .. }));
            assert!(matches!(*right, Expr::Symbol { ref name, .. } if name == "c"));
        }
        other => panic!("expected comparison root, got {:?}", other),
    }
}

#[test]
fn test_postfix_chain_order() {
    // index, call, member, slice - four nested wraps in source order
    let expr = parse_single_expr("a[0](x).y[1:2]");

    let Expr::Slice { object, .. } = expr else {
        panic!("expected outermost slice");
    };
    let Expr::Member { object, member, .. } = *object else {
        panic!("expected member below slice");
    };
    assert_eq!(member, "y");
    let Expr::Call { function, .. } = *object else {
        panic!("expected call below member");
    };
    let Expr::Index { object, .. } = *function else {
        panic!("expected index below call");
    };
    assert!(matches!(*object, Expr::Symbol { ref name, .. } if name == "a"));
}

#[test]
fn test_call_arguments() {
    let expr = parse_single_expr("f(a, b + 1)");

    match expr {
        Expr::Call { arguments, .. } => {
            assert_eq!(arguments.len(), 2);
            assert!(matches!(arguments[1], Expr::Binary { .. }));
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_call_with_no_arguments() {
    let expr = parse_single_expr("f()");

    match expr {
        Expr::Call { arguments, .. } => assert!(arguments.is_empty()),
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_call_trailing_comma_fails() {
    assert!(parse_source("f(a,)").is_err());
}

#[test]
fn test_member_requires_identifier() {
    assert!(matches!(
        parse_error_kind("a.1"),
        ParseErrorKind::ExpectedToken {
            expected: TokenKind::Identifier,
            ..
        }
    ));
}

#[test]
fn test_index_takes_full_expression() {
    let expr = parse_single_expr("a[i + 1]");

    match expr {
        Expr::Index { index, .. } => assert!(matches!(*index, Expr::Binary { .. })),
        other => panic!("expected index, got {:?}", other),
    }
}

fn parse_slice(source: &str) -> (Option<Box<Expr>>, Option<Box<Expr>>, Option<Box<Expr>>) {
    match parse_single_expr(source) {
        Expr::Slice {
            start, end, step, ..
        } => (start, end, step),
        other => panic!("expected slice, got {:?}", other),
    }
}

#[test]
fn test_slice_bound_optionality() {
    let (start, end, step) = parse_slice("a[:]");
    assert!(start.is_none() && end.is_none() && step.is_none());

    let (start, end, step) = parse_slice("a[::2]");
    assert!(start.is_none() && end.is_none());
    assert!(matches!(step.as_deref(), Some(Expr::Number { .. })));

    let (start, end, step) = parse_slice("a[1:]");
    assert!(matches!(start.as_deref(), Some(Expr::Number { .. })));
    assert!(end.is_none() && step.is_none());

    let (start, end, step) = parse_slice("a[:5]");
    assert!(start.is_none());
    assert!(matches!(end.as_deref(), Some(Expr::Number { .. })));
    assert!(step.is_none());

    let (start, end, step) = parse_slice("a[1:5:2]");
    assert!(start.is_some() && end.is_some() && step.is_some());

    let (start, end, step) = parse_slice("a[1:5]");
    assert!(start.is_some() && end.is_some() && step.is_none());
}

#[test]
fn test_slice_double_colon_forms() {
    // Two adjacent colons lex as one `::` token; the slice still parses
    let (start, end, step) = parse_slice("a[::]");
    assert!(start.is_none() && end.is_none() && step.is_none());

    let (start, end, step) = parse_slice("a[::2]");
    assert!(start.is_none() && end.is_none());
    assert!(matches!(step.as_deref(), Some(Expr::Number { .. })));

    let (start, end, step) = parse_slice("a[1::2]");
    assert!(matches!(start.as_deref(), Some(Expr::Number { .. })));
    assert!(end.is_none());
    assert!(matches!(step.as_deref(), Some(Expr::Number { .. })));

    let (start, end, step) = parse_slice("a[1::]");
    assert!(start.is_some());
    assert!(end.is_none() && step.is_none());
}

#[test]
fn test_slice_double_colon_still_checks_start_bound() {
    assert!(matches!(
        parse_error_kind("a[i + 1::2]"),
        ParseErrorKind::InvalidSliceBound { .. }
    ));
}

#[test]
fn test_slice_start_must_be_primary() {
    assert!(matches!(
        parse_error_kind("a[i + 1:2]"),
        ParseErrorKind::InvalidSliceBound { .. }
    ));
}

#[test]
fn test_slice_end_must_be_primary() {
    assert!(parse_source("a[1:2 + 3]").is_err());
}

#[test]
fn test_slice_grouped_bound_is_allowed() {
    let (start, end, step) = parse_slice("a[(i + 1):]");
    assert!(matches!(start.as_deref(), Some(Expr::Grouped { .. })));
    assert!(end.is_none() && step.is_none());
}

#[test]
fn test_unary_stacking() {
    let expr = parse_single_expr("--5");

    let Expr::Unary {
        operator, operand, ..
    } = expr
    else {
        panic!("expected unary root");
    };
    assert_eq!(operator.kind, TokenKind::Dash);
    let Expr::Unary { operand, .. } = *operand else {
        panic!("expected nested unary");
    };
    assert!(matches!(*operand, Expr::Number { value, .. } if value == 5.0));
}

#[test]
fn test_strategy_stacking() {
    let expr = parse_single_expr("~~$$x");

    let Expr::Strategy {
        strategy, operand, ..
    } = expr
    else {
        panic!("expected strategy root");
    };
    assert_eq!(strategy, Strategy::Lazy);
    let Expr::Strategy {
        strategy, operand, ..
    } = *operand
    else {
        panic!("expected nested strategy");
    };
    assert_eq!(strategy, Strategy::Greedy);
    assert!(matches!(*operand, Expr::Symbol { ref name, .. } if name == "x"));
}

#[test]
fn test_strategy_and_unary_mix() {
    let expr = parse_single_expr("##!x");

    let Expr::Strategy {
        strategy, operand, ..
    } = expr
    else {
        panic!("expected strategy root");
    };
    assert_eq!(strategy, Strategy::Random);
    assert!(matches!(*operand, Expr::Unary { .. }));
}

#[test]
fn test_unary_binds_tighter_than_multiplicative() {
    let expr = parse_single_expr("-a * b");

    match expr {
        Expr::Binary {
            left, operator, ..
        } => {
            assert_eq!(operator.kind, TokenKind::Star);
            assert!(matches!(*left, Expr::Unary { .. }));
        }
        other => panic!("expected binary root, got {:?}", other),
    }
}

#[test]
fn test_iteration_expression() {
    let expr = parse_single_expr("@@items >> ~~f");

    match expr {
        Expr::Iteration {
            collection,
            transform,
            ..
        } => {
            assert!(matches!(*collection, Expr::Symbol { ref name, .. } if name == "items"));
            assert!(matches!(*transform, Expr::Strategy { .. }));
        }
        other => panic!("expected iteration, got {:?}", other),
    }
}

#[test]
fn test_iteration_collection_may_be_postfix_chain() {
    let expr = parse_single_expr("@@data.rows[0] >> f");

    match expr {
        Expr::Iteration { collection, .. } => {
            assert!(matches!(*collection, Expr::Index { .. }));
        }
        other => panic!("expected iteration, got {:?}", other),
    }
}

#[test]
fn test_iteration_collection_rejects_prefix() {
    assert!(matches!(
        parse_error_kind("@@-x >> f"),
        ParseErrorKind::UnexpectedToken { .. }
    ));
}

#[test]
fn test_iteration_binds_at_unary_level() {
    // The transform stops at the additive operator
    let expr = parse_single_expr("@@xs >> x + 1");

    match expr {
        Expr::Binary {
            left, operator, ..
        } => {
            assert_eq!(operator.kind, TokenKind::Plus);
            assert!(matches!(*left, Expr::Iteration { .. }));
        }
        other => panic!("expected binary root, got {:?}", other),
    }
}

#[test]
fn test_grouping_overrides_precedence() {
    let expr = parse_single_expr("(1 + 2) * 3");

    match expr {
        Expr::Binary {
            left, operator, ..
        } => {
            assert_eq!(operator.kind, TokenKind::Star);
            match *left {
                Expr::Grouped { inner, .. } => assert!(matches!(*inner, Expr::Binary { .. })),
                other => panic!("expected grouped left child, got {:?}", other),
            }
        }
        other => panic!("expected binary root, got {:?}", other),
    }
}

#[test]
fn test_array_literal() {
    let expr = parse_single_expr("#[1, x, \"s\",]");

    match expr {
        Expr::Array { elements, .. } => assert_eq!(elements.len(), 3),
        other => panic!("expected array literal, got {:?}", other),
    }
}

#[test]
fn test_empty_array_literal() {
    let expr = parse_single_expr("#[]");

    match expr {
        Expr::Array { elements, .. } => assert!(elements.is_empty()),
        other => panic!("expected array literal, got {:?}", other),
    }
}

#[test]
fn test_map_literal_keys_and_order() {
    let expr = parse_single_expr("#{a: 1, \"b c\": 2,}");

    match expr {
        Expr::Map { entries, .. } => {
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].key, MapKey::Identifier("a".to_string()));
            assert_eq!(entries[1].key, MapKey::StringLit("b c".to_string()));
        }
        other => panic!("expected map literal, got {:?}", other),
    }
}

#[test]
fn test_map_literal_duplicate_keys_are_kept() {
    let expr = parse_single_expr("#{a: 1, a: 2}");

    match expr {
        Expr::Map { entries, .. } => {
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].key, entries[1].key);
        }
        other => panic!("expected map literal, got {:?}", other),
    }
}

#[test]
fn test_empty_map_literal() {
    let expr = parse_single_expr("#{}");

    match expr {
        Expr::Map { entries, .. } => assert!(entries.is_empty()),
        other => panic!("expected map literal, got {:?}", other),
    }
}

#[test]
fn test_number_keeps_lexeme_and_value() {
    match parse_single_expr("1.50") {
        Expr::Number { value, literal, .. } => {
            assert_eq!(value, 1.5);
            assert_eq!(literal, "1.50");
        }
        other => panic!("expected number literal, got {:?}", other),
    }
}

#[test]
fn test_boolean_literals() {
    let expr = parse_single_expr("true");
    assert!(matches!(expr, Expr::Boolean { value: true, .. }));

    let expr = parse_single_expr("false");
    assert!(matches!(expr, Expr::Boolean { value: false, .. }));
}

#[test]
fn test_dataflow_definition() {
    let program = parse_source("x + 1 => y").unwrap();
    assert_eq!(program.body.len(), 1);

    match &program.body[0] {
        Stmt::Dataflow { value, name, .. } => {
            assert!(matches!(value, Expr::Binary { .. }));
            assert_eq!(name, "y");
        }
        other => panic!("expected dataflow definition, got {:?}", other),
    }
}

#[test]
fn test_dataflow_target_must_be_identifier() {
    assert!(matches!(
        parse_error_kind("x + 1 => 5"),
        ParseErrorKind::InvalidDataflowTarget { .. }
    ));
}

#[test]
fn test_block_statement() {
    let program = parse_source("{ 1 x => y }").unwrap();
    assert_eq!(program.body.len(), 1);

    match &program.body[0] {
        Stmt::Block { body, .. } => {
            assert_eq!(body.len(), 2);
            assert!(matches!(body[0], Stmt::Expression { .. }));
            assert!(matches!(body[1], Stmt::Dataflow { .. }));
        }
        other => panic!("expected block statement, got {:?}", other),
    }
}

#[test]
fn test_unclosed_block_fails() {
    assert!(matches!(
        parse_error_kind("{ a"),
        ParseErrorKind::UnexpectedEof
    ));
}

#[test]
fn test_statement_order_is_preserved() {
    let program = parse_source("a b c").unwrap();
    assert_eq!(program.body.len(), 3);

    let names: Vec<_> = program
        .body
        .iter()
        .map(|stmt| match stmt {
            Stmt::Expression {
                expression: Expr::Symbol { name, .. },
                ..
            } => name.clone(),
            other => panic!("expected symbol statement, got {:?}", other),
        })
        .collect();

    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_line_continuation_is_transparent() {
    let continued = parse_single_expr("1 +\\\n2");
    let plain = parse_single_expr("1 + 2");

    assert_eq!(continued.to_string(), plain.to_string());
}

#[test]
fn test_parse_empty_program() {
    let program = parse_source("").unwrap();
    assert!(program.body.is_empty());
}

#[test]
fn test_dangling_operator_fails() {
    assert!(matches!(
        parse_error_kind("1 +"),
        ParseErrorKind::UnexpectedEof
    ));
}

#[test]
fn test_unexpected_close_paren_fails() {
    assert!(matches!(
        parse_error_kind(") x"),
        ParseErrorKind::UnexpectedToken { .. }
    ));
}

#[test]
fn test_parse_error_position_points_at_offender() {
    match parse_source("x + 1 => 5") {
        Err(Error::Parse { position, .. }) => assert_eq!(position.0, 9),
        other => panic!("expected a parse error, got {:?}", other),
    }
}
