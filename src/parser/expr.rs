use crate::{
    ast::expressions::{Expr, MapEntry, MapKey, Strategy},
    errors::errors::{Error, ParseErrorKind},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud_fn) => *nud_fn,
        None if token_kind == TokenKind::EOF => {
            return Err(Error::parse(
                ParseErrorKind::UnexpectedEof,
                parser.get_position(),
            ))
        }
        None => {
            return Err(Error::parse(
                ParseErrorKind::UnexpectedToken {
                    found: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud_fn(parser)?;

    // While the current token binds tighter than the level we are parsing
    // at, keep extending the left-hand side
    while *parser
        .get_bp_lookup()
        .get(&parser.current_token_kind())
        .unwrap_or(&BindingPower::Default)
        > bp
    {
        let token_kind = parser.current_token_kind();
        let operator_bp = *parser.get_bp_lookup().get(&token_kind).unwrap();

        let led_fn = match parser.get_led_lookup().get(&token_kind) {
            Some(led_fn) => *led_fn,
            None => {
                return Err(Error::parse(
                    ParseErrorKind::UnexpectedToken {
                        found: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ))
            }
        };

        left = led_fn(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let literal = parser.current_token().value.clone();

            match literal.parse() {
                Ok(value) => Ok(Expr::Number {
                    value,
                    literal,
                    span: parser.advance().span.clone(),
                }),
                Err(_) => Err(Error::parse(
                    ParseErrorKind::InvalidNumber { token: literal },
                    parser.get_position(),
                )),
            }
        }
        TokenKind::Identifier => Ok(Expr::Symbol {
            name: parser.current_token().value.clone(),
            span: parser.advance().span.clone(),
        }),
        TokenKind::String => Ok(Expr::StringLit {
            value: parser.current_token().value.clone(),
            span: parser.advance().span.clone(),
        }),
        TokenKind::Boolean => Ok(Expr::Boolean {
            value: parser.current_token().value == "true",
            span: parser.advance().span.clone(),
        }),
        _ => Err(Error::parse(
            ParseErrorKind::UnexpectedToken {
                found: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    // Parsing the right operand at the operator's own binding power makes
    // every binary level fold left, chained comparisons included
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        operator: operator_token,
        right: Box::new(right),
    })
}

pub fn parse_conditional_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance(); // ??

    let consequence = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Alternative)?;
    let alternative = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Conditional {
        span: Span {
            start: left.get_span().start.clone(),
            end: alternative.get_span().end.clone(),
        },
        condition: Box::new(left),
        consequence: Box::new(consequence),
        alternative: Box::new(alternative),
    })
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary {
        span: Span {
            start: operator_token.span.start.clone(),
            end: operand.get_span().end.clone(),
        },
        operator: operator_token,
        operand: Box::new(operand),
    })
}

pub fn parse_strategy_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let strategy_token = parser.advance().clone();

    let strategy = match strategy_token.kind {
        TokenKind::Lazy => Strategy::Lazy,
        TokenKind::Greedy => Strategy::Greedy,
        _ => Strategy::Random,
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Strategy {
        span: Span {
            start: strategy_token.span.start.clone(),
            end: operand.get_span().end.clone(),
        },
        strategy,
        operand: Box::new(operand),
    })
}

/// `@@ collection >> transform`. The collection operand is restricted to
/// the postfix level (a call/index/slice/member chain over a primary),
/// while the transform re-enters at the unary level and may itself be
/// another prefix or iteration expression.
pub fn parse_iteration_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone(); // @@

    let collection = parse_postfix_expr(parser)?;
    parser.expect(TokenKind::Transform)?;
    let transform = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Iteration {
        span: Span {
            start,
            end: transform.get_span().end.clone(),
        },
        collection: Box::new(collection),
        transform: Box::new(transform),
    })
}

/// Parses a postfix-level expression: a primary with any chain of postfix
/// suffixes, but no prefix operators.
fn parse_postfix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let kind = parser.current_token_kind();

    if matches!(
        kind,
        TokenKind::Not
            | TokenKind::Dash
            | TokenKind::Lazy
            | TokenKind::Greedy
            | TokenKind::Random
            | TokenKind::Iterate
    ) {
        return Err(Error::parse(
            ParseErrorKind::UnexpectedToken {
                found: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    }

    parse_expr(parser, BindingPower::Unary)
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance().clone();
    let inner = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Grouped {
        span: Span {
            start: open.span.start.clone(),
            end: close.span.end.clone(),
        },
        inner: Box::new(inner),
    })
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance(); // (

    let mut arguments = vec![];

    // No trailing comma in argument lists
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call {
        span: Span {
            start: left.get_span().start.clone(),
            end: close.span.end.clone(),
        },
        function: Box::new(left),
        arguments,
    })
}

/// A `[` suffix opens either an index or a slice; the first `:` decides.
/// An already-parsed start expression must be primary to be a slice bound.
/// Maximal munch lexes two adjacent colons as the single `::` token, so
/// inside the bracket suffix that token counts as both separators.
pub fn parse_index_or_slice_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance(); // [

    if matches!(
        parser.current_token_kind(),
        TokenKind::Colon | TokenKind::Alternative
    ) {
        return finish_slice_expr(parser, left, None);
    }

    let first = parse_expr(parser, BindingPower::Default)?;

    match parser.current_token_kind() {
        TokenKind::Colon | TokenKind::Alternative => {
            if !first.is_primary() {
                return Err(Error::parse(
                    ParseErrorKind::InvalidSliceBound {
                        found: first.to_string(),
                    },
                    first.get_span().start.clone(),
                ));
            }

            finish_slice_expr(parser, left, Some(Box::new(first)))
        }
        _ => {
            let close = parser.expect(TokenKind::CloseBracket)?;

            Ok(Expr::Index {
                span: Span {
                    start: left.get_span().start.clone(),
                    end: close.span.end.clone(),
                },
                object: Box::new(left),
                index: Box::new(first),
            })
        }
    }
}

fn finish_slice_expr(
    parser: &mut Parser,
    object: Expr,
    start: Option<Box<Expr>>,
) -> Result<Expr, Error> {
    // A `::` token here is both separating colons at once: the end bound
    // is absent and only the step may follow
    let both_separators = parser.current_token_kind() == TokenKind::Alternative;

    if both_separators {
        parser.advance();
    } else {
        parser.expect(TokenKind::Colon)?;
    }

    let mut end = None;
    let mut step = None;

    if both_separators {
        if parser.current_token_kind() != TokenKind::CloseBracket {
            step = Some(Box::new(parse_slice_bound(parser)?));
        }
    } else {
        if !matches!(
            parser.current_token_kind(),
            TokenKind::Colon | TokenKind::CloseBracket
        ) {
            end = Some(Box::new(parse_slice_bound(parser)?));
        }

        if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();

            if parser.current_token_kind() != TokenKind::CloseBracket {
                step = Some(Box::new(parse_slice_bound(parser)?));
            }
        }
    }

    let close = parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Slice {
        span: Span {
            start: object.get_span().start.clone(),
            end: close.span.end.clone(),
        },
        object: Box::new(object),
        start,
        end,
        step,
    })
}

// Slice bounds never extend past a primary: no postfix chains, no
// prefixes, no bare binary expressions.
fn parse_slice_bound(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number | TokenKind::String | TokenKind::Boolean | TokenKind::Identifier => {
            parse_primary_expr(parser)
        }
        TokenKind::OpenParen => parse_grouping_expr(parser),
        TokenKind::OpenArray => parse_array_literal(parser),
        TokenKind::OpenMap => parse_map_literal(parser),
        _ => Err(Error::parse(
            ParseErrorKind::InvalidSliceBound {
                found: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance(); // .

    let member = parser.expect(TokenKind::Identifier)?;

    Ok(Expr::Member {
        span: Span {
            start: left.get_span().start.clone(),
            end: member.span.end.clone(),
        },
        object: Box::new(left),
        member: member.value,
    })
}

pub fn parse_array_literal(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance().clone(); // #[

    let mut elements = vec![];

    // Empty arrays and trailing commas are both allowed
    while parser.current_token_kind() != TokenKind::CloseBracket {
        elements.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    let close = parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Array {
        span: Span {
            start: open.span.start.clone(),
            end: close.span.end.clone(),
        },
        elements,
    })
}

pub fn parse_map_literal(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance().clone(); // #{

    let mut entries = vec![];

    // Entry order is preserved; duplicate keys are a later layer's concern
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let key = match parser.current_token_kind() {
            TokenKind::Identifier => MapKey::Identifier(parser.advance().value.clone()),
            TokenKind::String => MapKey::StringLit(parser.advance().value.clone()),
            TokenKind::EOF => {
                return Err(Error::parse(
                    ParseErrorKind::UnexpectedEof,
                    parser.get_position(),
                ))
            }
            _ => {
                return Err(Error::parse(
                    ParseErrorKind::UnexpectedToken {
                        found: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ))
            }
        };

        parser.expect(TokenKind::Colon)?;
        let value = parse_expr(parser, BindingPower::Default)?;

        entries.push(MapEntry { key, value });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    let close = parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::Map {
        span: Span {
            start: open.span.start.clone(),
            end: close.span.end.clone(),
        },
        entries,
    })
}
