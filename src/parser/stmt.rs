use crate::{
    ast::statements::Stmt,
    errors::errors::{Error, ParseErrorKind},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

/// Statement dispatch: a `{` opens a block (map literals open with `#{`,
/// so there is no ambiguity); anything else is an expression, and a
/// following `=>` completes it into a dataflow definition.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(stmt_fn) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return stmt_fn(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();

        let error = Error::parse(
            ParseErrorKind::InvalidDataflowTarget {
                found: parser.current_token().value.clone(),
            },
            parser.get_position(),
        );
        let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

        return Ok(Stmt::Dataflow {
            span: Span {
                start: expr.get_span().start.clone(),
                end: name.span.end.clone(),
            },
            value: expr,
            name: name.value,
        });
    }

    Ok(Stmt::Expression {
        span: expr.get_span().clone(),
        expression: expr,
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone(); // {

    let mut body = vec![];
    while !matches!(
        parser.current_token_kind(),
        TokenKind::CloseCurly | TokenKind::EOF
    ) {
        body.push(parse_stmt(parser)?);
    }

    let close = parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::Block {
        body,
        span: Span {
            start,
            end: close.span.end.clone(),
        },
    })
}
