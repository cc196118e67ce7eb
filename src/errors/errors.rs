use std::fmt::Display;

use crate::{lexer::tokens::TokenKind, Position};

/// Errors raised while tokenizing.
#[derive(thiserror::Error, Debug, Clone)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("unrecognised character: {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("lone {symbol:?} does not form a token")]
    LoneSymbol { symbol: char },
}

/// Errors raised while parsing the token stream.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ParseErrorKind {
    #[error("unexpected token: {found:?}")]
    UnexpectedToken { found: String },
    #[error("expected {expected}, found {found:?}")]
    ExpectedToken { expected: TokenKind, found: String },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("error parsing number: {token:?}")]
    InvalidNumber { token: String },
    #[error("slice bounds must be primary expressions, found {found:?}")]
    InvalidSliceBound { found: String },
    #[error("dataflow definitions must flow into an identifier, found {found:?}")]
    InvalidDataflowTarget { found: String },
}

/// A failure from either stage of the front-end, carrying the byte offset
/// and file name of the offending source span. A failed tokenize or parse
/// never yields a partial result alongside one of these.
#[derive(Debug, Clone)]
pub enum Error {
    Lex {
        kind: LexErrorKind,
        position: Position,
    },
    Parse {
        kind: ParseErrorKind,
        position: Position,
    },
}

impl Error {
    pub fn lex(kind: LexErrorKind, position: Position) -> Self {
        Error::Lex { kind, position }
    }

    pub fn parse(kind: ParseErrorKind, position: Position) -> Self {
        Error::Parse { kind, position }
    }

    pub fn get_position(&self) -> &Position {
        match self {
            Error::Lex { position, .. } => position,
            Error::Parse { position, .. } => position,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match self {
            Error::Lex { kind, .. } => match kind {
                LexErrorKind::UnterminatedString => "UnterminatedString",
                LexErrorKind::UnterminatedComment => "UnterminatedComment",
                LexErrorKind::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
                LexErrorKind::LoneSymbol { .. } => "LoneSymbol",
            },
            Error::Parse { kind, .. } => match kind {
                ParseErrorKind::UnexpectedToken { .. } => "UnexpectedToken",
                ParseErrorKind::ExpectedToken { .. } => "ExpectedToken",
                ParseErrorKind::UnexpectedEof => "UnexpectedEof",
                ParseErrorKind::InvalidNumber { .. } => "InvalidNumber",
                ParseErrorKind::InvalidSliceBound { .. } => "InvalidSliceBound",
                ParseErrorKind::InvalidDataflowTarget { .. } => "InvalidDataflowTarget",
            },
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match self {
            Error::Lex { kind, .. } => match kind {
                LexErrorKind::UnterminatedString => {
                    ErrorTip::Suggestion(String::from("the quote character cannot appear inside its own quoted literal"))
                }
                LexErrorKind::UnterminatedComment => {
                    ErrorTip::Suggestion(String::from("block comments do not nest, did you forget a `*/`?"))
                }
                LexErrorKind::UnrecognisedCharacter { .. } => ErrorTip::None,
                LexErrorKind::LoneSymbol { symbol } => ErrorTip::Suggestion(format!(
                    "`{}` is only valid doubled, as in `{}{}`",
                    symbol, symbol, symbol
                )),
            },
            Error::Parse { kind, .. } => match kind {
                ParseErrorKind::UnexpectedToken { found } => {
                    ErrorTip::Suggestion(format!("unexpected token: `{}`", found))
                }
                ParseErrorKind::ExpectedToken { expected, found } => {
                    ErrorTip::Suggestion(format!("expected `{}`, found `{}`", expected, found))
                }
                ParseErrorKind::UnexpectedEof => {
                    ErrorTip::Suggestion(String::from("the input ended in the middle of a construct"))
                }
                ParseErrorKind::InvalidNumber { token } => ErrorTip::Suggestion(format!(
                    "invalid number: `{}`, is it above the float limit?",
                    token
                )),
                ParseErrorKind::InvalidSliceBound { found } => ErrorTip::Suggestion(format!(
                    "`{}` is not a primary expression, wrap the bound in parentheses",
                    found
                )),
                ParseErrorKind::InvalidDataflowTarget { found } => ErrorTip::Suggestion(format!(
                    "`=>` must be followed by a name, found `{}`",
                    found
                )),
            },
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}
