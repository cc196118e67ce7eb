use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("true", TokenKind::Boolean);
        map.insert("false", TokenKind::Boolean);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Boolean,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    OpenArray, // #[
    OpenMap,   // #{

    Arrow,       // =>
    Conditional, // ??
    Alternative, // ::

    Equals,    // ==
    Not,       // !
    NotEquals, // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Lazy,   // ~~
    Greedy, // $$
    Random, // ##

    Iterate,   // @@
    Transform, // >>

    Dot,
    Colon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

