use crate::{lexer::tokens::Token, Span};

/// Evaluation strategy tag carried by a strategy prefix. What a strategy
/// means is a semantic layer's concern, not the grammar's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `~~`
    Lazy,
    /// `$$`
    Greedy,
    /// `##`
    Random,
}

impl Strategy {
    pub fn symbol(&self) -> &'static str {
        match self {
            Strategy::Lazy => "~~",
            Strategy::Greedy => "$$",
            Strategy::Random => "##",
        }
    }
}

/// A map literal key: either identifier text or string text. Which form
/// was written is preserved so the printer can reproduce it.
#[derive(Debug, Clone, PartialEq)]
pub enum MapKey {
    Identifier(String),
    StringLit(String),
}

/// One `key: value` entry of a map literal. Entries keep insertion order
/// and duplicates are not rejected at parse time.
#[derive(Debug, Clone)]
pub struct MapEntry {
    pub key: MapKey,
    pub value: Expr,
}

/// An expression node. Every node owns its children outright and carries
/// the source span it was parsed from.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A numeric literal. The lexed text is kept alongside the parsed
    /// value so printing reproduces the exact spelling (`1.50`, `2.0`).
    Number {
        value: f64,
        literal: String,
        span: Span,
    },
    StringLit {
        value: String,
        span: Span,
    },
    Boolean {
        value: bool,
        span: Span,
    },
    Symbol {
        name: String,
        span: Span,
    },
    /// Logical, comparison, additive and multiplicative operators all
    /// share this shape; `operator` is the lexed token.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
        span: Span,
    },
    /// Prefix `!` or `-`.
    Unary {
        operator: Token,
        operand: Box<Expr>,
        span: Span,
    },
    /// A strategy prefix wrapping its operand, e.g. `~~x`.
    Strategy {
        strategy: Strategy,
        operand: Box<Expr>,
        span: Span,
    },
    /// `condition ?? consequence :: alternative`
    Conditional {
        condition: Box<Expr>,
        consequence: Box<Expr>,
        alternative: Box<Expr>,
        span: Span,
    },
    /// `@@ collection >> transform`
    Iteration {
        collection: Box<Expr>,
        transform: Box<Expr>,
        span: Span,
    },
    Call {
        function: Box<Expr>,
        arguments: Vec<Expr>,
        span: Span,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
    /// `object[start:end]` or `object[start:end:step]`. A `None` bound is
    /// the explicit absence marker, distinct from any parsed value.
    Slice {
        object: Box<Expr>,
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
        span: Span,
    },
    Member {
        object: Box<Expr>,
        member: String,
        span: Span,
    },
    /// `#[e, e, ...]`
    Array {
        elements: Vec<Expr>,
        span: Span,
    },
    /// `#{key: value, ...}`
    Map {
        entries: Vec<MapEntry>,
        span: Span,
    },
    /// A parenthesized expression. Kept as a transparent wrapper so spans
    /// survive and the primary classification below stays structural.
    Grouped {
        inner: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Number { span, .. } => span,
            Expr::StringLit { span, .. } => span,
            Expr::Boolean { span, .. } => span,
            Expr::Symbol { span, .. } => span,
            Expr::Binary { span, .. } => span,
            Expr::Unary { span, .. } => span,
            Expr::Strategy { span, .. } => span,
            Expr::Conditional { span, .. } => span,
            Expr::Iteration { span, .. } => span,
            Expr::Call { span, .. } => span,
            Expr::Index { span, .. } => span,
            Expr::Slice { span, .. } => span,
            Expr::Member { span, .. } => span,
            Expr::Array { span, .. } => span,
            Expr::Map { span, .. } => span,
            Expr::Grouped { span, .. } => span,
        }
    }

    /// Whether this node is one of the primary forms: an identifier, a
    /// literal, a literal constructor, or a parenthesized expression.
    /// Slice bounds are restricted to exactly these.
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            Expr::Number { .. }
                | Expr::StringLit { .. }
                | Expr::Boolean { .. }
                | Expr::Symbol { .. }
                | Expr::Array { .. }
                | Expr::Map { .. }
                | Expr::Grouped { .. }
        )
    }
}
