use crate::Span;

use super::expressions::Expr;

/// A top-level statement.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// A bare expression in statement position.
    Expression { expression: Expr, span: Span },
    /// `{ statement* }`
    Block { body: Vec<Stmt>, span: Span },
    /// `value => name`. The value flows into the name; no uniqueness or
    /// scoping check happens at this layer.
    Dataflow {
        value: Expr,
        name: String,
        span: Span,
    },
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression { span, .. } => span,
            Stmt::Block { span, .. } => span,
            Stmt::Dataflow { span, .. } => span,
        }
    }
}

/// The root of a parse: an ordered sequence of top-level statements.
/// Document order is preserved.
#[derive(Debug, Clone)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}
