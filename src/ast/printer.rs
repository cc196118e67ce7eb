//! Canonical re-serialization of the AST back to source text.
//!
//! The output is whitespace-normalized but lexes to the same token
//! sequence that produced the tree, parentheses included.

use std::fmt::{self, Display, Formatter};

use super::{
    expressions::{Expr, MapKey},
    statements::{Program, Stmt},
};

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.body.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expression { expression, .. } => write!(f, "{}", expression),
            Stmt::Block { body, .. } => {
                write!(f, "{{")?;
                for stmt in body {
                    write!(f, " {}", stmt)?;
                }
                write!(f, " }}")
            }
            Stmt::Dataflow { value, name, .. } => write!(f, "{} => {}", value, name),
        }
    }
}

impl Display for MapKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Identifier(name) => write!(f, "{}", name),
            MapKey::StringLit(text) => write_string_literal(f, text),
        }
    }
}

// The grammar has no escape sequences, so a literal containing one quote
// kind must have been written with the other.
fn write_string_literal(f: &mut Formatter<'_>, text: &str) -> fmt::Result {
    if text.contains('"') {
        write!(f, "'{}'", text)
    } else {
        write!(f, "\"{}\"", text)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number { literal, .. } => write!(f, "{}", literal),
            Expr::StringLit { value, .. } => write_string_literal(f, value),
            Expr::Boolean { value, .. } => write!(f, "{}", value),
            Expr::Symbol { name, .. } => write!(f, "{}", name),
            Expr::Binary {
                left,
                operator,
                right,
                ..
            } => write!(f, "{} {} {}", left, operator.value, right),
            Expr::Unary {
                operator, operand, ..
            } => write!(f, "{}{}", operator.value, operand),
            Expr::Strategy {
                strategy, operand, ..
            } => write!(f, "{}{}", strategy.symbol(), operand),
            Expr::Conditional {
                condition,
                consequence,
                alternative,
                ..
            } => write!(f, "{} ?? {} :: {}", condition, consequence, alternative),
            Expr::Iteration {
                collection,
                transform,
                ..
            } => write!(f, "@@{} >> {}", collection, transform),
            Expr::Call {
                function,
                arguments,
                ..
            } => {
                write!(f, "{}(", function)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
            Expr::Index { object, index, .. } => write!(f, "{}[{}]", object, index),
            Expr::Slice {
                object,
                start,
                end,
                step,
                ..
            } => {
                write!(f, "{}[", object)?;
                if let Some(start) = start {
                    write!(f, "{}", start)?;
                }
                write!(f, ":")?;
                if let Some(end) = end {
                    write!(f, "{}", end)?;
                }
                if let Some(step) = step {
                    write!(f, ":{}", step)?;
                }
                write!(f, "]")
            }
            Expr::Member { object, member, .. } => write!(f, "{}.{}", object, member),
            Expr::Array { elements, .. } => {
                write!(f, "#[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Expr::Map { entries, .. } => {
                write!(f, "#{{")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", entry.key, entry.value)?;
                }
                write!(f, "}}")
            }
            Expr::Grouped { inner, .. } => write!(f, "({})", inner),
        }
    }
}
