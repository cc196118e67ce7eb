/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - expressions: Expression node kinds and the strategy/map-key helpers
/// - statements: Statement node kinds and the Program root
/// - printer: Display impls re-serializing nodes to canonical source text
pub mod expressions;
pub mod printer;
pub mod statements;
