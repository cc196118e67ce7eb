//! Lexical analysis module for the EmojiLang front-end.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source text using regex patterns
//! - Maximal-munch matching of multi-character symbolic operators
//! - Recognition of identifiers, literals, and punctuation
//! - Token position tracking for error reporting
//! - Comments, whitespace, and line-continuation handling

pub mod lexer;
pub mod tokens;
