use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, LexErrorKind},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<Option<Token>, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    /// The token pattern table, tried in order: the first pattern whose
    /// match begins at the current offset wins. Declaration order encodes
    /// maximal munch: two-character operators come before their
    /// one-character prefixes, comment openers before `/`, terminated
    /// strings before the bare quote that reports an unterminated one,
    /// and `$$`/`~~`/`##`/`#[`/`#{` before the lone `$`/`~`/`#` patterns
    /// that are lex errors on their own.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
        // Whitespace and backslash-newline continuations are inter-token filler
        RegexPattern { regex: Regex::new("(\\s|\\\\\r?\n)+").unwrap(), handler: skip_handler },
        // A continuation inside a line comment continues the comment
        RegexPattern { regex: Regex::new("//(\\\\(.|\r?\n)|[^\\\\\n])*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("/\\*[^*]*\\*+([^/*][^*]*\\*+)*/").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("/\\*").unwrap(), handler: unterminated_comment_handler },
        RegexPattern { regex: Regex::new("\"[^\"]*\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("'[^']*'").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("\"").unwrap(), handler: unterminated_string_handler },
        RegexPattern { regex: Regex::new("'").unwrap(), handler: unterminated_string_handler },
        RegexPattern { regex: Regex::new("#\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenArray, "#[") },
        RegexPattern { regex: Regex::new("#\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenMap, "#{") },
        RegexPattern { regex: Regex::new("##").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Random, "##") },
        RegexPattern { regex: Regex::new("~~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Lazy, "~~") },
        RegexPattern { regex: Regex::new("\\$\\$").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greedy, "$$") },
        RegexPattern { regex: Regex::new("@@").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Iterate, "@@") },
        RegexPattern { regex: Regex::new("=>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "=>") },
        RegexPattern { regex: Regex::new("\\?\\?").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Conditional, "??") },
        RegexPattern { regex: Regex::new("::").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Alternative, "::") },
        RegexPattern { regex: Regex::new("\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new("&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new("==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new(">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new(">>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Transform, ">>") },
        RegexPattern { regex: Regex::new("!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new(":").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new("\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
        // A `$`, `~` or `#` that did not form one of the doubled operators
        RegexPattern { regex: Regex::new("\\$").unwrap(), handler: lone_symbol_handler },
        RegexPattern { regex: Regex::new("~").unwrap(), handler: lone_symbol_handler },
        RegexPattern { regex: Regex::new("#").unwrap(), handler: lone_symbol_handler },
    ];
}

pub struct Lexer {
    source: String,
    pos: i32,
    file: Rc<String>,
    reached_eof: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            source,
            file: file_name,
            reached_eof: false,
        }
    }

    pub fn advance_n(&mut self, n: i32) {
        self.pos += n;
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos as usize..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }

    /// The cursor as a source position. Named to stay clear of
    /// `Iterator::position`, which the `&mut Lexer` receiver would
    /// otherwise resolve to first.
    pub fn current_position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Scans past any filler and produces the next token. After the end of
    /// the input this keeps returning `EOF` tokens.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            if self.at_eof() {
                self.reached_eof = true;
                let here = self.current_position();
                return Ok(MK_TOKEN!(
                    TokenKind::EOF,
                    String::from("EOF"),
                    Span {
                        start: here.clone(),
                        end: here,
                    }
                ));
            }

            let mut matched = false;

            for pattern in PATTERNS.iter() {
                let starts_here = pattern
                    .regex
                    .find(self.remainder())
                    .is_some_and(|m| m.start() == 0);

                if starts_here {
                    matched = true;
                    if let Some(token) = (pattern.handler)(self, &pattern.regex)? {
                        return Ok(token);
                    }
                    break;
                }
            }

            if !matched {
                return Err(Error::lex(
                    LexErrorKind::UnrecognisedCharacter { character: self.at() },
                    self.current_position(),
                ));
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.reached_eof {
            return None;
        }

        let token = self.next_token();
        if token.is_err() {
            self.reached_eof = true;
        }

        Some(token)
    }
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    let kind = if let Some(kind) = RESERVED_LOOKUP.get(matched.as_str()) {
        *kind
    } else {
        TokenKind::Identifier
    };

    let start = lexer.current_position();
    lexer.advance_n(matched.len() as i32);

    Ok(Some(MK_TOKEN!(
        kind,
        matched,
        Span {
            start,
            end: lexer.current_position(),
        }
    )))
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    let start = lexer.current_position();
    lexer.advance_n(matched.len() as i32);

    Ok(Some(MK_TOKEN!(
        TokenKind::Number,
        matched,
        Span {
            start,
            end: lexer.current_position(),
        }
    )))
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = regex.find(lexer.remainder()).unwrap().end();
    lexer.advance_n(matched as i32);
    Ok(None)
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = regex.find(lexer.remainder()).unwrap();

    // Strip the delimiters; the grammar defines no escape sequences, so the
    // body is taken verbatim.
    let literal = lexer.remainder()[(matched.start() + 1)..(matched.end() - 1)].to_string();

    let start = lexer.current_position();
    lexer.advance_n(matched.end() as i32);

    Ok(Some(MK_TOKEN!(
        TokenKind::String,
        literal,
        Span {
            start,
            end: lexer.current_position(),
        }
    )))
}

fn unterminated_string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<Option<Token>, Error> {
    Err(Error::lex(
        LexErrorKind::UnterminatedString,
        lexer.current_position(),
    ))
}

fn unterminated_comment_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<Option<Token>, Error> {
    Err(Error::lex(
        LexErrorKind::UnterminatedComment,
        lexer.current_position(),
    ))
}

fn lone_symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let symbol = regex
        .find(lexer.remainder())
        .unwrap()
        .as_str()
        .chars()
        .next()
        .unwrap();

    Err(Error::lex(
        LexErrorKind::LoneSymbol { symbol },
        lexer.current_position(),
    ))
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            break;
        }
    }

    Ok(tokens)
}
