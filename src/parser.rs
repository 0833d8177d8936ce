use colored::Colorize;
use std::{error::Error, fmt::Display, str::Chars};

use itertools::{peek_nth, PeekNth};

use crate::fsm::{Builder, Fragment};

// we take the pattern one character at a time and splice fragments as we go

#[derive(Debug)]
pub(crate) struct Parser<'a> {
    regex: &'a str,
    regex_iter: PeekNth<Chars<'a>>,
    consumed: usize,
    nfa: Builder,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Parser<'a> {
        Parser {
            regex: input,
            regex_iter: peek_nth(input.chars()),
            consumed: 0,
            nfa: Builder::new(),
        }
    }

    pub fn peek(&mut self) -> Option<char> {
        self.regex_iter.peek().copied()
    }

    pub fn consume_unseen(&mut self) -> Option<char> {
        let c = self.regex_iter.next()?;
        self.consumed += 1;
        Some(c)
    }

    /// Consumes the next character if it is `expected`.
    pub fn consume(&mut self, expected: char) -> bool {
        if self.matches(expected) {
            self.consume_unseen();
            true
        } else {
            false
        }
    }

    pub fn matches(&mut self, expected: char) -> bool {
        self.peek() == Some(expected)
    }

    pub fn within_bounds(&mut self) -> bool {
        self.regex_iter.peek().is_some()
    }

    /// The next character, if it can start a factor. `)` and `|` end a term.
    pub fn can_parse_factor(&mut self) -> Option<char> {
        match self.peek() {
            Some(')') | Some('|') | None => None,
            Some(c) => Some(c),
        }
    }

    fn error(&self, kind: fn(Box<String>, usize) -> ParserError, position: usize) -> ParserError {
        kind(Box::new(String::from(self.regex)), position)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParserError {
    /// A `(` at the given position is never closed.
    UnmatchedParenthesis(Box<String>, usize),
    /// Characters remain after the top-level expression, i.e. a stray `)`.
    TrailingInput(Box<String>, usize),
    /// The pattern ends with a lone `\` at the given position.
    DanglingEscape(Box<String>, usize),
}

impl ParserError {
    pub fn pattern(&self) -> &str {
        match self {
            Self::UnmatchedParenthesis(pattern, _)
            | Self::TrailingInput(pattern, _)
            | Self::DanglingEscape(pattern, _) => pattern,
        }
    }

    /// Character index of the offending token in the pattern.
    pub fn position(&self) -> usize {
        match *self {
            Self::UnmatchedParenthesis(_, position)
            | Self::TrailingInput(_, position)
            | Self::DanglingEscape(_, position) => position,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnmatchedParenthesis(..) => "unmatched parenthesis",
            Self::TrailingInput(..) => "unexpected trailing input",
            Self::DanglingEscape(..) => "dangling escape at end of pattern",
        }
    }

    fn code(&self) -> usize {
        match self {
            Self::UnmatchedParenthesis(..) => 1,
            Self::TrailingInput(..) => 2,
            Self::DanglingEscape(..) => 3,
        }
    }
}

impl Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} at position {}:\n | {}\n | {}{}",
            format!("[{:0>3}]", self.code()).red().bold(),
            self.reason(),
            self.position(),
            self.pattern(),
            " ".repeat(self.position()),
            "^".green()
        )
    }
}

impl Error for ParserError {}

/// Parses `input` and returns the arena together with the fragment spanning
/// the whole pattern.
pub(crate) fn run_parse(input: &str) -> Result<(Builder, Fragment), ParserError> {
    let mut parser = Parser::new(input);
    let fragment = parse_expression(&mut parser)?;
    if parser.within_bounds() {
        Err(parser.error(ParserError::TrailingInput, parser.consumed))
    } else {
        Ok((parser.nfa, fragment))
    }
}

fn parse_expression(parser: &mut Parser) -> Result<Fragment, ParserError> {
    let mut fragment = parse_term(parser)?;
    while parser.consume('|') {
        let alternative = parse_term(parser)?;
        fragment = parser.nfa.alternation(fragment, alternative);
    }
    Ok(fragment)
}

fn parse_term(parser: &mut Parser) -> Result<Fragment, ParserError> {
    let mut fragment: Option<Fragment> = None;
    while parser.can_parse_factor().is_some() {
        let factor = parse_factor(parser)?;
        fragment = Some(match fragment {
            Some(prefix) => parser.nfa.concat(prefix, factor),
            None => factor,
        });
    }
    match fragment {
        Some(fragment) => Ok(fragment),
        None => Ok(parser.nfa.empty()),
    }
}

fn parse_factor(parser: &mut Parser) -> Result<Fragment, ParserError> {
    let atom = parse_atom(parser)?;
    let fragment = match parser.peek() {
        Some('*') => {
            parser.consume_unseen();
            parser.nfa.zero_or_more(atom)
        }
        Some('+') => {
            parser.consume_unseen();
            parser.nfa.one_or_more(atom)
        }
        Some('?') => {
            parser.consume_unseen();
            parser.nfa.zero_or_one(atom)
        }
        _ => atom,
    };
    Ok(fragment)
}

fn parse_atom(parser: &mut Parser) -> Result<Fragment, ParserError> {
    let position = parser.consumed;
    match parser.consume_unseen() {
        Some('\\') => parse_escaped(parser, position),
        Some('(') => parse_group(parser, position),
        Some(c) => Ok(parser.nfa.literal(c)),
        None => Ok(parser.nfa.empty()),
    }
}

fn parse_escaped(parser: &mut Parser, position: usize) -> Result<Fragment, ParserError> {
    match parser.consume_unseen() {
        Some('n') => Ok(parser.nfa.literal('\n')),
        Some('t') => Ok(parser.nfa.literal('\t')),
        Some(c) => Ok(parser.nfa.literal(c)),
        None => Err(parser.error(ParserError::DanglingEscape, position)),
    }
}

fn parse_group(parser: &mut Parser, position: usize) -> Result<Fragment, ParserError> {
    let inner = parse_expression(parser)?;
    if parser.consume(')') {
        Ok(inner)
    } else {
        Err(parser.error(ParserError::UnmatchedParenthesis, position))
    }
}
