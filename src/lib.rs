//! Compiles a small regular-expression language into a Thompson NFA and
//! decides whether the automaton accepts a whole input text.
//!
//! The language has literal characters, escapes (`\n`, `\t`, and `\` before
//! any other character to take it literally), concatenation, alternation
//! with `|`, grouping with `( ... )` and the postfix quantifiers `*`, `+`
//! and `?`.
//!
//! ```
//! let nfa = thompson_re::compile("(ab)+c?").unwrap();
//! assert!(thompson_re::matches(&nfa, "ababc"));
//! assert!(!thompson_re::matches(&nfa, "aba"));
//! ```

pub mod fsm;
pub mod matching;
pub mod parser;
pub mod utils;

pub use crate::{
    fsm::{Automaton, AutomatonState, StateId},
    matching::{Matcher, Simulator},
    parser::ParserError,
    utils::RegexFlags,
};

pub fn compile(pattern: &str) -> Result<Automaton, ParserError> {
    Automaton::new(pattern)
}

pub fn compile_with_flags(pattern: &str, flags: RegexFlags) -> Result<Automaton, ParserError> {
    Automaton::with_flags(pattern, flags)
}

/// Whether `automaton` accepts the whole of `text`.
pub fn matches(automaton: &Automaton, text: &str) -> bool {
    Simulator::new(automaton).is_match(text)
}
