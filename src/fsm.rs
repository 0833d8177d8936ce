use std::collections::BTreeMap;

use log::{debug, log_enabled, Level};

use crate::{
    parser::{run_parse, ParserError},
    utils::RegexFlags,
};

pub type StateId = usize;

/// A node of the automaton graph. Identity is the node's index in the
/// owning [`Automaton`].
#[derive(Debug, Default, Clone)]
pub struct AutomatonState {
    transitions: BTreeMap<char, Vec<StateId>>,
    epsilons: Vec<StateId>,
}

impl AutomatonState {
    /// Targets reachable by consuming `c`. Empty if `c` is not referenced.
    pub fn transitions(&self, c: char) -> &[StateId] {
        match self.transitions.get(&c) {
            Some(targets) => targets.as_slice(),
            None => &[],
        }
    }

    pub fn epsilons(&self) -> &[StateId] {
        &self.epsilons
    }

    /// Every consuming transition of this state, ordered by character.
    pub fn symbols(&self) -> impl Iterator<Item = (char, &[StateId])> + '_ {
        self.transitions
            .iter()
            .map(|(c, targets)| (*c, targets.as_slice()))
    }

    fn add_transition(&mut self, c: char, end: StateId) {
        let targets = self.transitions.entry(c).or_default();
        if !targets.contains(&end) {
            targets.push(end);
        }
    }

    fn add_epsilon(&mut self, end: StateId) {
        if !self.epsilons.contains(&end) {
            self.epsilons.push(end);
        }
    }
}

/// An automaton piece with a single entry and a single exit. Fragments are
/// not `Clone`: every combinator consumes its operands.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Fragment {
    pub start: StateId,
    pub out: StateId,
}

/// Arena in which fragments are spliced together while a pattern is parsed.
#[derive(Debug, Default)]
pub(crate) struct Builder {
    states: Vec<AutomatonState>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn gen_state(&mut self) -> StateId {
        self.states.push(AutomatonState::default());
        self.states.len() - 1
    }

    pub fn fragment(&mut self) -> Fragment {
        Fragment {
            start: self.gen_state(),
            out: self.gen_state(),
        }
    }

    pub fn add_transition(&mut self, start: StateId, end: StateId, c: char) {
        self.states[start].add_transition(c, end);
    }

    pub fn epsilon(&mut self, start: StateId, end: StateId) {
        self.states[start].add_epsilon(end);
    }

    pub fn literal(&mut self, c: char) -> Fragment {
        let fragment = self.fragment();
        self.add_transition(fragment.start, fragment.out, c);
        fragment
    }

    /// Accepts only the empty string.
    pub fn empty(&mut self) -> Fragment {
        let fragment = self.fragment();
        self.epsilon(fragment.start, fragment.out);
        fragment
    }

    pub fn concat(&mut self, first: Fragment, second: Fragment) -> Fragment {
        self.epsilon(first.out, second.start);
        Fragment {
            start: first.start,
            out: second.out,
        }
    }

    pub fn alternation(&mut self, lower: Fragment, upper: Fragment) -> Fragment {
        let fragment = self.fragment();
        self.epsilon(fragment.start, lower.start);
        self.epsilon(fragment.start, upper.start);
        self.epsilon(lower.out, fragment.out);
        self.epsilon(upper.out, fragment.out);
        fragment
    }

    pub fn zero_or_more(&mut self, inner: Fragment) -> Fragment {
        let fragment = self.fragment();
        self.epsilon(fragment.start, inner.start);
        self.epsilon(fragment.start, fragment.out);
        self.epsilon(inner.out, fragment.start);
        fragment
    }

    pub fn one_or_more(&mut self, inner: Fragment) -> Fragment {
        let fragment = self.fragment();
        self.epsilon(fragment.start, inner.start);
        self.epsilon(inner.out, fragment.start);
        self.epsilon(inner.out, fragment.out);
        fragment
    }

    pub fn zero_or_one(&mut self, inner: Fragment) -> Fragment {
        let fragment = self.fragment();
        self.epsilon(fragment.start, inner.start);
        self.epsilon(fragment.start, fragment.out);
        self.epsilon(inner.out, fragment.out);
        fragment
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[cfg(test)]
    pub fn state(&self, id: StateId) -> &AutomatonState {
        &self.states[id]
    }

    pub fn build(self, root: Fragment, pattern: &str, flags: RegexFlags) -> Automaton {
        Automaton {
            pattern: String::from(pattern),
            flags,
            states: self.states,
            start: root.start,
            out: root.out,
        }
    }
}

/// A compiled pattern: the full state graph plus its designated start and
/// accepting (`out`) states. Immutable once built.
#[derive(Debug, Clone)]
pub struct Automaton {
    pattern: String,
    flags: RegexFlags,
    states: Vec<AutomatonState>,
    start: StateId,
    out: StateId,
}

impl Automaton {
    pub fn new(pattern: &str) -> Result<Automaton, ParserError> {
        Automaton::with_flags(pattern, RegexFlags::NO_FLAG)
    }

    pub fn with_flags(pattern: &str, flags: RegexFlags) -> Result<Automaton, ParserError> {
        let (builder, root) = run_parse(pattern)?;
        let automaton = builder.build(root, pattern, flags);
        debug!(
            "compiled {:?} into {} states",
            automaton.pattern,
            automaton.state_count()
        );
        if flags.contains(RegexFlags::DEBUG) && log_enabled!(Level::Debug) {
            debug!("{}", automaton.to_dot());
        }
        Ok(automaton)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn flags(&self) -> RegexFlags {
        self.flags
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn out(&self) -> StateId {
        self.out
    }

    pub fn state(&self, id: StateId) -> &AutomatonState {
        &self.states[id]
    }

    pub fn states(&self) -> &[AutomatonState] {
        &self.states
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Convert the automaton to GraphViz Dot code for debugging purposes.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        for (id, state) in self.states.iter().enumerate() {
            let opts = if id == self.start {
                "[fillcolor=green]"
            } else if id == self.out {
                "[shape=doublecircle]"
            } else {
                "[fillcolor=\"#EEEEEE\" fontcolor=\"#888888\"]"
            };
            out += &format!("node_{}[label=\"{}\"]{}\n", id, id, opts);
            for end in state.epsilons() {
                out += &format!("node_{} -> node_{}[style=dashed]\n", id, end);
            }
            for (c, targets) in state.symbols() {
                for end in targets {
                    out += &format!(
                        "node_{} -> node_{}[label=\"{}\"]\n",
                        id,
                        end,
                        c.escape_debug()
                    );
                }
            }
        }
        let opts = "node [shape=circle style=filled fillcolor=\"#4385f5\" fontcolor=\"#FFFFFF\" \
        color=white penwidth=5.0 margin=0.1 width=0.5 height=0.5 fixedsize=true]";
        format!(
            "digraph G {{  rankdir=\"LR\" graph [fontname = \"Courier New\"];
                node [fontname = \"verdana\", style = rounded];
                edge [fontname = \"verdana\"];
                {{\n{}\n{}}}}}",
            opts, out
        )
    }
}
