use std::mem;

use log::trace;

use crate::fsm::{Automaton, StateId};

pub trait Matcher {
    /// Whether the whole of `text` is accepted.
    fn is_match(&self, text: &str) -> bool;
}

impl Matcher for Automaton {
    fn is_match(&self, text: &str) -> bool {
        Simulator::new(self).is_match(text)
    }
}

/// Simulates an [`Automaton`] over the subsets of its states: the frontier
/// is the epsilon closure of everything reachable after each character.
///
/// A simulator keeps its scratch memory between calls, so matching many
/// texts against one automaton should reuse a single simulator.
#[derive(Debug)]
pub struct Simulator<'a> {
    nfa: &'a Automaton,
    current: Vec<StateId>,
    next: Vec<StateId>,
    stack: Vec<StateId>,
    /// Per state: id of the last list the state was added to.
    last_list: Vec<usize>,
    list_id: usize,
}

impl<'a> Simulator<'a> {
    pub fn new(nfa: &'a Automaton) -> Simulator<'a> {
        Simulator {
            nfa,
            current: Vec::new(),
            next: Vec::new(),
            stack: Vec::new(),
            last_list: vec![0; nfa.state_count()],
            list_id: 0,
        }
    }

    pub fn is_match(&mut self, text: &str) -> bool {
        let nfa = self.nfa;
        self.new_list();
        self.closure(nfa.start());
        mem::swap(&mut self.current, &mut self.next);

        for c in text.chars() {
            if self.current.is_empty() {
                trace!("no live states left before {:?}", c);
                return false;
            }
            self.step(c);
            trace!("after {:?}: {} live states", c, self.current.len());
        }

        self.last_list[nfa.out()] == self.list_id
    }

    /// Replaces the frontier with the closure of every state reachable from
    /// it by consuming `c`.
    fn step(&mut self, c: char) {
        let nfa = self.nfa;
        self.new_list();
        for i in 0..self.current.len() {
            for &end in nfa.state(self.current[i]).transitions(c) {
                self.closure(end);
            }
        }
        mem::swap(&mut self.current, &mut self.next);
    }

    /// Adds `state` and everything epsilon-reachable from it to the next
    /// list. Each state is expanded at most once per list.
    fn closure(&mut self, state: StateId) {
        let nfa = self.nfa;
        self.stack.push(state);
        while let Some(state) = self.stack.pop() {
            if self.last_list[state] == self.list_id {
                continue;
            }
            self.last_list[state] = self.list_id;
            self.next.push(state);
            self.stack.extend(nfa.state(state).epsilons().iter().rev());
        }
    }

    fn new_list(&mut self) {
        self.next.clear();
        self.list_id = match self.list_id.checked_add(1) {
            Some(id) => id,
            None => {
                self.last_list.iter_mut().for_each(|id| *id = 0);
                1
            }
        };
    }
}
