use crate::nfa::{Label, Nfa, StateId};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::Arc;

/// Decides membership of whole strings in a regular language.
///
/// Implementations must answer `false`, never fail, for strings containing
/// symbols they know nothing about.
pub trait Recognizer {
    fn accepts(&self, input: &str) -> bool;
}

impl<R: Recognizer + ?Sized> Recognizer for Arc<R> {
    fn accepts(&self, input: &str) -> bool {
        (**self).accepts(input)
    }
}

/// Deterministic automaton produced by subset construction. State `0` is the
/// start state; a missing transition leads to the implicit dead state.
#[derive(Debug, Clone, PartialEq)]
pub struct Dfa {
    transitions: Vec<BTreeMap<char, usize>>,
    accepting: Vec<bool>,
}

impl Dfa {
    pub const START: usize = 0;

    pub fn from_nfa(nfa: &Nfa) -> Self {
        let start = nfa.epsilon_closure([nfa.start_state()]);
        let mut ids: HashMap<BTreeSet<StateId>, usize> = HashMap::new();
        let mut queue: VecDeque<BTreeSet<StateId>> = VecDeque::new();
        let mut transitions = Vec::new();
        let mut accepting = Vec::new();

        ids.insert(start.clone(), Self::START);
        queue.push_back(start);

        // subsets leave the queue in the order their ids were handed out
        while let Some(subset) = queue.pop_front() {
            let mut moves: BTreeMap<char, BTreeSet<StateId>> = BTreeMap::new();
            for &state in &subset {
                for t in nfa.transitions_from(state) {
                    if let Label::Symbol(c) = t.label {
                        moves.entry(c).or_default().insert(t.to);
                    }
                }
            }

            let mut row = BTreeMap::new();
            for (c, targets) in moves {
                let closure = nfa.epsilon_closure(targets);
                let next = match ids.get(&closure) {
                    Some(&id) => id,
                    None => {
                        let id = ids.len();
                        ids.insert(closure.clone(), id);
                        queue.push_back(closure);
                        id
                    }
                };
                row.insert(c, next);
            }

            transitions.push(row);
            accepting.push(nfa.is_accepting(&subset));
        }

        tracing::trace!(
            nfa_states = nfa.num_states(),
            dfa_states = transitions.len(),
            "Determinized fragment"
        );

        Dfa {
            transitions,
            accepting,
        }
    }

    pub fn num_states(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting.get(state).copied().unwrap_or(false)
    }

    pub fn next_state(&self, state: usize, c: char) -> Option<usize> {
        self.transitions.get(state)?.get(&c).copied()
    }
}

impl From<&Nfa> for Dfa {
    fn from(nfa: &Nfa) -> Self {
        Dfa::from_nfa(nfa)
    }
}

impl Recognizer for Dfa {
    fn accepts(&self, input: &str) -> bool {
        let mut state = Self::START;
        for c in input.chars() {
            match self.next_state(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_accepting(state)
    }
}
