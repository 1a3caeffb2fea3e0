use crate::dfa::Recognizer;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// State identifiers are dense and 1-based within a fragment.
pub type StateId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Symbol(char),
    Epsilon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub label: Label,
    pub to: StateId,
}

impl Transition {
    fn matches(&self, c: char) -> bool {
        self.label == Label::Symbol(c)
    }

    fn is_epsilon(&self) -> bool {
        self.label == Label::Epsilon
    }

    fn shifted(&self, offset: usize) -> Self {
        Transition {
            from: self.from + offset,
            label: self.label,
            to: self.to + offset,
        }
    }
}

/// Where an embedded fragment landed in the host's numbering space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedding {
    pub offset: usize,
    pub start_state: StateId,
    pub accept_states: Vec<StateId>,
}

/// NFA fragment over the states `1..=num_states`.
#[derive(Debug, Clone, PartialEq)]
pub struct Nfa {
    states_count: usize,
    start_state: StateId,
    accept_states: Vec<StateId>,
    transitions: BTreeMap<StateId, Vec<Transition>>,
}

impl Nfa {
    fn with_states(states_count: usize) -> Self {
        Nfa {
            states_count,
            start_state: 1,
            accept_states: vec![],
            transitions: BTreeMap::new(),
        }
    }

    fn add_transition(&mut self, from: StateId, label: Label, to: StateId) {
        debug_assert!(from >= 1 && from <= self.states_count);
        debug_assert!(to >= 1 && to <= self.states_count);
        self.transitions
            .entry(from)
            .or_default()
            .push(Transition { from, label, to });
    }

    fn add_state(&mut self) -> StateId {
        self.states_count += 1;
        self.states_count
    }

    pub fn from_symbol(c: char) -> Self {
        let mut nfa = Nfa::with_states(2);
        nfa.accept_states.push(2);
        nfa.add_transition(1, Label::Symbol(c), 2);
        nfa
    }

    pub fn from_epsilon() -> Self {
        let mut nfa = Nfa::with_states(2);
        nfa.accept_states.push(2);
        nfa.add_transition(1, Label::Epsilon, 2);
        nfa
    }

    /// A single start state with no edges and nothing accepted.
    pub fn empty_language() -> Self {
        Nfa::with_states(1)
    }

    pub fn num_states(&self) -> usize {
        self.states_count
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    pub fn accept_states(&self) -> &[StateId] {
        &self.accept_states
    }

    pub fn transitions_from(&self, state: StateId) -> &[Transition] {
        self.transitions.get(&state).map_or(&[], Vec::as_slice)
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.values().flatten()
    }

    /// Copies `other` into fresh states after the current ones, translating
    /// every state id by the returned offset. Nothing links the two parts yet.
    pub fn embed(&mut self, other: &Nfa) -> Embedding {
        let offset = self.states_count;
        self.states_count += other.states_count;

        for t in other.transitions() {
            let t = t.shifted(offset);
            self.transitions.entry(t.from).or_default().push(t);
        }

        Embedding {
            offset,
            start_state: other.start_state + offset,
            accept_states: other.accept_states.iter().map(|s| s + offset).collect(),
        }
    }

    pub fn concatenate(&mut self, other: &Nfa) {
        let old_accepts = std::mem::take(&mut self.accept_states);
        let right = self.embed(other);

        // connect both machines with epsilons
        for accept in old_accepts {
            self.add_transition(accept, Label::Epsilon, right.start_state);
        }

        self.accept_states = right.accept_states;
    }

    pub fn alternate(&mut self, other: &Nfa) {
        let old_start = self.start_state;
        let right = self.embed(other);

        let new_start = self.add_state();
        self.add_transition(new_start, Label::Epsilon, old_start);
        self.add_transition(new_start, Label::Epsilon, right.start_state);
        self.start_state = new_start;

        self.accept_states.extend(right.accept_states);
    }

    pub fn kleene_star(&mut self) {
        let old_start = self.start_state;

        for accept in self.accept_states.clone() {
            self.add_transition(accept, Label::Epsilon, old_start);
        }

        let new_start = self.add_state();
        self.add_transition(new_start, Label::Epsilon, old_start);
        self.add_transition(new_start, Label::Epsilon, new_start);

        self.start_state = new_start;
        self.accept_states.push(new_start);
    }

    pub fn epsilon_closure(
        &self,
        initial_states: impl IntoIterator<Item = StateId>,
    ) -> BTreeSet<StateId> {
        let mut reachable = BTreeSet::new();
        let mut queue: VecDeque<StateId> = VecDeque::new();

        for state in initial_states {
            if reachable.insert(state) {
                queue.push_back(state);
            }
        }

        while let Some(cur) = queue.pop_front() {
            for t in self.transitions_from(cur) {
                if t.is_epsilon() && reachable.insert(t.to) {
                    queue.push_back(t.to);
                }
            }
        }

        reachable
    }

    /// States reached from `states` by consuming `c`, closed under epsilons.
    pub fn step(&self, states: &BTreeSet<StateId>, c: char) -> BTreeSet<StateId> {
        let targets: Vec<StateId> = states
            .iter()
            .flat_map(|&state| {
                self.transitions_from(state)
                    .iter()
                    .filter(move |t| t.matches(c))
                    .map(|t| t.to)
            })
            .collect();

        self.epsilon_closure(targets)
    }

    pub fn is_accepting(&self, states: &BTreeSet<StateId>) -> bool {
        self.accept_states.iter().any(|s| states.contains(s))
    }
}

impl Recognizer for Nfa {
    fn accepts(&self, input: &str) -> bool {
        let mut current_states = self.epsilon_closure([self.start_state]);
        for c in input.chars() {
            current_states = self.step(&current_states, c);
            if current_states.is_empty() {
                return false;
            }
        }

        self.is_accepting(&current_states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn edge(from: StateId, label: Label, to: StateId) -> Transition {
        Transition { from, label, to }
    }

    fn assert_ids_in_range(nfa: &Nfa) {
        let in_range = |s: StateId| s >= 1 && s <= nfa.num_states();
        assert!(in_range(nfa.start_state()));
        assert!(nfa.accept_states().iter().all(|&s| in_range(s)));
        assert!(nfa.transitions().all(|t| in_range(t.from) && in_range(t.to)));
    }

    mod leaves {
        use super::*;

        #[test]
        fn symbol_has_two_states_and_one_edge() {
            let nfa = Nfa::from_symbol('a');

            assert_eq!(nfa.num_states(), 2);
            assert_eq!(nfa.start_state(), 1);
            assert_eq!(nfa.accept_states(), &[2]);
            assert_eq!(
                nfa.transitions().copied().collect::<Vec<_>>(),
                vec![edge(1, Label::Symbol('a'), 2)]
            );
        }

        #[test]
        fn epsilon_has_two_states_and_one_epsilon_edge() {
            let nfa = Nfa::from_epsilon();

            assert_eq!(nfa.num_states(), 2);
            assert_eq!(nfa.accept_states(), &[2]);
            assert_eq!(
                nfa.transitions().copied().collect::<Vec<_>>(),
                vec![edge(1, Label::Epsilon, 2)]
            );
        }

        #[test]
        fn empty_language_has_one_state_and_nothing_else() {
            let nfa = Nfa::empty_language();

            assert_eq!(nfa.num_states(), 1);
            assert_eq!(nfa.start_state(), 1);
            assert!(nfa.accept_states().is_empty());
            assert_eq!(nfa.transitions().count(), 0);
        }

        #[rstest]
        #[case("")]
        #[case("a")]
        #[case("ab")]
        fn empty_language_accepts_nothing(#[case] input: &str) {
            assert!(!Nfa::empty_language().accepts(input));
        }

        #[rstest]
        #[case('a', "aa")]
        #[case('a', "b")]
        #[case('a', "ab")]
        #[case('a', "")]
        #[case('1', "11")]
        #[case('$', "$$")]
        fn symbol_rejects_everything_but_itself(#[case] nfa_char: char, #[case] s: &str) {
            let nfa = Nfa::from_symbol(nfa_char);

            assert!(nfa.accepts(&nfa_char.to_string()));
            assert!(!nfa.accepts(s));
        }

        #[test]
        fn epsilon_accepts_only_the_empty_string() {
            let nfa = Nfa::from_epsilon();

            assert!(nfa.accepts(""));
            assert!(!nfa.accepts("a"));
            assert!(!nfa.accepts("e"));
        }
    }

    mod embed {
        use super::*;

        #[test]
        fn embedding_translates_every_id_by_the_host_size() {
            // given
            let mut host = Nfa::from_symbol('a');
            let mut guest = Nfa::from_symbol('b');
            guest.kleene_star();

            // when
            let embedding = host.embed(&guest);

            // then
            assert_eq!(embedding.offset, 2);
            assert_eq!(embedding.start_state, 5);
            assert_eq!(embedding.accept_states, vec![4, 5]);
            assert_eq!(host.num_states(), 5);
            assert_eq!(host.accept_states(), &[2]);
            assert_eq!(host.start_state(), 1);
            assert_eq!(host.transitions_from(4), &[edge(4, Label::Epsilon, 3)]);
            assert_eq!(
                host.transitions_from(5),
                &[edge(5, Label::Epsilon, 3), edge(5, Label::Epsilon, 5)]
            );
            assert_ids_in_range(&host);
        }

        #[test]
        fn embedding_leaves_the_guest_untouched() {
            let mut host = Nfa::from_symbol('a');
            let guest = Nfa::from_symbol('b');
            let copy = guest.clone();

            host.embed(&guest);

            assert_eq!(guest, copy);
        }

        #[test]
        fn embedding_the_empty_language_allocates_one_state() {
            let mut host = Nfa::from_epsilon();

            let embedding = host.embed(&Nfa::empty_language());

            assert_eq!(embedding.offset, 2);
            assert_eq!(embedding.start_state, 3);
            assert!(embedding.accept_states.is_empty());
            assert_eq!(host.num_states(), 3);
        }
    }

    mod concatenate {
        use super::*;

        #[test]
        fn numbering_follows_the_left_fragment() {
            // given
            let mut nfa = Nfa::from_symbol('a');

            // when
            nfa.concatenate(&Nfa::from_symbol('b'));

            // then
            assert_eq!(nfa.num_states(), 4);
            assert_eq!(nfa.start_state(), 1);
            assert_eq!(nfa.accept_states(), &[4]);
            assert_eq!(
                nfa.transitions().copied().collect::<Vec<_>>(),
                vec![
                    edge(1, Label::Symbol('a'), 2),
                    edge(2, Label::Epsilon, 3),
                    edge(3, Label::Symbol('b'), 4),
                ]
            );
        }

        #[rstest]
        #[case('a', 'b', "ab")]
        #[case('1', '2', "12")]
        #[case('$', '%', "$%")]
        #[case('z', 'z', "zz")]
        fn should_match_concatenated_string(
            #[case] char1: char,
            #[case] char2: char,
            #[case] expected_str: &str,
        ) {
            //given
            let mut nfa1 = Nfa::from_symbol(char1);
            let nfa2 = Nfa::from_symbol(char2);

            //when
            nfa1.concatenate(&nfa2);

            //then
            assert!(nfa1.accepts(expected_str));
        }

        #[rstest]
        #[case('a', 'b', "a")]
        #[case('a', 'b', "abc")]
        #[case('a', 'b', "")]
        #[case('a', 'b', "ba")]
        #[case('a', 'b', "b")]
        #[case('a', 'b', "aa")]
        fn should_not_match_concatenated_string(
            #[case] char1: char,
            #[case] char2: char,
            #[case] input_str: &str,
        ) {
            //given
            let mut nfa1 = Nfa::from_symbol(char1);
            let nfa2 = Nfa::from_symbol(char2);

            //when
            nfa1.concatenate(&nfa2);

            //then
            assert!(!nfa1.accepts(input_str));
        }

        #[test]
        fn empty_language_on_either_side_absorbs() {
            let mut left_empty = Nfa::empty_language();
            left_empty.concatenate(&Nfa::from_symbol('a'));
            let mut right_empty = Nfa::from_symbol('a');
            right_empty.concatenate(&Nfa::empty_language());

            for nfa in [left_empty, right_empty] {
                assert_eq!(nfa.num_states(), 3);
                assert!(!nfa.accepts(""));
                assert!(!nfa.accepts("a"));
                assert_ids_in_range(&nfa);
            }
        }

        #[test]
        fn epsilon_is_neutral() {
            let mut nfa = Nfa::from_epsilon();
            nfa.concatenate(&Nfa::from_symbol('a'));
            nfa.concatenate(&Nfa::from_epsilon());

            assert!(nfa.accepts("a"));
            assert!(!nfa.accepts(""));
            assert!(!nfa.accepts("aa"));
        }
    }

    mod alternate {
        use super::*;

        #[test]
        fn new_start_state_is_allocated_last() {
            // given
            let mut nfa = Nfa::from_symbol('a');

            // when
            nfa.alternate(&Nfa::from_symbol('b'));

            // then
            assert_eq!(nfa.num_states(), 5);
            assert_eq!(nfa.start_state(), 5);
            assert_eq!(nfa.accept_states(), &[2, 4]);
            assert_eq!(
                nfa.transitions_from(5),
                &[edge(5, Label::Epsilon, 1), edge(5, Label::Epsilon, 3)]
            );
            assert_ids_in_range(&nfa);
        }

        #[rstest]
        #[case('a', 'b', "a")]
        #[case('a', 'b', "b")]
        #[case('$', '%', "%")]
        #[case('z', 'z', "z")]
        fn should_match_alternate_string(
            #[case] char1: char,
            #[case] char2: char,
            #[case] input_str: &str,
        ) {
            let mut nfa1 = Nfa::from_symbol(char1);
            nfa1.alternate(&Nfa::from_symbol(char2));

            assert!(nfa1.accepts(input_str));
        }

        #[rstest]
        #[case('a', 'b', "c")]
        #[case('a', 'b', "ab")]
        #[case('a', 'b', "ba")]
        #[case('a', 'b', "aa")]
        #[case('a', 'b', "")]
        fn shouldnt_match_alternate_string(
            #[case] char1: char,
            #[case] char2: char,
            #[case] input_str: &str,
        ) {
            let mut nfa1 = Nfa::from_symbol(char1);
            nfa1.alternate(&Nfa::from_symbol(char2));

            assert!(!nfa1.accepts(input_str));
        }

        #[test]
        fn union_with_epsilon_accepts_the_empty_string() {
            let mut nfa = Nfa::from_symbol('a');
            nfa.alternate(&Nfa::from_epsilon());

            assert!(nfa.accepts(""));
            assert!(nfa.accepts("a"));
            assert!(!nfa.accepts("aa"));
        }
    }

    mod kleene_star {
        use super::*;

        #[test]
        fn new_start_state_is_also_accepting() {
            // given
            let mut nfa = Nfa::from_symbol('a');

            // when
            nfa.kleene_star();

            // then
            assert_eq!(nfa.num_states(), 3);
            assert_eq!(nfa.start_state(), 3);
            assert_eq!(nfa.accept_states(), &[2, 3]);
            assert_eq!(nfa.transitions_from(2), &[edge(2, Label::Epsilon, 1)]);
            assert_eq!(
                nfa.transitions_from(3),
                &[edge(3, Label::Epsilon, 1), edge(3, Label::Epsilon, 3)]
            );
        }

        #[rstest]
        #[case('a', "")]
        #[case('a', "a")]
        #[case('b', "bb")]
        #[case('c', "ccccc")]
        fn should_match_kleene_star_string(#[case] nfa_char: char, #[case] input_str: &str) {
            let mut base_nfa = Nfa::from_symbol(nfa_char);

            base_nfa.kleene_star();

            assert!(base_nfa.accepts(input_str));
        }

        #[rstest]
        #[case('a', "b")]
        #[case('a', "aaab")]
        #[case('a', "baaa")]
        #[case('a', "aabaa")]
        fn shouldnt_match_kleene_star_string(#[case] nfa_char: char, #[case] input_str: &str) {
            let mut base_nfa = Nfa::from_symbol(nfa_char);

            base_nfa.kleene_star();

            assert!(!base_nfa.accepts(input_str));
        }

        #[test]
        fn star_of_the_empty_language_accepts_only_the_empty_string() {
            let mut nfa = Nfa::empty_language();
            nfa.kleene_star();

            assert_eq!(nfa.num_states(), 2);
            assert!(nfa.accepts(""));
            assert!(!nfa.accepts("a"));
        }

        #[rstest]
        #[case("", true)]
        #[case("ab", true)]
        #[case("abab", true)]
        #[case("a", false)]
        #[case("aba", false)]
        #[case("ba", false)]
        fn star_over_a_concatenation_repeats_the_whole_word(
            #[case] input: &str,
            #[case] expected: bool,
        ) {
            // given: (ab)*
            let mut nfa = Nfa::from_symbol('a');
            nfa.concatenate(&Nfa::from_symbol('b'));

            // when
            nfa.kleene_star();

            // then
            assert_eq!(nfa.accepts(input), expected);
            assert_ids_in_range(&nfa);
        }
    }

    mod kleene_star_with_alternation {
        use super::*;

        #[rstest]
        #[case('a', 'b', "")]
        #[case('a', 'b', "ab")]
        #[case('0', '1', "010101")]
        #[case('#', '@', "#@#@##@@")]
        fn should_match_alternation_with_kleene_star(
            #[case] c1: char,
            #[case] c2: char,
            #[case] input: &str,
        ) {
            // given: build (c1|c2)*
            let mut nfa1 = Nfa::from_symbol(c1);
            nfa1.alternate(&Nfa::from_symbol(c2));
            nfa1.kleene_star();

            // then
            assert!(nfa1.accepts(input));
        }

        #[rstest]
        #[case('a', 'b', "c")]
        #[case('a', 'b', "abc")]
        #[case('0', '1', "0001112000111")]
        fn shouldnt_match_alternation_with_kleene_star(
            #[case] c1: char,
            #[case] c2: char,
            #[case] input: &str,
        ) {
            let mut nfa1 = Nfa::from_symbol(c1);
            nfa1.alternate(&Nfa::from_symbol(c2));
            nfa1.kleene_star();

            assert!(!nfa1.accepts(input));
        }
    }
}
