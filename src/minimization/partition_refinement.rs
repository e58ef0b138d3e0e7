use std::collections::BTreeMap;

use bit_set::BitSet;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{math::Partition, prelude::*};

/// For each block, the index of the block its successor lies in, per symbol. `None` stands
/// for an undefined successor and is distinct from every block.
type Signature = Vec<Option<usize>>;

/// Maps every state to the position of the block containing it.
fn block_index(blocks: &[Vec<usize>], size: usize) -> Vec<usize> {
    let mut block_of = vec![0; size];
    for (i, block) in blocks.iter().enumerate() {
        for &state in block {
            block_of[state] = i;
        }
    }
    block_of
}

fn signature<D: Deterministic>(dfa: &D, state: usize, block_of: &[usize]) -> Signature {
    (0..dfa.alphabet().len())
        .map(|sym| dfa.successor(state, sym).map(|target| block_of[target]))
        .collect()
}

/// Singleton blocks keep the label of their only member, merged blocks are labelled with the
/// sorted labels of their members.
fn block_label<D: Deterministic>(dfa: &D, block: &[usize]) -> String {
    match block {
        [single] => dfa.state_label(*single),
        _ => format!(
            "{{{}}}",
            block.iter().map(|&q| dfa.state_label(q)).sorted().join(",")
        ),
    }
}

/// Computes the coarsest partition of the states of `dfa` that refines the split into
/// accepting and rejecting states and is stable under taking successors. Returns the blocks
/// (accepting block first, if any) and the number of rounds it took.
fn refine<D: Deterministic>(dfa: &D) -> (Vec<Vec<usize>>, usize) {
    let size = dfa.size();
    let (accepting, rejecting): (Vec<usize>, Vec<usize>) =
        (0..size).partition(|&q| dfa.is_accepting(q));
    let mut blocks: Vec<Vec<usize>> = [accepting, rejecting]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect();

    let mut rounds = 0;
    loop {
        rounds += 1;
        let block_of = block_index(&blocks, size);
        let mut refined = Vec::with_capacity(blocks.len());

        for block in &blocks {
            let mut by_signature: BTreeMap<Signature, Vec<usize>> = BTreeMap::new();
            for &state in block {
                by_signature
                    .entry(signature(dfa, state, &block_of))
                    .or_default()
                    .push(state);
            }
            if by_signature.len() > 1 {
                trace!(
                    "round {rounds}: splitting {:?} into {} blocks",
                    block,
                    by_signature.len()
                );
            }
            refined.extend(by_signature.into_values());
        }

        // blocks only ever split, so an unchanged count means nothing was split
        if refined.len() == blocks.len() {
            return (blocks, rounds);
        }
        blocks = refined;
    }
}

/// Returns the first block that contains both accepting and rejecting states.
fn mixed_block<'b, D: Deterministic>(
    dfa: &D,
    blocks: &'b [Vec<usize>],
) -> Option<&'b [usize]> {
    blocks
        .iter()
        .find(|block| !block.iter().map(|&q| dfa.is_accepting(q)).all_equal())
        .map(Vec::as_slice)
}

/// Minimizes `dfa` with Moore's algorithm and collects the quotient into a [`MinimalDfa`].
pub(crate) fn moore_partition_refinement<D: Deterministic>(dfa: &D) -> MinimalDfa {
    let (blocks, rounds) = refine(dfa);
    let block_of = block_index(&blocks, dfa.size());

    if let Some(block) = mixed_block(dfa, &blocks) {
        panic!("block {block:?} mixes accepting and rejecting states");
    }
    let mut accepting = BitSet::with_capacity(blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        if block.first().is_some_and(|&q| dfa.is_accepting(q)) {
            accepting.insert(i);
        }
    }

    let labels = blocks
        .iter()
        .map(|block| block_label(dfa, block))
        .collect();
    // all members of a block agree on the blocks of their successors, so any one will do
    let transitions = blocks
        .iter()
        .map(|block| signature(dfa, block[0], &block_of))
        .collect();

    debug!(
        "minimized {} states into {} after {rounds} rounds",
        dfa.size(),
        blocks.len()
    );

    let initial = block_of[dfa.initial()];
    MinimalDfa::from_parts(
        dfa.alphabet().clone(),
        Partition::new(blocks),
        block_of,
        labels,
        transitions,
        initial,
        accepting,
    )
}

#[cfg(test)]
mod tests {
    use super::{mixed_block, refine};
    use crate::{epsilon::remove_epsilon, prelude::*, subset::subset_construction};

    /// A deterministic automaton given by an explicit, possibly partial, table.
    struct Table {
        alphabet: Alphabet,
        rows: Vec<Vec<Option<usize>>>,
        accepting: Vec<bool>,
    }

    impl Deterministic for Table {
        fn alphabet(&self) -> &Alphabet {
            &self.alphabet
        }
        fn size(&self) -> usize {
            self.rows.len()
        }
        fn initial(&self) -> usize {
            0
        }
        fn is_accepting(&self, state: usize) -> bool {
            self.accepting[state]
        }
        fn successor(&self, state: usize, symbol: usize) -> Option<usize> {
            self.rows[state][symbol]
        }
        fn state_label(&self, state: usize) -> String {
            format!("s{state}")
        }
    }

    fn dfa_of(enfa: &EpsilonNfa) -> Dfa {
        subset_construction(&remove_epsilon(enfa))
    }

    #[test_log::test]
    fn textbook_automaton_loses_one_state() {
        let dfa = dfa_of(&crate::tests::textbook_enfa());
        let min = dfa.minimize();

        assert_eq!(dfa.size(), 5);
        assert_eq!(min.size(), 4);
        assert_eq!(min.accepting_states().count(), 1);
        assert!(min.is_total());
        // the initial set {0} behaves like the set reached on b
        let initial_block = min.block(min.initial()).unwrap();
        assert_eq!(initial_block.len(), 2);
        assert_eq!(min.block_of(dfa.transition(0, "b").unwrap()), Some(min.initial()));

        for word in crate::tests::all_words(dfa.alphabet(), 7) {
            assert_eq!(dfa.accepts(&word), min.accepts(&word), "{word:?}");
        }
    }

    #[test]
    fn dead_ends_with_equal_signatures_merge() {
        let enfa = EpsilonNfa::builder()
            .with_states(["q0", "q1", "q2", "q3"])
            .with_transitions([("q0", "a", "q1"), ("q0", "b", "q2"), ("q3", "a", "q3")])
            .with_initial("q0")
            .with_finals(["q3"])
            .build()
            .unwrap();
        let dfa = dfa_of(&enfa);
        let min = dfa.minimize();

        // {q0}, {q1}, {q2} and the dead state; q3 is unreachable
        assert_eq!(dfa.size(), 4);
        let q1 = dfa.id_of_subset(&StateSet::singleton("q1".into())).unwrap();
        let q2 = dfa.id_of_subset(&StateSet::singleton("q2".into())).unwrap();
        let dead = dfa.dead_state().unwrap();

        assert_eq!(min.block_of(q1), min.block_of(q2));
        assert_eq!(min.block_of(q1), min.block_of(dead));
        // the language is empty, so even the initial state joins the others
        assert_eq!(min.size(), 1);
        assert_eq!(min.accepting_states().count(), 0);
        assert_eq!(min.label(0), Some("{{q0},{q1},{q2},∅}"));
    }

    #[test]
    fn undefined_successor_is_not_a_real_block() {
        // every state rejects, but state 1 has no successor on `a`
        let table = Table {
            alphabet: Alphabet::of_size(1),
            rows: vec![vec![Some(2)], vec![None], vec![Some(2)]],
            accepting: vec![false, false, false],
        };
        let min = minimize(&table);

        assert_eq!(min.size(), 2);
        assert_eq!(min.block_of(0), min.block_of(2));
        assert_ne!(min.block_of(0), min.block_of(1));
        let lonely = min.block_of(1).unwrap();
        assert_eq!(min.label(lonely), Some("s1"));
        assert_eq!(min.successor(lonely, 0), None);
        assert!(!min.is_total());
    }

    #[test]
    fn blocks_are_homogeneous_and_cover_all_states() {
        let table = Table {
            alphabet: Alphabet::of_size(2),
            rows: vec![
                vec![Some(1), Some(2)],
                vec![Some(3), Some(4)],
                vec![Some(4), Some(3)],
                vec![Some(3), Some(3)],
                vec![Some(4), Some(4)],
            ],
            accepting: vec![false, false, false, true, true],
        };
        let min = minimize(&table);

        assert_eq!(min.partition().iter().map(|b| b.len()).sum::<usize>(), 5);
        for (id, block) in min.partition().iter().enumerate() {
            for &state in block {
                assert_eq!(table.is_accepting(state), min.is_accepting(id));
            }
        }
        // 1 and 2 both move into the accepting class on every symbol
        assert_eq!(min.block_of(1), min.block_of(2));
        assert_eq!(min.block_of(3), min.block_of(4));
        assert_eq!(min.size(), 3);
    }

    #[test]
    fn refined_blocks_never_mix_acceptance() {
        let table = Table {
            alphabet: Alphabet::of_size(2),
            rows: vec![
                vec![Some(1), None],
                vec![Some(1), Some(2)],
                vec![Some(0), Some(2)],
            ],
            accepting: vec![true, false, true],
        };
        let (blocks, _) = refine(&table);
        assert_eq!(mixed_block(&table, &blocks), None);

        let mixed = vec![vec![0, 2], vec![1, 2]];
        assert_eq!(mixed_block(&table, &mixed), Some(&[1, 2][..]));
    }

    #[test]
    fn minimizing_twice_changes_nothing() {
        let min = dfa_of(&crate::tests::textbook_enfa()).minimize();
        let again = min.minimize();
        assert!(again.partition().is_discrete());
        assert_eq!(again.size(), min.size());
    }

    #[test]
    fn empty_alphabet_gives_one_block() {
        let enfa = EpsilonNfa::builder()
            .with_states(["q0"])
            .with_initial("q0")
            .build()
            .unwrap();
        let min = dfa_of(&enfa).minimize();
        assert_eq!(min.size(), 1);
        assert_eq!(min.transitions().count(), 0);
        assert_eq!(min.label(0), Some("{q0}"));
    }
}
