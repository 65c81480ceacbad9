use std::hash::Hash;

use env::rand::seq::IndexedRandom;
use env::rand::Rng;

use super::q_table::QTable;
use super::q_utils::greedy_ties;

/// Epsilon-greedy action selection.
///
/// With probability `epsilon` a uniformly random action from `valid` is
/// returned; otherwise one of the valid actions holding the maximum estimate,
/// ties broken uniformly at random. Returns `None` only when `valid` is empty.
/// Looking the state up creates its row if needed.
pub fn epsilon_greedy<S, R>(
    table: &mut QTable<S>,
    state: &S,
    epsilon: f32,
    valid: &[usize],
    rng: &mut R,
) -> Option<usize>
where
    S: Clone + Eq + Hash,
    R: Rng + ?Sized,
{
    let values = table.get(state);
    if valid.is_empty() {
        return None;
    }

    if rng.random::<f32>() < epsilon {
        return valid.choose(rng).copied();
    }

    let ties = greedy_ties(values, valid);
    ties.choose(rng)
        .or_else(|| valid.choose(rng))
        .copied()
}
