use std::collections::HashMap;
use std::hash::Hash;

/// Action-value table: one vector of `n_actions` estimated returns per state.
///
/// Rows are created lazily, zero-filled, the first time a state is looked up
/// and are never removed.
#[derive(Debug, Clone)]
pub struct QTable<S> {
    n_actions: usize,
    values: HashMap<S, Vec<f32>>,
}

impl<S> QTable<S>
where
    S: Clone + Eq + Hash,
{
    pub fn new(n_actions: usize) -> Self {
        Self {
            n_actions,
            values: HashMap::new(),
        }
    }

    pub(crate) fn from_rows(n_actions: usize, values: HashMap<S, Vec<f32>>) -> Self {
        Self { n_actions, values }
    }

    /// Row for `state`, inserting a zero row first if the state is new.
    pub fn get(&mut self, state: &S) -> &mut [f32] {
        let n_actions = self.n_actions;
        self.values
            .entry(state.clone())
            .or_insert_with(|| vec![0.0; n_actions])
    }

    /// Row for `state` without creating it.
    pub fn peek(&self, state: &S) -> Option<&[f32]> {
        self.values.get(state).map(Vec::as_slice)
    }

    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &[f32])> {
        self.values.iter().map(|(s, v)| (s, v.as_slice()))
    }
}

impl<S> PartialEq for QTable<S>
where
    S: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.n_actions == other.n_actions && self.values == other.values
    }
}
