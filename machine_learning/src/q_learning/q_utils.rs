use env::ActionIndex;

/// Largest estimate in a row; NaN entries are ignored. An empty row bootstraps 0.
pub fn max_value(values: &[f32]) -> f32 {
    values
        .iter()
        .copied()
        .filter(|q| !q.is_nan())
        .fold(None, |best: Option<f32>, q| Some(best.map_or(q, |b| b.max(q))))
        .unwrap_or(0.0)
}

/// Largest estimate among `valid` slots of a row. No valid slot bootstraps 0.
pub fn max_value_over(values: &[f32], valid: &[usize]) -> f32 {
    valid
        .iter()
        .map(|&a| values[a])
        .filter(|q| !q.is_nan())
        .fold(None, |best: Option<f32>, q| Some(best.map_or(q, |b| b.max(q))))
        .unwrap_or(0.0)
}

/// Every valid action whose estimate equals the maximum exactly.
pub fn greedy_ties(values: &[f32], valid: &[usize]) -> Vec<usize> {
    if valid.is_empty() {
        return Vec::new();
    }
    let best = max_value_over(values, valid);
    valid
        .iter()
        .copied()
        .filter(|&a| values[a] == best)
        .collect()
}

pub fn action_indices<A: ActionIndex>(actions: &[A]) -> Vec<usize> {
    actions.iter().map(|a| a.index()).collect()
}
