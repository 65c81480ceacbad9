pub trait Env {
    type State;
    type Action: ActionIndex;
    type Info: StepInfo;

    // reset the environment to its initial state
    fn reset(&mut self) -> Self::State;
    // take an action and return the next state, the reward, whether the episode is over and step info
    // must only be called while the previous step reported `done == false`
    fn step(&mut self, action: Self::Action) -> (Self::State, f32, bool, Self::Info);
    // get the current state of the environment
    fn current_state(&self) -> Self::State;
    // get the legal actions for the current state
    fn legal_actions(&self) -> Vec<Self::Action>;
    // check if the environment is in a terminal state
    fn is_terminal(&self) -> bool;
    // switch the simplified curriculum parameters on or off, most environments have none
    fn set_training_easy(&mut self, _easy: bool) {}
}

/// Conversion between a domain action and its slot in an action-value vector.
pub trait ActionIndex: Copy + Sized {
    const COUNT: usize;

    fn index(self) -> usize;
    fn from_index(index: usize) -> Option<Self>;

    fn all() -> Vec<Self> {
        (0..Self::COUNT).filter_map(Self::from_index).collect()
    }
}

/// Per-step diagnostics returned next to the reward.
pub trait StepInfo {
    // a domain score for progress reports, e.g. obstacles cleared or games won
    fn score(&self) -> f32;
}

pub use rand;
