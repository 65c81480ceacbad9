use std::path::PathBuf;

use env::{ActionIndex, Env, StepInfo};
use float_eq::assert_float_eq;
use machine_learning::q_learning::{evaluate, train, QLearningAgent, QTable};
use machine_learning::{QLearningConfig, TrainConfig};
use rstest::rstest;
use tempfile::TempDir;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Move {
    Left,
    Right,
}

impl ActionIndex for Move {
    const COUNT: usize = 2;

    fn index(self) -> usize {
        match self {
            Move::Left => 0,
            Move::Right => 1,
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Move::Left),
            1 => Some(Move::Right),
            _ => None,
        }
    }
}

struct Reached(bool);

impl StepInfo for Reached {
    fn score(&self) -> f32 {
        if self.0 {
            1.0
        } else {
            0.0
        }
    }
}

/// Walk right along a short corridor to the goal cell.
struct Corridor {
    length: u8,
    position: u8,
    easy_calls: Vec<bool>,
    // whether this file existed at each reset
    watched: Option<PathBuf>,
    seen_on_reset: Vec<bool>,
}

impl Corridor {
    fn new(length: u8) -> Self {
        Self {
            length,
            position: 0,
            easy_calls: Vec::new(),
            watched: None,
            seen_on_reset: Vec::new(),
        }
    }

    fn watching(length: u8, path: PathBuf) -> Self {
        Self {
            watched: Some(path),
            ..Self::new(length)
        }
    }
}

impl Env for Corridor {
    type State = u8;
    type Action = Move;
    type Info = Reached;

    fn reset(&mut self) -> u8 {
        if let Some(path) = &self.watched {
            self.seen_on_reset.push(path.exists());
        }
        self.position = 0;
        self.position
    }

    fn step(&mut self, action: Move) -> (u8, f32, bool, Reached) {
        match action {
            Move::Left => self.position = self.position.saturating_sub(1),
            Move::Right => self.position += 1,
        }
        let done = self.is_terminal();
        let reward = if done { 1.0 } else { -0.01 };
        (self.position, reward, done, Reached(done))
    }

    fn current_state(&self) -> u8 {
        self.position
    }

    fn legal_actions(&self) -> Vec<Move> {
        Move::all()
    }

    fn is_terminal(&self) -> bool {
        self.position + 1 >= self.length
    }

    fn set_training_easy(&mut self, easy: bool) {
        self.easy_calls.push(easy);
    }
}

fn agent_config() -> QLearningConfig {
    QLearningConfig {
        alpha: 0.5,
        gamma: 0.9,
        epsilon: 1.0,
        epsilon_min: 0.05,
        epsilon_decay: 0.95,
    }
}

fn train_config(episodes: usize) -> TrainConfig {
    TrainConfig {
        episodes,
        easy_episodes: 3,
        max_steps_per_episode: 200,
        log_every: 10,
        autosave_every: 0,
        stats_window: 10,
    }
}

fn assert_tables_close(actual: &QTable<u8>, expected: &QTable<u8>) {
    assert_eq!(actual.len(), expected.len());
    for (state, values) in expected.iter() {
        let loaded = actual.peek(state).expect("state missing after reload");
        assert_eq!(loaded.len(), values.len());
        for (a, b) in loaded.iter().zip(values) {
            assert_float_eq!(*a, *b, abs <= 1e-6);
        }
    }
}

#[test]
fn training_learns_to_walk_right() {
    let mut env = Corridor::new(5);
    let mut agent = QLearningAgent::new(Move::COUNT, agent_config(), Some(7)).unwrap();

    let summary = train(&mut env, &mut agent, &train_config(300), None).unwrap();

    assert_eq!(summary.episodes, 300);
    assert_float_eq!(summary.final_epsilon, 0.05, abs <= 1e-6);
    assert_eq!(summary.best_score, 1.0);
    for state in 0..4u8 {
        let row = agent.q_values(&state).to_vec();
        assert!(row[1] > row[0], "state {state}: {row:?}");
    }

    let report = evaluate(&mut env, &mut agent, 5, 50);
    assert_eq!(report.episodes(), 5);
    assert_eq!(report.mean_score(), 1.0);
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(40)]
fn epsilon_decays_once_per_episode(#[case] episodes: usize) {
    let mut env = Corridor::new(3);
    let mut agent = QLearningAgent::new(Move::COUNT, agent_config(), Some(1)).unwrap();

    train(&mut env, &mut agent, &train_config(episodes), None).unwrap();

    let expected = 0.95f32.powi(episodes as i32).max(0.05);
    assert_float_eq!(agent.epsilon(), expected, rmax <= 1e-4);
}

#[test]
fn curriculum_covers_only_the_first_episodes() {
    let mut env = Corridor::new(3);
    let mut agent = QLearningAgent::new(Move::COUNT, agent_config(), Some(1)).unwrap();

    train(&mut env, &mut agent, &train_config(6), None).unwrap();

    assert_eq!(env.easy_calls, vec![true, true, true, false, false, false]);
}

#[test]
fn checkpoint_matches_the_trained_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corridor.json");
    let mut env = Corridor::new(4);
    let mut agent = QLearningAgent::new(Move::COUNT, agent_config(), Some(3)).unwrap();
    let config = TrainConfig {
        autosave_every: 5,
        ..train_config(20)
    };

    let summary = train(&mut env, &mut agent, &config, Some(path.as_path())).unwrap();

    assert_eq!(summary.checkpoints, 5);
    let saved = QTable::<u8>::load(&path, Move::COUNT).unwrap();
    assert_tables_close(&saved, agent.table());
}

#[test]
fn autosave_writes_the_table_during_training() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corridor.json");
    let mut env = Corridor::watching(4, path.clone());
    let mut agent = QLearningAgent::new(Move::COUNT, agent_config(), Some(5)).unwrap();
    let config = TrainConfig {
        autosave_every: 5,
        ..train_config(12)
    };

    let summary = train(&mut env, &mut agent, &config, Some(path.as_path())).unwrap();

    // saves after episodes 5 and 10, then the final one after 12
    assert_eq!(summary.checkpoints, 3);
    let mut expected = vec![false; 5];
    expected.extend([true; 7]);
    assert_eq!(env.seen_on_reset, expected);
}

#[test]
fn no_checkpoint_path_means_no_saves() {
    let mut env = Corridor::new(4);
    let mut agent = QLearningAgent::new(Move::COUNT, agent_config(), Some(5)).unwrap();
    let config = TrainConfig {
        autosave_every: 2,
        ..train_config(6)
    };
    let summary = train(&mut env, &mut agent, &config, None).unwrap();
    assert_eq!(summary.checkpoints, 0);
}

#[test]
fn save_then_load_reproduces_the_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("table.json");

    let mut trained = QLearningAgent::new(Move::COUNT, agent_config(), Some(9)).unwrap();
    let mut env = Corridor::new(6);
    train(&mut env, &mut trained, &train_config(50), None).unwrap();
    trained.save(&path).unwrap();

    let mut restored: QLearningAgent<u8> =
        QLearningAgent::new(Move::COUNT, agent_config().greedy(), None).unwrap();
    restored.load(&path).unwrap();

    assert_tables_close(restored.table(), trained.table());
}
