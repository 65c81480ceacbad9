use env::rand::rngs::StdRng;
use env::rand::{Rng, SeedableRng};
use env::{ActionIndex, Env, StepInfo};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use tracing::trace;

use super::state::RunnerState;
use super::world::{Dino, Rect, Track, DINO_X, GROUND_Y, HEIGHT, WIDTH};

pub const SURVIVE_REWARD: f32 = 0.10;
pub const JUMP_PENALTY: f32 = 0.05;
pub const CRASH_REWARD: f32 = -100.0;
pub const CLEAR_REWARD: f32 = 10.0;

const CELL_W: f32 = 10.0;
const CELL_H: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunnerAction {
    Idle,
    Jump,
}

impl ActionIndex for RunnerAction {
    const COUNT: usize = 2;

    fn index(self) -> usize {
        match self {
            RunnerAction::Idle => 0,
            RunnerAction::Jump => 1,
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(RunnerAction::Idle),
            1 => Some(RunnerAction::Jump),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunnerInfo {
    pub steps: usize,
    pub cleared: usize,
}

impl StepInfo for RunnerInfo {
    fn score(&self) -> f32 {
        self.cleared as f32
    }
}

pub struct Game {
    dino: Dino,
    track: Track,
    rng: StdRng,
    training_easy: bool,
    done: bool,
    steps: usize,
    cleared: usize,
}

impl Game {
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(env::rand::rng().random()),
        };
        let track = Track::new(&mut rng, false);
        Game {
            dino: Dino::default(),
            track,
            rng,
            training_easy: false,
            done: false,
            steps: 0,
            cleared: 0,
        }
    }

    pub fn info(&self) -> RunnerInfo {
        RunnerInfo {
            steps: self.steps,
            cleared: self.cleared,
        }
    }

    fn observe(&self) -> RunnerState {
        match self.track.next_obstacle() {
            Some(next) => RunnerState::observe(&self.dino, next),
            // the track always holds two obstacles after reset
            None => RunnerState {
                dist_bin: super::state::FAR_DISTANCE_BIN,
                height_bin: 0,
                width_bin: 0,
                on_ground: self.dino.on_ground,
                y_bin: 0,
                vy_bin: 0,
            },
        }
    }

    fn advance(&mut self, action: RunnerAction) -> f32 {
        let mut reward = SURVIVE_REWARD;

        if action == RunnerAction::Jump && self.dino.jump() {
            reward -= JUMP_PENALTY;
        }
        self.dino.apply_physics();
        self.track.advance(&mut self.rng, self.training_easy);
        self.steps += 1;

        let dino_rect = self.dino.rect();
        for obstacle in &mut self.track.obstacles {
            if dino_rect.overlaps(&obstacle.rect()) {
                self.done = true;
                reward = CRASH_REWARD;
                trace!(steps = self.steps, cleared = self.cleared, "runner crashed");
                break;
            }
            if !obstacle.passed && obstacle.right() < DINO_X {
                obstacle.passed = true;
                self.cleared += 1;
                reward += CLEAR_REWARD;
            }
        }
        reward
    }

    pub fn render(&self) -> (Text, &'static str) {
        let mut lines = vec![Line::from(format!(
            "Cleared: {}  Steps: {}{}",
            self.cleared,
            self.steps,
            if self.training_easy { "  (easy)" } else { "" }
        ))];

        let cols = (WIDTH / CELL_W) as i32;
        let rows = (HEIGHT / CELL_H) as i32;
        let ground_row = (GROUND_Y / CELL_H) as i32;
        let dino_rect = self.dino.rect();
        let obstacle_rects: Vec<Rect> = self.track.obstacles.iter().map(|o| o.rect()).collect();

        for row in 0..rows {
            let mut spans = Vec::with_capacity(cols as usize);
            for col in 0..cols {
                let cell = Rect {
                    x: (col as f32 * CELL_W) as i32,
                    y: (row as f32 * CELL_H) as i32,
                    w: CELL_W as i32,
                    h: CELL_H as i32,
                };
                let (ch, style) = if cell.overlaps(&dino_rect) {
                    let fg = if self.done { Color::Red } else { Color::Green };
                    ('@', Style::default().fg(fg))
                } else if obstacle_rects.iter().any(|r| cell.overlaps(r)) {
                    ('#', Style::default().fg(Color::Yellow))
                } else if row > ground_row {
                    ('=', Style::default().fg(Color::DarkGray))
                } else {
                    (' ', Style::default())
                };
                spans.push(Span::styled(ch.to_string(), style));
            }
            lines.push(Line::from(spans));
        }

        let title = if self.done { "Game Over" } else { "Dino Runner" };
        (Text::from(lines), title)
    }
}

impl Env for Game {
    type State = RunnerState;
    type Action = RunnerAction;
    type Info = RunnerInfo;

    fn reset(&mut self) -> Self::State {
        self.done = false;
        self.steps = 0;
        self.cleared = 0;
        self.dino = Dino::default();
        self.track = Track::new(&mut self.rng, self.training_easy);
        self.observe()
    }

    fn step(&mut self, action: RunnerAction) -> (Self::State, f32, bool, Self::Info) {
        if self.done {
            return (self.observe(), 0.0, true, self.info());
        }
        let reward = self.advance(action);
        (self.observe(), reward, self.done, self.info())
    }

    fn current_state(&self) -> Self::State {
        self.observe()
    }

    fn legal_actions(&self) -> Vec<Self::Action> {
        RunnerAction::all()
    }

    fn is_terminal(&self) -> bool {
        self.done
    }

    fn set_training_easy(&mut self, easy: bool) {
        self.training_easy = easy;
    }
}
