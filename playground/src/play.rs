use std::hash::Hash;
use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use env::{ActionIndex, Env, StepInfo};
use games::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use games::crossterm::execute;
use games::crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use games::dino::{Game, RunnerAction};
use games::ratatui::backend::CrosstermBackend;
use games::ratatui::layout::{Constraint, Layout};
use games::ratatui::text::Text;
use games::ratatui::widgets::{Block, Borders, Paragraph};
use games::ratatui::Terminal;
use games::tictactoe::{Board, Outcome, Square, TicTacToe};
use machine_learning::q_learning::{action_indices, evaluate, run_episode, QLearningAgent};
use machine_learning::{QLearningConfig, TrainConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::{GameKind, PlayArgs};
use crate::opponent_for;

/// How long the final position stays on screen before the next episode.
const GAME_OVER_PAUSE_MS: u64 = 1_500;

pub fn execute(args: PlayArgs) -> Result<()> {
    let table = args.table.clone().unwrap_or_else(|| args.game.default_table());

    match args.game {
        GameKind::Runner => {
            let agent = load_agent(RunnerAction::COUNT, &table, args.seed)?;
            let game = Game::new(args.seed);
            let max_steps = TrainConfig::default().max_steps_per_episode;
            if args.headless {
                report(game, agent, args.episodes, max_steps);
                Ok(())
            } else {
                watch(game, agent, args.frame_ms, Game::render)
            }
        }
        GameKind::Tictactoe => {
            let mut agent = load_agent(Square::COUNT, &table, args.seed)?;
            let mut game = TicTacToe::new(opponent_for(args.opponent, args.seed));
            if args.headless {
                let Tally { wins, draws, losses } = tally(&mut game, &mut agent, args.episodes);
                info!(games = args.episodes, wins, draws, losses, "tic-tac-toe playback");
                Ok(())
            } else {
                // one move per frame is too fast to follow
                watch(game, agent, args.frame_ms.max(400), TicTacToe::render)
            }
        }
    }
}

fn load_agent<S>(n_actions: usize, table: &Path, seed: Option<u64>) -> Result<QLearningAgent<S>>
where
    S: Clone + Eq + Hash + Serialize + DeserializeOwned,
{
    let mut agent = QLearningAgent::new(n_actions, QLearningConfig::default().greedy(), seed)?;
    if let Err(err) = agent.load(table) {
        if err.is_not_found() {
            bail!(
                "no trained table at {}, run `train` first",
                table.display()
            );
        }
        return Err(err).with_context(|| format!("Failed to load table: {}", table.display()));
    }
    Ok(agent)
}

fn report<E>(mut env: E, mut agent: QLearningAgent<E::State>, episodes: usize, max_steps: usize)
where
    E: Env,
    E::State: Clone + Eq + Hash,
{
    let report = evaluate(&mut env, &mut agent, episodes, max_steps);
    let best = report.scores.iter().copied().fold(0.0f32, f32::max);
    info!(
        episodes = report.episodes(),
        mean_score = report.mean_score(),
        best_score = best,
        mean_reward = report.mean_reward(),
        "greedy playback"
    );
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    wins: usize,
    draws: usize,
    losses: usize,
}

/// Plays `rounds` greedy games and counts how each one ended.
fn tally(env: &mut TicTacToe, agent: &mut QLearningAgent<Board>, rounds: usize) -> Tally {
    let mut tally = Tally::default();
    for _ in 0..rounds {
        run_episode(env, agent, 0.0, Square::COUNT, false);
        match env.outcome() {
            Outcome::BotWin => tally.wins += 1,
            Outcome::Draw => tally.draws += 1,
            Outcome::OpponentWin => tally.losses += 1,
            Outcome::InProgress => warn!("game stopped before it finished"),
        }
    }
    tally
}

/// Animates greedy play until `q` is pressed, restarting after each episode.
fn watch<E, R>(mut env: E, mut agent: QLearningAgent<E::State>, frame_ms: u64, render: R) -> Result<()>
where
    E: Env,
    E::State: Clone + Eq + Hash,
    R: Fn(&E) -> (Text<'_>, &'static str),
{
    enable_raw_mode()?;
    let result = animate(&mut env, &mut agent, frame_ms, render);
    disable_raw_mode()?;
    execute!(io::stdout(), Clear(ClearType::All))?;
    result
}

fn animate<E, R>(
    env: &mut E,
    agent: &mut QLearningAgent<E::State>,
    frame_ms: u64,
    render: R,
) -> Result<()>
where
    E: Env,
    E::State: Clone + Eq + Hash,
    R: Fn(&E) -> (Text<'_>, &'static str),
{
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    execute!(io::stdout(), Clear(ClearType::All))?;

    let mut state = env.reset();
    let mut episode = 1;
    let mut total_reward = 0.0;
    let hold_frames = (GAME_OVER_PAUSE_MS / frame_ms.max(1)).max(1);
    let mut hold = 0;

    loop {
        terminal.draw(|f| {
            let layout = Layout::default()
                .constraints([Constraint::Min(0)])
                .split(f.area());
            let (content, title) = render(&*env);
            let title = format!("{title} | episode {episode} | q to quit");
            let para =
                Paragraph::new(content).block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(para, layout[0]);
        })?;

        if event::poll(Duration::from_millis(frame_ms))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }

        if env.is_terminal() {
            hold += 1;
            if hold >= hold_frames {
                hold = 0;
                episode += 1;
                total_reward = 0.0;
                state = env.reset();
            }
            continue;
        }

        let legal = action_indices(&env.legal_actions());
        let Some(action) = agent
            .greedy(&state, &legal)
            .and_then(E::Action::from_index)
        else {
            warn!(episode, "no legal action, restarting");
            state = env.reset();
            continue;
        };

        let (next, reward, done, info) = env.step(action);
        total_reward += reward;
        state = next;
        if done {
            debug!(episode, score = info.score(), total_reward, "episode finished");
        }
    }
}
