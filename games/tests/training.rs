use env::{ActionIndex, Env};
use games::dino::{Game, RunnerAction, RunnerState};
use games::tictactoe::{Board, RandomOpponent, Square, TicTacToe};
use machine_learning::q_learning::{evaluate, train, QLearningAgent};
use machine_learning::{QLearningConfig, TrainConfig};

#[test]
fn runner_training_fills_the_table_and_decays_exploration() {
    let mut game = Game::new(Some(17));
    let mut agent: QLearningAgent<RunnerState> =
        QLearningAgent::new(RunnerAction::COUNT, QLearningConfig::default(), Some(17)).unwrap();
    let config = TrainConfig {
        episodes: 60,
        easy_episodes: 20,
        max_steps_per_episode: 3_000,
        log_every: 0,
        autosave_every: 0,
        stats_window: 20,
    };

    let summary = train(&mut game, &mut agent, &config, None).unwrap();

    assert_eq!(summary.episodes, 60);
    assert!(summary.table_size > 10);
    assert!(summary.final_epsilon < 1.0);
    for (_, values) in agent.table().iter() {
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn runner_playback_is_deterministic_for_a_seed() {
    let playback = || {
        let mut agent: QLearningAgent<RunnerState> = QLearningAgent::new(
            RunnerAction::COUNT,
            QLearningConfig::default().greedy(),
            Some(1),
        ).unwrap();
        evaluate(&mut Game::new(Some(5)), &mut agent, 3, 2_000)
    };
    let first = playback();
    assert_eq!(first.episodes(), 3);
    assert_eq!(first, playback());
}

#[test]
fn tictactoe_bot_beats_a_random_opponent() {
    let mut game = TicTacToe::new(Box::new(RandomOpponent::new(Some(7))));
    let mut agent: QLearningAgent<Board> =
        QLearningAgent::new(Square::COUNT, QLearningConfig::tictactoe(), Some(7)).unwrap();
    let config = TrainConfig {
        log_every: 0,
        autosave_every: 0,
        ..TrainConfig::tictactoe()
    };

    train(&mut game, &mut agent, &config, None).unwrap();
    let report = evaluate(&mut game, &mut agent, 1_000, 9);

    // an untrained X wins roughly 58% of games against random play
    assert!(report.mean_score() > 0.7, "win rate {}", report.mean_score());
}

#[test]
fn tictactoe_greedy_choice_is_always_legal() {
    let mut game = TicTacToe::new(Box::new(RandomOpponent::new(Some(3))));
    let mut agent: QLearningAgent<Board> =
        QLearningAgent::new(Square::COUNT, QLearningConfig::tictactoe(), Some(3)).unwrap();

    for _ in 0..200 {
        let mut state = game.reset();
        loop {
            let legal: Vec<usize> = game.legal_actions().iter().map(|s| s.index()).collect();
            let action = agent.choose(&state, &legal).expect("bot has a move");
            assert!(legal.contains(&action));
            let (next, reward, done, _) = game.step(Square(action as u8));
            let next_legal: Vec<usize> = game.legal_actions().iter().map(|s| s.index()).collect();
            agent.update_restricted(&state, action, reward, &next, &next_legal, done);
            state = next;
            if done {
                break;
            }
        }
        agent.decay_epsilon();
    }
}
