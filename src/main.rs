//! Terminal 15-puzzle runner (default binary).
//!
//! Uses crossterm for input and the line-based renderer from `puzzle15::term`.
//! Gamepad polling (`GamepadTranslator::poll`) and tile clicks
//! (`GameAction::Select`) are left to hosts that have those devices.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use puzzle15::config::AppConfig;
use puzzle15::core::{Game, GameEvent};
use puzzle15::input::{handle_key_event, should_quit};
use puzzle15::ranking::{JsonFileStore, MemoryStore, Ranking, RankingConfig, RankingStore};
use puzzle15::term::{BoardView, Frame, TerminalRenderer};
use puzzle15::types::{RANKING_LIMIT, TICK_MS};

fn main() -> Result<()> {
    let config = AppConfig::load(std::env::args_os())?;
    init_logging(&config)?;

    let game = match config.seed {
        Some(seed) => Game::new(seed),
        None => Game::from_entropy(),
    };
    info!(seed = game.seed(), "session created");

    let ranking_config = RankingConfig::from_env();
    match &config.ranking_dir {
        Some(dir) => {
            let ranking = Ranking::with_config(JsonFileStore::new(dir), ranking_config);
            run_terminal(game, ranking)
        }
        None => {
            let ranking = Ranking::with_config(MemoryStore::new(), ranking_config);
            run_terminal(game, ranking)
        }
    }
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level)
        .init();
    Ok(())
}

fn run_terminal<S: RankingStore>(game: Game, ranking: Ranking<S>) -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game, ranking);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run<S: RankingStore>(
    term: &mut TerminalRenderer,
    mut game: Game,
    mut ranking: Ranking<S>,
) -> Result<()> {
    let view = BoardView::default();
    let mut frame = Frame::new();
    let mut best = ranking.top(RANKING_LIMIT);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        view.render_into(&game.snapshot(), &best, &mut frame);
        term.draw_swap(&mut frame)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if let Some(GameEvent::Completed { time, moves }) = game.tick(TICK_MS) {
                ranking.record(&time, moves);
                best = ranking.top(RANKING_LIMIT);
            }
        }
    }
}
