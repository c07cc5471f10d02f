mod game;
mod ghost;
mod grid;
mod highscore;
mod render;

use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::info;

use crate::game::{Game, Status, TICKS_PER_SECOND};
use crate::grid::{Dir, Grid, DEFAULT_LAYOUT};
use crate::highscore::HighScoreStore;
use crate::render::Renderer;

const TICK_MS_ENV: &str = "MUNCHER_TICK_MS";
/// A key counts as held while its last press is at most this old. Raw
/// terminals report no key-up events, so held keys are inferred from
/// repeat presses.
const INPUT_HOLD_MS: u64 = 160;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let grid = Grid::parse(&DEFAULT_LAYOUT).context("invalid maze layout")?;
    let store = HighScoreStore::from_env();
    let high_score = store.load();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, grid, high_score, &store);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(
    stdout: &mut Stdout,
    grid: Grid,
    high_score: u32,
    store: &HighScoreStore,
) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();
    let mut game = Game::new(grid, high_score);
    let mut renderer = Renderer::new(game.grid.width() as usize, game.grid.height() as usize);
    let mut input = InputState::new();

    let tick_time = Duration::from_millis(read_tick_ms());
    let mut last_tick = Instant::now();
    renderer.draw(stdout, &game)?;

    loop {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        store.save(game.high_score);
                        info!("quit with score {}", game.score);
                        return Ok(());
                    }
                    KeyCode::Up | KeyCode::Char('k') => input.press(Dir::Up),
                    KeyCode::Down | KeyCode::Char('j') => input.press(Dir::Down),
                    KeyCode::Left | KeyCode::Char('h') => input.press(Dir::Left),
                    KeyCode::Right | KeyCode::Char('l') => input.press(Dir::Right),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_time {
            last_tick = Instant::now();
            let (dx, dy) = input.displacement();
            let status = game.tick(&mut rng, dx, dy);
            renderer.draw(stdout, &game)?;
            if status == Status::GameOver {
                store.save(game.high_score);
                info!("game over with score {}", game.score);
                renderer.draw_game_over(stdout, &game)?;
                wait_for_quit()?;
                return Ok(());
            }
        }

        thread::sleep(Duration::from_millis(1));
    }
}

fn read_tick_ms() -> u64 {
    let default = 1000 / TICKS_PER_SECOND as u64;
    std::env::var(TICK_MS_ENV)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn wait_for_quit() -> io::Result<()> {
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    return Ok(());
                }
            }
        }
    }
}

/// Four independent directional signals, each active while recently
/// pressed. Opposite directions cancel, adjacent ones combine into a
/// diagonal displacement.
struct InputState {
    last_seen: [Option<Instant>; 4],
}

impl InputState {
    fn new() -> Self {
        Self {
            last_seen: [None; 4],
        }
    }

    fn press(&mut self, dir: Dir) {
        self.last_seen[Self::slot(dir)] = Some(Instant::now());
    }

    fn displacement(&self) -> (i32, i32) {
        let now = Instant::now();
        let hold = Duration::from_millis(INPUT_HOLD_MS);
        let mut dx = 0;
        let mut dy = 0;
        for dir in Dir::ALL {
            if let Some(t) = self.last_seen[Self::slot(dir)] {
                if now.duration_since(t) <= hold {
                    let (x, y) = dir.delta();
                    dx += x;
                    dy += y;
                }
            }
        }
        (dx, dy)
    }

    fn slot(dir: Dir) -> usize {
        match dir {
            Dir::Up => 0,
            Dir::Down => 1,
            Dir::Left => 2,
            Dir::Right => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_directions_cancel() {
        let mut input = InputState::new();
        input.press(Dir::Left);
        input.press(Dir::Right);
        assert_eq!(input.displacement(), (0, 0));
    }

    #[test]
    fn adjacent_directions_combine_diagonally() {
        let mut input = InputState::new();
        input.press(Dir::Up);
        input.press(Dir::Right);
        assert_eq!(input.displacement(), (1, -1));
    }

    #[test]
    fn stale_presses_expire() {
        let mut input = InputState::new();
        input.press(Dir::Down);
        input.last_seen[InputState::slot(Dir::Down)] =
            Some(Instant::now() - Duration::from_millis(INPUT_HOLD_MS * 2));
        assert_eq!(input.displacement(), (0, 0));
    }
}
