//! Terminal renderer: reads the game state, never mutates it.
//!
//! Keeps a per-cell cache of the last frame and only redraws cells that
//! changed, plus the HUD line above the maze.

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::game::Game;
use crate::grid::Pos;

const CELL_W: usize = 2;
const FRIGHTENED_COLOR: Color = Color::Blue;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Ghost,
    Frightened,
    Wall,
    Empty,
    Pellet,
    Power,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

pub struct Renderer {
    width: usize,
    height: usize,
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn draw(&mut self, stdout: &mut Stdout, game: &Game) -> io::Result<()> {
        let needed_h = (self.height + 2) as u16;
        let needed_w = (self.width * CELL_W) as u16;

        stdout.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            stdout.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            stdout.queue(Print(msg))?;
            stdout.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }

        let hud = format!(
            "Score: {}  High: {}  Lives: {}  Pellets: {}  (q to quit)",
            game.score,
            game.high_score,
            game.lives,
            game.grid.pellets_left()
        );
        if self.needs_full || hud != self.last_hud {
            stdout.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            stdout.queue(SetForegroundColor(Color::White))?;
            stdout.queue(Clear(ClearType::CurrentLine))?;
            stdout.queue(Print(&hud))?;
            stdout.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let cell = cell_for(game, Pos::new(x as i32, y as i32));
                let idx = y * self.width + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(stdout, x, y, cell)?;
                }
            }
        }
        self.needs_full = false;

        stdout.flush()?;
        Ok(())
    }

    /// Final-screen banner under the maze.
    pub fn draw_game_over(&self, stdout: &mut Stdout, game: &Game) -> io::Result<()> {
        stdout.queue(MoveTo(self.origin_x, self.origin_y + self.height as u16))?;
        stdout.queue(Print(format!(
            "GAME OVER - Score: {}  High: {} (press q to quit)",
            game.score, game.high_score
        )))?;
        stdout.flush()?;
        Ok(())
    }

    fn draw_cell(&self, stdout: &mut Stdout, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => "😃",
            Glyph::Ghost => "👻",
            Glyph::Frightened => "😱",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Pellet => "· ",
            Glyph::Power => "● ",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        stdout.queue(MoveTo(x_pos, y_pos))?;
        stdout.queue(SetForegroundColor(cell.color))?;
        stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                stdout.queue(Print(' '))?;
            }
        }
        stdout.queue(ResetColor)?;
        Ok(())
    }
}

fn cell_for(game: &Game, pos: Pos) -> Cell {
    if pos == game.player {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = game.ghosts.iter().find(|g| g.pos == pos) {
        if game.vulnerable() {
            return Cell {
                glyph: Glyph::Frightened,
                color: FRIGHTENED_COLOR,
            };
        }
        return Cell {
            glyph: Glyph::Ghost,
            color: ghost.id.color(),
        };
    }
    if game.grid.is_wall(pos) {
        return Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        };
    }
    if game.grid.pellets().contains(&pos) {
        return Cell {
            glyph: Glyph::Pellet,
            color: Color::White,
        };
    }
    if game.grid.power_pellets().contains(&pos) {
        return Cell {
            glyph: Glyph::Power,
            color: Color::Magenta,
        };
    }
    Cell {
        glyph: Glyph::Empty,
        color: Color::Reset,
    }
}
