//! Session state and the per-tick update rules.

use rand::Rng;

use crate::ghost::{Ghost, GhostId};
use crate::grid::{Dir, Grid, Pos, TileKind};

pub const TICKS_PER_SECOND: u32 = 60;
/// Vulnerability window after a power pellet: seven seconds of ticks.
pub const POWER_TICKS: u32 = 7 * TICKS_PER_SECOND;

const PELLET_SCORE: u32 = 10;
const POWER_PELLET_SCORE: u32 = 50;
const GHOST_SCORE: u32 = 200;
const STARTING_LIVES: u32 = 3;

/// Spawn tiles for the standard maze.
pub const PLAYER_SPAWN: Pos = Pos::new(10, 9);
const GHOST_SPAWNS: [(GhostId, Pos, Dir); 4] = [
    (GhostId::Blinky, Pos::new(10, 7), Dir::Right),
    (GhostId::Pinky, Pos::new(9, 7), Dir::Left),
    (GhostId::Inky, Pos::new(11, 7), Dir::Down),
    (GhostId::Clyde, Pos::new(10, 8), Dir::Up),
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Running,
    GameOver,
}

/// All mutable game state. The tick driver is the only caller of the
/// mutating step methods, and calls them strictly in sequence.
pub struct Game {
    pub grid: Grid,
    pub player: Pos,
    player_spawn: Pos,
    pub ghosts: Vec<Ghost>,
    pub score: u32,
    pub lives: u32,
    pub power_timer: u32,
    pub high_score: u32,
    status: Status,
}

impl Game {
    pub fn new(grid: Grid, high_score: u32) -> Self {
        let ghosts = GHOST_SPAWNS
            .iter()
            .map(|&(id, pos, dir)| Ghost::new(id, pos, dir))
            .collect();
        Self {
            grid,
            player: PLAYER_SPAWN,
            player_spawn: PLAYER_SPAWN,
            ghosts,
            score: 0,
            lives: STARTING_LIVES,
            power_timer: 0,
            high_score,
            status: Status::Running,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Ghosts are edible while the power timer runs.
    pub fn vulnerable(&self) -> bool {
        self.power_timer > 0
    }

    /// One full update. `dx`/`dy` are the requested displacement, each axis
    /// in `-1..=1`; both axes apply in the same step, so diagonal requests
    /// are a single combined move.
    pub fn tick(&mut self, rng: &mut impl Rng, dx: i32, dy: i32) -> Status {
        if self.status == Status::GameOver {
            return self.status;
        }
        self.move_player(dx, dy);
        self.consume_tile();
        self.update_ghosts(rng);
        self.resolve_collisions();
        self.tick_power_timer();
        self.update_high_score();
        self.status
    }

    fn move_player(&mut self, dx: i32, dy: i32) {
        let candidate = self.player.offset(dx, dy);
        if !self.grid.is_wall(candidate) {
            self.player = candidate;
        }
    }

    fn consume_tile(&mut self) {
        match self.grid.consume(self.player) {
            Some(TileKind::Pellet) => self.score += PELLET_SCORE,
            Some(TileKind::PowerPellet) => {
                self.score += POWER_PELLET_SCORE;
                self.power_timer = POWER_TICKS;
            }
            None => {}
        }
    }

    fn update_ghosts(&mut self, rng: &mut impl Rng) {
        for ghost in &mut self.ghosts {
            ghost.wander(&self.grid, rng);
        }
    }

    /// Checks every ghost against the player position as of entry, in list
    /// order. Each contact resolves independently: two non-vulnerable
    /// ghosts on the same tile cost two lives in one tick.
    fn resolve_collisions(&mut self) {
        let contact = self.player;
        for i in 0..self.ghosts.len() {
            if self.ghosts[i].pos != contact {
                continue;
            }
            if self.power_timer > 0 {
                self.ghosts[i].respawn();
                self.score += GHOST_SCORE;
            } else {
                if self.lives > 0 {
                    self.lives -= 1;
                }
                self.player = self.player_spawn;
                if self.lives == 0 {
                    self.status = Status::GameOver;
                }
            }
        }
    }

    fn tick_power_timer(&mut self) {
        if self.power_timer > 0 {
            self.power_timer -= 1;
        }
    }

    fn update_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }
}
