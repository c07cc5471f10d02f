//! Ghost entities and their wandering policy.

use crossterm::style::Color;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Dir, Grid, Pos};

/// Chance per tick that a ghost picks a fresh heading: `TURN_CHANCE` in
/// `TURN_ODDS`. The resample is uniform over all four headings and may
/// land on the current one.
const TURN_CHANCE: u32 = 3;
const TURN_ODDS: u32 = 11;

/// Which ghost this is. Purely a label; every ghost behaves the same.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GhostId {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostId {
    pub fn color(self) -> Color {
        match self {
            GhostId::Blinky => Color::Red,
            GhostId::Pinky => Color::Magenta,
            GhostId::Inky => Color::Cyan,
            GhostId::Clyde => Color::DarkYellow,
        }
    }
}

/// A patrolling ghost. `home` is its creation tile and where it respawns
/// after being eaten.
#[derive(Clone, Debug)]
pub struct Ghost {
    pub id: GhostId,
    pub pos: Pos,
    pub dir: Dir,
    pub home: Pos,
}

impl Ghost {
    pub fn new(id: GhostId, pos: Pos, dir: Dir) -> Self {
        Self {
            id,
            pos,
            dir,
            home: pos,
        }
    }

    /// One step of the memoryless random walk: maybe resample the heading,
    /// then advance unless a wall blocks the way. A blocked ghost keeps its
    /// heading and may retry it next tick.
    pub fn wander(&mut self, grid: &Grid, rng: &mut impl Rng) {
        if rng.gen_range(0..TURN_ODDS) < TURN_CHANCE {
            self.dir = *Dir::ALL.choose(rng).unwrap();
        }
        let next = self.pos.step(self.dir);
        if !grid.is_wall(next) {
            self.pos = next;
        }
    }

    /// Sends the ghost back to its cage tile. Heading is left alone; it
    /// resumes wandering from home next tick.
    pub fn respawn(&mut self) {
        self.pos = self.home;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DEFAULT_LAYOUT;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_grid() -> Grid {
        Grid::parse(&["111", "131", "111"]).unwrap()
    }

    #[test]
    fn blocked_ghost_stays_on_non_wall_tile() {
        let grid = small_grid();
        let mut rng = StdRng::seed_from_u64(7);
        let mut ghost = Ghost::new(GhostId::Blinky, Pos::new(1, 1), Dir::Up);
        for _ in 0..100 {
            ghost.wander(&grid, &mut rng);
            assert_eq!(ghost.pos, Pos::new(1, 1));
        }
    }

    #[test]
    fn wander_never_enters_a_wall() {
        let grid = Grid::parse(&DEFAULT_LAYOUT).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut ghost = Ghost::new(GhostId::Pinky, Pos::new(9, 7), Dir::Left);
        for _ in 0..10_000 {
            ghost.wander(&grid, &mut rng);
            assert!(!grid.is_wall(ghost.pos));
        }
    }

    #[test]
    fn wander_is_deterministic_for_a_seed() {
        let grid = Grid::parse(&DEFAULT_LAYOUT).unwrap();
        let mut a = Ghost::new(GhostId::Inky, Pos::new(11, 7), Dir::Down);
        let mut b = a.clone();
        let mut rng_a = StdRng::seed_from_u64(123);
        let mut rng_b = StdRng::seed_from_u64(123);
        for _ in 0..500 {
            a.wander(&grid, &mut rng_a);
            b.wander(&grid, &mut rng_b);
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.dir, b.dir);
        }
    }

    #[test]
    fn respawn_returns_to_home() {
        let mut ghost = Ghost::new(GhostId::Clyde, Pos::new(10, 8), Dir::Up);
        ghost.pos = Pos::new(3, 4);
        ghost.respawn();
        assert_eq!(ghost.pos, Pos::new(10, 8));
        assert_eq!(ghost.dir, Dir::Up);
    }
}
