//! Maze layout parsing and tile lookups.

use std::collections::HashSet;

use thiserror::Error;

/// The standard maze. `1` = wall, `0` = pellet, `2` = power pellet,
/// `3` = empty. Fully enclosed by walls; the `3` tiles around the center
/// are the ghost cage and the player spawn.
pub const DEFAULT_LAYOUT: [&str; 12] = [
    "1111111111111111111111",
    "1220000001110000000221",
    "1011111110110111111101",
    "1011111110110111111101",
    "1000000000000000000001",
    "1011111011111110111101",
    "1000001000000001000001",
    "1111011013331101011011",
    "1000010000300001000010",
    "1011111110310111111101",
    "1220000000000000000221",
    "1111111111111111111111",
];

/// A tile coordinate: 0-indexed column and row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn step(self, dir: Dir) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }
}

/// The four cardinal headings. `y` grows downward.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// What `Grid::consume` found at a tile.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileKind {
    Pellet,
    PowerPellet,
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout has no rows or no columns")]
    Empty,
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile code {code:?} at ({x}, {y})")]
    UnknownTile { code: char, x: i32, y: i32 },
}

/// The maze: wall tiles fixed after parsing, pellet tiles consumed as the
/// player walks over them. Tile sets are disjoint.
#[derive(Debug)]
pub struct Grid {
    width: i32,
    height: i32,
    walls: HashSet<Pos>,
    pellets: HashSet<Pos>,
    power_pellets: HashSet<Pos>,
}

impl Grid {
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Grid, LayoutError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(LayoutError::Empty);
        }

        let mut walls = HashSet::new();
        let mut pellets = HashSet::new();
        let mut power_pellets = HashSet::new();

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, code) in row.chars().enumerate() {
                let pos = Pos::new(x as i32, y as i32);
                match code {
                    '0' => {
                        pellets.insert(pos);
                    }
                    '1' => {
                        walls.insert(pos);
                    }
                    '2' => {
                        power_pellets.insert(pos);
                    }
                    '3' => {}
                    _ => {
                        return Err(LayoutError::UnknownTile {
                            code,
                            x: pos.x,
                            y: pos.y,
                        })
                    }
                }
            }
        }

        Ok(Grid {
            width: width as i32,
            height: height as i32,
            walls,
            pellets,
            power_pellets,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Out-of-bounds coordinates count as walls, so a layout without a
    /// closed border still cannot be escaped.
    pub fn is_wall(&self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return true;
        }
        self.walls.contains(&pos)
    }

    /// Removes and reports the pellet at `pos`, if any. Consuming an
    /// already-empty tile returns `None` and changes nothing.
    pub fn consume(&mut self, pos: Pos) -> Option<TileKind> {
        if self.pellets.remove(&pos) {
            Some(TileKind::Pellet)
        } else if self.power_pellets.remove(&pos) {
            Some(TileKind::PowerPellet)
        } else {
            None
        }
    }

    pub fn pellets(&self) -> &HashSet<Pos> {
        &self.pellets
    }

    pub fn power_pellets(&self) -> &HashSet<Pos> {
        &self.power_pellets
    }

    pub fn pellets_left(&self) -> usize {
        self.pellets.len() + self.power_pellets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_layout() {
        let grid = Grid::parse(&DEFAULT_LAYOUT).unwrap();
        assert_eq!(grid.width(), 22);
        assert_eq!(grid.height(), 12);
        assert!(grid.is_wall(Pos::new(0, 0)));
        assert!(!grid.is_wall(Pos::new(10, 9)));
        // Power pellets sit in the four corner pairs.
        assert_eq!(grid.power_pellets().len(), 8);
    }

    #[test]
    fn tile_sets_are_disjoint() {
        let grid = Grid::parse(&DEFAULT_LAYOUT).unwrap();
        for pos in grid.pellets() {
            assert!(!grid.is_wall(*pos));
            assert!(!grid.power_pellets().contains(pos));
        }
        for pos in grid.power_pellets() {
            assert!(!grid.is_wall(*pos));
        }
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Grid::parse(&["111", "10"]).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn parse_rejects_unknown_tile() {
        let err = Grid::parse(&["111", "1x1", "111"]).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownTile { code: 'x', x: 1, y: 1 }));
    }

    #[test]
    fn parse_rejects_empty_layout() {
        assert!(matches!(
            Grid::parse::<&str>(&[]).unwrap_err(),
            LayoutError::Empty
        ));
        assert!(matches!(
            Grid::parse(&["", ""]).unwrap_err(),
            LayoutError::Empty
        ));
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let grid = Grid::parse(&DEFAULT_LAYOUT).unwrap();
        assert!(grid.is_wall(Pos::new(-1, 0)));
        assert!(grid.is_wall(Pos::new(0, -1)));
        assert!(grid.is_wall(Pos::new(22, 0)));
        assert!(grid.is_wall(Pos::new(0, 12)));
    }

    #[test]
    fn consume_is_idempotent() {
        let mut grid = Grid::parse(&DEFAULT_LAYOUT).unwrap();
        let pellet = Pos::new(2, 1);
        assert!(grid.pellets().contains(&pellet));
        assert_eq!(grid.consume(pellet), Some(TileKind::Pellet));
        assert!(!grid.pellets().contains(&pellet));
        assert_eq!(grid.consume(pellet), None);

        let power = Pos::new(1, 1);
        assert_eq!(grid.consume(power), Some(TileKind::PowerPellet));
        assert_eq!(grid.consume(power), None);
    }

    #[test]
    fn consume_only_shrinks() {
        let mut grid = Grid::parse(&DEFAULT_LAYOUT).unwrap();
        let before = grid.pellets_left();
        grid.consume(Pos::new(0, 0));
        grid.consume(Pos::new(10, 8));
        assert_eq!(grid.pellets_left(), before);
        grid.consume(Pos::new(2, 1));
        assert_eq!(grid.pellets_left(), before - 1);
    }
}
