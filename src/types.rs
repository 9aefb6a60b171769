// Core game types: cells, positions, directions, and the per-turn grid snapshot
// The grid is rebuilt from the server's flattened map string after every move

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BotError;

/// Identity of an adversary on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GhostKind {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

/// Contents of a single grid cell
///
/// The wire protocol encodes cells as single digits; see [`Cell::from_digit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Pakku,
    Dot,
    Fruit,
    Wall,
    Ghost(GhostKind),
}

impl Cell {
    /// Decodes a cell from its wire-protocol digit
    ///
    /// 0=Empty, 1=Pakku, 2=Dot, 3=Fruit, 4=Wall, 5-8=the four ghosts.
    /// Returns `None` for any other character.
    pub fn from_digit(c: char) -> Option<Cell> {
        match c {
            '0' => Some(Cell::Empty),
            '1' => Some(Cell::Pakku),
            '2' => Some(Cell::Dot),
            '3' => Some(Cell::Fruit),
            '4' => Some(Cell::Wall),
            '5' => Some(Cell::Ghost(GhostKind::Blinky)),
            '6' => Some(Cell::Ghost(GhostKind::Pinky)),
            '7' => Some(Cell::Ghost(GhostKind::Inky)),
            '8' => Some(Cell::Ghost(GhostKind::Clyde)),
            _ => None,
        }
    }

    /// Whether the agent may legally occupy this cell
    ///
    /// Ghost cells are passable; walking into one loses the game, but the
    /// server accepts the move. Only walls block movement.
    pub fn is_passable(&self) -> bool {
        !matches!(self, Cell::Wall)
    }

    /// Whether entering this cell collects food
    pub fn is_collectible(&self) -> bool {
        matches!(self, Cell::Dot | Cell::Fruit)
    }

    /// Single-character glyph used by the terminal renderer
    pub fn glyph(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Pakku => '<',
            Cell::Dot => '*',
            Cell::Fruit => 'O',
            Cell::Wall => '|',
            Cell::Ghost(GhostKind::Blinky) => 'B',
            Cell::Ghost(GhostKind::Pinky) => 'P',
            Cell::Ghost(GhostKind::Inky) => 'I',
            Cell::Ghost(GhostKind::Clyde) => 'C',
        }
    }
}

/// A (row, column) coordinate on the grid
///
/// Ordered row-major so positions can sit inside the pathfinder's heap
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four cardinal movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to the wire-protocol label
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the next position when moving in this direction
    ///
    /// Returns `None` if the step would leave the grid.
    pub fn apply(&self, pos: Position, width: usize) -> Option<Position> {
        match self {
            Direction::Up => pos.row.checked_sub(1).map(|r| Position::new(r, pos.col)),
            Direction::Down if pos.row + 1 < width => Some(Position::new(pos.row + 1, pos.col)),
            Direction::Left => pos.col.checked_sub(1).map(|c| Position::new(pos.row, c)),
            Direction::Right if pos.col + 1 < width => Some(Position::new(pos.row, pos.col + 1)),
            _ => None,
        }
    }

    /// Translates an adjacent (from, to) pair into a direction label
    ///
    /// Returns `None` when `to` is not a cardinal neighbor of `from`; callers
    /// use this as the path-consistency check before a move is sent.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        if from.col == to.col && from.row + 1 == to.row {
            Some(Direction::Down)
        } else if from.col == to.col && to.row + 1 == from.row {
            Some(Direction::Up)
        } else if from.row == to.row && from.col + 1 == to.col {
            Some(Direction::Right)
        } else if from.row == to.row && to.col + 1 == from.col {
            Some(Direction::Left)
        } else {
            None
        }
    }
}

/// Immutable per-turn snapshot of the board
///
/// Row-major storage; the board is always square and its width never changes
/// during a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Parses the server's flattened map string into a grid
    ///
    /// The string must be exactly `width * width` digit characters, row-major.
    pub fn parse(map_str: &str, width: usize) -> Result<Grid, BotError> {
        if map_str.len() != width * width {
            return Err(BotError::BadMap(format!(
                "map string has {} cells, expected {} for width {}",
                map_str.len(),
                width * width,
                width
            )));
        }

        let mut cells = Vec::with_capacity(map_str.len());
        for c in map_str.chars() {
            let cell = Cell::from_digit(c)
                .ok_or_else(|| BotError::BadMap(format!("unknown cell digit '{}'", c)))?;
            cells.push(cell);
        }

        Ok(Grid { width, cells })
    }

    /// Builds a grid directly from rows of cells; rows must form a square
    ///
    /// Used by tests and tools that construct boards by hand.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Grid, BotError> {
        let width = rows.len();
        for row in &rows {
            if row.len() != width {
                return Err(BotError::BadMap(format!(
                    "row has {} cells, expected {}",
                    row.len(),
                    width
                )));
            }
        }
        Ok(Grid {
            width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the cell at the given position
    ///
    /// # Panics
    /// Panics if the position is out of bounds; positions produced by
    /// [`Direction::apply`] and [`Grid::positions`] are always in bounds.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.row * self.width + pos.col]
    }

    /// Iterates over every position on the grid in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        (0..width).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    /// Finds the agent's cell, if it is still on the board
    ///
    /// A valid snapshot contains at most one agent cell; after elimination it
    /// contains none.
    pub fn pakku_position(&self) -> Option<Position> {
        self.positions().find(|&p| self.cell(p) == Cell::Pakku)
    }

    /// Positions of every ghost on the board
    pub fn ghost_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|&p| matches!(self.cell(p), Cell::Ghost(_)))
            .collect()
    }

    /// Win condition: no collectible cells remain
    pub fn is_cleared(&self) -> bool {
        !self.cells.iter().any(|c| c.is_collectible())
    }

    /// Number of collectible cells left on the board
    pub fn food_remaining(&self) -> usize {
        self.cells.iter().filter(|c| c.is_collectible()).count()
    }
}

impl fmt::Display for Grid {
    /// Renders the board with row/column indices for the terminal view
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = (0..self.width)
            .map(|c| (c % 10).to_string())
            .collect();
        writeln!(f, "   {}", header.join(" "))?;

        for row in 0..self.width {
            let glyphs: Vec<String> = (0..self.width)
                .map(|col| self.cell(Position::new(row, col)).glyph().to_string())
                .collect();
            writeln!(f, "{:>2} {}", row, glyphs.join(" "))?;
        }
        Ok(())
    }
}
