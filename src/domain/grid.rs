/// Grid cells and the maze grid itself.
/// Cell semantics are queried via methods so they stay centralized here.

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Wall,
    Open,
}

impl Cell {
    /// Can an entity occupy this cell?
    pub fn is_open(self) -> bool {
        matches!(self, Cell::Open)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Wall
    }
}

/// Movement direction, as (row, col) deltas.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDir {
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDir::Up => (-1, 0),
            MoveDir::Down => (1, 0),
            MoveDir::Left => (0, -1),
            MoveDir::Right => (0, 1),
        }
    }
}

/// Rejection of invalid maze dimensions.
/// The carving algorithm's step-2 moves require odd dimensions, and
/// anything under 5x5 has no interior to carve.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GridError {
    EvenDimension { width: usize, height: usize },
    TooSmall { width: usize, height: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::EvenDimension { width, height } => {
                write!(f, "maze dimensions must be odd, got {}x{}", width, height)
            }
            GridError::TooSmall { width, height } => {
                write!(f, "maze dimensions must be at least 5x5, got {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// The maze grid. Owned by the simulation; everything else borrows it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    pub width: usize,
    pub height: usize,
}

impl Grid {
    /// A grid of the given size with every cell walled in.
    pub fn filled(width: usize, height: usize) -> Self {
        Grid {
            cells: vec![vec![Cell::Wall; width]; height],
            width,
            height,
        }
    }

    /// Cell at (row, col). Out of bounds reads as Wall.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if row < self.height && col < self.width {
            self.cells[row][col]
        } else {
            Cell::Wall
        }
    }

    /// Is (row, col) inside the grid and open?
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_open()
    }

    /// Signed-coordinate variant for neighbor probes.
    pub fn is_open_signed(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && self.is_open(row as usize, col as usize)
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.height && col < self.width {
            self.cells[row][col] = cell;
        }
    }

    /// All open cells, row-major. Used by tests and the renderer.
    pub fn open_cells(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                if self.cells[row][col].is_open() {
                    out.push((row, col));
                }
            }
        }
        out
    }
}
