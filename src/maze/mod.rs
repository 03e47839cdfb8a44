//! Logical maze grid: a row-major array of cells, each with four wall flags.
//!
//! The grid starts fully walled; `generator::generate` carves a spanning tree
//! into it and `solver::is_solvable` double-checks that the exit is reachable.
//! Wall flags are only ever cleared in pairs (see `Grid::remove_wall`) so the
//! two cells sharing an edge always agree on whether it is open.

pub mod generator;
pub mod solver;

pub use generator::generate;
pub use solver::is_solvable;

/// Side of a cell. Order matches the neighbour scan of the generator
/// (up, right, down, left).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    fn delta(self) -> (isize, isize) {
        match self {
            Side::Top => (0, -1),
            Side::Right => (1, 0),
            Side::Bottom => (0, 1),
            Side::Left => (-1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub const ALL: Walls = Walls {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    pub fn get(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    fn clear(&mut self, side: Side) {
        match side {
            Side::Top => self.top = false,
            Side::Right => self.right = false,
            Side::Bottom => self.bottom = false,
            Side::Left => self.left = false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    /// Generation bookkeeping only; meaningless once carving finishes.
    pub visited: bool,
    pub walls: Walls,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Fully walled, unvisited grid. Dimensions are validated upstream by
    /// `GameConfig::validate`.
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "grid dimensions must be positive");
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell {
                    x,
                    y,
                    visited: false,
                    walls: Walls::ALL,
                });
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "cell out of bounds");
        y * self.width + x
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    pub(crate) fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Coordinates of the neighbour across `side`, if it lies inside the grid.
    pub fn neighbor(&self, x: usize, y: usize, side: Side) -> Option<(usize, usize)> {
        let (dx, dy) = side.delta();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < self.width && ny < self.height).then_some((nx, ny))
    }

    pub fn has_wall(&self, x: usize, y: usize, side: Side) -> bool {
        self.cell(x, y).walls.get(side)
    }

    /// Opens the edge on `side` of (x, y), clearing the flag on both cells.
    /// Outer boundary edges have no neighbour and are left untouched.
    pub fn remove_wall(&mut self, x: usize, y: usize, side: Side) {
        let Some((nx, ny)) = self.neighbor(x, y, side) else {
            return;
        };
        self.cell_mut(x, y).walls.clear(side);
        self.cell_mut(nx, ny).walls.clear(side.opposite());
    }

    /// Neighbours reachable from (x, y) without crossing a wall.
    pub fn open_neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        Side::ALL
            .into_iter()
            .filter(move |&side| !self.has_wall(x, y, side))
            .filter_map(move |side| self.neighbor(x, y, side))
    }

    /// Number of interior edges that have been opened.
    pub fn removed_wall_count(&self) -> usize {
        self.cells
            .iter()
            .map(|c| {
                let right = c.x + 1 < self.width && !c.walls.right;
                let bottom = c.y + 1 < self.height && !c.walls.bottom;
                right as usize + bottom as usize
            })
            .sum()
    }

    pub fn entry(&self) -> (usize, usize) {
        (0, 0)
    }

    pub fn exit(&self) -> (usize, usize) {
        (self.width - 1, self.height - 1)
    }
}
