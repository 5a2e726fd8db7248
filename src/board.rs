use crate::piece::Piece;
use crate::point::Point;
use bitflags::bitflags;
use ratatui::style::Color;

pub const COLUMNS: usize = 10;
pub const ROWS: usize = 20;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

type Row = [Cell; COLUMNS];

const EMPTY_ROW: Row = [Cell::Empty; COLUMNS];

bitflags! {
    /// Why a piece placement is invalid. Empty means the placement is free.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
    pub struct Collision: u8 {
        const LEFT_WALL  = 1<<0;
        const RIGHT_WALL = 1<<1;
        const FLOOR      = 1<<2;
        const CEILING    = 1<<3;
        const STACK      = 1<<4;
    }
}

/// Locked cells, `ROWS` rows of `COLUMNS` cells, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            rows: [EMPTY_ROW; ROWS],
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row; ROWS] {
        &self.rows
    }

    pub fn get(&self, p: Point<i16>) -> Option<Cell> {
        Self::index(p).map(|(x, y)| self.rows[y][x])
    }

    fn index(p: Point<i16>) -> Option<(usize, usize)> {
        p.is_inside(Point(0, 0), Point(COLUMNS as i16, ROWS as i16))
            .then(|| (p.x() as usize, p.y() as usize))
    }

    pub fn collisions(&self, piece: &Piece) -> Collision {
        let mut collision = Collision::empty();
        for cell @ Point(x, y) in piece.cells() {
            if x < 0 {
                collision |= Collision::LEFT_WALL;
            }
            if x >= COLUMNS as i16 {
                collision |= Collision::RIGHT_WALL;
            }
            if y >= ROWS as i16 {
                collision |= Collision::FLOOR;
            }
            if y < 0 {
                collision |= Collision::CEILING;
            }
            if let Some(Cell::Filled(_)) = self.get(cell) {
                collision |= Collision::STACK;
            }
        }
        collision
    }

    /// A piece collides if any filled cell lies outside the side walls, below
    /// the floor, above row 0, or on a locked cell.
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        !self.collisions(piece).is_empty()
    }

    /// Writes the piece's color into its cells. The caller has already
    /// checked the placement; cells outside the grid are skipped.
    pub fn lock(&mut self, piece: &Piece) {
        for cell in piece.cells() {
            if let Some((x, y)) = Self::index(cell) {
                self.rows[y][x] = Cell::Filled(piece.color());
            }
        }
    }

    /// Drops every full row, keeping the rest in order, and refills the top
    /// with as many empty rows as were removed.
    pub fn clear_full_rows(&self) -> (Board, usize) {
        let kept: Vec<&Row> = self
            .rows
            .iter()
            .filter(|row| row.iter().any(Cell::is_empty))
            .collect();
        let cleared = ROWS - kept.len();

        let mut board = Board::new();
        for (dst, src) in board.rows[cleared..].iter_mut().zip(kept) {
            *dst = *src;
        }
        (board, cleared)
    }
}
