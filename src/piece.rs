use crate::board::COLUMNS;
use crate::point::Point;
use crate::shape::{Matrix, Tetromino};
use arrayvec::ArrayVec;
use ratatui::style::Color;

/// The falling piece. `pos` is the board coordinate of the top-left cell of
/// the current occupancy matrix.
///
/// Nothing here checks the board; callers test the new state with
/// [`Board::is_colliding`](crate::board::Board::is_colliding) and undo it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    tetromino: Tetromino,
    rotation: usize,
    color: Color,
    pos: Point<i16>,
}

impl Piece {
    /// First rotation state, horizontally centred on row 0.
    pub fn spawn(tetromino: Tetromino) -> Self {
        let width = tetromino.rotations()[0][0].len() as i16;
        Self {
            tetromino,
            rotation: 0,
            color: tetromino.color(),
            pos: Point(COLUMNS as i16 / 2 - width / 2, 0),
        }
    }

    pub fn tetromino(&self) -> Tetromino {
        self.tetromino
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pos(&self) -> Point<i16> {
        self.pos
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn current_shape(&self) -> Matrix {
        self.tetromino.rotations()[self.rotation]
    }

    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.tetromino.rotations().len();
    }

    /// Restores a rotation index saved before a rejected [`Piece::rotate`].
    pub fn set_rotation(&mut self, rotation: usize) {
        self.rotation = rotation % self.tetromino.rotations().len();
    }

    pub fn translate(&mut self, dx: i16, dy: i16) {
        self.pos += Point(dx, dy);
    }

    /// Absolute board coordinates of every filled cell.
    pub fn cells(&self) -> ArrayVec<Point<i16>, 4> {
        let mut cells = ArrayVec::new();
        for (y, row) in self.current_shape().iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    cells.push(self.pos + Point(x as i16, y as i16));
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_centres_on_top_row() {
        assert_eq!(Piece::spawn(Tetromino::I).pos(), Point(3, 0));
        assert_eq!(Piece::spawn(Tetromino::O).pos(), Point(4, 0));
        assert_eq!(Piece::spawn(Tetromino::T).pos(), Point(4, 0));
        assert_eq!(Piece::spawn(Tetromino::L).pos(), Point(4, 0));
    }

    #[test]
    fn spawn_takes_catalog_color_and_first_rotation() {
        let piece = Piece::spawn(Tetromino::Z);
        assert_eq!(piece.color(), Tetromino::Z.color());
        assert_eq!(piece.rotation(), 0);
        assert_eq!(piece.current_shape(), Tetromino::Z.rotations()[0]);
    }

    #[test]
    fn rotate_cycles_back_to_start() {
        for tetromino in Tetromino::ALL {
            let start = Piece::spawn(tetromino);
            let mut piece = start;
            for _ in 0..tetromino.rotations().len() {
                piece.rotate();
            }
            assert_eq!(piece, start, "{tetromino:?}");
            assert_eq!(piece.current_shape(), start.current_shape());
        }
    }

    #[test]
    fn rotate_advances_one_state() {
        let mut piece = Piece::spawn(Tetromino::T);
        piece.rotate();
        assert_eq!(piece.rotation(), 1);
        assert_eq!(piece.current_shape(), Tetromino::T.rotations()[1]);

        let mut o = Piece::spawn(Tetromino::O);
        o.rotate();
        assert_eq!(o.rotation(), 0);
    }

    #[test]
    fn translate_and_cells() {
        let mut piece = Piece::spawn(Tetromino::O);
        piece.translate(-4, 3);
        assert_eq!(piece.pos(), Point(0, 3));
        assert_eq!(
            piece.cells().as_slice(),
            &[Point(0, 3), Point(1, 3), Point(0, 4), Point(1, 4)]
        );

        let mut t = Piece::spawn(Tetromino::T);
        t.translate(0, 1);
        assert_eq!(
            t.cells().as_slice(),
            &[Point(5, 1), Point(4, 2), Point(5, 2), Point(6, 2)]
        );
    }
}
