use crate::board::Board;
use crate::piece::Piece;
use crate::shape::Tetromino;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::time::Duration;

/// Time between automatic one-row drops.
pub const FALL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
}

/// Spawning is not a resting state: [`GameState::spawn`] lands in one of
/// these two immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Falling(Piece),
    /// Terminal. Holds the piece that could not be placed.
    GameOver(Piece),
}

pub struct GameState {
    board: Board,
    phase: Phase,
    fall_time: Duration,
    rng: StdRng,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    #[cfg(test)]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let first = Self::random_tetromino(&mut rng);
        info!("game started");
        Self::start(Board::new(), first, rng)
    }

    fn start(board: Board, first: Tetromino, rng: StdRng) -> Self {
        Self {
            phase: Self::place(&board, first),
            board,
            fall_time: Duration::ZERO,
            rng,
        }
    }

    /// Starts from an arbitrary board, e.g. a partly filled one.
    #[cfg(test)]
    fn from_board(board: Board, first: Tetromino) -> Self {
        Self::start(board, first, StdRng::seed_from_u64(0))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    /// The piece under player control, `None` once the game is over.
    pub fn active(&self) -> Option<&Piece> {
        match &self.phase {
            Phase::Falling(piece) => Some(piece),
            Phase::GameOver(_) => None,
        }
    }

    fn random_tetromino(rng: &mut StdRng) -> Tetromino {
        *Tetromino::ALL.choose(rng).unwrap_or(&Tetromino::O)
    }

    /// Places a fresh piece at the spawn position, or ends the game if that
    /// position is already taken.
    pub fn spawn(&mut self, tetromino: Tetromino) {
        self.phase = Self::place(&self.board, tetromino);
    }

    fn place(board: &Board, tetromino: Tetromino) -> Phase {
        let piece = Piece::spawn(tetromino);
        if board.is_colliding(&piece) {
            info!("game over: {tetromino:?} blocked at {:?}", piece.pos());
            Phase::GameOver(piece)
        } else {
            debug!("spawned {tetromino:?} at {:?}", piece.pos());
            Phase::Falling(piece)
        }
    }

    /// Advances the fall timer. Once a full interval has built up the piece
    /// drops a row, or locks if it cannot, and the timer starts over.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.is_over() {
            return;
        }
        self.fall_time += elapsed;
        if self.fall_time < FALL_INTERVAL {
            return;
        }
        self.fall_time = Duration::ZERO;
        self.fall();
    }

    fn fall(&mut self) {
        let Phase::Falling(piece) = &mut self.phase else {
            return;
        };
        piece.translate(0, 1);
        if !self.board.is_colliding(piece) {
            return;
        }
        piece.translate(0, -1);
        let piece = *piece;

        self.board.lock(&piece);
        debug!("locked {:?} at {:?}", piece.tetromino(), piece.pos());
        let (board, cleared) = self.board.clear_full_rows();
        self.board = board;
        if cleared > 0 {
            debug!("cleared {cleared} rows");
        }

        let next = Self::random_tetromino(&mut self.rng);
        self.spawn(next);
    }

    /// Applies one player action. A move or rotation that would collide is
    /// undone; it never locks the piece.
    pub fn apply(&mut self, action: Action) {
        let Phase::Falling(piece) = &mut self.phase else {
            return;
        };
        let rotation = piece.rotation();
        match action {
            Action::MoveLeft => piece.translate(-1, 0),
            Action::MoveRight => piece.translate(1, 0),
            Action::MoveDown => piece.translate(0, 1),
            Action::Rotate => piece.rotate(),
        }

        let collision = self.board.collisions(piece);
        if collision.is_empty() {
            return;
        }
        debug!("rejected {action:?}: {collision:?}");
        match action {
            Action::MoveLeft => piece.translate(1, 0),
            Action::MoveRight => piece.translate(-1, 0),
            Action::MoveDown => piece.translate(0, -1),
            Action::Rotate => piece.set_rotation(rotation),
        }
    }
}
