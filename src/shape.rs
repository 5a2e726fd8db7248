use ratatui::style::Color;
use std::ops::Index;

/// One rotation state: rows of a rectangular occupancy matrix, `1` = filled.
pub type Matrix = &'static [&'static [u8]];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tetromino {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::O,
        Tetromino::T,
        Tetromino::S,
        Tetromino::Z,
        Tetromino::J,
        Tetromino::L,
    ];

    /// Rotation states in the order `rotate` cycles through them.
    pub fn rotations(self) -> &'static [Matrix] {
        ROTATIONS[self]
    }

    pub fn color(self) -> Color {
        COLORS[self]
    }
}

impl From<Tetromino> for usize {
    fn from(value: Tetromino) -> Self {
        match value {
            Tetromino::I => 0,
            Tetromino::O => 1,
            Tetromino::T => 2,
            Tetromino::S => 3,
            Tetromino::Z => 4,
            Tetromino::J => 5,
            Tetromino::L => 6,
        }
    }
}

struct TetrominoMap<T> {
    content: [T; 7],
}

impl<T> Index<Tetromino> for TetrominoMap<T> {
    type Output = T;

    fn index(&self, tetromino: Tetromino) -> &Self::Output {
        let i: usize = tetromino.into();
        &self.content[i]
    }
}

const COLORS: TetrominoMap<Color> = TetrominoMap {
    content: [
        Color::Rgb(0, 240, 240),
        Color::Rgb(240, 240, 0),
        Color::Rgb(160, 0, 240),
        Color::Rgb(0, 240, 0),
        Color::Rgb(240, 0, 0),
        Color::Rgb(0, 0, 240),
        Color::Rgb(240, 160, 0),
    ],
};

const ROTATIONS: TetrominoMap<&'static [Matrix]> = TetrominoMap {
    content: [I_ROT, O_ROT, T_ROT, S_ROT, Z_ROT, J_ROT, L_ROT],
};

const I_ROT: &[Matrix] = &[
    &[
        &[1, 1, 1, 1], //####
    ],
    &[
        &[1], //#
        &[1], //#
        &[1], //#
        &[1], //#
    ],
];

const O_ROT: &[Matrix] = &[&[
    &[1, 1], //##
    &[1, 1], //##
]];

const T_ROT: &[Matrix] = &[
    &[
        &[0, 1, 0], // #
        &[1, 1, 1], //###
    ],
    &[
        &[1, 0], //#
        &[1, 1], //##
        &[1, 0], //#
    ],
    &[
        &[1, 1, 1], //###
        &[0, 1, 0], // #
    ],
    &[
        &[0, 1], // #
        &[0, 1], // #
        &[1, 1], //##
    ],
];

const S_ROT: &[Matrix] = &[
    &[
        &[0, 1, 1], // ##
        &[1, 1, 0], //##
    ],
    &[
        &[1, 0], //#
        &[1, 1], //##
        &[0, 1], // #
    ],
];

const Z_ROT: &[Matrix] = &[
    &[
        &[1, 1, 0], //##
        &[0, 1, 1], // ##
    ],
    &[
        &[0, 1], // #
        &[1, 1], //##
        &[1, 0], //#
    ],
];

const J_ROT: &[Matrix] = &[
    &[
        &[1, 0, 0], //#
        &[1, 1, 1], //###
    ],
    &[
        &[1, 1], //##
        &[1, 0], //#
        &[1, 0], //#
    ],
    &[
        &[1, 1, 1], //###
        &[0, 0, 1], //  #
    ],
    &[
        &[0, 1], // #
        &[0, 1], // #
        &[1, 1], //##
    ],
];

const L_ROT: &[Matrix] = &[
    &[
        &[0, 0, 1], //  #
        &[1, 1, 1], //###
    ],
    &[
        &[1, 0], //#
        &[1, 0], //#
        &[1, 1], //##
    ],
    &[
        &[1, 1, 1], //###
        &[1, 0, 0], //#
    ],
    &[
        &[1, 1], //##
        &[0, 1], // #
        &[0, 1], // #
    ],
];
