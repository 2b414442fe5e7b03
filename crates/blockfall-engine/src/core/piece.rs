use std::fmt;

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{board::BOARD_WIDTH, color::Color};

/// Largest extent of a shape matrix in either direction.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Binary shape matrix of a piece (`true` = occupied).
///
/// A `Shape` is a plain value: rotating produces a new matrix and never
/// touches the catalog entry or any other piece it was copied from.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| if self.cells[y][x] { '#' } else { '.' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        f.debug_tuple("Shape").field(&rows.join("/")).finish()
    }
}

impl Shape {
    /// Builds a shape from a row-major 0/1 matrix.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty, ragged, or larger than 4×4.
    #[must_use]
    pub const fn from_matrix(matrix: &[&[u8]]) -> Self {
        let height = matrix.len();
        assert!(height > 0 && height <= MAX_SHAPE_SIZE);
        let width = matrix[0].len();
        assert!(width > 0 && width <= MAX_SHAPE_SIZE);

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < height {
            assert!(matrix[y].len() == width);
            let mut x = 0;
            while x < width {
                cells[y][x] = matrix[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y][x]
    }

    /// Returns the `(column, row)` offsets of all occupied cells, row-major.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| self.cells[y][x].then_some((x, y)))
        })
    }

    /// Rotates the matrix 90° clockwise.
    ///
    /// Transpose-then-reverse: for an R×C matrix the result is C×R and its row
    /// `i` is the old column `i` read bottom-to-top. There is no per-piece
    /// rotation center.
    #[must_use]
    pub const fn rotated_cw(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut i = 0;
        while i < self.width {
            let mut j = 0;
            while j < self.height {
                cells[i][j] = self.cells[self.height - 1 - j][i];
                j += 1;
            }
            i += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Returns the shape after 0, 1, 2 and 3 clockwise rotations.
    #[must_use]
    pub fn rotations(&self) -> ArrayVec<Self, 4> {
        let mut rotations = ArrayVec::new();
        let mut shape = *self;
        for _ in 0..4 {
            rotations.push(shape);
            shape = shape.rotated_cw();
        }
        rotations
    }

    /// Returns whether this is the flat 1×4 bar.
    #[must_use]
    pub const fn is_horizontal_bar(&self) -> bool {
        self.height == 1 && self.width == 4
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum TetrominoKind {
    I = 0,
    O = 1,
    T = 2,
    S = 3,
    Z = 4,
    J = 5,
    L = 6,
}

impl Distribution<TetrominoKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TetrominoKind {
        TetrominoKind::ALL[rng.random_range(0..TetrominoKind::LEN)]
    }
}

impl TetrominoKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        TetrominoKind::I,
        TetrominoKind::O,
        TetrominoKind::T,
        TetrominoKind::S,
        TetrominoKind::Z,
        TetrominoKind::J,
        TetrominoKind::L,
    ];

    #[must_use]
    pub fn tetromino(self) -> &'static Tetromino {
        &TETROMINOES[self as usize]
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            TetrominoKind::I => 'I',
            TetrominoKind::O => 'O',
            TetrominoKind::T => 'T',
            TetrominoKind::S => 'S',
            TetrominoKind::Z => 'Z',
            TetrominoKind::J => 'J',
            TetrominoKind::L => 'L',
        }
    }
}

/// Immutable catalog entry: spawn shape and color of one tetromino.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    pub kind: TetrominoKind,
    pub shape: Shape,
    pub color: Color,
}

/// The fixed tetromino catalog, indexed by [`TetrominoKind`].
pub static TETROMINOES: [Tetromino; TetrominoKind::LEN] = [
    Tetromino {
        kind: TetrominoKind::I,
        shape: Shape::from_matrix(&[&[1, 1, 1, 1]]),
        color: Color::rgb(0x00, 0xf0, 0xf0),
    },
    Tetromino {
        kind: TetrominoKind::O,
        shape: Shape::from_matrix(&[&[1, 1], &[1, 1]]),
        color: Color::rgb(0xf0, 0xf0, 0x00),
    },
    Tetromino {
        kind: TetrominoKind::T,
        shape: Shape::from_matrix(&[&[0, 1, 0], &[1, 1, 1]]),
        color: Color::rgb(0xa0, 0x00, 0xf0),
    },
    Tetromino {
        kind: TetrominoKind::S,
        shape: Shape::from_matrix(&[&[1, 1, 0], &[0, 1, 1]]),
        color: Color::rgb(0x00, 0xff, 0x00),
    },
    Tetromino {
        kind: TetrominoKind::Z,
        shape: Shape::from_matrix(&[&[0, 1, 1], &[1, 1, 0]]),
        color: Color::rgb(0xff, 0x00, 0x00),
    },
    Tetromino {
        kind: TetrominoKind::J,
        shape: Shape::from_matrix(&[&[1, 0, 0], &[1, 1, 1]]),
        color: Color::rgb(0x00, 0x00, 0xff),
    },
    Tetromino {
        kind: TetrominoKind::L,
        shape: Shape::from_matrix(&[&[0, 0, 1], &[1, 1, 1]]),
        color: Color::rgb(0xff, 0xa5, 0x00),
    },
];

/// A falling piece: shape, color and the anchor of the shape's top-left cell.
///
/// Pieces are values. Movement and rotation return new `Piece` instances, so
/// trial moves never disturb the piece they started from.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, TetrominoKind};
///
/// let piece = Piece::spawn(TetrominoKind::I);
/// assert_eq!((piece.x(), piece.y()), (3, 0));
/// let rotated = piece.rotated_cw();
/// assert_eq!(rotated.shape().height(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: TetrominoKind,
    shape: Shape,
    color: Color,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece at its spawn anchor: horizontally centered, row 0.
    #[must_use]
    pub fn spawn(kind: TetrominoKind) -> Self {
        let tetromino = kind.tetromino();
        let x = BOARD_WIDTH / 2 - tetromino.shape.width() / 2;
        Self {
            kind,
            shape: tetromino.shape,
            color: tetromino.color,
            x: i32::try_from(x).unwrap(),
            y: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TetrominoKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns the board coordinates of every occupied cell.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.occupied_cells().map(move |(dx, dy)| {
            (
                self.x + i32::try_from(dx).unwrap(),
                self.y + i32::try_from(dy).unwrap(),
            )
        })
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    #[must_use]
    pub fn with_shape(&self, shape: Shape) -> Self {
        Self { shape, ..*self }
    }

    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        self.with_shape(self.shape.rotated_cw())
    }
}
