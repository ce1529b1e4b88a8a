use crate::{Cell, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// The closed command vocabulary consumed by the game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    Undo,
    Quit,
}

impl Direction {
    pub fn iter() -> impl Iterator<Item = Self> {
        [Self::Up, Self::Down, Self::Left, Self::Right].into_iter()
    }

    /// Unit vector `(d_row, d_col)` along which a lane is scanned, starting at
    /// the front cell the tiles are pushed toward.
    pub const fn step(self) -> (isize, isize) {
        match self {
            Self::Up => (1, 0),
            Self::Left => (0, 1),
            Self::Down => (-1, 0),
            Self::Right => (0, -1),
        }
    }

    /// Front cell of every lane, one per row or column.
    pub fn lane_starts(self, size: usize) -> Vec<Cell> {
        let last = size - 1;

        (0..size)
            .map(|i| match self {
                Self::Up => Cell::new(0, i),
                Self::Left => Cell::new(i, 0),
                Self::Down => Cell::new(last, i),
                Self::Right => Cell::new(i, last),
            })
            .collect()
    }

    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// Whether tiles travel toward higher row/column indices.
    pub const fn toward_increasing(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }
}

impl From<Direction> for Move {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
        }
    }
}

impl TryFrom<Move> for Direction {
    type Error = Error;

    fn try_from(value: Move) -> Result<Self, Self::Error> {
        match value {
            Move::Up => Ok(Self::Up),
            Move::Down => Ok(Self::Down),
            Move::Left => Ok(Self::Left),
            Move::Right => Ok(Self::Right),
            Move::Undo | Move::Quit => Err(Error::InvalidDirection(value.code())),
        }
    }
}

impl Move {
    /// Numeric encoding used by scripted input and in logs.
    pub const fn code(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Left => 2,
            Self::Down => 3,
            Self::Right => 4,
            Self::Undo => 0,
            Self::Quit => -1,
        }
    }
}

impl TryFrom<i8> for Move {
    type Error = Error;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Up),
            2 => Ok(Self::Left),
            3 => Ok(Self::Down),
            4 => Ok(Self::Right),
            0 => Ok(Self::Undo),
            -1 => Ok(Self::Quit),
            _ => Err(Error::InvalidDirection(code)),
        }
    }
}
