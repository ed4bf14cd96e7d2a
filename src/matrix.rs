// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Across, Direction::Down];

    #[inline(always)]
    pub fn orthogonal(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    #[inline(always)]
    pub fn is_down(self) -> bool {
        matches!(self, Direction::Down)
    }
}

// no bounds checking, offsets may leave the board.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    #[inline(always)]
    pub fn new(row: i8, col: i8) -> Coord {
        Coord { row, col }
    }

    #[inline(always)]
    pub fn offset(self, direction: Direction, delta: i8) -> Coord {
        match direction {
            Direction::Across => Coord {
                row: self.row,
                col: self.col + delta,
            },
            Direction::Down => Coord {
                row: self.row + delta,
                col: self.col,
            },
        }
    }

    // index along the lane, the column for across and the row for down.
    #[inline(always)]
    pub fn idx(self, direction: Direction) -> i8 {
        match direction {
            Direction::Across => self.col,
            Direction::Down => self.row,
        }
    }

    // up, down, left, right.
    #[inline(always)]
    pub fn neighbors(self) -> [Coord; 4] {
        [
            self.offset(Direction::Down, -1),
            self.offset(Direction::Down, 1),
            self.offset(Direction::Across, -1),
            self.offset(Direction::Across, 1),
        ]
    }
}

impl From<(i8, i8)> for Coord {
    #[inline(always)]
    fn from((row, col): (i8, i8)) -> Coord {
        Coord { row, col }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    #[inline(always)]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row >= 0 && coord.row < self.rows && coord.col >= 0 && coord.col < self.cols
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn at(&self, coord: Coord) -> usize {
        self.at_row_col(coord.row, coord.col)
    }

    #[inline(always)]
    pub fn num_squares(&self) -> usize {
        ((self.rows as isize) * (self.cols as isize)) as usize
    }

    // row-major.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Coord { row, col }))
    }

    // the two middle rows times the two middle columns.
    pub fn center_squares(&self) -> [Coord; 4] {
        let (r, c) = (self.rows / 2, self.cols / 2);
        [
            Coord::new(r - 1, c - 1),
            Coord::new(r - 1, c),
            Coord::new(r, c - 1),
            Coord::new(r, c),
        ]
    }
}
