// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, error, game_config, matrix, movegen};

// height 0 if and only if tile 0. tile is the topmost letter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub height: u8,
    pub tile: u8,
}

// A value type. Mutations return new boards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    dim: matrix::Dim,
    max_height: u8,
    alphabet_len: u8,
    cells: Box<[Cell]>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(&game_config::make_upwords_game_config())
    }
}

impl Board {
    pub fn new(game_config: &game_config::GameConfig<'_>) -> Board {
        let dim = game_config.dim();
        Board {
            dim,
            max_height: game_config.max_height(),
            alphabet_len: game_config.alphabet().len(),
            cells: vec![Cell::default(); dim.num_squares()].into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn max_height(&self) -> u8 {
        self.max_height
    }

    #[inline(always)]
    pub fn in_bounds(&self, coord: matrix::Coord) -> bool {
        self.dim.contains(coord)
    }

    // off-board squares read as empty.
    #[inline(always)]
    pub fn cell_at(&self, coord: matrix::Coord) -> Cell {
        if self.in_bounds(coord) {
            self.cells[self.dim.at(coord)]
        } else {
            Cell::default()
        }
    }

    #[inline(always)]
    pub fn height_at(&self, coord: matrix::Coord) -> u8 {
        self.cell_at(coord).height
    }

    #[inline(always)]
    pub fn letter_at(&self, coord: matrix::Coord) -> Option<u8> {
        match self.cell_at(coord).tile {
            0 => None,
            tile => Some(tile),
        }
    }

    // up, down, left, right, skipping squares off the board.
    pub fn adjacent_cells(&self, coord: matrix::Coord) -> impl Iterator<Item = Cell> + '_ {
        coord
            .neighbors()
            .into_iter()
            .filter(|&c| self.in_bounds(c))
            .map(|c| self.cell_at(c))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.height == 0)
    }

    // The maximal run of occupied squares through coord. Empty if coord is.
    pub fn find_word(
        &self,
        coord: matrix::Coord,
        direction: matrix::Direction,
    ) -> Vec<(matrix::Coord, u8)> {
        let mut ret = Vec::new();
        if self.height_at(coord) == 0 {
            return ret;
        }
        let mut start = coord;
        while self.height_at(start.offset(direction, -1)) > 0 {
            start = start.offset(direction, -1);
        }
        let mut c = start;
        while let Some(tile) = self.letter_at(c) {
            ret.push((c, tile));
            c = c.offset(direction, 1);
        }
        ret
    }

    fn stack_tile(&mut self, tile: u8, coord: matrix::Coord) -> error::Returns<()> {
        if !self.in_bounds(coord) {
            return_error!(format!(
                "square ({}, {}) is off the {}x{} board",
                coord.row, coord.col, self.dim.rows, self.dim.cols
            ));
        }
        if tile == 0 || tile >= self.alphabet_len {
            return_error!(format!("invalid tile {}", tile));
        }
        let idx = self.dim.at(coord);
        let cell = &mut self.cells[idx];
        if cell.height >= self.max_height {
            return_error!(format!(
                "square ({}, {}) is already {} tiles high",
                coord.row, coord.col, cell.height
            ));
        }
        cell.height += 1;
        cell.tile = tile;
        Ok(())
    }

    pub fn place_single_tile(&self, tile: u8, coord: matrix::Coord) -> error::Returns<Board> {
        let mut ret = self.clone();
        ret.stack_tile(tile, coord)?;
        Ok(ret)
    }

    // tile 0 in the play leaves that square alone.
    pub fn place_tiles(&self, play: &movegen::Play) -> error::Returns<Board> {
        let mut ret = self.clone();
        for (i, &tile) in play.tiles.iter().enumerate() {
            if tile != 0 {
                ret.stack_tile(tile, play.start.offset(play.direction, i as i8))?;
            }
        }
        Ok(ret)
    }

    // Each square is "<height><letter>", such as "1W" or "0 ".
    pub fn from_ubf<Row: AsRef<[S]>, S: AsRef<str>>(
        game_config: &game_config::GameConfig<'_>,
        rows: &[Row],
    ) -> error::Returns<Board> {
        let mut board = Board::new(game_config);
        let expected_dim = board.dim;
        if rows.len() != expected_dim.rows as usize {
            return_error!(format!(
                "board: need {} rows, found {} rows",
                expected_dim.rows,
                rows.len()
            ));
        }
        for (row_num, row) in (0..).zip(rows.iter()) {
            let row = row.as_ref();
            if row.len() != expected_dim.cols as usize {
                return_error!(format!(
                    "board row {} (0-based): need {} cols, found {} cols",
                    row_num,
                    expected_dim.cols,
                    row.len()
                ));
            }
            for (col_num, token) in (0..).zip(row.iter()) {
                let cell = parse_square(game_config.alphabet(), board.max_height, token.as_ref())
                    .map_err(|e| {
                        error::new(format!(
                            "board row {} col {} (0-based): {}",
                            row_num, col_num, e
                        ))
                    })?;
                let idx = expected_dim.at_row_col(row_num, col_num);
                board.cells[idx] = cell;
            }
        }
        Ok(board)
    }

    pub fn from_ubf_json(
        game_config: &game_config::GameConfig<'_>,
        json: &str,
    ) -> error::Returns<Board> {
        let rows = serde_json::from_str::<Vec<Vec<String>>>(json)?;
        Board::from_ubf(game_config, &rows)
    }

    pub fn to_ubf(&self, alphabet: &alphabet::Alphabet<'_>) -> Vec<Vec<String>> {
        (0..self.dim.rows)
            .map(|row| {
                (0..self.dim.cols)
                    .map(|col| {
                        let cell = self.cells[self.dim.at_row_col(row, col)];
                        format!(
                            "{}{}",
                            cell.height,
                            alphabet.from_board(cell.tile).unwrap_or(" ")
                        )
                    })
                    .collect()
            })
            .collect()
    }
}

fn parse_square(
    alphabet: &alphabet::Alphabet<'_>,
    max_height: u8,
    token: &str,
) -> error::Returns<Cell> {
    let mut chars = token.chars();
    let (Some(h), Some(c), None) = (chars.next(), chars.next(), chars.next()) else {
        return_error!(format!("need 2 characters, found {:?}", token));
    };
    let height = match h.to_digit(10) {
        Some(height) if height <= max_height as u32 => height as u8,
        _ => {
            return_error!(format!("invalid height in {:?}", token));
        }
    };
    let tile = if c == ' ' {
        0
    } else {
        match alphabet.tile_of(c) {
            Some(tile) => tile,
            None => {
                return_error!(format!("invalid letter in {:?}", token));
            }
        }
    };
    if (height == 0) != (tile == 0) {
        return_error!(format!("height and letter disagree in {:?}", token));
    }
    Ok(Cell { height, tile })
}
