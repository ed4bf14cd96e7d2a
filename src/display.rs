// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, matrix, movegen};

#[inline(always)]
pub fn column_label(col: i8) -> char {
    ((col as u8) + 0x61) as char
}

// "5e" for across (row then column), "e5" for down.
pub fn fmt_coord(coord: matrix::Coord, direction: matrix::Direction) -> String {
    match direction {
        matrix::Direction::Across => format!("{}{}", coord.row + 1, column_label(coord.col)),
        matrix::Direction::Down => format!("{}{}", column_label(coord.col), coord.row + 1),
    }
}

// Letters already on the board are parenthesized, as in "4b TES(T)".
pub fn format_play(
    alphabet: &alphabet::Alphabet<'_>,
    board: &board::Board,
    play: &movegen::Play,
) -> String {
    let mut s = fmt_coord(play.start, play.direction);
    s.push(' ');
    let mut inside = false;
    for (i, &tile) in play.tiles.iter().enumerate() {
        let tile = if tile == 0 {
            if !inside {
                s.push('(');
                inside = true;
            }
            board.letter_at(play.coord_at(i)).unwrap_or(0)
        } else {
            if inside {
                s.push(')');
                inside = false;
            }
            tile
        };
        s.push_str(alphabet.from_board(tile).unwrap_or("?"));
    }
    if inside {
        s.push(')');
    }
    s
}

fn fmt_edge(f: &mut std::fmt::Formatter<'_>, dim: matrix::Dim) -> std::fmt::Result {
    write!(f, "  +")?;
    for _ in 1..dim.cols {
        write!(f, "---")?;
    }
    writeln!(f, "--+")
}

fn fmt_column_labels(f: &mut std::fmt::Formatter<'_>, dim: matrix::Dim) -> std::fmt::Result {
    write!(f, "  ")?;
    for c in 0..dim.cols {
        write!(f, " {} ", column_label(c))?;
    }
    writeln!(f)
}

// Each square shows its top letter and stack height, "." when empty.
pub struct BoardPrinter<'a> {
    pub alphabet: &'a alphabet::Alphabet<'a>,
    pub board: &'a board::Board,
}

impl std::fmt::Display for BoardPrinter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dim = self.board.dim();
        fmt_column_labels(f, dim)?;
        fmt_edge(f, dim)?;
        for r in 0..dim.rows {
            write!(f, "{:2}|", r + 1)?;
            for c in 0..dim.cols {
                if c > 0 {
                    write!(f, " ")?;
                }
                let cell = self.board.cell_at(matrix::Coord::new(r, c));
                match self.alphabet.from_board(cell.tile) {
                    Some(label) => write!(f, "{}{}", label, cell.height)?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f, "|{}", r + 1)?;
        }
        fmt_edge(f, dim)?;
        fmt_column_labels(f, dim)
    }
}

impl std::fmt::Display for board::Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(
            &BoardPrinter {
                alphabet: &alphabet::ENGLISH_ALPHABET,
                board: self,
            },
            f,
        )
    }
}

pub fn print_board(alphabet: &alphabet::Alphabet<'_>, board: &board::Board) {
    print!("{}", BoardPrinter { alphabet, board });
}
