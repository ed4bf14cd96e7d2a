// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, error, game_config, lexicon, matrix, movegen};

// For each square and direction, the letters that may go on that square and
// still leave a word (or a lone letter) along that direction. Bit t is tile t.
pub struct CrossCheckManager<'a> {
    game_config: &'a game_config::GameConfig<'a>,
    lexicon: &'a lexicon::Lexicon,
    board: board::Board,
    across_bits: Box<[u32]>,
    down_bits: Box<[u32]>,
}

impl<'a> CrossCheckManager<'a> {
    pub fn new(
        game_config: &'a game_config::GameConfig<'a>,
        lexicon: &'a lexicon::Lexicon,
    ) -> Self {
        let board = board::Board::new(game_config);
        let num_squares = board.dim().num_squares();
        let mut ret = Self {
            game_config,
            lexicon,
            board,
            across_bits: vec![0; num_squares].into_boxed_slice(),
            down_bits: vec![0; num_squares].into_boxed_slice(),
        };
        ret.recompute_all();
        ret
    }

    #[inline(always)]
    pub fn board(&self) -> &board::Board {
        &self.board
    }

    pub fn set_board(&mut self, board: &board::Board) {
        if self.board == *board {
            return;
        }
        self.board.clone_from(board);
        self.recompute_all();
    }

    pub fn add_move(&mut self, play: &movegen::Play) -> error::Returns<()> {
        self.board = self.board.place_tiles(play)?;
        self.recompute_all();
        Ok(())
    }

    // Nothing fits off the board.
    #[inline(always)]
    pub fn get_cross_check(&self, coord: matrix::Coord, direction: matrix::Direction) -> u32 {
        if !self.board.in_bounds(coord) {
            return 0;
        }
        let idx = self.board.dim().at(coord);
        match direction {
            matrix::Direction::Across => self.across_bits[idx],
            matrix::Direction::Down => self.down_bits[idx],
        }
    }

    fn recompute_all(&mut self) {
        for coord in self.board.dim().coords() {
            for direction in matrix::Direction::BOTH {
                self.recompute_square(coord, direction);
            }
        }
        log::trace!("cross checks: recomputed {} squares", self.across_bits.len());
    }

    fn recompute_square(&mut self, coord: matrix::Coord, direction: matrix::Direction) {
        let bits = self.compute_square(coord, direction);
        let idx = self.board.dim().at(coord);
        match direction {
            matrix::Direction::Across => self.across_bits[idx] = bits,
            matrix::Direction::Down => self.down_bits[idx] = bits,
        }
    }

    fn compute_square(&self, coord: matrix::Coord, direction: matrix::Direction) -> u32 {
        let cell = self.board.cell_at(coord);
        if cell.height >= self.board.max_height() {
            return 0;
        }
        let mut start = coord;
        while self.board.height_at(start.offset(direction, -1)) > 0 {
            start = start.offset(direction, -1);
        }
        let mut end = coord.offset(direction, 1);
        while self.board.height_at(end) > 0 {
            end = end.offset(direction, 1);
        }
        if start == coord && end == coord.offset(direction, 1) {
            return self.game_config.alphabet().all_letters();
        }

        // walk the letters before coord once, then try each continuation.
        let mut prefix_node = lexicon::Lexicon::ROOT;
        let mut c = start;
        while c != coord {
            match self
                .board
                .letter_at(c)
                .and_then(|tile| self.lexicon.child_node(prefix_node, tile))
            {
                Some(p) => prefix_node = p,
                None => return 0,
            }
            c = c.offset(direction, 1);
        }
        let suffix_start = coord.offset(direction, 1);
        let mut bits = 0u32;
        for (tile, p) in self.lexicon.children(prefix_node) {
            if tile == cell.tile {
                continue;
            }
            let mut p = Some(p);
            let mut c = suffix_start;
            while c != end {
                p = p.and_then(|p| {
                    self.board
                        .letter_at(c)
                        .and_then(|t| self.lexicon.child_node(p, t))
                });
                c = c.offset(direction, 1);
            }
            if p.is_some_and(|p| self.lexicon.is_word_end(p)) {
                bits |= 1 << tile;
            }
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ENGLISH_ALPHABET;
    use crate::board::fixtures::{hello_world_board, simple_board};
    use crate::matrix::{Coord, Direction};

    fn test_lexicon() -> lexicon::Lexicon {
        lexicon::Lexicon::from_words(
            &ENGLISH_ALPHABET,
            ["hello", "cello", "world", "he", "hi", "me"],
        )
        .unwrap()
    }

    fn play(word: &str, row: i8, col: i8, direction: Direction) -> movegen::Play {
        movegen::Play {
            start: Coord::new(row, col),
            direction,
            tiles: ENGLISH_ALPHABET.parse_word(word).unwrap().into_boxed_slice(),
        }
    }

    #[test]
    fn starts_on_an_empty_board() {
        let game_config = game_config::make_upwords_game_config();
        let lexicon = test_lexicon();
        let cross_checks = CrossCheckManager::new(&game_config, &lexicon);
        assert!(cross_checks.board().is_empty());
        let all = game_config.alphabet().all_letters();
        assert_eq!(cross_checks.get_cross_check(Coord::new(4, 4), Direction::Across), all);
        assert_eq!(cross_checks.get_cross_check(Coord::new(0, 9), Direction::Down), all);
        assert_eq!(cross_checks.get_cross_check(Coord::new(10, 0), Direction::Down), 0);
    }

    #[test]
    fn add_move_updates_the_board() {
        let game_config = game_config::make_upwords_game_config();
        let lexicon = test_lexicon();
        let mut cross_checks = CrossCheckManager::new(&game_config, &lexicon);
        cross_checks
            .add_move(&play("HELLO", 4, 3, Direction::Across))
            .unwrap();
        assert_eq!(cross_checks.board().height_at(Coord::new(4, 3)), 1);
        assert_eq!(cross_checks.board().letter_at(Coord::new(4, 3)), Some(8));
        cross_checks
            .add_move(&play("WORLD", 3, 7, Direction::Down))
            .unwrap();
        assert_eq!(*cross_checks.board(), hello_world_board());

        // same tables as a from-scratch computation.
        let mut fresh = CrossCheckManager::new(&game_config, &lexicon);
        fresh.set_board(&hello_world_board());
        for coord in game_config.dim().coords() {
            for direction in Direction::BOTH {
                assert_eq!(
                    cross_checks.get_cross_check(coord, direction),
                    fresh.get_cross_check(coord, direction),
                    "{:?} {:?}",
                    coord,
                    direction
                );
            }
        }
    }

    #[test]
    fn add_move_rejects_bad_plays() {
        let game_config = game_config::make_upwords_game_config();
        let lexicon = test_lexicon();
        let mut cross_checks = CrossCheckManager::new(&game_config, &lexicon);
        assert!(
            cross_checks
                .add_move(&play("HELLO", 4, 7, Direction::Across))
                .is_err()
        );
        assert!(cross_checks.board().is_empty());
    }

    #[test]
    fn set_board_replaces_the_board() {
        let game_config = game_config::make_upwords_game_config();
        let lexicon = test_lexicon();
        let mut cross_checks = CrossCheckManager::new(&game_config, &lexicon);
        cross_checks.set_board(&hello_world_board());
        assert_eq!(*cross_checks.board(), hello_world_board());
        cross_checks.set_board(&simple_board());
        assert_eq!(*cross_checks.board(), simple_board());
        cross_checks.set_board(&board::Board::new(&game_config));
        assert!(cross_checks.board().is_empty());
    }

    #[test]
    fn letters_that_complete_words() {
        let game_config = game_config::make_upwords_game_config();
        let lexicon = test_lexicon();
        let mut cross_checks = CrossCheckManager::new(&game_config, &lexicon);
        cross_checks.set_board(&hello_world_board());
        let letters = |row, col, direction| {
            ENGLISH_ALPHABET.fmt_bits(cross_checks.get_cross_check(Coord::new(row, col), direction))
        };
        assert_eq!(letters(5, 3, Direction::Down), "EI");
        assert_eq!(letters(3, 4, Direction::Down), "HM");
        assert_eq!(letters(6, 8, Direction::Across), "");
        assert_eq!(letters(5, 3, Direction::Across).len(), 26);
    }

    #[test]
    fn current_letter_is_excluded() {
        let game_config = game_config::make_upwords_game_config();
        let lexicon = test_lexicon();
        let mut cross_checks = CrossCheckManager::new(&game_config, &lexicon);
        cross_checks.set_board(&hello_world_board());
        assert_eq!(
            ENGLISH_ALPHABET
                .fmt_bits(cross_checks.get_cross_check(Coord::new(4, 3), Direction::Across)),
            "C"
        );
    }

    #[test]
    fn full_stack_takes_nothing() {
        let game_config = game_config::make_upwords_game_config();
        let lexicon = test_lexicon();
        let o = ENGLISH_ALPHABET.tile_of('O').unwrap();
        let mut board = hello_world_board();
        for _ in 0..3 {
            board = board.place_single_tile(o, Coord::new(4, 7)).unwrap();
        }
        assert_eq!(board.height_at(Coord::new(4, 7)), 5);
        let mut cross_checks = CrossCheckManager::new(&game_config, &lexicon);
        cross_checks.set_board(&board);
        assert_eq!(cross_checks.get_cross_check(Coord::new(4, 7), Direction::Down), 0);
        assert_eq!(cross_checks.get_cross_check(Coord::new(4, 7), Direction::Across), 0);
    }
}
