// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, cross_check, lexicon, matrix, rack};

// One candidate move. tiles has one entry per square of the word, starting at
// start; tile 0 means the square's current letter is played through.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Play {
    pub direction: matrix::Direction,
    pub start: matrix::Coord,
    pub tiles: Box<[u8]>,
}

impl Play {
    #[inline(always)]
    pub fn coord_at(&self, idx: usize) -> matrix::Coord {
        self.start.offset(self.direction, idx as i8)
    }

    // the newly placed tiles and where they go.
    pub fn placed_tiles(&self) -> impl Iterator<Item = (matrix::Coord, u8)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != 0)
            .map(|(i, &tile)| (self.coord_at(i), tile))
    }

    // the whole word, with played-through squares read off the board.
    pub fn word(&self, board: &board::Board) -> Vec<u8> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, &tile)| match tile {
                0 => board.letter_at(self.coord_at(i)).unwrap_or(0),
                _ => tile,
            })
            .collect()
    }
}

#[inline(always)]
fn is_anchor_square(board: &board::Board, board_is_empty: bool, coord: matrix::Coord) -> bool {
    if board_is_empty {
        board.dim().center_squares().contains(&coord)
    } else {
        board.in_bounds(coord)
            && board.height_at(coord) < board.max_height()
            && board.adjacent_cells(coord).any(|cell| cell.height > 0)
    }
}

// Squares a new word may be built through. On an empty board these are the
// four center squares; otherwise every square that can still take a tile and
// touches an occupied square.
pub fn find_anchor_squares(board: &board::Board) -> Vec<matrix::Coord> {
    let board_is_empty = board.is_empty();
    if board_is_empty {
        return board.dim().center_squares().to_vec();
    }
    board
        .dim()
        .coords()
        .filter(|&coord| is_anchor_square(board, false, coord))
        .collect()
}

// How many free squares precede coord. Stops before an occupied square, another
// anchor, or the edge, so no left part ever reaches into another anchor's turf.
pub fn find_leftpart_limit(
    board: &board::Board,
    coord: matrix::Coord,
    direction: matrix::Direction,
) -> i8 {
    let board_is_empty = board.is_empty();
    let mut limit = 0;
    let mut c = coord;
    for _ in 0..coord.idx(direction) {
        c = c.offset(direction, -1);
        if board.height_at(c) > 0 || is_anchor_square(board, board_is_empty, c) {
            break;
        }
        limit += 1;
    }
    limit
}

fn find_free_left_parts(
    lexicon: &lexicon::Lexicon,
    node: i32,
    limit: i8,
    rack: &mut rack::Rack,
    prefix: &mut Vec<u8>,
    found: &mut Vec<Box<[u8]>>,
) {
    if limit == 0 {
        return;
    }
    let available = rack.available_bits();
    for tile in alphabet::iter_bits(available) {
        if let Some(child) = lexicon.child_node(node, tile) {
            prefix.push(tile);
            found.push(prefix.clone().into_boxed_slice());
            let mut rack = rack.withhold(std::slice::from_ref(&tile));
            find_free_left_parts(lexicon, child, limit - 1, &mut rack, prefix, found);
            prefix.pop();
        }
    }
}

// Every string that may precede anchor. With room before the anchor these are
// all rack-buildable prefixes up to that length, the empty one included.
// Without room the left part is whatever already sits before the anchor.
pub fn find_left_parts(
    lexicon: &lexicon::Lexicon,
    board: &board::Board,
    anchor: matrix::Coord,
    direction: matrix::Direction,
    rack: &rack::Rack,
) -> Vec<Box<[u8]>> {
    let limit = find_leftpart_limit(board, anchor, direction);
    if limit > 0 {
        let mut found = vec![Box::<[u8]>::from([])];
        find_free_left_parts(
            lexicon,
            lexicon::Lexicon::ROOT,
            limit,
            &mut rack.clone(),
            &mut Vec::with_capacity(limit as usize),
            &mut found,
        );
        return found;
    }
    let before = anchor.offset(direction, -1);
    if !board.in_bounds(before) {
        return vec![Box::from([])];
    }
    let run = board.find_word(before, direction);
    let end = run
        .iter()
        .position(|&(coord, _)| coord == anchor)
        .unwrap_or(run.len());
    vec![run[..end].iter().map(|&(_, tile)| tile).collect()]
}

struct ExtendEnv<'a> {
    lexicon: &'a lexicon::Lexicon,
    cross_checks: &'a cross_check::CrossCheckManager<'a>,
    board: &'a board::Board,
    direction: matrix::Direction,
    word: Vec<u8>,
    num_placed: u8,
    found: Vec<Box<[u8]>>,
}

fn extend_right_from(env: &mut ExtendEnv<'_>, rack: &mut rack::Rack, p: i32, coord: matrix::Coord) {
    let cell = env.board.cell_at(coord);
    if cell.height == 0 && env.num_placed > 0 && env.lexicon.is_word_end(p) {
        env.found.push(env.word.clone().into_boxed_slice());
    }
    if !env.board.in_bounds(coord) {
        return;
    }
    let allowed = if cell.height > 0 {
        1 << cell.tile
    } else {
        rack.available_bits()
            & env
                .cross_checks
                .get_cross_check(coord, env.direction.orthogonal())
    };
    if allowed == 0 {
        return;
    }
    let next = coord.offset(env.direction, 1);
    let lexicon = env.lexicon;
    for (tile, child) in lexicon.children(p) {
        if allowed & (1 << tile) == 0 {
            continue;
        }
        env.word.push(tile);
        if cell.height > 0 {
            extend_right_from(env, rack, child, next);
        } else {
            env.num_placed += 1;
            let mut rack = rack.withhold(std::slice::from_ref(&tile));
            extend_right_from(env, &mut rack, child, next);
            env.num_placed -= 1;
        }
        env.word.pop();
    }
}

// Completes partial_word (whose lexicon node is p) rightward or downward from
// coord. Occupied squares contribute their own letter; empty squares take a
// rack letter that also fits the perpendicular word. Only words that place at
// least one tile come back.
#[allow(clippy::too_many_arguments)]
pub fn extend_right(
    lexicon: &lexicon::Lexicon,
    p: i32,
    cross_checks: &cross_check::CrossCheckManager<'_>,
    rack: &mut rack::Rack,
    board: &board::Board,
    direction: matrix::Direction,
    coord: matrix::Coord,
    partial_word: &[u8],
) -> Vec<Box<[u8]>> {
    let mut env = ExtendEnv {
        lexicon,
        cross_checks,
        board,
        direction,
        word: partial_word.to_vec(),
        num_placed: 0,
        found: Vec::new(),
    };
    extend_right_from(&mut env, rack, p, coord);
    env.found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ENGLISH_ALPHABET;
    use crate::board::fixtures::{board_of, simple_board};
    use crate::game_config;
    use crate::matrix::{Coord, Direction};

    fn lexicon(words: &[&str]) -> lexicon::Lexicon {
        lexicon::Lexicon::from_words(&ENGLISH_ALPHABET, words).unwrap()
    }

    fn rack(letters: &str) -> rack::Rack {
        rack::Rack::from_letters(&ENGLISH_ALPHABET, letters).unwrap()
    }

    fn strings(found: &[Box<[u8]>]) -> Vec<String> {
        found.iter().map(|w| ENGLISH_ALPHABET.fmt_word(w)).collect()
    }

    #[test]
    fn anchors_on_an_empty_board() {
        let board = board::Board::default();
        assert_eq!(
            find_anchor_squares(&board),
            [(4, 4), (4, 5), (5, 4), (5, 5)].map(Coord::from)
        );
    }

    #[test]
    fn anchors_touch_tiles() {
        let board = simple_board();
        let anchors = find_anchor_squares(&board);
        for expected in [
            (2, 7), (3, 3), (3, 4), (3, 5), (3, 6), (3, 7), (3, 8), (4, 2), (4, 3),
            (4, 4), (4, 5), (4, 6), (4, 7), (4, 8), (5, 3), (5, 4), (5, 5), (5, 6),
            (5, 7), (5, 8), (6, 6), (6, 7), (6, 8), (7, 6), (7, 7), (7, 8), (8, 7),
        ] {
            assert!(anchors.contains(&expected.into()), "{:?}", expected);
        }
        for coord in board.dim().coords() {
            assert_eq!(
                anchors.contains(&coord),
                board.adjacent_cells(coord).any(|cell| cell.height > 0),
                "{:?}",
                coord
            );
        }
        assert!(!anchors.contains(&Coord::new(0, 0)));
        assert!(!anchors.contains(&Coord::new(6, 5)));
    }

    #[test]
    fn full_stacks_are_not_anchors() {
        let mut ubf = [["0 "; 10]; 10];
        ubf[4][3] = "5T";
        ubf[4][4] = "1E";
        ubf[4][5] = "5S";
        ubf[4][6] = "1T";
        let board = board_of(&ubf);
        let anchors = find_anchor_squares(&board);
        assert!(!anchors.contains(&Coord::new(4, 3)));
        assert!(!anchors.contains(&Coord::new(4, 5)));
        assert!(anchors.contains(&Coord::new(4, 4)));
        assert!(anchors.contains(&Coord::new(4, 6)));
        assert!(anchors.contains(&Coord::new(3, 3)));
    }

    #[test]
    fn leftpart_limits() {
        let board = simple_board();
        // blocked by a tile.
        assert_eq!(find_leftpart_limit(&board, Coord::new(5, 8), Direction::Across), 0);
        // runs to the edge.
        assert_eq!(find_leftpart_limit(&board, Coord::new(3, 3), Direction::Across), 3);
        assert_eq!(find_leftpart_limit(&board, Coord::new(3, 4), Direction::Down), 3);
        assert_eq!(find_leftpart_limit(&board, Coord::new(0, 8), Direction::Down), 0);
        // stops before another anchor.
        assert_eq!(find_leftpart_limit(&board, Coord::new(6, 6), Direction::Across), 1);
    }

    #[test]
    fn left_parts_already_on_the_board() {
        let board = simple_board();
        let lexicon = lexicon(&[]);
        for (anchor, direction, expected) in [
            ((3, 9), Direction::Across, "WE"),
            ((2, 9), Direction::Across, "E"),
            ((5, 4), Direction::Across, "A"),
            ((5, 4), Direction::Down, "E"),
            ((6, 3), Direction::Down, "HA"),
        ] {
            let left_parts =
                find_left_parts(&lexicon, &board, anchor.into(), direction, &rack::Rack::new());
            assert_eq!(strings(&left_parts), [expected], "{:?} {:?}", anchor, direction);
        }
    }

    #[test]
    fn left_parts_from_the_rack() {
        let board = simple_board();
        let lexicon = lexicon(&["hello", "ham", "he", "test"]);
        let rack = rack("HELZZZZ");
        let before = rack.clone();
        // hell would need a second L.
        let left_parts = find_left_parts(&lexicon, &board, Coord::new(2, 7), Direction::Across, &rack);
        assert_eq!(strings(&left_parts), ["", "H", "HE", "HEL"]);
        let left_parts = find_left_parts(&lexicon, &board, Coord::new(6, 6), Direction::Across, &rack);
        assert_eq!(strings(&left_parts), ["", "H"]);
        assert_eq!(rack, before);
    }

    #[test]
    fn left_part_at_the_edge() {
        let board = simple_board();
        let left_parts = find_left_parts(
            &lexicon(&[]),
            &board,
            Coord::new(0, 8),
            Direction::Down,
            &rack::Rack::new(),
        );
        assert_eq!(strings(&left_parts), [""]);
    }

    #[test]
    fn extend_right_respects_cross_checks() {
        let game_config = game_config::make_upwords_game_config();
        let board = simple_board();
        let mut rack = rack("H");
        let before = rack.clone();
        for (words, expected) in [(&["eh", "ah"][..], &["EH"][..]), (&["eh"][..], &[][..])] {
            let lexicon = lexicon(words);
            let mut cross_checks = cross_check::CrossCheckManager::new(&game_config, &lexicon);
            cross_checks.set_board(&board);
            let e = [5];
            let p = lexicon.find_node(&e).unwrap();
            let found = extend_right(
                &lexicon,
                p,
                &cross_checks,
                &mut rack,
                &board,
                Direction::Down,
                Coord::new(5, 4),
                &e,
            );
            assert_eq!(strings(&found), expected);
            assert_eq!(rack, before);
        }
    }

    #[test]
    fn extend_right_plays_through_board_letters() {
        let game_config = game_config::make_upwords_game_config();
        let board = simple_board();
        let lexicon = lexicon(&["hello", "hellos", "sees"]);
        let mut cross_checks = cross_check::CrossCheckManager::new(&game_config, &lexicon);
        cross_checks.set_board(&board);
        let mut rack = rack("S");

        // from the empty square after HELLO.
        let hello = ENGLISH_ALPHABET.parse_word("HELLO").unwrap();
        let p = lexicon.find_node(&hello).unwrap();
        let found = extend_right(
            &lexicon,
            p,
            &cross_checks,
            &mut rack,
            &board,
            Direction::Across,
            Coord::new(4, 8),
            &hello,
        );
        assert_eq!(strings(&found), ["HELLOS"]);

        // from the H itself, reading the board letters on the way.
        let found = extend_right(
            &lexicon,
            lexicon::Lexicon::ROOT,
            &cross_checks,
            &mut rack,
            &board,
            Direction::Across,
            Coord::new(4, 3),
            &[],
        );
        assert_eq!(strings(&found), ["HELLOS"]);
        assert_eq!(rack.count(19), 1);

        // HELLO alone places nothing.
        let found = extend_right(
            &lexicon,
            lexicon::Lexicon::ROOT,
            &cross_checks,
            &mut rack::Rack::new(),
            &board,
            Direction::Across,
            Coord::new(4, 3),
            &[],
        );
        assert!(found.is_empty());
    }

    #[test]
    fn play_helpers() {
        let board = simple_board();
        let play = Play {
            direction: Direction::Down,
            start: Coord::new(0, 8),
            tiles: vec![1, 0, 0, 0, 18].into_boxed_slice(),
        };
        assert_eq!(ENGLISH_ALPHABET.fmt_word(&play.word(&board)), "ASEER");
        assert_eq!(
            play.placed_tiles().collect::<Vec<_>>(),
            [(Coord::new(0, 8), 1), (Coord::new(4, 8), 18)]
        );
        let json = serde_json::to_string(&play).unwrap();
        assert_eq!(serde_json::from_str::<Play>(&json).unwrap(), play);
    }
}
