// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, cross_check, error, game_config, lexicon, matrix, movegen, rack};

// Finds every legal play for a board and rack. Holds the lexicon, so build one
// per word list and reuse it across positions.
pub struct WordFinder<'a> {
    game_config: &'a game_config::GameConfig<'a>,
    lexicon: lexicon::Lexicon,
    num_threads: usize,
}

impl<'a> WordFinder<'a> {
    pub fn new<I, S>(game_config: &'a game_config::GameConfig<'a>, words: I) -> error::Returns<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lexicon = lexicon::Lexicon::from_words(game_config.alphabet(), words)?;
        Ok(Self::with_lexicon(game_config, lexicon))
    }

    pub fn with_lexicon(
        game_config: &'a game_config::GameConfig<'a>,
        lexicon: lexicon::Lexicon,
    ) -> Self {
        Self {
            game_config,
            lexicon,
            num_threads: 1,
        }
    }

    // 0 uses every cpu.
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    #[inline(always)]
    pub fn lexicon(&self) -> &lexicon::Lexicon {
        &self.lexicon
    }

    #[inline(always)]
    pub fn game_config(&self) -> &'a game_config::GameConfig<'a> {
        self.game_config
    }

    // Sorted by direction, start, tiles, without duplicates. The rack is only
    // read; workers search on their own copies.
    pub fn find_all_possible_plays(
        &self,
        board: &board::Board,
        rack: &rack::Rack,
    ) -> Vec<movegen::Play> {
        let anchors = movegen::find_anchor_squares(board);
        let mut cross_checks = cross_check::CrossCheckManager::new(self.game_config, &self.lexicon);
        cross_checks.set_board(board);
        let work = anchors
            .iter()
            .flat_map(|&anchor| matrix::Direction::BOTH.map(|direction| (anchor, direction)))
            .collect::<Vec<_>>();

        let num_threads = match self.num_threads {
            0 => num_cpus::get(),
            n => n,
        }
        .min(work.len());
        let mut plays = if num_threads <= 1 {
            let mut rack = rack.clone();
            let mut plays = Vec::new();
            for &(anchor, direction) in &work {
                self.gen_plays_at(&cross_checks, board, &mut rack, anchor, direction, &mut plays);
            }
            plays
        } else {
            self.gen_plays_in_parallel(&cross_checks, board, rack, &work, num_threads)
        };
        let num_candidates = plays.len();

        for play in plays.iter_mut() {
            use_only_rack_tiles(board, play);
        }
        plays.sort_unstable();
        plays.dedup();
        log::debug!(
            "{} anchors, {} candidates, {} plays, {} threads",
            anchors.len(),
            num_candidates,
            plays.len(),
            num_threads.max(1)
        );
        plays
    }

    fn gen_plays_in_parallel(
        &self,
        cross_checks: &cross_check::CrossCheckManager<'_>,
        board: &board::Board,
        rack: &rack::Rack,
        work: &[(matrix::Coord, matrix::Direction)],
        num_threads: usize,
    ) -> Vec<movegen::Play> {
        let next_work = std::sync::atomic::AtomicUsize::new(0);
        std::thread::scope(|s| {
            let threads = (0..num_threads)
                .map(|_| {
                    let next_work = &next_work;
                    let mut rack = rack.clone();
                    s.spawn(move || {
                        let mut plays = Vec::new();
                        loop {
                            let i = next_work.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                            let Some(&(anchor, direction)) = work.get(i) else {
                                break;
                            };
                            self.gen_plays_at(
                                cross_checks,
                                board,
                                &mut rack,
                                anchor,
                                direction,
                                &mut plays,
                            );
                        }
                        plays
                    })
                })
                .collect::<Vec<_>>();
            let mut plays = Vec::new();
            for thread in threads {
                match thread.join() {
                    Ok(thread_plays) => plays.extend(thread_plays),
                    Err(e) => std::panic::resume_unwind(e),
                }
            }
            plays
        })
    }

    fn gen_plays_at(
        &self,
        cross_checks: &cross_check::CrossCheckManager<'_>,
        board: &board::Board,
        rack: &mut rack::Rack,
        anchor: matrix::Coord,
        direction: matrix::Direction,
        plays: &mut Vec<movegen::Play>,
    ) {
        let left_from_rack = movegen::find_leftpart_limit(board, anchor, direction) > 0;
        let left_parts = movegen::find_left_parts(&self.lexicon, board, anchor, direction, rack);
        let num_plays_before = plays.len();
        for left_part in left_parts.iter() {
            let Some(node) = self.lexicon.find_node(left_part) else {
                continue;
            };
            let withheld: &[u8] = if left_from_rack { left_part } else { &[] };
            let mut rack = rack.withhold(withheld);
            let start = anchor.offset(direction, -(left_part.len() as i8));
            plays.extend(
                movegen::extend_right(
                    &self.lexicon,
                    node,
                    cross_checks,
                    &mut rack,
                    board,
                    direction,
                    anchor,
                    left_part,
                )
                .into_iter()
                .map(|tiles| movegen::Play {
                    direction,
                    start,
                    tiles,
                }),
            );
        }
        log::trace!(
            "anchor {:?} {:?}: {} left parts, {} plays",
            anchor,
            direction,
            left_parts.len(),
            plays.len() - num_plays_before
        );
    }
}

// Squares whose top letter already matches need no tile.
fn use_only_rack_tiles(board: &board::Board, play: &mut movegen::Play) {
    for (i, tile) in play.tiles.iter_mut().enumerate() {
        if board.letter_at(play.start.offset(play.direction, i as i8)) == Some(*tile) {
            *tile = 0;
        }
    }
}
