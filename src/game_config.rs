// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, matrix};

pub struct StaticGameConfig<'a> {
    alphabet: &'a alphabet::Alphabet<'a>,
    dim: matrix::Dim,
    max_height: u8, // >= 1
    rack_size: u8,
}

pub enum GameConfig<'a> {
    Static(StaticGameConfig<'a>),
}

impl<'a> GameConfig<'a> {
    #[inline(always)]
    pub fn alphabet(&self) -> &'a alphabet::Alphabet<'a> {
        match self {
            GameConfig::Static(x) => x.alphabet,
        }
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        match self {
            GameConfig::Static(x) => x.dim,
        }
    }

    // tallest allowed stack. a square this tall takes no more tiles.
    #[inline(always)]
    pub fn max_height(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.max_height,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }
}

pub fn make_upwords_game_config() -> GameConfig<'static> {
    GameConfig::Static(StaticGameConfig {
        alphabet: &alphabet::ENGLISH_ALPHABET,
        dim: matrix::Dim { rows: 10, cols: 10 },
        max_height: 5,
        rack_size: 7,
    })
}
