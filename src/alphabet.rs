// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;

pub struct Tile<'a> {
    label: &'a str,
}

pub struct StaticAlphabet<'a> {
    tiles: &'a [Tile<'a>],
}

pub enum Alphabet<'a> {
    Static(StaticAlphabet<'a>),
}

// tile 0 is never a letter. on the board it means an empty square,
// in a play it means the square keeps its current letter.
impl<'a> Alphabet<'a> {
    #[inline(always)]
    pub fn len(&self) -> u8 {
        match self {
            Alphabet::Static(x) => x.tiles.len() as u8,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    #[inline(always)]
    pub fn get(&self, idx: u8) -> &'a Tile<'a> {
        match self {
            Alphabet::Static(x) => &x.tiles[idx as usize],
        }
    }

    #[inline(always)]
    pub fn from_board(&self, idx: u8) -> Option<&'a str> {
        if idx == 0 || idx >= self.len() {
            None
        } else {
            Some(self.get(idx).label)
        }
    }

    // all letters, as a bit-set indexed by tile.
    #[inline(always)]
    pub fn all_letters(&self) -> u32 {
        ((1u64 << self.len()) - 2) as u32
    }

    // accepts either case.
    pub fn tile_of(&self, c: char) -> Option<u8> {
        let c = c.to_ascii_uppercase();
        (1..self.len()).find(|&tile| {
            let mut label = self.get(tile).label.chars();
            label.next() == Some(c) && label.next().is_none()
        })
    }

    pub fn parse_word(&self, s: &str) -> error::Returns<Vec<u8>> {
        let mut v = Vec::with_capacity(s.len());
        for c in s.chars() {
            match self.tile_of(c) {
                Some(tile) => v.push(tile),
                None => {
                    return_error!(format!("invalid tile after {:?} in {:?}", v, s));
                }
            }
        }
        Ok(v)
    }

    // tile 0 renders as a space.
    pub fn fmt_word(&self, word: &[u8]) -> String {
        word.iter()
            .map(|&tile| self.from_board(tile).unwrap_or(" "))
            .collect()
    }

    pub fn fmt_bits(&self, bits: u32) -> String {
        iter_bits(bits)
            .filter_map(|tile| self.from_board(tile))
            .collect()
    }
}

#[inline(always)]
pub fn iter_bits(bits: u32) -> impl Iterator<Item = u8> {
    (1..32u8).filter(move |&tile| bits & (1 << tile) != 0)
}

pub static ENGLISH_ALPHABET: Alphabet = Alphabet::Static(StaticAlphabet {
    tiles: &[
        Tile { label: "?" },
        Tile { label: "A" },
        Tile { label: "B" },
        Tile { label: "C" },
        Tile { label: "D" },
        Tile { label: "E" },
        Tile { label: "F" },
        Tile { label: "G" },
        Tile { label: "H" },
        Tile { label: "I" },
        Tile { label: "J" },
        Tile { label: "K" },
        Tile { label: "L" },
        Tile { label: "M" },
        Tile { label: "N" },
        Tile { label: "O" },
        Tile { label: "P" },
        Tile { label: "Q" },
        Tile { label: "R" },
        Tile { label: "S" },
        Tile { label: "T" },
        Tile { label: "U" },
        Tile { label: "V" },
        Tile { label: "W" },
        Tile { label: "X" },
        Tile { label: "Y" },
        Tile { label: "Z" },
    ],
});
