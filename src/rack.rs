// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, error};

const TALLY_LEN: usize = 27; // ?A-Z, [0] stays zero

// Letter counts, indexed by tile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rack {
    tally: [u8; TALLY_LEN],
}

impl Rack {
    pub fn new() -> Rack {
        Rack::default()
    }

    pub fn from_letters(alphabet: &alphabet::Alphabet<'_>, letters: &str) -> error::Returns<Rack> {
        let mut rack = Rack::new();
        for tile in alphabet.parse_word(letters)? {
            rack.add_tile(tile, 1);
        }
        Ok(rack)
    }

    // each (tile, count) adds that many.
    pub fn from_tally(tally: &[(u8, u8)]) -> Rack {
        let mut rack = Rack::new();
        for &(tile, n) in tally {
            rack.add_tile(tile, n);
        }
        rack
    }

    #[inline(always)]
    pub fn count(&self, tile: u8) -> u8 {
        self.tally.get(tile as usize).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.tally.iter().map(|&n| n as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tally.iter().all(|&n| n == 0)
    }

    // distinct tiles with at least one copy, ascending.
    pub fn available_letters(&self) -> impl Iterator<Item = u8> + '_ {
        (1..TALLY_LEN as u8).filter(|&tile| self.tally[tile as usize] > 0)
    }

    pub fn available_bits(&self) -> u32 {
        self.available_letters()
            .fold(0, |bits, tile| bits | (1 << tile))
    }

    pub fn add_tile(&mut self, tile: u8, n: u8) {
        assert!(
            tile != 0 && (tile as usize) < TALLY_LEN,
            "tile {} is not a letter",
            tile
        );
        self.tally[tile as usize] += n;
    }

    // Taking more than is there means the caller lost track of its tiles.
    pub fn remove_tile(&mut self, tile: u8, n: u8) {
        let have = self.count(tile);
        assert!(
            have >= n,
            "rack underflow: removing {} of tile {} but only {} left",
            n,
            tile,
            have
        );
        self.tally[tile as usize] -= n;
    }

    // Removes the tiles until the guard goes away, even during unwinding.
    pub fn withhold<'r, 't>(&'r mut self, tiles: &'t [u8]) -> Withheld<'r, 't> {
        for &tile in tiles {
            self.remove_tile(tile, 1);
        }
        Withheld { rack: self, tiles }
    }
}

pub struct Withheld<'r, 't> {
    rack: &'r mut Rack,
    tiles: &'t [u8],
}

impl std::ops::Deref for Withheld<'_, '_> {
    type Target = Rack;

    #[inline(always)]
    fn deref(&self) -> &Rack {
        self.rack
    }
}

impl std::ops::DerefMut for Withheld<'_, '_> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Rack {
        self.rack
    }
}

impl Drop for Withheld<'_, '_> {
    fn drop(&mut self) {
        for &tile in self.tiles {
            self.rack.add_tile(tile, 1);
        }
    }
}
