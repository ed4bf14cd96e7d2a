// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;

struct MyHasher(u64);

impl std::hash::Hasher for MyHasher {
    fn finish(&self) -> u64 {
        self.0
    }
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (std::num::Wrapping(self.0) * std::num::Wrapping(3467)).0 ^ (!b as u64);
        }
    }
}

impl Default for MyHasher {
    fn default() -> MyHasher {
        MyHasher(0)
    }
}

type MyHasherDefault = std::hash::BuildHasherDefault<MyHasher>;

// An arc whose destination list has not been finalized yet.
struct PendingArc {
    tile: u8,
    accepts: bool,
    arc_index: u32, // Refers to states.
}

// One entry per shared sibling-list suffix. Equal suffixes are stored once,
// which is what makes this a dawg rather than a plain trie.
#[derive(Clone, Eq, Hash, PartialEq)]
struct State {
    tile: u8,
    accepts: bool,
    arc_index: u32,  // Refers to states.
    next_index: u32, // Refers to states. 0 ends the sibling list.
}

struct StateInterner {
    states: Vec<State>,
    states_finder: std::collections::HashMap<State, u32, MyHasherDefault>,
}

impl StateInterner {
    fn new() -> StateInterner {
        // The sink state always exists, so that index 0 can mean "nothing".
        let sink = State {
            tile: 0,
            accepts: false,
            arc_index: 0,
            next_index: 0,
        };
        let mut states_finder = std::collections::HashMap::<_, _, MyHasherDefault>::default();
        states_finder.insert(sink.clone(), 0);
        StateInterner {
            states: vec![sink],
            states_finder,
        }
    }

    // Returns the head of the interned sibling list, or 0 if arcs is empty.
    fn intern_siblings(&mut self, arcs: &[PendingArc]) -> u32 {
        let mut ret = 0;
        for arc in arcs.iter().rev() {
            let state = State {
                tile: arc.tile,
                accepts: arc.accepts,
                arc_index: arc.arc_index,
                next_index: ret,
            };
            use std::collections::hash_map::Entry::{Occupied, Vacant};
            ret = match self.states_finder.entry(state) {
                Occupied(entry) => *entry.get(),
                Vacant(entry) => {
                    let idx = self.states.len() as u32;
                    self.states.push(entry.key().clone());
                    entry.insert(idx);
                    idx
                }
            };
        }
        ret
    }

    // Words must be sorted, deduplicated and non-empty.
    fn make_dawg(&mut self, sorted_words: &[Box<[u8]>]) -> u32 {
        let mut arcs = Vec::<PendingArc>::new();
        // depth d of the current path owns arcs[child_starts[d]..] as its children.
        let mut child_starts = Vec::<usize>::new();
        let mut prev_word: &[u8] = &[];
        for this_word in sorted_words {
            let mut prefix_len = 0;
            let min_word_len = this_word.len().min(prev_word.len());
            while prefix_len < min_word_len && prev_word[prefix_len] == this_word[prefix_len] {
                prefix_len += 1;
            }
            while child_starts.len() > prefix_len {
                self.seal_deepest(&mut arcs, &mut child_starts);
            }
            for &tile in &this_word[prefix_len..] {
                arcs.push(PendingArc {
                    tile,
                    accepts: false,
                    arc_index: 0, // Filled up when sealed.
                });
                child_starts.push(arcs.len());
            }
            if let Some(last) = arcs.last_mut() {
                last.accepts = true;
            }
            prev_word = &this_word[..];
        }
        while !child_starts.is_empty() {
            self.seal_deepest(&mut arcs, &mut child_starts);
        }
        self.intern_siblings(&arcs)
    }

    fn seal_deepest(&mut self, arcs: &mut Vec<PendingArc>, child_starts: &mut Vec<usize>) {
        if let Some(start) = child_starts.pop() {
            let arc_index = self.intern_siblings(&arcs[start..]);
            arcs[start - 1].arc_index = arc_index;
            arcs.truncate(start);
        }
    }
}

// Lays out interned sibling lists contiguously, children before parents.
struct Layout<'a> {
    states: &'a [State],
    prev_indexes: Vec<u32>,
    destination: Vec<u32>,
    num_written: u32,
}

impl Layout<'_> {
    fn new(states: &[State]) -> Layout<'_> {
        let mut prev_indexes = vec![0u32; states.len()];
        for p in (1..states.len()).rev() {
            prev_indexes[states[p].next_index as usize] = p as u32;
        }
        // prev_indexes[0] is garbage, does not matter.
        Layout {
            states,
            prev_indexes,
            destination: vec![0u32; states.len()],
            num_written: 1, // [0] is the root.
        }
    }

    fn place(&mut self, mut p: u32) {
        while self.prev_indexes[p as usize] != 0 {
            p = self.prev_indexes[p as usize];
        }
        if self.destination[p as usize] != 0 {
            return;
        }
        // temp value to break self-cycles.
        self.destination[p as usize] = !0;
        let head = p;
        let mut num = 0u32;
        loop {
            num += 1;
            let a = self.states[p as usize].arc_index;
            if a != 0 {
                self.place(a);
            }
            p = self.states[p as usize].next_index;
            if p == 0 {
                break;
            }
        }
        let mut write_p = head;
        for ofs in 0..num {
            self.destination[write_p as usize] = self.num_written + ofs;
            write_p = self.states[write_p as usize].next_index;
        }
        // Suffixes shared by several lists get written once per list.
        self.num_written += num;
    }

    // little endian of
    // bits 0-21 = arc index
    // bit 22 = last sibling
    // bit 23 = accepts
    // bits 24-31 = tile
    fn write_node(&self, out: &mut [u8], arc_index: u32, is_end: bool, accepts: bool, tile: u8) {
        let arc_index = self.destination[arc_index as usize];
        out[0] = arc_index as u8;
        out[1] = (arc_index >> 8) as u8;
        out[2] = ((arc_index >> 16) & 0x3f
            | if is_end { 0x40 } else { 0 }
            | if accepts { 0x80 } else { 0 }) as u8;
        out[3] = tile;
    }

    fn to_vec(&self, dawg_start_state: u32) -> Vec<u8> {
        let mut ret = vec![0; (self.num_written as usize) << 2];
        self.write_node(&mut ret[0..], dawg_start_state, true, false, 0);
        for mut p in 1..self.states.len() {
            if self.prev_indexes[p] != 0 {
                continue;
            }
            let mut dp = self.destination[p] as usize;
            if dp == 0 {
                continue;
            }
            dp <<= 2;
            loop {
                let np = self.states[p].next_index;
                self.write_node(
                    &mut ret[dp..],
                    self.states[p].arc_index,
                    np == 0,
                    self.states[p].accepts,
                    self.states[p].tile,
                );
                if np == 0 {
                    break;
                }
                p = np as usize;
                dp += 4;
            }
        }
        ret
    }
}

// Input words are tile sequences, sorted, deduplicated and non-empty.
pub fn build(sorted_words: &[Box<[u8]>]) -> error::Returns<Vec<u8>> {
    for (i, word) in sorted_words.iter().enumerate() {
        if word.is_empty() || word.contains(&0) {
            return_error!(format!("word {} is empty or has tile 0", i));
        }
        if i > 0 && sorted_words[i - 1] >= *word {
            return_error!(format!("word {} is not in strictly ascending order", i));
        }
    }

    let mut interner = StateInterner::new();
    let dawg_start_state = interner.make_dawg(sorted_words);

    let mut layout = Layout::new(&interner.states);
    layout.destination[0] = !0; // keep the sink out of the layout
    layout.place(dawg_start_state);
    layout.destination[0] = 0; // useful for empty lexicon

    if layout.num_written > 0x400000 {
        // the format can only have 0x400000 elements, each has 4 bytes
        return_error!(format!(
            "this format cannot have {} nodes",
            layout.num_written
        ));
    }

    Ok(layout.to_vec(dawg_start_state))
}
