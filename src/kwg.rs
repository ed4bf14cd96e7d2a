// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(Clone, Copy)]
pub struct Node(u32);

impl Node {
    #[inline(always)]
    pub fn tile(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline(always)]
    pub fn accepts(&self) -> bool {
        self.0 & 0x800000 != 0
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.0 & 0x400000 != 0
    }

    #[inline(always)]
    pub fn arc_index(&self) -> i32 {
        (self.0 & 0x3fffff) as i32
    }
}

// [0] is the root. its arc_index is the first of the one-tile prefixes.
pub struct Kwg(pub Box<[Node]>);

impl std::ops::Index<i32> for Kwg {
    type Output = Node;

    #[inline(always)]
    fn index(&self, i: i32) -> &Node {
        &self.0[i as usize]
    }
}

impl Kwg {
    pub fn from_bytes_alloc(buf: &[u8]) -> Kwg {
        Kwg(buf
            .chunks_exact(4)
            .map(|b| {
                Node(b[0] as u32 | (b[1] as u32) << 8 | (b[2] as u32) << 16 | (b[3] as u32) << 24)
            })
            .collect())
    }

    // the child of p reached by tile, or -1.
    #[inline(always)]
    pub fn seek(&self, mut p: i32, tile: u8) -> i32 {
        if p >= 0 {
            p = self[p].arc_index();
            if p > 0 {
                loop {
                    let node = self[p];
                    if node.tile() == tile {
                        return p;
                    }
                    if node.is_end() {
                        return -1;
                    }
                    p += 1;
                }
            }
        }
        -1 // intentionally return 0 as -1
    }

    // iterates the (tile, node) children of p in tile order.
    pub fn children(&self, p: i32) -> impl Iterator<Item = (u8, i32)> + '_ {
        let mut q = if p >= 0 { self[p].arc_index() } else { 0 };
        std::iter::from_fn(move || {
            if q <= 0 {
                return None;
            }
            let node = self[q];
            let ret = (node.tile(), q);
            q = if node.is_end() { 0 } else { q + 1 };
            Some(ret)
        })
    }

    pub fn count_words(&self) -> u32 {
        // number of words at or after p within its sibling list.
        fn count_words_at(kwg: &Kwg, word_counts: &mut [u32], p: i32) -> u32 {
            if word_counts[p as usize] == !0 {
                let node = kwg[p];
                word_counts[p as usize] = node.accepts() as u32
                    + if node.arc_index() != 0 {
                        count_words_at(kwg, word_counts, node.arc_index())
                    } else {
                        0
                    }
                    + if node.is_end() {
                        0
                    } else {
                        count_words_at(kwg, word_counts, p + 1)
                    };
            }
            word_counts[p as usize]
        }
        let mut word_counts = vec![!0u32; self.0.len()];
        match self[0].arc_index() {
            0 => 0,
            p => count_words_at(self, &mut word_counts, p),
        }
    }
}
