// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, build, error, kwg};

// A word list compiled into a dawg. Nodes are kwg indexes; the root is 0 and
// stands for the empty prefix.
pub struct Lexicon {
    kwg: kwg::Kwg,
}

impl Lexicon {
    pub const ROOT: i32 = 0;

    // Case-insensitive. Empty entries are skipped, duplicates collapse.
    pub fn from_words<I, S>(alphabet: &alphabet::Alphabet<'_>, words: I) -> error::Returns<Lexicon>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut machine_words = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            machine_words.push(alphabet.parse_word(word)?.into_boxed_slice());
        }
        machine_words.sort_unstable();
        machine_words.dedup();
        let kwg = kwg::Kwg::from_bytes_alloc(&build::build(&machine_words)?);
        log::debug!(
            "lexicon: {} words in {} nodes",
            machine_words.len(),
            kwg.0.len()
        );
        Ok(Lexicon { kwg })
    }

    // one word per line.
    pub fn from_text(alphabet: &alphabet::Alphabet<'_>, giant_string: &str) -> error::Returns<Lexicon> {
        Lexicon::from_words(alphabet, giant_string.lines())
    }

    #[inline(always)]
    pub fn child_node(&self, node: i32, tile: u8) -> Option<i32> {
        let p = self.kwg.seek(node, tile);
        if p > 0 {
            Some(p)
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn is_word_end(&self, node: i32) -> bool {
        node > 0 && self.kwg[node].accepts()
    }

    pub fn find_node(&self, prefix: &[u8]) -> Option<i32> {
        prefix
            .iter()
            .try_fold(Lexicon::ROOT, |node, &tile| self.child_node(node, tile))
    }

    #[inline(always)]
    pub fn has_prefix(&self, prefix: &[u8]) -> bool {
        self.find_node(prefix).is_some()
    }

    #[inline(always)]
    pub fn has_word(&self, word: &[u8]) -> bool {
        self.find_node(word).is_some_and(|node| self.is_word_end(node))
    }

    pub fn children(&self, node: i32) -> impl Iterator<Item = (u8, i32)> + '_ {
        self.kwg.children(node)
    }

    pub fn word_count(&self) -> u32 {
        self.kwg.count_words()
    }
}
