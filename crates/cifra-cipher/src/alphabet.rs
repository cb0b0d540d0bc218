//! Alphabet Model
//!
//! The two ordered symbol sets every cipher works over, with O(1)
//! lookup in both directions and the shared text-cleaning rules.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Padding symbol that completes a short final block.
pub const FILLER: char = 'X';

const LATIN_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SPANISH_SYMBOLS: &str = "ABCDEFGHIJKLMNÑOPQRSTUVWXYZ";

struct SymbolTable {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl SymbolTable {
    fn new(symbols: &str) -> Self {
        let symbols: Vec<char> = symbols.chars().collect();
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index }
    }
}

lazy_static! {
    static ref LATIN: SymbolTable = SymbolTable::new(LATIN_SYMBOLS);
    static ref SPANISH: SymbolTable = SymbolTable::new(SPANISH_SYMBOLS);
}

/// Fixed symbol set an algorithm normalizes and indexes against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    /// `A`..`Z`, 26 symbols
    Latin,
    /// `A`..`Z` with `Ñ` after `N`, 27 symbols
    Spanish,
}

impl Alphabet {
    fn table(&self) -> &'static SymbolTable {
        match self {
            Alphabet::Latin => &LATIN,
            Alphabet::Spanish => &SPANISH,
        }
    }

    /// Number of symbols, which is also the modulus for shift arithmetic
    pub fn size(&self) -> usize {
        self.table().symbols.len()
    }

    pub fn symbols(&self) -> &'static [char] {
        &self.table().symbols
    }

    pub fn contains(&self, c: char) -> bool {
        self.table().index.contains_key(&c)
    }

    /// Position of an uppercase symbol, `None` outside the alphabet
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.table().index.get(&c).copied()
    }

    /// Symbol at `index`, wrapping modulo the alphabet size
    pub fn symbol_at(&self, index: usize) -> char {
        let symbols = &self.table().symbols;
        symbols[index % symbols.len()]
    }

    /// Uppercase `text` and drop every symbol outside the alphabet.
    pub fn normalize(&self, text: &str) -> String {
        self.normalize_chars(text).into_iter().collect()
    }

    pub fn normalize_chars(&self, text: &str) -> Vec<char> {
        text.chars()
            .flat_map(char::to_uppercase)
            .filter(|&c| self.contains(c))
            .collect()
    }

    /// Normalized text as symbol indices
    pub fn indices(&self, text: &str) -> Vec<usize> {
        text.chars()
            .flat_map(char::to_uppercase)
            .filter_map(|c| self.index_of(c))
            .collect()
    }

    pub fn from_indices(&self, indices: &[usize]) -> String {
        indices.iter().map(|&i| self.symbol_at(i)).collect()
    }
}

/// Right-pad with [`FILLER`] until the length is a multiple of `block`.
pub(crate) fn pad_to_block(chars: &mut Vec<char>, block: usize) {
    if block == 0 {
        return;
    }
    let pad = (block - chars.len() % block) % block;
    chars.extend(std::iter::repeat(FILLER).take(pad));
}

/// Remove trailing [`FILLER`] symbols; interior ones are kept.
pub(crate) fn strip_filler(mut text: String) -> String {
    let kept = text.trim_end_matches(FILLER).len();
    text.truncate(kept);
    text
}
