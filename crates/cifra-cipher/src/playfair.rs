//! Playfair Cipher
//!
//! 5×5 digraph substitution over the Latin alphabet with `J` folded into
//! `I`. Doubled letters inside a pair are split with the filler `X`.

use crate::alphabet::FILLER;
use crate::keys::LetterKey;
use crate::{Action, Alphabet, Result};

const SIZE: usize = 5;
const MERGED: char = 'J';
const MERGED_INTO: char = 'I';

/// Key-seeded 5×5 grid plus its inverse index.
///
/// Rebuilt from the key on every call; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayfairSquare {
    grid: [[char; SIZE]; SIZE],
    /// Latin symbol index → (row, col); `J` shares `I`'s cell
    positions: [(usize, usize); 26],
}

impl PlayfairSquare {
    pub fn new(key: &str) -> Result<Self> {
        let key = LetterKey::parse(key, Alphabet::Latin)?;
        Ok(Self::from_key(&key))
    }

    pub fn from_key(key: &LetterKey) -> Self {
        let merged = fold(&key.letters());
        let reduced = Alphabet::Latin.symbols().iter().filter(|&&c| c != MERGED);

        let mut seen = [false; 26];
        let mut grid = [[' '; SIZE]; SIZE];
        let mut positions = [(0, 0); 26];
        let mut cell = 0;

        for c in merged.chars().chain(reduced.copied()) {
            let Some(i) = Alphabet::Latin.index_of(c) else { continue };
            if seen[i] || cell == SIZE * SIZE {
                continue;
            }
            seen[i] = true;
            let (r, col) = (cell / SIZE, cell % SIZE);
            grid[r][col] = c;
            positions[i] = (r, col);
            cell += 1;
        }

        if let (Some(j), Some(i)) = (
            Alphabet::Latin.index_of(MERGED),
            Alphabet::Latin.index_of(MERGED_INTO),
        ) {
            positions[j] = positions[i];
        }

        Self { grid, positions }
    }

    pub fn at(&self, row: usize, col: usize) -> char {
        self.grid[row % SIZE][col % SIZE]
    }

    /// Cell of `c`; `J` resolves to the `I` cell
    pub fn locate(&self, c: char) -> Option<(usize, usize)> {
        Alphabet::Latin.index_of(c).map(|i| self.positions[i])
    }

    pub fn rows(&self) -> &[[char; SIZE]; SIZE] {
        &self.grid
    }

    fn locate_index(&self, i: usize) -> (usize, usize) {
        self.positions[i % 26]
    }

    /// Encrypt or decrypt one digraph.
    fn transform(&self, a: usize, b: usize, action: Action) -> (char, char) {
        let (ra, ca) = self.locate_index(a);
        let (rb, cb) = self.locate_index(b);
        let step = match action {
            Action::Encrypt => 1,
            Action::Decrypt => SIZE - 1,
        };

        if ra == rb {
            (self.at(ra, ca + step), self.at(rb, cb + step))
        } else if ca == cb {
            (self.at(ra + step, ca), self.at(rb + step, cb))
        } else {
            // Rectangle: swapping columns is its own inverse
            (self.at(ra, cb), self.at(rb, ca))
        }
    }
}

pub struct Playfair;

impl Playfair {
    pub fn encrypt(input: &str, key: &str) -> Result<String> {
        Ok(Self::apply(input, &PlayfairSquare::new(key)?, Action::Encrypt))
    }

    pub fn decrypt(input: &str, key: &str) -> Result<String> {
        Ok(Self::apply(input, &PlayfairSquare::new(key)?, Action::Decrypt))
    }

    pub fn apply(input: &str, square: &PlayfairSquare, action: Action) -> String {
        let pairs = Self::digraphs(input);
        tracing::debug!(algorithm = "playfair", ?action, digraphs = pairs.len(), "substitute");

        let mut out = String::with_capacity(pairs.len() * 2);
        for (a, b) in pairs {
            let (x, y) = square.transform(a, b, action);
            out.push(x);
            out.push(y);
        }

        if action.is_decrypt() && out.ends_with(FILLER) {
            out.pop();
        }
        out
    }

    /// Split normalized text into digraphs as Latin symbol indices.
    ///
    /// A doubled letter takes the filler as its partner and the second copy
    /// starts the next pair; an odd final letter is padded with the filler.
    pub fn digraphs(input: &str) -> Vec<(usize, usize)> {
        let folded = fold(&Alphabet::Latin.normalize(input));
        let text = Alphabet::Latin.indices(&folded);
        let filler = Alphabet::Latin.index_of(FILLER).unwrap_or(23);

        let mut pairs = Vec::with_capacity(text.len() / 2 + 1);
        let mut i = 0;
        while i < text.len() {
            let a = text[i];
            let b = text.get(i + 1).copied().unwrap_or(filler);
            if a == b {
                pairs.push((a, filler));
                i += 1;
            } else {
                pairs.push((a, b));
                i += 2;
            }
        }
        pairs
    }
}

fn fold(text: &str) -> String {
    text.replace(MERGED, &MERGED_INTO.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs_as_text(input: &str) -> Vec<String> {
        Playfair::digraphs(input)
            .into_iter()
            .map(|(a, b)| {
                [Alphabet::Latin.symbol_at(a), Alphabet::Latin.symbol_at(b)]
                    .iter()
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_square_layout() {
        let square = PlayfairSquare::new("playfairexample").unwrap();
        let rows: Vec<String> = square.rows().iter().map(|r| r.iter().collect()).collect();
        assert_eq!(rows, vec!["PLAYF", "IREXM", "BCDGH", "KNOQS", "TUVWZ"]);
        assert_eq!(square.locate('J'), square.locate('I'));
    }

    #[test]
    fn test_square_holds_25_unique_symbols() {
        let square = PlayfairSquare::new("JACKJUMPS").unwrap();
        let mut all: Vec<char> = square.rows().iter().flatten().copied().collect();
        assert!(!all.contains(&'J'));
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 25);
    }

    #[test]
    fn test_digraph_segmentation() {
        assert_eq!(
            pairs_as_text("tree stump"),
            vec!["TR", "EX", "ES", "TU", "MP"]
        );
        assert_eq!(pairs_as_text("ABC"), vec!["AB", "CX"]);
        assert_eq!(pairs_as_text("jig"), vec!["IX", "IG"]);
        assert!(pairs_as_text("").is_empty());
    }

    #[test]
    fn test_known_answer() {
        let c = Playfair::encrypt("Hide the gold in the tree stump", "PLAYFAIREXAMPLE").unwrap();
        assert_eq!(c, "BMODZBXDNABEKUDMUIXMMOUVIF");
        let m = Playfair::decrypt(&c, "PLAYFAIREXAMPLE").unwrap();
        assert_eq!(m, "HIDETHEGOLDINTHETREXESTUMP");
    }

    #[test]
    fn test_rectangle_rule_is_direction_independent() {
        let square = PlayfairSquare::new("PLAYFAIREXAMPLE").unwrap();
        // H (2,4) and I (1,0) sit in different rows and columns
        let h = Alphabet::Latin.index_of('H').unwrap();
        let i = Alphabet::Latin.index_of('I').unwrap();
        let enc = square.transform(h, i, Action::Encrypt);
        let dec = square.transform(h, i, Action::Decrypt);
        assert_eq!(enc, dec);
        assert_eq!(enc, ('B', 'M'));
    }

    #[test]
    fn test_row_and_column_shift_wrap() {
        let square = PlayfairSquare::new("PLAYFAIREXAMPLE").unwrap();
        let idx = |c| Alphabet::Latin.index_of(c).unwrap();
        // same row, F wraps to P
        assert_eq!(square.transform(idx('Y'), idx('F'), Action::Encrypt), ('F', 'P'));
        assert_eq!(square.transform(idx('F'), idx('P'), Action::Decrypt), ('Y', 'F'));
        // same column, Z wraps to F
        assert_eq!(square.transform(idx('S'), idx('Z'), Action::Encrypt), ('Z', 'F'));
    }

    #[test]
    fn test_decrypt_strips_single_trailing_filler() {
        let c = Playfair::encrypt("ABC", "KEY").unwrap();
        assert_eq!(Playfair::decrypt(&c, "KEY").unwrap(), "ABC");
    }

    #[test]
    fn test_key_must_be_letters() {
        assert!(Playfair::encrypt("HELLO", "PLAY FAIR").is_err());
        assert!(Playfair::encrypt("HELLO", "12").is_err());
    }
}
