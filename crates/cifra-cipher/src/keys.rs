//! Key material
//!
//! Parsing and validation for the three key shapes the ciphers take:
//! letter keys, shift-digit keys and permutation keys. Every check runs
//! before any text is touched.

use crate::{Alphabet, Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

lazy_static! {
    static ref LATIN_KEY_PATTERN: Regex = Regex::new(r"^[A-Za-z]+$").unwrap();
    static ref SPANISH_KEY_PATTERN: Regex = Regex::new(r"^[A-Za-zÑñ]+$").unwrap();
    static ref DIGIT_KEY_PATTERN: Regex = Regex::new(r"^[1-9]+$").unwrap();
}

fn reject(reason: String) -> Error {
    tracing::warn!(%reason, "key rejected");
    Error::InvalidKey(reason)
}

/// Fail with [`Error::OutOfRange`] when `value < min`.
pub fn require_at_least(parameter: &'static str, value: usize, min: usize) -> Result<usize> {
    if value < min {
        tracing::warn!(parameter, value, min, "parameter below minimum");
        return Err(Error::OutOfRange { parameter, min, got: value });
    }
    Ok(value)
}

/// Fail with [`Error::OutOfRange`] or [`Error::TooLarge`] outside `min..=max`.
pub fn require_between(
    parameter: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<usize> {
    require_at_least(parameter, value, min)?;
    if value > max {
        tracing::warn!(parameter, value, max, "parameter above maximum");
        return Err(Error::TooLarge { parameter, max, got: value });
    }
    Ok(value)
}

// ═══════════════════════════════════════════════════════════
// LETTER KEY
// ═══════════════════════════════════════════════════════════

/// Alphabetic key, stored as symbol indices of its alphabet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterKey {
    alphabet: Alphabet,
    indices: Vec<usize>,
}

impl LetterKey {
    pub fn parse(raw: &str, alphabet: Alphabet) -> Result<Self> {
        let pattern = match alphabet {
            Alphabet::Latin => &*LATIN_KEY_PATTERN,
            Alphabet::Spanish => &*SPANISH_KEY_PATTERN,
        };
        if !pattern.is_match(raw) {
            return Err(reject(match alphabet {
                Alphabet::Latin => "key may only contain letters A-Z".to_string(),
                Alphabet::Spanish => "key may only contain letters A-Z and Ñ".to_string(),
            }));
        }
        Ok(Self {
            alphabet,
            indices: alphabet.indices(raw),
        })
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Uppercase key letters
    pub fn letters(&self) -> String {
        self.alphabet.from_indices(&self.indices)
    }

    /// Shift for message position `i`, cycling over the key
    pub fn shift_at(&self, i: usize) -> usize {
        self.indices[i % self.indices.len()]
    }
}

/// Parses against the Latin alphabet.
impl FromStr for LetterKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LetterKey::parse(s, Alphabet::Latin)
    }
}

// ═══════════════════════════════════════════════════════════
// SHIFT KEY
// ═══════════════════════════════════════════════════════════

/// Digit key where each digit 1-9 is a shift amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftKey {
    shifts: Vec<usize>,
}

impl ShiftKey {
    pub fn shifts(&self) -> &[usize] {
        &self.shifts
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    pub fn shift_at(&self, i: usize) -> usize {
        self.shifts[i % self.shifts.len()]
    }
}

impl FromStr for ShiftKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self { shifts: parse_digits(s)? })
    }
}

fn parse_digits(raw: &str) -> Result<Vec<usize>> {
    if !DIGIT_KEY_PATTERN.is_match(raw) {
        return Err(reject("numeric key may only contain digits 1-9, no zeros".into()));
    }
    Ok(raw.bytes().map(|b| (b - b'0') as usize).collect())
}

// ═══════════════════════════════════════════════════════════
// PERMUTATION KEY
// ═══════════════════════════════════════════════════════════

/// Digit string that is a bijection on `1..=n`, e.g. `"3142"`.
///
/// Digit `k` at source position `i` means position `i` has rank `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    ranks: Vec<usize>,
}

impl Permutation {
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// 1-based ranks in key order
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// 0-based destination of each source position (`rank - 1`)
    pub fn destinations(&self) -> Vec<usize> {
        self.ranks.iter().map(|r| r - 1).collect()
    }

    /// Source positions listed by ascending rank
    pub fn reading_order(&self) -> Vec<usize> {
        let mut order = vec![0; self.ranks.len()];
        for (src, &rank) in self.ranks.iter().enumerate() {
            order[rank - 1] = src;
        }
        order
    }

    /// Move `items[src]` to `destinations()[src]`.
    pub fn scatter<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        for (src, &rank) in self.ranks.iter().enumerate() {
            out[rank - 1] = items[src].clone();
        }
        out
    }

    /// Undo [`scatter`](Self::scatter).
    pub fn gather<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        for (src, &rank) in self.ranks.iter().enumerate() {
            out[src] = items[rank - 1].clone();
        }
        out
    }
}

impl FromStr for Permutation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let ranks = parse_digits(s)?;
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        if sorted.iter().enumerate().any(|(i, &d)| d != i + 1) {
            return Err(reject(format!(
                "key must be a permutation of 1..{}",
                ranks.len()
            )));
        }
        Ok(Self { ranks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_key_latin() {
        let key = LetterKey::parse("clave", Alphabet::Latin).unwrap();
        assert_eq!(key.letters(), "CLAVE");
        assert_eq!(key.indices(), &[2, 11, 0, 21, 4]);
        assert_eq!(key.shift_at(7), 0);
    }

    #[test]
    fn test_letter_key_rejects_foreign_symbols() {
        assert!(LetterKey::parse("", Alphabet::Latin).is_err());
        assert!(LetterKey::parse("CLA VE", Alphabet::Latin).is_err());
        assert!(LetterKey::parse("AÑO", Alphabet::Latin).is_err());
        assert!(LetterKey::parse("key1", Alphabet::Spanish).is_err());
        let key = LetterKey::parse("año", Alphabet::Spanish).unwrap();
        assert_eq!(key.letters(), "AÑO");
    }

    #[test]
    fn test_shift_key() {
        let key: ShiftKey = "3142".parse().unwrap();
        assert_eq!(key.shifts(), &[3, 1, 4, 2]);
        assert_eq!(key.shift_at(5), 1);
        assert!("3102".parse::<ShiftKey>().is_err());
        assert!("".parse::<ShiftKey>().is_err());
        assert!("12a".parse::<ShiftKey>().is_err());
    }

    #[test]
    fn test_permutation_accepts_bijections() {
        let perm: Permutation = "3142".parse().unwrap();
        assert_eq!(perm.destinations(), vec![2, 0, 3, 1]);
        assert_eq!(perm.reading_order(), vec![1, 3, 0, 2]);
        assert!("1".parse::<Permutation>().is_ok());
    }

    #[test]
    fn test_permutation_rejects_non_bijections() {
        for bad in ["112", "13", "0", "1230", "24", "12 3", "", "abc"] {
            let err = bad.parse::<Permutation>().unwrap_err();
            assert_eq!(err.kind(), crate::ErrorKind::Key, "{bad:?} was accepted");
        }
    }

    #[test]
    fn test_scatter_gather_inverse() {
        let perm: Permutation = "3142".parse().unwrap();
        let items = ['a', 'b', 'c', 'd'];
        let moved = perm.scatter(&items);
        assert_eq!(moved, vec!['b', 'd', 'a', 'c']);
        assert_eq!(perm.gather(&moved), items.to_vec());
    }

    #[test]
    fn test_require_at_least() {
        assert_eq!(require_at_least("rails", 3, 2), Ok(3));
        assert_eq!(
            require_at_least("rails", 1, 2),
            Err(Error::OutOfRange { parameter: "rails", min: 2, got: 1 })
        );
    }

    #[test]
    fn test_require_between() {
        assert_eq!(require_between("rows", 16, 2, 16), Ok(16));
        assert!(require_between("rows", 1, 2, 16).is_err());
        assert_eq!(
            require_between("rows", 17, 2, 16),
            Err(Error::TooLarge { parameter: "rows", max: 16, got: 17 })
        );
    }
}
