//! Hill Cipher
//!
//! n×n matrix multiplication over symbol indices, modulo the alphabet size.
//! Default alphabet is Spanish (mod 27); a Latin (mod 26) matrix can be
//! built with [`HillMatrix::parse_with`].
//!
//! Determinant and cofactors use recursive expansion, so cost grows
//! factorially with n. Dimensions are capped at [`Hill::MAX_DIMENSION`].

use crate::alphabet::{pad_to_block, strip_filler};
use crate::{Action, Alphabet, Error, Result};

/// Validated square key matrix with entries reduced modulo the alphabet size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HillMatrix {
    alphabet: Alphabet,
    rows: Vec<Vec<i64>>,
}

impl HillMatrix {
    /// Parse `"a,b,c;d,e,f;g,h,i"` over the Spanish alphabet.
    pub fn parse(literal: &str) -> Result<Self> {
        Self::parse_with(literal, Alphabet::Spanish)
    }

    pub fn parse_with(literal: &str, alphabet: Alphabet) -> Result<Self> {
        if literal.trim().is_empty() {
            return Err(Error::InvalidKey("a key matrix is required".into()));
        }

        let m = alphabet.size() as i64;
        let rows = literal
            .split(';')
            .map(|row| {
                row.split(',')
                    .map(|entry| {
                        let entry = entry.trim();
                        entry
                            .parse::<i64>()
                            .map(|v| v.rem_euclid(m))
                            .map_err(|_| {
                                Error::InvalidKey(format!(
                                    "matrix entry {:?} is not an integer",
                                    entry
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let n = rows.len();
        if rows.iter().any(|row| row.len() != n) {
            tracing::warn!(rows = n, "hill matrix rejected: not square");
            return Err(Error::InvalidKey("matrix is not square".into()));
        }
        if n > Hill::MAX_DIMENSION {
            return Err(Error::InvalidKey(format!(
                "matrix dimension {} exceeds the maximum of {}",
                n,
                Hill::MAX_DIMENSION
            )));
        }

        let matrix = Self { alphabet, rows };
        let det = matrix.determinant();
        if gcd(det, m) != 1 {
            tracing::warn!(det, modulus = m, "hill matrix rejected: not invertible");
            return Err(Error::InvalidKey(format!(
                "determinant {} is not coprime with {}; matrix is not invertible",
                det, m
            )));
        }

        tracing::debug!(n, det, modulus = m, "hill matrix accepted");
        Ok(matrix)
    }

    pub fn dimension(&self) -> usize {
        self.rows.len()
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn modulus(&self) -> i64 {
        self.alphabet.size() as i64
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Determinant reduced to `0..modulus`
    pub fn determinant(&self) -> i64 {
        determinant(&self.rows, self.modulus())
    }

    /// Adjugate scaled by the modular inverse of the determinant.
    pub fn inverse(&self) -> Result<Self> {
        let m = self.modulus();
        let n = self.dimension();
        let det_inv = mod_inverse(self.determinant(), m)
            .ok_or_else(|| Error::InvalidKey(format!("determinant not invertible mod {}", m)))?;

        let mut inv = vec![vec![0; n]; n];
        for (r, row) in inv.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                // transpose: inverse[r][c] comes from cofactor (c, r)
                *cell = (det_inv * cofactor(&self.rows, c, r, m)).rem_euclid(m);
            }
        }

        Ok(Self {
            alphabet: self.alphabet,
            rows: inv,
        })
    }

    /// Multiply one block of symbol indices.
    fn apply_block(&self, block: &[usize]) -> Vec<usize> {
        let m = self.modulus();
        self.rows
            .iter()
            .map(|row| {
                let sum: i64 = row.iter().zip(block).map(|(&k, &v)| k * v as i64).sum();
                sum.rem_euclid(m) as usize
            })
            .collect()
    }
}

pub struct Hill;

impl Hill {
    pub const MAX_DIMENSION: usize = 6;

    pub fn encrypt(input: &str, matrix: &str) -> Result<String> {
        Self::apply(input, &HillMatrix::parse(matrix)?, Action::Encrypt)
    }

    pub fn decrypt(input: &str, matrix: &str) -> Result<String> {
        Self::apply(input, &HillMatrix::parse(matrix)?, Action::Decrypt)
    }

    pub fn apply(input: &str, key: &HillMatrix, action: Action) -> Result<String> {
        match action {
            Action::Encrypt => Ok(Self::multiply(input, key)),
            Action::Decrypt => Ok(strip_filler(Self::multiply(input, &key.inverse()?))),
        }
    }

    /// Pad to a multiple of n and multiply every block by `key`.
    fn multiply(input: &str, key: &HillMatrix) -> String {
        let alphabet = key.alphabet();
        let n = key.dimension();

        let mut chars = alphabet.normalize_chars(input);
        pad_to_block(&mut chars, n);
        let text: String = chars.into_iter().collect();
        let indices = alphabet.indices(&text);
        tracing::debug!(algorithm = "hill", n, len = indices.len(), "multiply");

        indices
            .chunks(n)
            .flat_map(|block| key.apply_block(block))
            .map(|i| alphabet.symbol_at(i))
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════
// MODULAR ARITHMETIC
// ═══════════════════════════════════════════════════════════

pub(crate) fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a.abs() } else { gcd(b, a % b) }
}

/// Extended Euclid: returns `(g, x, y)` with `a·x + b·y = g`.
fn egcd(a: i64, b: i64) -> (i64, i64, i64) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (g, x, y) = egcd(b, a % b);
        (g, y, x - (a / b) * y)
    }
}

pub(crate) fn mod_inverse(a: i64, m: i64) -> Option<i64> {
    let (g, x, _) = egcd(a.rem_euclid(m), m);
    if g == 1 {
        Some(x.rem_euclid(m))
    } else {
        None
    }
}

fn minor(m: &[Vec<i64>], row: usize, col: usize) -> Vec<Vec<i64>> {
    m.iter()
        .enumerate()
        .filter(|&(i, _)| i != row)
        .map(|(_, r)| {
            r.iter()
                .enumerate()
                .filter(|&(j, _)| j != col)
                .map(|(_, &v)| v)
                .collect()
        })
        .collect()
}

fn cofactor(m: &[Vec<i64>], row: usize, col: usize, modulus: i64) -> i64 {
    let det = determinant(&minor(m, row, col), modulus);
    if (row + col) % 2 == 1 { -det } else { det }
}

/// Cofactor expansion along the first row, reduced modulo `modulus`.
fn determinant(m: &[Vec<i64>], modulus: i64) -> i64 {
    match m.len() {
        0 => 1,
        1 => m[0][0].rem_euclid(modulus),
        2 => (m[0][0] * m[1][1] - m[0][1] * m[1][0]).rem_euclid(modulus),
        n => (0..n)
            .map(|c| m[0][c] * cofactor(m, 0, c, modulus))
            .sum::<i64>()
            .rem_euclid(modulus),
    }
}
