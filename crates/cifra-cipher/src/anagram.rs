//! Row + Column Anagram
//!
//! Double transposition over m×n blocks: columns are permuted by one key,
//! rows by another.

use crate::alphabet::{pad_to_block, strip_filler};
use crate::keys::Permutation;
use crate::{Action, Alphabet, Error, Result};

pub struct DoubleTransposition;

impl DoubleTransposition {
    pub fn encrypt(input: &str, column_order: &str, row_order: &str) -> Result<String> {
        Self::apply(input, &column_order.parse()?, &row_order.parse()?, Action::Encrypt)
    }

    pub fn decrypt(input: &str, column_order: &str, row_order: &str) -> Result<String> {
        Self::apply(input, &column_order.parse()?, &row_order.parse()?, Action::Decrypt)
    }

    /// Each block of `rows.len() × columns.len()` symbols is laid out
    /// row-major; encryption moves columns then rows, decryption undoes rows
    /// then columns.
    pub fn apply(
        input: &str,
        columns: &Permutation,
        rows: &Permutation,
        action: Action,
    ) -> Result<String> {
        let (n, m) = (columns.len(), rows.len());
        let block = n * m;
        let mut text = Alphabet::Latin.normalize_chars(input);
        tracing::debug!(
            algorithm = "double-transposition",
            ?action,
            rows = m,
            columns = n,
            len = text.len(),
            "transpose"
        );

        match action {
            Action::Encrypt => pad_to_block(&mut text, block),
            Action::Decrypt if text.len() % block != 0 => {
                return Err(Error::Geometry(format!(
                    "ciphertext length {} is not a multiple of the {}x{} block",
                    text.len(),
                    m,
                    n
                )));
            }
            Action::Decrypt => {}
        }

        let mut out = String::with_capacity(text.len());
        for chunk in text.chunks(block) {
            let grid: Vec<&[char]> = chunk.chunks(n).collect();
            let moved = match action {
                Action::Encrypt => {
                    let grid: Vec<Vec<char>> =
                        grid.iter().map(|row| columns.scatter(row)).collect();
                    rows.scatter(&grid)
                }
                Action::Decrypt => rows
                    .gather(&grid)
                    .into_iter()
                    .map(|row| columns.gather(row))
                    .collect(),
            };
            out.extend(moved.into_iter().flatten());
        }

        Ok(match action {
            Action::Encrypt => out,
            Action::Decrypt => strip_filler(out),
        })
    }
}
