//! Transposition Ciphers
//!
//! Columnar, row, group reversal, series and rail fence. Characters are
//! only repositioned, never substituted.

use crate::alphabet::{pad_to_block, strip_filler};
use crate::keys::{require_at_least, require_between, Permutation};
use crate::{Action, Alphabet, Error, Result};

pub struct Transposition;

impl Transposition {
    /// Largest row count or group size; both pad the text up to that many symbols.
    pub const MAX_BLOCK: usize = 1024;

    // ═══════════════════════════════════════════════════════════
    // COLUMNAR
    // ═══════════════════════════════════════════════════════════

    pub fn columnar_encrypt(input: &str, order: &str) -> Result<String> {
        Self::columnar(input, &order.parse()?, Action::Encrypt)
    }

    pub fn columnar_decrypt(input: &str, order: &str) -> Result<String> {
        Self::columnar(input, &order.parse()?, Action::Decrypt)
    }

    /// Write rows of `n`, read columns in ascending rank order.
    pub fn columnar(input: &str, order: &Permutation, action: Action) -> Result<String> {
        let n = order.len();
        let mut text = Alphabet::Latin.normalize_chars(input);
        tracing::debug!(algorithm = "columnar", ?action, n, len = text.len(), "transpose");

        match action {
            Action::Encrypt => {
                pad_to_block(&mut text, n);
                let rows: Vec<&[char]> = text.chunks(n).collect();
                Ok(order
                    .reading_order()
                    .into_iter()
                    .flat_map(|col| rows.iter().map(move |row| row[col]))
                    .collect())
            }
            Action::Decrypt => {
                if text.len() % n != 0 {
                    return Err(Error::Geometry(format!(
                        "ciphertext length {} is not a multiple of the key length {}",
                        text.len(),
                        n
                    )));
                }
                let height = text.len() / n;
                let empty: &[char] = &[];
                let mut columns = vec![empty; n];
                for (slice, col) in text.chunks(height.max(1)).zip(order.reading_order()) {
                    columns[col] = slice;
                }

                let mut out = String::with_capacity(text.len());
                for r in 0..height {
                    for column in &columns {
                        out.push(column[r]);
                    }
                }
                Ok(strip_filler(out))
            }
        }
    }

    // ═══════════════════════════════════════════════════════════
    // ROW
    // ═══════════════════════════════════════════════════════════

    /// Write column-major into `rows` rows, read row-major.
    pub fn row(input: &str, rows: usize, action: Action) -> Result<String> {
        let r = require_between("rows", rows, 2, Self::MAX_BLOCK)?;
        let mut text = Alphabet::Latin.normalize_chars(input);
        tracing::debug!(algorithm = "row", ?action, rows = r, len = text.len(), "transpose");

        match action {
            Action::Encrypt => {
                pad_to_block(&mut text, r);
                let mut lines = vec![String::new(); r];
                for (i, &c) in text.iter().enumerate() {
                    lines[i % r].push(c);
                }
                Ok(lines.concat())
            }
            Action::Decrypt => {
                // the first `len % r` rows carry one extra symbol
                let (q, rem) = (text.len() / r, text.len() % r);
                let mut lines = Vec::with_capacity(r);
                let mut pos = 0;
                for i in 0..r {
                    let width = q + usize::from(i < rem);
                    lines.push(&text[pos..pos + width]);
                    pos += width;
                }

                let width = q + usize::from(rem > 0);
                let mut out = String::with_capacity(text.len());
                for col in 0..width {
                    for line in &lines {
                        if let Some(&c) = line.get(col) {
                            out.push(c);
                        }
                    }
                }
                Ok(strip_filler(out))
            }
        }
    }

    pub fn row_encrypt(input: &str, rows: usize) -> Result<String> {
        Self::row(input, rows, Action::Encrypt)
    }

    pub fn row_decrypt(input: &str, rows: usize) -> Result<String> {
        Self::row(input, rows, Action::Decrypt)
    }

    // ═══════════════════════════════════════════════════════════
    // GROUP REVERSAL
    // ═══════════════════════════════════════════════════════════

    /// Reverse every block of `size`; the same operation undoes itself.
    pub fn group(input: &str, size: usize, action: Action) -> Result<String> {
        let g = require_between("group size", size, 2, Self::MAX_BLOCK)?;
        let mut text = Alphabet::Latin.normalize_chars(input);
        tracing::debug!(algorithm = "group", ?action, size = g, len = text.len(), "transpose");

        pad_to_block(&mut text, g);
        let out: String = text.chunks(g).flat_map(|block| block.iter().rev()).collect();
        Ok(match action {
            Action::Encrypt => out,
            Action::Decrypt => strip_filler(out),
        })
    }

    pub fn group_encrypt(input: &str, size: usize) -> Result<String> {
        Self::group(input, size, Action::Encrypt)
    }

    pub fn group_decrypt(input: &str, size: usize) -> Result<String> {
        Self::group(input, size, Action::Decrypt)
    }

    // ═══════════════════════════════════════════════════════════
    // SERIES
    // ═══════════════════════════════════════════════════════════

    pub fn series_encrypt(input: &str, order: &str) -> Result<String> {
        Self::series(input, &order.parse()?, Action::Encrypt)
    }

    pub fn series_decrypt(input: &str, order: &str) -> Result<String> {
        Self::series(input, &order.parse()?, Action::Decrypt)
    }

    /// Send symbol `i` of every block to position `order[i] - 1`.
    pub fn series(input: &str, order: &Permutation, action: Action) -> Result<String> {
        let n = order.len();
        let mut text = Alphabet::Spanish.normalize_chars(input);
        tracing::debug!(algorithm = "series", ?action, n, len = text.len(), "transpose");

        pad_to_block(&mut text, n);
        let out: String = text
            .chunks(n)
            .flat_map(|block| match action {
                Action::Encrypt => order.scatter(block),
                Action::Decrypt => order.gather(block),
            })
            .collect();

        Ok(match action {
            Action::Encrypt => out,
            Action::Decrypt => strip_filler(out),
        })
    }

    // ═══════════════════════════════════════════════════════════
    // RAIL FENCE
    // ═══════════════════════════════════════════════════════════

    pub fn rail_fence_encrypt(input: &str, rails: usize) -> Result<String> {
        let rails = require_at_least("rails", rails, 2)?;
        let text = Alphabet::Spanish.normalize_chars(input);
        let rails = working_rails(rails, text.len());
        tracing::debug!(algorithm = "rail-fence", rails, len = text.len(), "encrypt");

        let mut fence: Vec<Vec<char>> = vec![Vec::new(); rails];
        let mut rail = 0;
        let mut direction = 1i32;

        for c in text {
            fence[rail].push(c);
            rail = (rail as i32 + direction) as usize;

            if rail == 0 || rail == rails - 1 {
                direction = -direction;
            }
        }

        Ok(fence.into_iter().flatten().collect())
    }

    pub fn rail_fence_decrypt(input: &str, rails: usize) -> Result<String> {
        let rails = require_at_least("rails", rails, 2)?;
        let text = Alphabet::Spanish.normalize_chars(input);
        let rails = working_rails(rails, text.len());
        tracing::debug!(algorithm = "rail-fence", rails, len = text.len(), "decrypt");

        let mut lengths = vec![0; rails];
        for pos in 0..text.len() {
            lengths[rail_of(pos, rails)] += 1;
        }

        let mut fence: Vec<&[char]> = Vec::with_capacity(rails);
        let mut start = 0;
        for len in lengths {
            fence.push(&text[start..start + len]);
            start += len;
        }

        let mut cursor = vec![0; rails];
        let mut out = String::with_capacity(text.len());
        for pos in 0..text.len() {
            let rail = rail_of(pos, rails);
            out.push(fence[rail][cursor[rail]]);
            cursor[rail] += 1;
        }
        Ok(out)
    }

    pub fn rail_fence(input: &str, rails: usize, action: Action) -> Result<String> {
        match action {
            Action::Encrypt => Self::rail_fence_encrypt(input, rails),
            Action::Decrypt => Self::rail_fence_decrypt(input, rails),
        }
    }
}

/// Rails beyond the text length stay empty and leave the text in place.
fn working_rails(rails: usize, len: usize) -> usize {
    rails.min(len.max(2))
}

/// Rail index of text position `pos` on a zigzag of `rails >= 2` rails.
fn rail_of(pos: usize, rails: usize) -> usize {
    let cycle = (rails - 1).saturating_mul(2);
    let p = pos % cycle;
    if p < rails { p } else { cycle - p }
}
