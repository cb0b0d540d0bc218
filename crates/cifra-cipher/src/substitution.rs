//! Substitution Ciphers
//!
//! Keyword shift, Vigenère, periodic (digit-keyed) and monoalphabetic.

use crate::keys::{LetterKey, ShiftKey};
use crate::{Action, Alphabet, Result};

pub struct Substitution;

impl Substitution {
    // ═══════════════════════════════════════════════════════════
    // KEYWORD SHIFT
    // ═══════════════════════════════════════════════════════════

    pub fn keyword_shift_encrypt(input: &str, key: &str) -> Result<String> {
        let key = LetterKey::parse(key, Alphabet::Latin)?;
        Ok(Self::keyword_shift(input, &key, Action::Encrypt))
    }

    pub fn keyword_shift_decrypt(input: &str, key: &str) -> Result<String> {
        let key = LetterKey::parse(key, Alphabet::Latin)?;
        Ok(Self::keyword_shift(input, &key, Action::Decrypt))
    }

    /// `C[i] = (M[i] ± K[i mod len]) mod 26`
    pub fn keyword_shift(input: &str, key: &LetterKey, action: Action) -> String {
        tracing::debug!(algorithm = "keyword-shift", ?action, key_len = key.len(), "substitute");
        shift_cycle(input, key.alphabet(), action, |i| key.shift_at(i))
    }

    // ═══════════════════════════════════════════════════════════
    // VIGENÈRE
    // ═══════════════════════════════════════════════════════════

    pub fn vigenere_encrypt(input: &str, key: &str) -> Result<String> {
        let key = LetterKey::parse(key, Alphabet::Latin)?;
        Ok(Self::vigenere(input, &key, Action::Encrypt))
    }

    pub fn vigenere_decrypt(input: &str, key: &str) -> Result<String> {
        let key = LetterKey::parse(key, Alphabet::Latin)?;
        Ok(Self::vigenere(input, &key, Action::Decrypt))
    }

    pub fn vigenere(input: &str, key: &LetterKey, action: Action) -> String {
        tracing::debug!(algorithm = "polyalphabetic", ?action, key_len = key.len(), "substitute");
        shift_cycle(input, key.alphabet(), action, |i| key.shift_at(i))
    }

    // ═══════════════════════════════════════════════════════════
    // PERIODIC (DIGIT KEY, MOD 27)
    // ═══════════════════════════════════════════════════════════

    /// Each digit of `key` is used directly as the shift, e.g. `"3142"`.
    pub fn periodic_encrypt(input: &str, key: &str) -> Result<String> {
        Ok(Self::periodic(input, &key.parse()?, Action::Encrypt))
    }

    pub fn periodic_decrypt(input: &str, key: &str) -> Result<String> {
        Ok(Self::periodic(input, &key.parse()?, Action::Decrypt))
    }

    pub fn periodic(input: &str, key: &ShiftKey, action: Action) -> String {
        tracing::debug!(algorithm = "periodic", ?action, period = key.len(), "substitute");
        shift_cycle(input, Alphabet::Spanish, action, |i| key.shift_at(i))
    }

    // ═══════════════════════════════════════════════════════════
    // MONOALPHABETIC
    // ═══════════════════════════════════════════════════════════

    pub fn monoalphabetic_encrypt(input: &str, key: &str) -> Result<String> {
        let key = LetterKey::parse(key, Alphabet::Spanish)?;
        Ok(Self::monoalphabetic(input, &key, Action::Encrypt))
    }

    pub fn monoalphabetic_decrypt(input: &str, key: &str) -> Result<String> {
        let key = LetterKey::parse(key, Alphabet::Spanish)?;
        Ok(Self::monoalphabetic(input, &key, Action::Decrypt))
    }

    pub fn monoalphabetic(input: &str, key: &LetterKey, action: Action) -> String {
        tracing::debug!(algorithm = "monoalphabetic", ?action, key_len = key.len(), "substitute");
        let alphabet = key.alphabet();
        let cipher = Self::cipher_alphabet(key);

        match action {
            Action::Encrypt => alphabet
                .indices(input)
                .into_iter()
                .map(|i| alphabet.symbol_at(cipher[i]))
                .collect(),
            Action::Decrypt => {
                let mut plain = vec![0; cipher.len()];
                for (i, &c) in cipher.iter().enumerate() {
                    plain[c] = i;
                }
                alphabet
                    .indices(input)
                    .into_iter()
                    .map(|i| alphabet.symbol_at(plain[i]))
                    .collect()
            }
        }
    }

    /// Key letters deduplicated in order of first appearance, followed by
    /// the unused symbols in natural order. Returned as symbol indices.
    pub fn cipher_alphabet(key: &LetterKey) -> Vec<usize> {
        let size = key.alphabet().size();
        let mut used = vec![false; size];
        let mut out = Vec::with_capacity(size);

        for i in key.indices().iter().copied().chain(0..size) {
            if !used[i] {
                used[i] = true;
                out.push(i);
            }
        }
        out
    }
}

fn shift_cycle(
    input: &str,
    alphabet: Alphabet,
    action: Action,
    shift_at: impl Fn(usize) -> usize,
) -> String {
    let m = alphabet.size() as i64;
    alphabet
        .indices(input)
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let c = (p as i64 + action.sign() * shift_at(i) as i64).rem_euclid(m);
            alphabet.symbol_at(c as usize)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_shift_known_answer() {
        let c = Substitution::keyword_shift_encrypt("ATAQUEALAMANANA", "CLAVE").unwrap();
        assert_eq!(c, "CEALYGLLVQCYAIE");
        let m = Substitution::keyword_shift_decrypt(&c, "CLAVE").unwrap();
        assert_eq!(m, "ATAQUEALAMANANA");
    }

    #[test]
    fn test_keyword_shift_normalizes_input() {
        let c = Substitution::keyword_shift_encrypt("ataque al amanana!", "clave").unwrap();
        assert_eq!(c, "CEALYGLLVQCYAIE");
    }

    #[test]
    fn test_vigenere() {
        assert_eq!(Substitution::vigenere_encrypt("HELLO", "KEY").unwrap(), "RIJVS");
        assert_eq!(Substitution::vigenere_decrypt("RIJVS", "KEY").unwrap(), "HELLO");
    }

    #[test]
    fn test_letter_keys_validated_first() {
        assert!(Substitution::vigenere_encrypt("HELLO", "K3Y").is_err());
        assert!(Substitution::keyword_shift_decrypt("HELLO", "").is_err());
        assert!(Substitution::monoalphabetic_encrypt("HELLO", "CLAVE!").is_err());
    }

    #[test]
    fn test_periodic_uses_digits_as_shifts() {
        // N(13)+3 = P(16) in the 27-letter alphabet, Z(26)+1 wraps to A
        assert_eq!(Substitution::periodic_encrypt("NZ", "31").unwrap(), "PA");
        assert_eq!(Substitution::periodic_decrypt("PA", "31").unwrap(), "NZ");
        assert_eq!(Substitution::periodic_encrypt("M", "1").unwrap(), "N");
        assert_eq!(Substitution::periodic_encrypt("N", "1").unwrap(), "Ñ");
    }

    #[test]
    fn test_periodic_rejects_zero_digit() {
        assert!(Substitution::periodic_encrypt("HOLA", "301").is_err());
        assert!(Substitution::periodic_encrypt("HOLA", "ab").is_err());
    }

    #[test]
    fn test_periodic_round_trip() {
        let text = "ELNIÑOCOMEPIÑA";
        let c = Substitution::periodic_encrypt(text, "3142").unwrap();
        assert_eq!(Substitution::periodic_decrypt(&c, "3142").unwrap(), text);
    }

    #[test]
    fn test_cipher_alphabet() {
        let key = LetterKey::parse("PERRO", Alphabet::Spanish).unwrap();
        let derived = Alphabet::Spanish.from_indices(&Substitution::cipher_alphabet(&key));
        assert_eq!(derived, "PEROABCDFGHIJKLMNÑQSTUVWXYZ");
        assert_eq!(derived.chars().count(), 27);
    }

    #[test]
    fn test_monoalphabetic() {
        let c = Substitution::monoalphabetic_encrypt("Abc ñ", "PERRO").unwrap();
        assert_eq!(c, "PERL");
        let c = Substitution::monoalphabetic_encrypt("BAÑO", "PERRO").unwrap();
        let m = Substitution::monoalphabetic_decrypt(&c, "PERRO").unwrap();
        assert_eq!(m, "BAÑO");
    }
}
