//! Dispatch by algorithm name
//!
//! [`CipherRequest`] is the flat parameter bag a transport hands over;
//! [`CipherSpec`] is the validated form, one variant per algorithm.

use crate::anagram::DoubleTransposition;
use crate::analysis::{Kasiski, TOO_SHORT};
use crate::config::KasiskiConfig;
use crate::hill::{Hill, HillMatrix};
use crate::keys::{LetterKey, Permutation, ShiftKey};
use crate::playfair::{Playfair, PlayfairSquare};
use crate::substitution::Substitution;
use crate::transposition::Transposition;
use crate::{Action, Alphabet, CipherType, Error, Result};
use serde::{Deserialize, Serialize};

/// An algorithm together with its already-validated key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherSpec {
    KeywordShift(LetterKey),
    Monoalphabetic(LetterKey),
    Polyalphabetic(LetterKey),
    Periodic(ShiftKey),
    Playfair(PlayfairSquare),
    Hill(HillMatrix),
    Columnar(Permutation),
    Row(usize),
    Group(usize),
    Series(Permutation),
    RailFence(usize),
    DoubleTransposition {
        columns: Permutation,
        rows: Permutation,
    },
}

impl CipherSpec {
    pub fn cipher_type(&self) -> CipherType {
        match self {
            CipherSpec::KeywordShift(_) => CipherType::KeywordShift,
            CipherSpec::Monoalphabetic(_) => CipherType::Monoalphabetic,
            CipherSpec::Polyalphabetic(_) => CipherType::Polyalphabetic,
            CipherSpec::Periodic(_) => CipherType::Periodic,
            CipherSpec::Playfair(_) => CipherType::Playfair,
            CipherSpec::Hill(_) => CipherType::Hill,
            CipherSpec::Columnar(_) => CipherType::Columnar,
            CipherSpec::Row(_) => CipherType::Row,
            CipherSpec::Group(_) => CipherType::Group,
            CipherSpec::Series(_) => CipherType::Series,
            CipherSpec::RailFence(_) => CipherType::RailFence,
            CipherSpec::DoubleTransposition { .. } => CipherType::DoubleTransposition,
        }
    }

    pub fn apply(&self, text: &str, action: Action) -> Result<String> {
        match self {
            CipherSpec::KeywordShift(key) => Ok(Substitution::keyword_shift(text, key, action)),
            CipherSpec::Monoalphabetic(key) => Ok(Substitution::monoalphabetic(text, key, action)),
            CipherSpec::Polyalphabetic(key) => Ok(Substitution::vigenere(text, key, action)),
            CipherSpec::Periodic(key) => Ok(Substitution::periodic(text, key, action)),
            CipherSpec::Playfair(square) => Ok(Playfair::apply(text, square, action)),
            CipherSpec::Hill(matrix) => Hill::apply(text, matrix, action),
            CipherSpec::Columnar(order) => Transposition::columnar(text, order, action),
            CipherSpec::Row(rows) => Transposition::row(text, *rows, action),
            CipherSpec::Group(size) => Transposition::group(text, *size, action),
            CipherSpec::Series(order) => Transposition::series(text, order, action),
            CipherSpec::RailFence(rails) => Transposition::rail_fence(text, *rails, action),
            CipherSpec::DoubleTransposition { columns, rows } => {
                DoubleTransposition::apply(text, columns, rows, action)
            }
        }
    }
}

/// Raw request parameters. Field aliases accept the Spanish form names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherRequest {
    #[serde(alias = "texto")]
    pub text: String,
    #[serde(alias = "tipo", alias = "cipher")]
    pub algorithm: String,
    #[serde(alias = "accion")]
    pub action: Action,
    #[serde(alias = "clave")]
    pub key: Option<String>,
    #[serde(alias = "num_clave")]
    pub digit_key: Option<String>,
    #[serde(alias = "orden")]
    pub order: Option<String>,
    #[serde(alias = "orden_col")]
    pub column_order: Option<String>,
    #[serde(alias = "orden_fil")]
    pub row_order: Option<String>,
    #[serde(alias = "matriz")]
    pub matrix: Option<String>,
    /// Hill alphabet; Spanish when absent
    pub alphabet: Option<Alphabet>,
    #[serde(alias = "tam_grupo")]
    pub group_size: Option<usize>,
    #[serde(alias = "filas")]
    pub rows: Option<usize>,
    #[serde(alias = "rieles")]
    pub rails: Option<usize>,
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    value.as_deref().ok_or(Error::MissingParameter(name))
}

fn required_count(value: Option<usize>, name: &'static str) -> Result<usize> {
    value.ok_or(Error::MissingParameter(name))
}

impl CipherRequest {
    pub fn new(algorithm: impl Into<String>, action: Action, text: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            action,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    pub fn cipher_type(&self) -> Result<CipherType> {
        self.algorithm.parse()
    }

    /// Validate every parameter the algorithm needs and build its spec.
    pub fn spec(&self) -> Result<CipherSpec> {
        let key = || required(&self.key, "key");
        let order = || required(&self.order, "order");

        let spec = match self.cipher_type()? {
            CipherType::KeywordShift => {
                CipherSpec::KeywordShift(LetterKey::parse(key()?, Alphabet::Latin)?)
            }
            CipherType::Monoalphabetic => {
                CipherSpec::Monoalphabetic(LetterKey::parse(key()?, Alphabet::Spanish)?)
            }
            CipherType::Polyalphabetic => {
                CipherSpec::Polyalphabetic(LetterKey::parse(key()?, Alphabet::Latin)?)
            }
            CipherType::Periodic => {
                let digits = self
                    .digit_key
                    .as_deref()
                    .or(self.key.as_deref())
                    .ok_or(Error::MissingParameter("digit_key"))?;
                CipherSpec::Periodic(digits.parse()?)
            }
            CipherType::Playfair => CipherSpec::Playfair(PlayfairSquare::new(key()?)?),
            CipherType::Hill => CipherSpec::Hill(HillMatrix::parse_with(
                required(&self.matrix, "matrix")?,
                self.alphabet.unwrap_or(Alphabet::Spanish),
            )?),
            CipherType::Columnar => CipherSpec::Columnar(order()?.parse()?),
            CipherType::Row => CipherSpec::Row(required_count(self.rows, "rows")?),
            CipherType::Group => CipherSpec::Group(required_count(self.group_size, "group_size")?),
            CipherType::Series => CipherSpec::Series(order()?.parse()?),
            CipherType::RailFence => CipherSpec::RailFence(required_count(self.rails, "rails")?),
            CipherType::DoubleTransposition => CipherSpec::DoubleTransposition {
                columns: required(&self.column_order, "column_order")?.parse()?,
                rows: required(&self.row_order, "row_order")?.parse()?,
            },
            CipherType::Kasiski => return Err(Error::NotACipher(CipherType::Kasiski)),
        };
        Ok(spec)
    }

    pub fn execute(&self) -> Result<String> {
        self.execute_with(&KasiskiConfig::default())
    }

    /// Run the request; Kasiski requests return the rendered report.
    pub fn execute_with(&self, kasiski: &KasiskiConfig) -> Result<String> {
        let cipher = self.cipher_type()?;
        tracing::info!(algorithm = %cipher, action = ?self.action, "executing request");

        if cipher == CipherType::Kasiski {
            return Ok(match Kasiski::analyze_with(&self.text, kasiski)? {
                Some(report) => report.to_string(),
                None => TOO_SHORT.to_string(),
            });
        }
        self.spec()?.apply(&self.text, self.action)
    }
}
