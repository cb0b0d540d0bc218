//! Cifra: classical cipher toolkit
//!
//! Pedagogical substitution, matrix and transposition ciphers over a fixed
//! Latin (26) or Spanish (27, with `Ñ`) alphabet, plus Kasiski examination.
//! None of this is meant to resist modern cryptanalysis.
//!
//! # Modules
//! - `alphabet` - Symbol sets, case folding, text cleaning
//! - `keys` - Letter, shift-digit and permutation keys
//! - `substitution` - Keyword shift, Vigenère, periodic, monoalphabetic
//! - `playfair` - 5×5 digraph cipher
//! - `hill` - n×n modular matrix cipher
//! - `transposition` - Columnar, row, group, series, rail fence
//! - `anagram` - Row + column double transposition
//! - `analysis` - Kasiski examination
//! - `config` - Kasiski tuning
//! - `request` - Dispatch by algorithm name
//!
//! ```
//! use cifra_cipher::Substitution;
//!
//! let c = Substitution::keyword_shift_encrypt("ataque al amanecer", "CLAVE").unwrap();
//! let m = Substitution::keyword_shift_decrypt(&c, "CLAVE").unwrap();
//! assert_eq!(m, "ATAQUEALAMANECER");
//! ```

pub mod alphabet;
pub mod keys;
pub mod substitution;
pub mod playfair;
pub mod hill;
pub mod transposition;
pub mod anagram;
pub mod analysis;
pub mod config;
pub mod request;

pub use alphabet::{Alphabet, FILLER};
pub use keys::{LetterKey, Permutation, ShiftKey};
pub use substitution::Substitution;
pub use playfair::{Playfair, PlayfairSquare};
pub use hill::{Hill, HillMatrix};
pub use transposition::Transposition;
pub use anagram::DoubleTransposition;
pub use analysis::{Kasiski, KasiskiReport, PeriodScore};
pub use config::KasiskiConfig;
pub use request::{CipherRequest, CipherSpec};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown cipher: {0}")]
    UnknownCipher(String),

    #[error("Unknown action: {0} (use encrypt or decrypt)")]
    UnknownAction(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid text geometry: {0}")]
    Geometry(String),

    #[error("{parameter} must be >= {min}, got {got}")]
    OutOfRange {
        parameter: &'static str,
        min: usize,
        got: usize,
    },

    #[error("{parameter} must be <= {max}, got {got}")]
    TooLarge {
        parameter: &'static str,
        max: usize,
        got: usize,
    },

    #[error("{0} is an analysis and takes no key")]
    NotACipher(CipherType),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Broad failure class of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Key does not have the shape its algorithm needs
    Key,
    /// Ciphertext length incompatible with the block geometry
    Geometry,
    /// Numeric parameter outside its allowed range
    Range,
    /// Malformed request or configuration
    Request,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidKey(_) => ErrorKind::Key,
            Error::Geometry(_) => ErrorKind::Geometry,
            Error::OutOfRange { .. } | Error::TooLarge { .. } => ErrorKind::Range,
            Error::UnknownCipher(_)
            | Error::NotACipher(_)
            | Error::UnknownAction(_)
            | Error::MissingParameter(_)
            | Error::InvalidConfig(_) => ErrorKind::Request,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Direction of a cipher operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    #[serde(alias = "cifrar")]
    Encrypt,
    #[serde(alias = "descifrar")]
    Decrypt,
}

impl Action {
    /// +1 when encrypting, -1 when decrypting
    pub fn sign(&self) -> i64 {
        match self {
            Action::Encrypt => 1,
            Action::Decrypt => -1,
        }
    }

    pub fn is_decrypt(&self) -> bool {
        matches!(self, Action::Decrypt)
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "encrypt" | "encode" | "cifrar" => Ok(Action::Encrypt),
            "decrypt" | "decode" | "descifrar" => Ok(Action::Decrypt),
            other => Err(Error::UnknownAction(other.to_string())),
        }
    }
}

/// Every operation the library exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CipherType {
    // Substitution
    KeywordShift,
    Monoalphabetic,

    // Polyalphabetic
    Polyalphabetic,
    Periodic,
    Playfair,

    // Matrix
    Hill,

    // Transposition
    Columnar,
    Row,
    Group,
    Series,
    RailFence,
    DoubleTransposition,

    // Cryptanalysis
    Kasiski,
}

impl CipherType {
    pub const ALL: [CipherType; 13] = [
        CipherType::KeywordShift,
        CipherType::Monoalphabetic,
        CipherType::Polyalphabetic,
        CipherType::Periodic,
        CipherType::Playfair,
        CipherType::Hill,
        CipherType::Columnar,
        CipherType::Row,
        CipherType::Group,
        CipherType::Series,
        CipherType::RailFence,
        CipherType::DoubleTransposition,
        CipherType::Kasiski,
    ];

    /// Stable machine name, as accepted by [`FromStr`]
    pub fn id(&self) -> &'static str {
        match self {
            CipherType::KeywordShift => "keyword-shift",
            CipherType::Monoalphabetic => "monoalphabetic",
            CipherType::Polyalphabetic => "polyalphabetic",
            CipherType::Periodic => "periodic",
            CipherType::Playfair => "playfair",
            CipherType::Hill => "hill",
            CipherType::Columnar => "columnar",
            CipherType::Row => "row",
            CipherType::Group => "group",
            CipherType::Series => "series",
            CipherType::RailFence => "rail-fence",
            CipherType::DoubleTransposition => "double-transposition",
            CipherType::Kasiski => "kasiski",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CipherType::KeywordShift => "Keyword Shift Cipher",
            CipherType::Monoalphabetic => "Monoalphabetic Substitution",
            CipherType::Polyalphabetic => "Vigenère Cipher",
            CipherType::Periodic => "Periodic Polyalphabetic Cipher",
            CipherType::Playfair => "Playfair Cipher",
            CipherType::Hill => "Hill Cipher",
            CipherType::Columnar => "Columnar Transposition",
            CipherType::Row => "Row Transposition",
            CipherType::Group => "Group Reversal",
            CipherType::Series => "Series Transposition",
            CipherType::RailFence => "Rail Fence Cipher",
            CipherType::DoubleTransposition => "Row + Column Anagram",
            CipherType::Kasiski => "Kasiski Examination",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            CipherType::KeywordShift | CipherType::Monoalphabetic => "Substitution",

            CipherType::Polyalphabetic | CipherType::Periodic | CipherType::Playfair => {
                "Polyalphabetic"
            }

            CipherType::Hill => "Matrix",

            CipherType::Columnar
            | CipherType::Row
            | CipherType::Group
            | CipherType::Series
            | CipherType::RailFence
            | CipherType::DoubleTransposition => "Transposition",

            CipherType::Kasiski => "Analysis",
        }
    }

    /// Shape of the key material the operation takes
    pub fn key_form(&self) -> &'static str {
        match self {
            CipherType::KeywordShift | CipherType::Polyalphabetic | CipherType::Playfair => {
                "letters A-Z"
            }
            CipherType::Monoalphabetic => "letters A-Z and Ñ",
            CipherType::Periodic => "digits 1-9",
            CipherType::Hill => "matrix \"a,b;c,d\"",
            CipherType::Columnar | CipherType::Series => "permutation of 1..n",
            CipherType::Row => "row count >= 2",
            CipherType::Group => "group size >= 2",
            CipherType::RailFence => "rail count >= 2",
            CipherType::DoubleTransposition => "column and row permutations",
            CipherType::Kasiski => "none",
        }
    }

    /// Alphabet the operation normalizes against
    pub fn alphabet(&self) -> Alphabet {
        match self {
            CipherType::Monoalphabetic
            | CipherType::Periodic
            | CipherType::Hill
            | CipherType::Series
            | CipherType::RailFence
            | CipherType::Kasiski => Alphabet::Spanish,
            _ => Alphabet::Latin,
        }
    }
}

impl fmt::Display for CipherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CipherType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        let found = match wanted.as_str() {
            "keyword-shift" | "desplazamiento-clave" => CipherType::KeywordShift,
            "monoalphabetic" | "monoalfabetica" => CipherType::Monoalphabetic,
            "polyalphabetic" | "vigenere" | "polialfabetica" => CipherType::Polyalphabetic,
            "periodic" | "periodicos" => CipherType::Periodic,
            "playfair" => CipherType::Playfair,
            "hill" => CipherType::Hill,
            "columnar" | "columnas" => CipherType::Columnar,
            "row" | "filas" => CipherType::Row,
            "group" | "grupos" => CipherType::Group,
            "series" => CipherType::Series,
            "rail-fence" | "railfence" | "zigzag" => CipherType::RailFence,
            "double-transposition" | "anagramacion" => CipherType::DoubleTransposition,
            "kasiski" => CipherType::Kasiski,
            _ => return Err(Error::UnknownCipher(s.trim().to_string())),
        };
        Ok(found)
    }
}
