//! Cryptanalysis
//!
//! Kasiski examination: estimate the key period of a polyalphabetic
//! ciphertext from the distances between repeated trigrams.

use crate::config::KasiskiConfig;
use crate::{Alphabet, Result};
use serde::Serialize;
use std::fmt;

/// Message returned when the text has no repeated trigram.
pub const TOO_SHORT: &str = "No repeated trigrams found - text too short.";

/// One candidate period and how many distances it divides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodScore {
    pub period: usize,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KasiskiReport {
    /// Raw distances in discovery order
    pub distances: Vec<usize>,
    /// Every candidate period, most frequent divisor first
    pub periods: Vec<PeriodScore>,
    #[serde(skip)]
    range: (usize, usize),
}

impl KasiskiReport {
    /// Highest-ranked period, if any distance had a divisor in range
    pub fn best_period(&self) -> Option<usize> {
        self.periods
            .first()
            .filter(|score| score.occurrences > 0)
            .map(|score| score.period)
    }

    pub fn occurrences(&self, period: usize) -> Option<usize> {
        self.periods
            .iter()
            .find(|score| score.period == period)
            .map(|score| score.occurrences)
    }
}

impl fmt::Display for KasiskiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let distances: Vec<String> = self.distances.iter().map(|d| d.to_string()).collect();
        writeln!(f, "Distances (in characters): {}", distances.join(","))?;
        writeln!(f)?;
        writeln!(f, "Most likely factors ({}-{}):", self.range.0, self.range.1)?;
        for score in &self.periods {
            writeln!(f, "  k = {:<2} -> {} occurrences", score.period, score.occurrences)?;
        }
        Ok(())
    }
}

pub struct Kasiski;

impl Kasiski {
    pub fn analyze(ciphertext: &str) -> Option<KasiskiReport> {
        Self::scan(ciphertext, &KasiskiConfig::default())
    }

    pub fn analyze_with(ciphertext: &str, config: &KasiskiConfig) -> Result<Option<KasiskiReport>> {
        config.validate()?;
        Ok(Self::scan(ciphertext, config))
    }

    /// Formatted report, or the too-short message.
    pub fn report(ciphertext: &str) -> String {
        match Self::analyze(ciphertext) {
            Some(report) => report.to_string(),
            None => TOO_SHORT.to_string(),
        }
    }

    /// Distance from every repeat start to each later, non-overlapping
    /// occurrence of the same substring.
    pub fn distances(ciphertext: &str, length: usize) -> Vec<usize> {
        let text = Alphabet::Spanish.normalize_chars(ciphertext);
        let mut distances = Vec::new();
        if length == 0 || text.len() < length {
            return distances;
        }

        for i in 0..=text.len() - length {
            let needle = &text[i..i + length];
            for j in i + length..=text.len() - length {
                if text[j..j + length] == *needle {
                    distances.push(j - i);
                }
            }
        }
        distances
    }

    fn scan(ciphertext: &str, config: &KasiskiConfig) -> Option<KasiskiReport> {
        let distances = Self::distances(ciphertext, config.trigram);
        tracing::debug!(repeats = distances.len(), "kasiski scan");
        if distances.is_empty() {
            return None;
        }

        let mut periods: Vec<PeriodScore> = (config.min_period..=config.max_period)
            .map(|period| PeriodScore {
                period,
                occurrences: distances.iter().filter(|&&d| d % period == 0).count(),
            })
            .collect();
        // stable: ties keep ascending period order
        periods.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));

        Some(KasiskiReport {
            distances,
            periods,
            range: (config.min_period, config.max_period),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_repeat_at_distance_six() {
        let report = Kasiski::analyze("ABCDEFABC").unwrap();
        assert_eq!(report.distances, vec![6]);

        let top: Vec<usize> = report.periods.iter().take(3).map(|s| s.period).collect();
        assert_eq!(top, vec![2, 3, 6]);
        for period in [2, 3, 6] {
            assert_eq!(report.occurrences(period), Some(1));
        }
        for period in [4, 5, 7, 12, 20] {
            assert_eq!(report.occurrences(period), Some(0));
        }
        assert_eq!(report.periods.len(), 19);
        assert_eq!(report.best_period(), Some(2));
    }

    #[test]
    fn test_too_short() {
        assert!(Kasiski::analyze("AB").is_none());
        assert!(Kasiski::analyze("ABCDEFGH").is_none());
        assert_eq!(Kasiski::report(""), TOO_SHORT);
    }

    #[test]
    fn test_overlapping_repeats_are_skipped() {
        // matches closer than the substring length are ignored
        assert_eq!(Kasiski::distances("AAAAAA", 3), vec![3]);
        assert_eq!(Kasiski::distances("AAAAAAA", 3), vec![3, 4, 3]);
    }

    #[test]
    fn test_every_later_occurrence_recorded() {
        assert_eq!(Kasiski::distances("ABCxABCyyABC", 3), vec![4, 9, 5]);
    }

    #[test]
    fn test_normalizes_before_scanning() {
        assert_eq!(Kasiski::distances("añb, xx AÑB", 3), vec![5]);
    }

    #[test]
    fn test_report_format() {
        let text = Kasiski::report("ABCDEFABC");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Distances (in characters): 6"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("Most likely factors (2-20):"));
        assert_eq!(lines.next(), Some("  k = 2  -> 1 occurrences"));
        assert_eq!(lines.next(), Some("  k = 3  -> 1 occurrences"));
        assert_eq!(lines.next(), Some("  k = 6  -> 1 occurrences"));
        assert_eq!(lines.next(), Some("  k = 4  -> 0 occurrences"));
        assert!(text.ends_with("  k = 20 -> 0 occurrences\n"));
    }

    #[test]
    fn test_report_json_shape() {
        let report = Kasiski::analyze("ABCDEFABC").unwrap();
        let value = serde_json::to_value(&report).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["distances", "periods"]);
        assert_eq!(value["distances"], serde_json::json!([6]));
        assert_eq!(value["periods"][0], serde_json::json!({"period": 2, "occurrences": 1}));
        assert_eq!(value["periods"].as_array().unwrap().len(), 19);
    }

    #[test]
    fn test_vigenere_ciphertext_points_at_key_length() {
        let plain = "THESUNANDTHEMANINTHEMOONTHESUNANDTHEMANINTHEMOON";
        let c = crate::Substitution::vigenere_encrypt(plain, "KEY").unwrap();
        let report = Kasiski::analyze(&c).unwrap();
        assert!(report.distances.contains(&24));
        assert!(report.occurrences(3).unwrap() > 0);
    }

    #[test]
    fn test_custom_range() {
        let config = KasiskiConfig {
            min_period: 3,
            max_period: 6,
            ..Default::default()
        };
        let report = Kasiski::analyze_with("ABCDEFABC", &config).unwrap().unwrap();
        assert_eq!(report.periods.len(), 4);
        assert!(report.to_string().contains("Most likely factors (3-6):"));

        let bad = KasiskiConfig {
            min_period: 0,
            ..Default::default()
        };
        assert!(Kasiski::analyze_with("ABCDEFABC", &bad).is_err());
    }
}
