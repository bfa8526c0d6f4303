//! Validated partition tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GlaiveError, Result};

/// One entry of a partition table.
///
/// ```json
/// [
///   {"kind": "range", "start": "a", "end": "m"},
///   {"kind": "range", "start": "n", "end": "z"},
///   {"kind": "range", "start": "0", "end": "9"},
///   {"kind": "catch_all"}
/// ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartitionRangeConfig {
    /// Terms whose first character is in `start..=end`.
    Range { start: char, end: char },
    /// Every term no explicit range claims, including the empty term.
    CatchAll,
}

impl PartitionRangeConfig {
    pub fn range(start: char, end: char) -> Self {
        PartitionRangeConfig::Range { start, end }
    }

    /// `a–c, d–h, i–m, n–r, s–z, 0–9` and the catch-all.
    pub fn default_table() -> Vec<Self> {
        vec![
            Self::range('a', 'c'),
            Self::range('d', 'h'),
            Self::range('i', 'm'),
            Self::range('n', 'r'),
            Self::range('s', 'z'),
            Self::range('0', '9'),
            PartitionRangeConfig::CatchAll,
        ]
    }
}

impl fmt::Display for PartitionRangeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionRangeConfig::Range { start, end } => write!(f, "{start}-{end}"),
            PartitionRangeConfig::CatchAll => write!(f, "*"),
        }
    }
}

/// Number of ASCII code points with a direct barrel slot.
const ASCII_SLOTS: usize = 128;

/// An immutable, validated mapping from term to barrel number.
///
/// Construction fails with [`GlaiveError::PartitionCoverage`] unless:
///
/// * every range has `start <= end` and holds only lowercase ASCII letters
///   or only ASCII digits;
/// * no two ranges overlap;
/// * `a..=z` and `0..=9` are fully covered;
/// * there is exactly one catch-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionTable {
    ranges: Vec<PartitionRangeConfig>,
    catch_all: usize,
    slots: Vec<usize>,
}

impl PartitionTable {
    pub fn new(ranges: Vec<PartitionRangeConfig>) -> Result<Self> {
        let mut catch_all = None;
        let mut slots = vec![usize::MAX; ASCII_SLOTS];

        for (index, range) in ranges.iter().enumerate() {
            match *range {
                PartitionRangeConfig::CatchAll => {
                    if catch_all.replace(index).is_some() {
                        return Err(GlaiveError::partition_coverage(
                            "partition table has more than one catch-all",
                        ));
                    }
                }
                PartitionRangeConfig::Range { start, end } => {
                    check_range(start, end)?;
                    for c in start..=end {
                        let slot = &mut slots[c as usize];
                        if *slot != usize::MAX {
                            return Err(GlaiveError::partition_coverage(format!(
                                "ranges {} and {} overlap at '{}'",
                                ranges[*slot], range, c
                            )));
                        }
                        *slot = index;
                    }
                }
            }
        }

        let catch_all = catch_all.ok_or_else(|| {
            GlaiveError::partition_coverage("partition table has no catch-all")
        })?;

        let uncovered: String = ('a'..='z')
            .chain('0'..='9')
            .filter(|c| slots[*c as usize] == usize::MAX)
            .collect();
        if !uncovered.is_empty() {
            return Err(GlaiveError::partition_coverage(format!(
                "no range covers '{uncovered}'"
            )));
        }

        for slot in slots.iter_mut().filter(|slot| **slot == usize::MAX) {
            *slot = catch_all;
        }

        Ok(PartitionTable {
            ranges,
            catch_all,
            slots,
        })
    }

    pub fn from_config(ranges: &[PartitionRangeConfig]) -> Result<Self> {
        Self::new(ranges.to_vec())
    }

    /// Barrel number of `term`, decided by its first character.
    pub fn barrel_for(&self, term: &str) -> usize {
        match term.chars().next() {
            Some(c) if c.is_ascii() => self.slots[c as usize],
            _ => self.catch_all,
        }
    }

    /// Number of barrels, one per table entry.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ranges(&self) -> &[PartitionRangeConfig] {
        &self.ranges
    }

    pub fn range(&self, index: usize) -> Option<&PartitionRangeConfig> {
        self.ranges.get(index)
    }

    pub fn catch_all(&self) -> usize {
        self.catch_all
    }
}

fn check_range(start: char, end: char) -> Result<()> {
    if start > end {
        return Err(GlaiveError::partition_coverage(format!(
            "range {start}-{end} is reversed"
        )));
    }
    let letters = start.is_ascii_lowercase() && end.is_ascii_lowercase();
    let digits = start.is_ascii_digit() && end.is_ascii_digit();
    if !letters && !digits {
        return Err(GlaiveError::partition_coverage(format!(
            "range {start}-{end} must hold only lowercase ASCII letters or only ASCII digits"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(ranges: Vec<PartitionRangeConfig>) -> Result<PartitionTable> {
        PartitionTable::new(ranges)
    }

    #[test]
    fn test_default_table() {
        let table = table(PartitionRangeConfig::default_table()).unwrap();
        assert_eq!(table.len(), 7);
        assert_eq!(table.barrel_for("apple"), 0);
        assert_eq!(table.barrel_for("cat"), 0);
        assert_eq!(table.barrel_for("dog"), 1);
        assert_eq!(table.barrel_for("zebra"), 4);
        assert_eq!(table.barrel_for("2024"), 5);
        assert_eq!(table.barrel_for("éclair"), 6);
        assert_eq!(table.barrel_for("東京"), 6);
        assert_eq!(table.barrel_for("Upper"), 6);
        assert_eq!(table.barrel_for(""), 6);
    }

    #[test]
    fn test_catch_all_position_is_free() {
        let table = table(vec![
            PartitionRangeConfig::CatchAll,
            PartitionRangeConfig::range('0', '9'),
            PartitionRangeConfig::range('a', 'z'),
        ])
        .unwrap();

        assert_eq!(table.catch_all(), 0);
        assert_eq!(table.barrel_for("cat"), 2);
        assert_eq!(table.barrel_for("_"), 0);
    }

    #[test]
    fn test_gap_is_rejected() {
        let err = table(vec![
            PartitionRangeConfig::range('a', 'm'),
            PartitionRangeConfig::range('o', 'z'),
            PartitionRangeConfig::range('0', '9'),
            PartitionRangeConfig::CatchAll,
        ])
        .unwrap_err();

        assert!(matches!(err, GlaiveError::PartitionCoverage(ref msg) if msg.contains('n')));
    }

    #[test]
    fn test_digits_must_be_covered() {
        let err = table(vec![
            PartitionRangeConfig::range('a', 'z'),
            PartitionRangeConfig::CatchAll,
        ])
        .unwrap_err();
        assert!(matches!(err, GlaiveError::PartitionCoverage(_)));
    }

    #[test]
    fn test_overlap_is_rejected() {
        let err = table(vec![
            PartitionRangeConfig::range('a', 'm'),
            PartitionRangeConfig::range('m', 'z'),
            PartitionRangeConfig::range('0', '9'),
            PartitionRangeConfig::CatchAll,
        ])
        .unwrap_err();
        assert!(matches!(err, GlaiveError::PartitionCoverage(_)));
    }

    #[test]
    fn test_catch_all_required_once() {
        let base = vec![
            PartitionRangeConfig::range('a', 'z'),
            PartitionRangeConfig::range('0', '9'),
        ];
        assert!(table(base.clone()).is_err());

        let mut doubled = base;
        doubled.push(PartitionRangeConfig::CatchAll);
        doubled.push(PartitionRangeConfig::CatchAll);
        assert!(table(doubled).is_err());
    }

    #[test]
    fn test_bad_ranges_are_rejected() {
        for bad in [
            PartitionRangeConfig::range('z', 'a'),
            PartitionRangeConfig::range('0', 'z'),
            PartitionRangeConfig::range('A', 'Z'),
            PartitionRangeConfig::range('!', '/'),
        ] {
            let result = table(vec![
                bad,
                PartitionRangeConfig::range('a', 'z'),
                PartitionRangeConfig::range('0', '9'),
                PartitionRangeConfig::CatchAll,
            ]);
            assert!(result.is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_json_shape() {
        let json = r#"[
            {"kind": "range", "start": "a", "end": "z"},
            {"kind": "range", "start": "0", "end": "9"},
            {"kind": "catch_all"}
        ]"#;
        let ranges: Vec<PartitionRangeConfig> = serde_json::from_str(json).unwrap();
        let table = PartitionTable::new(ranges).unwrap();
        assert_eq!(table.barrel_for("7up"), 1);
    }
}
