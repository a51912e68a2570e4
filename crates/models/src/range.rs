//! A1-notation cell ranges (`I2:R19`, `H4`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ModelError;

/// Inclusive, 1-based rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start_row: u32,
    pub end_row: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl CellRange {
    pub fn rows(&self) -> usize {
        (self.end_row - self.start_row + 1) as usize
    }

    pub fn cols(&self) -> usize {
        (self.end_col - self.start_col + 1) as usize
    }
}

fn parse_cell(cell: &str) -> Result<(u32, u32), ModelError> {
    let split = cell
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| ModelError::Range(format!("missing row in {cell:?}")))?;
    let (letters, digits) = cell.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ModelError::Range(format!("bad column in {cell:?}")));
    }
    let col = letters
        .to_ascii_uppercase()
        .bytes()
        .try_fold(0u32, |acc, b| acc.checked_mul(26)?.checked_add(u32::from(b - b'A' + 1)))
        .ok_or_else(|| ModelError::Range(format!("column out of range in {cell:?}")))?;
    let row: u32 = digits
        .parse()
        .map_err(|_| ModelError::Range(format!("bad row in {cell:?}")))?;
    if row == 0 {
        return Err(ModelError::Range(format!("rows start at 1 in {cell:?}")));
    }
    Ok((row, col))
}

fn column_letters(mut col: u32) -> String {
    let mut out = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        out.push(char::from(b'A' + rem as u8));
        col = (col - 1) / 26;
    }
    out.iter().rev().collect()
}

impl FromStr for CellRange {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (a, b) = s.split_once(':').unwrap_or((s, s));
        let (r1, c1) = parse_cell(a.trim())?;
        let (r2, c2) = parse_cell(b.trim())?;
        Ok(Self {
            start_row: r1.min(r2),
            end_row: r1.max(r2),
            start_col: c1.min(c2),
            end_col: c1.max(c2),
        })
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            column_letters(self.start_col),
            self.start_row,
            column_letters(self.end_col),
            self.end_row
        )
    }
}

impl Serialize for CellRange {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellRange {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
