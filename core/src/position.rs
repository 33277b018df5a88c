//! Position codes and the character entries they resolve to.
//!
//! A position code (区位码) names a cell of the 94×94 GB 2312 grid by its
//! zone (区) and position (位). The canonical text form is four zero-padded
//! digits, zone first: zone 16 position 1 is `"1601"`.

use crate::error::{CodeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest valid zone or position.
pub const MIN_COORD: u32 = 1;

/// Largest valid zone or position.
pub const MAX_COORD: u32 = 94;

/// Number of cells in the zone/position grid.
pub const GRID_SIZE: usize = (MAX_COORD * MAX_COORD) as usize;

/// Offset between a coordinate and its GB byte (`zone + 0xA0`).
pub const BYTE_OFFSET: u32 = 0xA0;

/// Length of the canonical code text.
pub const CODE_LEN: usize = 4;

/// Check a single coordinate against 1..=94.
pub fn in_range(value: u32) -> bool {
    (MIN_COORD..=MAX_COORD).contains(&value)
}

/// A validated (zone, position) pair, both within 1..=94.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositionCode {
    zone: u8,
    position: u8,
}

impl PositionCode {
    /// Build a code, failing with `OutOfRange` if either coordinate is
    /// outside 1..=94.
    pub fn new(zone: u32, position: u32) -> Result<Self> {
        if !in_range(zone) || !in_range(position) {
            return Err(CodeError::OutOfRange { zone, position });
        }
        Ok(Self {
            zone: zone as u8,
            position: position as u8,
        })
    }

    /// Recover a code from a grid index (`(zone-1)*94 + (position-1)`).
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= GRID_SIZE {
            return None;
        }
        let side = MAX_COORD as usize;
        Some(Self {
            zone: (index / side + 1) as u8,
            position: (index % side + 1) as u8,
        })
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    /// Index into the flat 94×94 grid.
    pub fn index(&self) -> usize {
        (self.zone as usize - 1) * MAX_COORD as usize + (self.position as usize - 1)
    }

    /// The GB double-byte encoding of this cell (`zone + 0xA0`, `position + 0xA0`).
    pub fn gb_bytes(&self) -> [u8; 2] {
        [
            (self.zone as u32 + BYTE_OFFSET) as u8,
            (self.position as u32 + BYTE_OFFSET) as u8,
        ]
    }

    /// Inverse of [`gb_bytes`](Self::gb_bytes). Both bytes must lie in 0xA1..=0xFE.
    pub fn from_gb_bytes(high: u8, low: u8) -> Option<Self> {
        let zone = (high as u32).checked_sub(BYTE_OFFSET)?;
        let position = (low as u32).checked_sub(BYTE_OFFSET)?;
        Self::new(zone, position).ok()
    }

    /// Canonical four-digit text, e.g. `"1601"`.
    pub fn code(&self) -> String {
        format_code(self.zone, self.position)
    }
}

impl fmt::Display for PositionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.zone, self.position)
    }
}

impl FromStr for PositionCode {
    type Err = CodeError;

    /// Parse exactly four ASCII digits. A well-formed code whose zone or
    /// position is outside 1..=94 (e.g. `"0001"`, `"9501"`) yields `OutOfRange`.
    fn from_str(s: &str) -> Result<Self> {
        let (zone, position) = split_code(s)?;
        Self::new(zone, position)
    }
}

/// Split four ASCII digits into their two-digit halves without range checks.
pub fn split_code(s: &str) -> Result<(u32, u32)> {
    if s.len() != CODE_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodeError::MalformedCode(s.to_string()));
    }
    let b = s.as_bytes();
    let pair = |hi: u8, lo: u8| (hi - b'0') as u32 * 10 + (lo - b'0') as u32;
    Ok((pair(b[0], b[1]), pair(b[2], b[3])))
}

/// `%02d%02d` of a zone and position.
pub fn format_code(zone: u8, position: u8) -> String {
    format!("{:02}{:02}", zone, position)
}

/// One resolved cell of the character table.
///
/// Entries built by the codec carry a `code` of `format!("{:02}{:02}", zone,
/// position)`. The fields are public and deserializable, so an entry read
/// from elsewhere is not validated until [`position_code`](Self::position_code).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub character: String,
    pub zone: u8,
    pub position: u8,
    pub code: String,
}

impl CharacterEntry {
    pub(crate) fn new(code: PositionCode, ch: char) -> Self {
        Self {
            character: ch.to_string(),
            zone: code.zone(),
            position: code.position(),
            code: code.code(),
        }
    }

    /// The code of this entry, failing with `OutOfRange` if the zone or
    /// position was set outside 1..=94.
    pub fn position_code(&self) -> Result<PositionCode> {
        PositionCode::new(self.zone as u32, self.position as u32)
    }

    /// Human readable location, e.g. `"16区01位"`.
    pub fn code_description(&self) -> String {
        format!("{:02}区{:02}位", self.zone, self.position)
    }
}

impl fmt::Display for CharacterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.character)
    }
}
