//! Position code ⇄ character translation.
//!
//! `PositionCodec` is the single place where zone/position pairs are turned
//! into GB double-byte sequences (`value + 0xA0`) and decoded. Everything that
//! needs a character for a code (the keystroke session, table browsers,
//! exporters) goes through it.
//!
//! The decode table itself is a flat 94×94 array built once from the GB 18030
//! index of the `encoding` crate and indexed by `(zone-1)*94 + (position-1)`.
//! It is immutable after construction, so the codec is stateless and can be
//! copied and shared across threads freely.

use crate::error::{CodeError, Result};
use crate::position::{
    in_range, CharacterEntry, PositionCode, CODE_LEN, GRID_SIZE, MAX_COORD, MIN_COORD,
};
use encoding::all::GB18030;
use encoding::{DecoderTrap, EncoderTrap, Encoding};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Raw decode results for every cell of the grid, before any filtering.
static GB_TABLE: Lazy<Vec<Option<char>>> = Lazy::new(build_table);

fn build_table() -> Vec<Option<char>> {
    let table: Vec<Option<char>> = (0..GRID_SIZE)
        .map(|index| PositionCode::from_index(index).and_then(|code| decode_pair(code.gb_bytes())))
        .collect();
    debug!(
        cells = table.len(),
        assigned = table.iter().filter(|c| c.is_some()).count(),
        "built GB 18030 position table"
    );
    table
}

/// Decode one double-byte sequence into exactly one character.
fn decode_pair(bytes: [u8; 2]) -> Option<char> {
    let decoded = GB18030.decode(&bytes, DecoderTrap::Strict).ok()?;
    let mut chars = decoded.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(ch)
}

fn is_blank(ch: char) -> bool {
    ch.is_whitespace() || ch.is_control()
}

/// Assigned positions of the GB 2312 symbol zones 1-9, as inclusive ranges.
const GB2312_SYMBOLS: [&[(u8, u8)]; 9] = [
    &[(1, 94)],
    &[(17, 66), (69, 78), (81, 92)],
    &[(1, 94)],
    &[(1, 83)],
    &[(1, 86)],
    &[(1, 24), (33, 56)],
    &[(1, 33), (49, 81)],
    &[(1, 26), (37, 73)],
    &[(4, 79)],
];

/// Last assigned position of the level 1 hanzi zone 55.
const GB2312_ZONE_55_END: u8 = 89;

/// True iff GB 2312 itself assigns a character to `code`.
fn is_gb2312_cell(code: PositionCode) -> bool {
    let (zone, position) = (code.zone(), code.position());
    match zone {
        1..=9 => GB2312_SYMBOLS[zone as usize - 1]
            .iter()
            .any(|&(first, last)| (first..=last).contains(&position)),
        55 => position <= GB2312_ZONE_55_END,
        16..=87 => true,
        _ => false,
    }
}

/// Which cells of the grid count as assigned.
///
/// The table is the WHATWG `gb18030` index bundled with `encoding`, which
/// follows GB 18030-2005 rather than a GB 18030-2000 decoder. The two
/// disagree on cells outside GB 2312: A8BC decodes to U+1E3F instead of
/// U+E7C7, and decoders built on GB 18030-2022 give vertical forms
/// (U+FE10-FE19) for A6D9-A6DF, A6EC-A6ED and A6F3 where the index keeps
/// private-use characters. `Gb18030` resolves those cells to whatever the
/// index holds; `Gb2312` drops them with every other non-GB 2312 cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    /// Everything the GB 18030 decoder produces, including the private-use
    /// characters of the user-defined zones (10-15, 88-94), the GBK
    /// additions to zones 1-9 and the GB 2312 gaps.
    #[default]
    Gb18030,
    /// Strict GB 2312: 682 symbols in zones 1-9 and 6763 hanzi in zones
    /// 16-87. Every other cell is unassigned.
    Gb2312,
}

impl Charset {
    fn accepts(self, code: PositionCode) -> bool {
        match self {
            Charset::Gb18030 => true,
            Charset::Gb2312 => is_gb2312_cell(code),
        }
    }
}

/// Stateless translator between position codes and characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionCodec {
    charset: Charset,
}

impl PositionCodec {
    /// Codec using the default GB 18030 table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_charset(charset: Charset) -> Self {
        Self { charset }
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Resolve a zone and position to its character.
    ///
    /// Fails with `OutOfRange` if either value is outside 1..=94 and with
    /// `NotFound` if the cell is unassigned or decodes to whitespace or a
    /// control character.
    ///
    /// ```
    /// use libquwei_core::PositionCodec;
    ///
    /// let codec = PositionCodec::new();
    /// let entry = codec.resolve(16, 1).unwrap();
    /// assert_eq!(entry.character, "啊");
    /// assert_eq!(entry.code, "1601");
    /// ```
    pub fn resolve(&self, zone: u32, position: u32) -> Result<CharacterEntry> {
        let code = PositionCode::new(zone, position)?;
        self.resolve_code(code)
    }

    /// Resolve an already validated code.
    pub fn resolve_code(&self, code: PositionCode) -> Result<CharacterEntry> {
        match self.lookup(code) {
            Some(ch) => Ok(CharacterEntry::new(code, ch)),
            None => {
                trace!(code = %code, "no character at position code");
                Err(CodeError::NotFound {
                    zone: code.zone() as u32,
                    position: code.position() as u32,
                })
            }
        }
    }

    /// Parse four digits and resolve them.
    pub fn resolve_str(&self, code: &str) -> Result<CharacterEntry> {
        self.resolve_code(code.parse()?)
    }

    /// True iff `resolve(zone, position)` would succeed.
    pub fn contains(&self, zone: u32, position: u32) -> bool {
        PositionCode::new(zone, position)
            .map(|code| self.lookup(code).is_some())
            .unwrap_or(false)
    }

    fn lookup(&self, code: PositionCode) -> Option<char> {
        GB_TABLE
            .get(code.index())
            .copied()
            .flatten()
            .filter(|&ch| !is_blank(ch) && self.charset.accepts(code))
    }

    /// Entries of one zone in ascending position order.
    ///
    /// Recomputed on every call; callers that browse repeatedly may cache the
    /// result themselves.
    pub fn entries_in_zone(&self, zone: u32) -> Result<Vec<CharacterEntry>> {
        if !in_range(zone) {
            return Err(CodeError::OutOfRange { zone, position: MIN_COORD });
        }
        Ok(self.zone_entries(zone))
    }

    fn zone_entries(&self, zone: u32) -> Vec<CharacterEntry> {
        (MIN_COORD..=MAX_COORD)
            .filter_map(|position| self.resolve(zone, position).ok())
            .filter(|entry| !entry.character.trim().is_empty())
            .collect()
    }

    /// The whole table, zone-major and position-minor.
    pub fn all_entries(&self) -> Vec<CharacterEntry> {
        (MIN_COORD..=MAX_COORD)
            .flat_map(|zone| self.zone_entries(zone))
            .collect()
    }

    /// Entries whose code starts with `prefix` (zero to four digits).
    ///
    /// Only the zones the prefix can still reach are decoded, so a two- or
    /// three-digit prefix touches a single zone.
    pub fn entries_with_prefix(&self, prefix: &str) -> Vec<CharacterEntry> {
        if prefix.len() > CODE_LEN || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Vec::new();
        }
        let zone_prefix = &prefix[..prefix.len().min(2)];
        (MIN_COORD..=MAX_COORD)
            .filter(|&zone| format!("{:02}", zone).starts_with(zone_prefix))
            .flat_map(|zone| self.zone_entries(zone))
            .filter(|entry| entry.code.starts_with(prefix))
            .collect()
    }

    /// Code search as offered by the table browser.
    ///
    /// An empty query returns every entry, four digits match one code
    /// exactly, one to three digits match by code prefix. Anything else
    /// matches nothing.
    pub fn search(&self, query: &str) -> Vec<CharacterEntry> {
        let query = query.trim();
        match query.len() {
            0 => self.all_entries(),
            CODE_LEN => self.resolve_str(query).into_iter().collect(),
            _ => self.entries_with_prefix(query),
        }
    }

    /// The zone a partially typed search jumps to: the first two characters,
    /// when they name a zone in 1..=94.
    pub fn zone_hint(query: &str) -> Option<u8> {
        let head = query.trim().get(..2)?;
        if !head.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let zone: u32 = head.parse().ok()?;
        in_range(zone).then_some(zone as u8)
    }

    /// Reverse lookup: the position code of `ch`, if the character sits on
    /// the grid and resolves back to itself.
    pub fn locate(&self, ch: char) -> Option<CharacterEntry> {
        let mut buf = [0u8; 4];
        let bytes = GB18030.encode(ch.encode_utf8(&mut buf), EncoderTrap::Strict).ok()?;
        let (high, low) = match bytes.as_slice() {
            [high, low] => (*high, *low),
            _ => return None,
        };
        let code = PositionCode::from_gb_bytes(high, low)?;
        let entry = self.resolve_code(code).ok()?;
        entry.character.starts_with(ch).then_some(entry)
    }

    /// Codes of every character of `text` that is on the grid, in order.
    pub fn locate_all(&self, text: &str) -> Vec<CharacterEntry> {
        text.chars().filter_map(|ch| self.locate(ch)).collect()
    }
}
