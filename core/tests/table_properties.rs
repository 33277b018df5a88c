// core/tests/table_properties.rs
//
// Whole-table properties of the position codec.
//
// Tests cover:
// - Determinism of resolve over the full grid
// - Code text format and agreement with zone/position
// - Zone ordering and all_entries concatenation
// - Round trip from enumerated entries back through resolve
// - GB 2312 hanzi counts
// - Concurrent use from several threads

use libquwei_core::{Charset, CodeError, PositionCodec};
use std::sync::Arc;
use std::thread;

#[test]
fn test_resolve_is_deterministic() {
    let codec = PositionCodec::new();
    for zone in 1..=94 {
        for position in 1..=94 {
            assert_eq!(codec.resolve(zone, position), codec.resolve(zone, position));
        }
    }
}

#[test]
fn test_code_text_matches_coordinates() {
    let codec = PositionCodec::new();
    for zone in 1..=94u32 {
        for position in 1..=94u32 {
            if let Ok(entry) = codec.resolve(zone, position) {
                assert_eq!(entry.code.len(), 4);
                assert_eq!(entry.code[..2].parse::<u32>().unwrap(), zone);
                assert_eq!(entry.code[2..].parse::<u32>().unwrap(), position);
                assert_eq!(entry.character.chars().count(), 1);
            }
        }
    }
}

#[test]
fn test_zones_are_sorted_and_homogeneous() {
    let codec = PositionCodec::new();
    for zone in 1..=94u32 {
        let entries = codec.entries_in_zone(zone).unwrap();
        assert!(entries.iter().all(|e| e.zone as u32 == zone));
        assert!(entries.windows(2).all(|w| w[0].position < w[1].position));
    }
}

#[test]
fn test_all_entries_concatenates_zones() {
    let codec = PositionCodec::new();
    let all = codec.all_entries();
    let total: usize = (1..=94)
        .map(|zone| codec.entries_in_zone(zone).unwrap().len())
        .sum();
    assert_eq!(all.len(), total);
    assert!(all
        .windows(2)
        .all(|w| (w[0].zone, w[0].position) < (w[1].zone, w[1].position)));
}

#[test]
fn test_every_entry_round_trips() {
    for charset in [Charset::Gb18030, Charset::Gb2312] {
        let codec = PositionCodec::with_charset(charset);
        for entry in codec.all_entries() {
            let again = codec
                .resolve(entry.zone as u32, entry.position as u32)
                .unwrap();
            assert_eq!(again.character, entry.character);
            assert!(codec.contains(entry.zone as u32, entry.position as u32));
        }
    }
}

#[test]
fn test_gb18030_only_drops_the_blank_cell() {
    let codec = PositionCodec::new();
    assert_eq!(codec.all_entries().len(), 94 * 94 - 1);
    assert_eq!(
        codec.resolve(1, 1),
        Err(CodeError::NotFound { zone: 1, position: 1 })
    );
}

#[test]
fn test_gb2312_hanzi_count() {
    let codec = PositionCodec::with_charset(Charset::Gb2312);
    let level_one: usize = (16..=55)
        .map(|zone| codec.entries_in_zone(zone).unwrap().len())
        .sum();
    let hanzi: usize = (16..=87)
        .map(|zone| codec.entries_in_zone(zone).unwrap().len())
        .sum();
    assert_eq!(level_one, 3755);
    assert_eq!(hanzi, 6763);

    // user-defined zones are empty in strict mode
    for zone in (10..=15).chain(88..=94) {
        assert!(codec.entries_in_zone(zone).unwrap().is_empty(), "zone {}", zone);
    }
}

#[test]
fn test_scenarios() {
    let codec = PositionCodec::new();
    assert_eq!(codec.resolve(16, 1).unwrap().code, "1601");
    assert_eq!(codec.resolve(30, 21).unwrap().code, "3021");
    assert_eq!(codec.resolve(54, 48).unwrap().code, "5448");
    assert_eq!(
        codec.resolve(95, 1),
        Err(CodeError::OutOfRange { zone: 95, position: 1 })
    );
}

#[test]
fn test_locate_inverts_resolve_for_hanzi() {
    let codec = PositionCodec::new();
    for entry in codec.entries_in_zone(16).unwrap() {
        let ch = entry.character.chars().next().unwrap();
        assert_eq!(codec.locate(ch), Some(entry));
    }
}

#[test]
fn test_concurrent_zone_enumeration() {
    let codec = Arc::new(PositionCodec::new());
    let handles: Vec<_> = (1..=94u32)
        .map(|zone| {
            let codec = Arc::clone(&codec);
            thread::spawn(move || codec.entries_in_zone(zone).unwrap())
        })
        .collect();

    let parallel: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(parallel, codec.all_entries());
}
