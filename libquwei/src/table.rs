//! Text rendering of the code table.

use libquwei_core::CharacterEntry;

/// Lay entries out as a grid of `code character` cells, `columns` per row.
pub fn render_grid(entries: &[CharacterEntry], columns: usize) -> String {
    entries
        .chunks(columns.max(1))
        .map(|row| {
            row.iter()
                .map(|e| format!("{} {}", e.code, e.character))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Detail card for a single character.
pub fn render_detail(entry: &CharacterEntry) -> String {
    format!(
        "汉字：{}\n区位码：{}\n{}",
        entry.character,
        entry.code,
        entry.code_description()
    )
}

/// Zone picker label, e.g. "第16区".
pub fn zone_label(zone: u8) -> String {
    format!("第{}区", zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use libquwei_core::PositionCodec;

    #[test]
    fn test_grid_rows() {
        let codec = PositionCodec::new();
        let entries = codec.search("160");
        let grid = render_grid(&entries, 4);
        let rows: Vec<&str> = grid.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("1601 啊  1602 "));
        assert_eq!(render_grid(&[], 4), "");
    }

    #[test]
    fn test_detail() {
        let entry = PositionCodec::new().resolve(54, 48).unwrap();
        assert_eq!(render_detail(&entry), "汉字：中\n区位码：5448\n54区48位");
        assert_eq!(zone_label(16), "第16区");
    }
}
