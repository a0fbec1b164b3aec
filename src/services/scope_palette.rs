use std::collections::HashMap;

use crate::domain::scope::UNSPECIFIED_SCOPE;

pub const BASE_COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#17becf", "#bcbd22",
];

pub const UNSPECIFIED_COLOR: &str = "#aaaaaa";

/// Stable scope -> color assignment owned by whoever draws the chart.
///
/// New scopes take the first base color nobody uses yet. Once the palette
/// is exhausted a FNV-1a hash of the normalized scope picks a base color.
/// The map only grows; drop the palette to forget assignments.
#[derive(Debug, Clone, Default)]
pub struct ScopePalette {
    assigned: HashMap<String, &'static str>,
}

impl ScopePalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_for(&mut self, scope: &str) -> &'static str {
        let trimmed = scope.trim();
        if trimmed.is_empty() || trimmed == UNSPECIFIED_SCOPE {
            return UNSPECIFIED_COLOR;
        }

        let key = trimmed.to_lowercase();
        if let Some(color) = self.assigned.get(&key).copied() {
            return color;
        }

        let color = BASE_COLORS
            .iter()
            .copied()
            .find(|candidate| !self.assigned.values().any(|used| used == candidate))
            .unwrap_or_else(|| BASE_COLORS[fnv1a(&key) as usize % BASE_COLORS.len()]);
        self.assigned.insert(key, color);
        color
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

/// 32-bit FNV-1a over UTF-16 code units.
fn fnv1a(value: &str) -> u32 {
    value.encode_utf16().fold(2_166_136_261_u32, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(16_777_619)
    })
}

/// Parses `#rrggbb`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_scope_keeps_its_color() {
        let mut palette = ScopePalette::new();
        let first = palette.color_for("Nuevo");
        assert_eq!(palette.color_for(" nuevo "), first);
        assert_eq!(palette.len(), 1);
    }

    #[test]
    fn new_scopes_take_unused_colors_in_order() {
        let mut palette = ScopePalette::new();
        assert_eq!(palette.color_for("Nuevo"), BASE_COLORS[0]);
        assert_eq!(palette.color_for("Mejoramiento"), BASE_COLORS[1]);
        assert_eq!(palette.color_for("Rehabilitación"), BASE_COLORS[2]);
    }

    #[test]
    fn unspecified_scope_is_gray_and_not_cached() {
        let mut palette = ScopePalette::new();
        assert_eq!(palette.color_for(""), UNSPECIFIED_COLOR);
        assert_eq!(palette.color_for(UNSPECIFIED_SCOPE), UNSPECIFIED_COLOR);
        assert!(palette.is_empty());
    }

    #[test]
    fn exhausted_palette_falls_back_to_hash() {
        let mut palette = ScopePalette::new();
        for idx in 0..BASE_COLORS.len() {
            palette.color_for(&format!("scope {idx}"));
        }
        let overflow = palette.color_for("one more");
        assert!(BASE_COLORS.contains(&overflow));
        let expected = BASE_COLORS[fnv1a("one more") as usize % BASE_COLORS.len()];
        assert_eq!(overflow, expected);
    }

    #[test]
    fn fnv1a_matches_reference_values() {
        assert_eq!(fnv1a(""), 0x811c9dc5);
        assert_eq!(fnv1a("a"), 0xe40c292c);
    }

    #[test]
    fn hex_to_rgb_parses_palette_entries() {
        assert_eq!(hex_to_rgb("#1f77b4"), Some((0x1f, 0x77, 0xb4)));
        assert_eq!(hex_to_rgb("1f77b4"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }
}
