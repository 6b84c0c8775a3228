//! Row levels and 2x4 braille cell encoding.

/// Base code point of the Unicode braille block (the blank cell).
pub const BRAILLE_BASE: u32 = 0x2800;

/// Highest vertical level a column can reach.
pub const MAX_LEVEL: u8 = 3;

// Dot bits, bottom row first.
const LEFT_DOTS: [u32; 4] = [0x40, 0x04, 0x02, 0x01];
const RIGHT_DOTS: [u32; 4] = [0x80, 0x20, 0x10, 0x08];

/// Quantize a normalized value into a vertical level in `0..=3`.
///
/// Exact halves round to the nearest even level.
pub fn row_level(t: f64) -> u8 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    (3.0 * t).round_ties_even().clamp(0.0, MAX_LEVEL as f64) as u8
}

/// Encode a pair of column levels into one braille glyph.
///
/// Each level counts filled dots from the bottom of its column; level 0
/// leaves the column empty. Levels above 3 are clamped.
pub fn encode_braille(left: u8, right: u8) -> char {
    let mask = column_mask(&LEFT_DOTS, left) | column_mask(&RIGHT_DOTS, right);
    // BRAILLE_BASE | mask never exceeds U+28FF, always a valid scalar value.
    char::from_u32(BRAILLE_BASE | mask).unwrap_or('\u{2800}')
}

fn column_mask(dots: &[u32; 4], level: u8) -> u32 {
    dots.iter()
        .take(level.min(MAX_LEVEL) as usize)
        .fold(0, |mask, bit| mask | bit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn row_level_thresholds() {
        assert_eq!(row_level(0.0), 0);
        assert_eq!(row_level(0.33), 1);
        assert_eq!(row_level(0.67), 2);
        assert_eq!(row_level(1.0), 3);
    }

    #[test]
    fn row_level_ties_round_to_even() {
        // 3 * (1/6) = 0.5 -> 0, 3 * 0.5 = 1.5 -> 2
        assert_eq!(row_level(1.0 / 6.0), 0);
        assert_eq!(row_level(0.5), 2);
    }

    #[test]
    fn row_level_clamps() {
        assert_eq!(row_level(-1.0), 0);
        assert_eq!(row_level(4.0), 3);
    }

    #[test]
    fn blank_pair_is_empty_cell() {
        assert_eq!(encode_braille(0, 0), '\u{2800}');
    }

    #[test]
    fn full_columns() {
        // left: 0x40|0x04|0x02, right: 0x80|0x20|0x10
        assert_eq!(encode_braille(3, 0), '\u{2846}');
        assert_eq!(encode_braille(0, 3), '\u{28B0}');
        assert_eq!(encode_braille(3, 3), '\u{28F6}');
        assert_eq!(encode_braille(1, 1), '\u{28C0}');
    }

    #[test]
    fn encoder_is_injective_over_levels() {
        let glyphs: HashSet<char> = (0..=3)
            .flat_map(|l| (0..=3).map(move |r| encode_braille(l, r)))
            .collect();
        assert_eq!(glyphs.len(), 16);
        assert!(glyphs.iter().all(|&c| ('\u{2800}'..='\u{28FF}').contains(&c)));
    }

    proptest! {
        #[test]
        fn row_level_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(row_level(lo) <= row_level(hi));
            prop_assert!(row_level(hi) <= MAX_LEVEL);
        }
    }
}
