//! Five-hour block segmentation, per-block rendering and chart assembly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::glyph::{encode_braille, row_level};
use super::gradient::{gradient_color, Rgb};
use crate::usage::HourCostSeries;

/// Number of hour slots in one chart block.
pub const BLOCK_HOURS: usize = 5;

/// Rendered in place of a block with no positive sample.
pub const BLANK_BLOCK: &str = "   ";

/// Smallest normalization denominator; keeps flat blocks finite.
const RANGE_FLOOR: f64 = 1e-12;

/// Five consecutive hourly costs starting at `start_hour`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub start_hour: i64,
    pub values: [f64; BLOCK_HOURS],
}

impl Block {
    fn read(series: &HourCostSeries, start_hour: i64) -> Self {
        let mut values = [0.0; BLOCK_HOURS];
        for (offset, value) in values.iter_mut().enumerate() {
            *value = start_hour
                .checked_add(offset as i64)
                .map_or(0.0, |hour| series.get(hour));
        }
        Self { start_hour, values }
    }

    fn has_positive(&self) -> bool {
        self.values.iter().any(|&v| v > 0.0)
    }

    /// Samples up to and including the last strictly positive one.
    pub fn truncated(&self) -> &[f64] {
        match self.values.iter().rposition(|&v| v > 0.0) {
            Some(last) => &self.values[..=last],
            None => &[],
        }
    }

    /// Colored glyphs for this block, or `None` when nothing is positive.
    ///
    /// Samples are scaled against the block's own min/max, so a block whose
    /// remaining samples are all equal (including a single busy hour) draws
    /// blank green cells.
    pub fn glyphs(&self) -> Option<Vec<(char, Rgb)>> {
        let samples = self.truncated();
        if samples.is_empty() {
            return None;
        }

        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = (max - min).max(RANGE_FLOOR);
        let normalized: Vec<f64> = samples.iter().map(|v| (v - min) / range).collect();

        // An odd trailing sample fills both columns of its glyph.
        let glyphs = normalized
            .chunks(2)
            .map(|pair| {
                let left = pair[0];
                let right = pair.get(1).copied().unwrap_or(left);
                let glyph = encode_braille(row_level(left), row_level(right));
                (glyph, gradient_color(left.max(right)))
            })
            .collect();
        Some(glyphs)
    }
}

/// Split a sparse hour series into consecutive five-hour blocks starting at
/// `anchor`, up to the last hour that carries data.
pub fn segment_into_blocks(series: &HourCostSeries, anchor: i64) -> Vec<Block> {
    let Some(max_hour) = series.max_hour() else {
        return Vec::new();
    };

    let mut blocks = Vec::new();
    let mut current = anchor;
    while current <= max_hour {
        blocks.push(Block::read(series, current));
        match current.checked_add(BLOCK_HOURS as i64) {
            Some(next) => current = next,
            // No hour exists past the end of the index range.
            None => return blocks,
        }
    }

    // Data may still sit in the window right past the loop boundary.
    let trailing = Block::read(series, current);
    if trailing.has_positive() {
        blocks.push(trailing);
    }

    debug!(anchor, max_hour, blocks = blocks.len(), "segmented hour series");
    blocks
}

/// Render one block as truecolor braille glyphs.
pub fn render_block(block: &Block) -> String {
    match block.glyphs() {
        Some(glyphs) => glyphs.iter().map(|(glyph, color)| color.paint(*glyph)).collect(),
        None => BLANK_BLOCK.to_string(),
    }
}

/// Render one block as bare glyphs with no escape sequences.
pub fn render_block_plain(block: &Block) -> String {
    match block.glyphs() {
        Some(glyphs) => glyphs.iter().map(|(glyph, _)| *glyph).collect(),
        None => BLANK_BLOCK.to_string(),
    }
}

/// Join rendered blocks with single spaces. No blocks yields an empty string.
pub fn assemble_chart(rendered: &[String]) -> String {
    rendered.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i64, f64)]) -> HourCostSeries {
        points.iter().copied().collect()
    }

    #[test]
    fn empty_series_has_no_blocks() {
        assert!(segment_into_blocks(&HourCostSeries::default(), 8).is_empty());
        assert!(segment_into_blocks(&HourCostSeries::default(), -40).is_empty());
    }

    #[test]
    fn single_point_lands_at_its_offset() {
        let blocks = segment_into_blocks(&series(&[(10, 1.5)]), 8);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start_hour, 8);
        assert_eq!(blocks[0].values, [0.0, 0.0, 1.5, 0.0, 0.0]);
    }

    #[test]
    fn ten_hours_make_two_blocks() {
        let s = series(&[
            (8, 1.0),
            (9, 2.0),
            (10, 1.5),
            (11, 2.5),
            (12, 1.8),
            (13, 0.5),
            (14, 0.8),
            (15, 1.2),
            (16, 2.2),
            (17, 1.9),
        ]);
        let blocks = segment_into_blocks(&s, 8);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].values, [1.0, 2.0, 1.5, 2.5, 1.8]);
        assert_eq!(blocks[1].values, [0.5, 0.8, 1.2, 2.2, 1.9]);
        assert_eq!(blocks[1].start_hour, 13);
    }

    #[test]
    fn anchor_past_data_yields_nothing() {
        assert!(segment_into_blocks(&series(&[(3, 2.0)]), 9).is_empty());
    }

    #[test]
    fn segmenting_near_the_end_of_the_hour_range() {
        let blocks = segment_into_blocks(&series(&[(i64::MAX - 2, 1.0)]), i64::MAX - 4);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].values, [0.0, 0.0, 1.0, 0.0, 0.0]);

        let blocks = segment_into_blocks(&series(&[(i64::MAX, 2.0)]), i64::MAX - 1);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].values, [0.0, 2.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn truncation_drops_trailing_zeros() {
        let block = Block {
            start_hour: 0,
            values: [0.0, 2.0, 0.0, 1.0, 0.0],
        };
        assert_eq!(block.truncated(), &[0.0, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn all_zero_block_renders_placeholder() {
        let block = Block {
            start_hour: 0,
            values: [0.0; BLOCK_HOURS],
        };
        assert_eq!(render_block(&block), BLANK_BLOCK);
        assert_eq!(render_block_plain(&block), BLANK_BLOCK);
    }

    #[test]
    fn flat_block_normalizes_to_zero() {
        let block = Block {
            start_hour: 0,
            values: [2.0, 2.0, 2.0, 0.0, 0.0],
        };
        let glyphs = block.glyphs().unwrap();
        assert_eq!(glyphs.len(), 2);
        assert!(glyphs.iter().all(|(g, c)| *g == '\u{2800}' && *c == Rgb::new(0, 255, 0)));
    }

    #[test]
    fn single_busy_hour_draws_blank_cell() {
        let s = series(&[(0, 5.0)]);
        let blocks = segment_into_blocks(&s, 0);
        assert_eq!(render_block_plain(&blocks[0]), "\u{2800}");
    }

    #[test]
    fn odd_tail_reuses_sample_for_both_columns() {
        let block = Block {
            start_hour: 0,
            values: [0.0, 0.0, 4.0, 0.0, 0.0],
        };
        let glyphs = block.glyphs().unwrap();
        // [0, 0] then [1, 1]
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[1].0, encode_braille(3, 3));
        assert_eq!(glyphs[1].1, Rgb::new(255, 0, 0));
    }

    #[test]
    fn glyph_color_follows_the_higher_sample() {
        let block = Block {
            start_hour: 0,
            values: [10.0, 0.0, 5.0, 0.0, 0.0],
        };
        let glyphs = block.glyphs().unwrap();
        // left column is the peak, right column the floor
        assert_eq!(glyphs[0].0, encode_braille(3, 0));
        assert_eq!(glyphs[0].1, Rgb::new(255, 0, 0));
        assert_eq!(glyphs[1].1, Rgb::new(255, 255, 0));
    }

    #[test]
    fn plain_rendering_has_no_escapes() {
        let block = Block {
            start_hour: 0,
            values: [1.0, 3.0, 2.0, 0.0, 0.0],
        };
        let plain = render_block_plain(&block);
        assert_eq!(plain.chars().count(), 2);
        assert!(!plain.contains('\u{1b}'));
    }

    #[test]
    fn assemble_joins_with_single_space() {
        assert_eq!(assemble_chart(&[]), "");
        let parts = vec!["ab".to_string(), "cd".to_string(), "ef".to_string()];
        assert_eq!(assemble_chart(&parts), "ab cd ef");
    }
}
