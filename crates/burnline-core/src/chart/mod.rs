//! Braille cost chart.
//!
//! An hour-indexed cost series is cut into five-hour blocks from an anchor
//! hour. Each block is normalized against its own min/max, trailing idle
//! hours are dropped, and pairs of hours become one braille glyph colored on
//! a green to red gradient by the higher of the two samples.

mod blocks;
mod glyph;
mod gradient;

pub use blocks::{
    assemble_chart, render_block, render_block_plain, segment_into_blocks, Block, BLANK_BLOCK,
    BLOCK_HOURS,
};
pub use glyph::{encode_braille, row_level, BRAILLE_BASE, MAX_LEVEL};
pub use gradient::{gradient_color, Rgb};

use crate::usage::HourCostSeries;

/// Render the full truecolor chart for `series`, starting at `anchor`.
pub fn render_chart(series: &HourCostSeries, anchor: i64) -> String {
    let rendered: Vec<String> = segment_into_blocks(series, anchor)
        .iter()
        .map(render_block)
        .collect();
    assemble_chart(&rendered)
}

/// Render the chart without color escapes.
pub fn render_chart_plain(series: &HourCostSeries, anchor: i64) -> String {
    let rendered: Vec<String> = segment_into_blocks(series, anchor)
        .iter()
        .map(render_block_plain)
        .collect();
    assemble_chart(&rendered)
}
