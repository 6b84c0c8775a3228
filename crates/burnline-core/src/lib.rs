//! # Burnline Core Library
//!
//! This library provides the core logic behind the `burnline` status line:
//! a compact braille chart of hourly spend and detection of the current
//! working session in a timestamped usage log.
//!
//! ## Architecture
//!
//! - **Chart**: Per-block normalization of an hour-indexed cost series into
//!   colored braille glyphs, five hours per block
//! - **Session**: Gap-based detection of the most recent session start
//! - **Usage**: Parsing of JSON-lines usage logs into events and hourly buckets
//! - **Config**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`render_chart`]: Hour-cost series and anchor hour to a chart string
//! - [`find_session_start`]: Sorted timestamps to the current session start
//! - [`HourCostSeries`]: Sparse hour to cost mapping
//! - [`Config`]: Application configuration management

pub mod chart;
pub mod config;
pub mod error;
pub mod session;
pub mod usage;

pub use chart::{
    assemble_chart, render_block, render_chart, render_chart_plain, segment_into_blocks, Block,
    Rgb, BLANK_BLOCK, BLOCK_HOURS,
};
pub use config::Config;
pub use error::{ConfigError, CoreError, Result};
pub use session::{
    current_session_start, find_session_start, find_session_start_with_gap, Event,
    SESSION_GAP_MS,
};
pub use usage::{day_origin, hourly_costs, parse_usage_log, HourCostSeries, UsageRecord};
