use std::io::Read;

use burnline_core::{
    current_session_start, day_origin, hourly_costs, parse_usage_log, render_chart,
    render_chart_plain, Config, Event, UsageRecord,
};
use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone};
use serde::Serialize;
use tracing::debug;

use super::GlobalOpts;

/// Everything the status line shows, before formatting.
#[derive(Debug, Serialize)]
pub struct Report {
    pub chart: String,
    pub session_start: Option<DateTime<FixedOffset>>,
    pub today_cost: f64,
}

impl Report {
    pub fn build(
        records: &[UsageRecord],
        config: &Config,
        color: bool,
        offset: FixedOffset,
    ) -> Self {
        let events: Vec<Event> = records.iter().map(UsageRecord::to_event).collect();
        let session_start = current_session_start(&events, config.session_gap_ms())
            .and_then(|ms| offset.timestamp_millis_opt(ms).single());

        let latest = records.iter().filter_map(UsageRecord::timestamp_millis).max();
        let (chart, today_cost) = match latest.and_then(|ts| day_origin(ts, offset)) {
            Some(origin) => {
                let (series, anchor) = hourly_costs(records, origin);
                debug!(origin, ?anchor, hours = series.len(), "bucketed today's usage");
                let chart = match anchor {
                    Some(anchor) if color => render_chart(&series, anchor),
                    Some(anchor) => render_chart_plain(&series, anchor),
                    None => String::new(),
                };
                (chart, series.total())
            }
            None => (String::new(), 0.0),
        };

        Self {
            chart,
            session_start,
            today_cost,
        }
    }

    /// Join the enabled parts with " | ".
    pub fn format_line(&self, config: &Config) -> String {
        let mut parts = Vec::new();
        if config.display.show_chart && !self.chart.is_empty() {
            parts.push(self.chart.clone());
        }
        if config.display.show_session {
            if let Some(start) = self.session_start {
                parts.push(format!("session {}", start.format("%H:%M")));
            }
        }
        parts.push(format!("${:.2}", self.today_cost));
        parts.join(" | ")
    }
}

fn read_records(opts: &GlobalOpts) -> Result<Vec<UsageRecord>, Box<dyn std::error::Error>> {
    let text = match &opts.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(parse_usage_log(&text))
}

fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

fn build(opts: &GlobalOpts) -> Result<(Report, Config), Box<dyn std::error::Error>> {
    let config = opts.load_config()?;
    let records = read_records(opts)?;
    let color = config.display.color && !opts.plain;
    let report = Report::build(&records, &config, color, local_offset());
    Ok((report, config))
}

pub fn run_line(opts: &GlobalOpts, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (report, config) = build(opts)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.format_line(&config));
    }
    Ok(())
}

pub fn run_chart(opts: &GlobalOpts) -> Result<(), Box<dyn std::error::Error>> {
    let (report, _) = build(opts)?;
    println!("{}", report.chart);
    Ok(())
}

pub fn run_session(opts: &GlobalOpts) -> Result<(), Box<dyn std::error::Error>> {
    let (report, _) = build(opts)?;
    if let Some(start) = report.session_start {
        println!("{}", start.to_rfc3339());
    }
    Ok(())
}
