use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

pub const WIRE_FORMAT: &str = "%Y-%m-%d";

/// Yesterday in local time; the most recent day with complete games.
pub fn default_date() -> NaiveDate {
    let today = Local::now().date_naive();
    today.pred_opt().unwrap_or(today)
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), WIRE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", input.trim()))
}

pub fn format_wire(date: NaiveDate) -> String {
    date.format(WIRE_FORMAT).to_string()
}

/// e.g. "Tuesday, July 15, 2025"
pub fn format_for_display(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
