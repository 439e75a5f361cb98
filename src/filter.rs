// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Time-window filtering of a fetched transaction list.

use crate::models::Transaction;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt;
use std::str::FromStr;

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl FromStr for FilterMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "week" => Ok(FilterMode::Week),
            "month" => Ok(FilterMode::Month),
            "year" => Ok(FilterMode::Year),
            other => Err(anyhow!(
                "Unknown filter '{}' (use all|week|month|year)",
                other
            )),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterMode::All => "all",
            FilterMode::Week => "week",
            FilterMode::Month => "month",
            FilterMode::Year => "year",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearSelection {
    All,
    Year(i32),
}

impl FromStr for YearSelection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(YearSelection::All);
        }
        s.parse::<i32>()
            .map(YearSelection::Year)
            .map_err(|_| anyhow!("Invalid year '{}', expected YYYY or 'all'", s))
    }
}

impl fmt::Display for YearSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearSelection::All => f.write_str("all"),
            YearSelection::Year(y) => write!(f, "{}", y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    pub mode: FilterMode,
    pub selected_year: Option<YearSelection>,
}

impl FilterState {
    pub fn new(mode: FilterMode) -> Self {
        Self {
            mode,
            selected_year: None,
        }
    }

    pub fn year(selection: YearSelection) -> Self {
        Self {
            mode: FilterMode::Year,
            selected_year: Some(selection),
        }
    }
}

/// Parses a backend timestamp into local time. Anything unreadable is
/// treated as `now` so one bad record cannot break the dashboard.
pub fn parse_tx_date(raw: &str, now: DateTime<Local>) -> DateTime<Local> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local);
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });
    naive
        .and_then(|n| Local.from_local_datetime(&n).earliest())
        .unwrap_or(now)
}

pub fn apply_filter(
    transactions: &[Transaction],
    filter: &FilterState,
    now: DateTime<Local>,
) -> Vec<Transaction> {
    let keep = |tx: &Transaction| -> bool {
        let d = parse_tx_date(&tx.date, now);
        match filter.mode {
            FilterMode::All => true,
            FilterMode::Week => d >= now - Duration::days(7) && d <= now,
            FilterMode::Month => d.year() == now.year() && d.month() == now.month(),
            FilterMode::Year => match filter.selected_year {
                None | Some(YearSelection::All) => true,
                Some(YearSelection::Year(y)) => d.year() == y,
            },
        }
    };
    transactions.iter().filter(|tx| keep(*tx)).cloned().collect()
}

/// Distinct calendar years present in the list, newest first.
pub fn available_years(transactions: &[Transaction], now: DateTime<Local>) -> Vec<i32> {
    let mut years: Vec<i32> = transactions
        .iter()
        .map(|tx| parse_tx_date(&tx.date, now).year())
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// The current year when there is data for it, otherwise everything.
pub fn default_year(years: &[i32], now: DateTime<Local>) -> YearSelection {
    if years.contains(&now.year()) {
        YearSelection::Year(now.year())
    } else {
        YearSelection::All
    }
}
