// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard rendering: the transaction table, totals and charts.
//!
//! A [`DashboardView`] is computed from scratch out of the fetched list, the
//! filter and the clock. [`Renderer`] owns the chart instances of the last
//! draw and throws them away before drawing new ones.

use crate::aggregate::{aggregate, Aggregate};
use crate::charts::ChartSet;
use crate::filter::{
    apply_filter, available_years, default_year, parse_tx_date, FilterMode, FilterState,
    YearSelection,
};
use crate::models::Transaction;
use crate::utils::{fmt_amount, fmt_date, pretty_table};
use chrono::{DateTime, Local};
use comfy_table::Table;
use serde::Serialize;

/// Year selector state; only present in year mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSelector {
    pub selected: String,
    pub options: Vec<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub mode: String,
    pub year_selector: Option<YearSelector>,
    pub transactions: Vec<Transaction>,
    pub totals: Aggregate,
    pub net: rust_decimal::Decimal,
    #[serde(skip)]
    now: DateTime<Local>,
}

impl DashboardView {
    pub fn build(transactions: &[Transaction], filter: &FilterState, now: DateTime<Local>) -> Self {
        let mut effective = *filter;
        let year_selector = if filter.mode == FilterMode::Year {
            let options = available_years(transactions, now);
            let selected = filter
                .selected_year
                .unwrap_or_else(|| default_year(&options, now));
            effective.selected_year = Some(selected);
            Some(YearSelector {
                selected: selected.to_string(),
                options,
            })
        } else {
            None
        };
        let filtered = apply_filter(transactions, &effective, now);
        let totals = aggregate(&filtered, now);
        Self {
            mode: filter.mode.to_string(),
            year_selector,
            net: totals.net(),
            totals,
            transactions: filtered,
            now,
        }
    }

    pub fn table(&self) -> Table {
        let rows = self
            .transactions
            .iter()
            .enumerate()
            .map(|(i, tx)| {
                vec![
                    (i + 1).to_string(),
                    tx.id.to_string(),
                    tx.title.clone(),
                    fmt_amount(tx.amount),
                    tx.r#type.to_string(),
                    tx.category.clone().unwrap_or_default(),
                    fmt_date(&parse_tx_date(&tx.date, self.now)),
                    format!("tx rm {}", tx.id),
                ]
            })
            .collect();
        pretty_table(
            &["#", "ID", "Title", "Amount", "Type", "Category", "Date", "Action"],
            rows,
        )
    }

    pub fn totals_table(&self) -> Table {
        pretty_table(
            &["Total Income", "Total Expense", "Net"],
            vec![vec![
                fmt_amount(self.totals.total_income),
                fmt_amount(self.totals.total_expense),
                fmt_amount(self.net),
            ]],
        )
    }
}

#[derive(Debug, Default)]
pub struct Renderer {
    charts: Option<ChartSet>,
    draws: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the whole dashboard. Prior charts are discarded first.
    pub fn render(&mut self, view: &DashboardView) -> String {
        drop(self.charts.take());
        let charts = ChartSet::draw(&view.totals);
        let mut out = String::new();
        out.push_str(&format!("Filter: {}\n", view.mode));
        if let Some(sel) = &view.year_selector {
            let opts: Vec<String> = std::iter::once(YearSelection::All.to_string())
                .chain(sel.options.iter().map(|y| y.to_string()))
                .collect();
            out.push_str(&format!("Year: {} (available: {})\n", sel.selected, opts.join(", ")));
        }
        out.push_str(&format!("{}\n", view.totals_table()));
        if view.transactions.is_empty() {
            out.push_str("No transactions to show.\n");
        } else {
            out.push_str(&format!("{}\n", view.table()));
        }
        out.push('\n');
        out.push_str(&charts.to_string());
        self.charts = Some(charts);
        self.draws += 1;
        out
    }

    pub fn charts(&self) -> Option<&ChartSet> {
        self.charts.as_ref()
    }

    pub fn draws(&self) -> usize {
        self.draws
    }
}
