// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::Backend;
use crate::app::{App, Navigation};
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<B: Backend>(app: &mut App<'_, B>, sub: &clap::ArgMatches) -> Result<Navigation> {
    let nav = app.load_summary()?;
    if let Some(s) = app.summary() {
        if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), s)? {
            println!(
                "{}",
                pretty_table(
                    &["Total Income", "Total Expense", "Net Balance"],
                    vec![vec![
                        fmt_amount(s.total_income),
                        fmt_amount(s.total_expense),
                        fmt_amount(s.net_balance),
                    ]],
                )
            );
        }
    }
    Ok(nav)
}
