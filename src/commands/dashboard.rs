// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::Backend;
use crate::app::{App, Navigation};
use crate::filter::{FilterMode, FilterState, YearSelection};
use crate::utils::maybe_print_json;
use anyhow::Result;
use chrono::Local;

pub fn filter_state(sub: &clap::ArgMatches) -> Result<FilterState> {
    let mode = match sub.get_one::<String>("filter") {
        Some(f) => f.parse::<FilterMode>()?,
        None => FilterMode::All,
    };
    let selected_year = sub
        .get_one::<String>("year")
        .map(|y| y.parse::<YearSelection>())
        .transpose()?;
    Ok(FilterState {
        mode,
        selected_year,
    })
}

pub fn handle<B: Backend>(app: &mut App<'_, B>, sub: &clap::ArgMatches) -> Result<Navigation> {
    let filter = filter_state(sub)?;
    let nav = app.load()?;
    if nav != Navigation::Stay {
        return Ok(nav);
    }
    let now = Local::now();
    let view = app.view(&filter, now);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        print!("{}", app.render(&filter, now));
    }
    Ok(nav)
}
