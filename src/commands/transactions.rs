// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::Backend;
use crate::app::{AddForm, App, Navigation};
use crate::commands::dashboard::filter_state;
use crate::filter::FilterState;
use crate::utils::{confirm, maybe_print_json};
use anyhow::Result;
use chrono::Local;

pub fn handle<B: Backend>(app: &mut App<'_, B>, m: &clap::ArgMatches) -> Result<Navigation> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub),
        Some(("list", sub)) => list(app, sub),
        Some(("rm", sub)) => rm(app, sub),
        _ => Ok(Navigation::Stay),
    }
}

pub fn form_from(sub: &clap::ArgMatches) -> AddForm {
    let get = |k: &str| sub.get_one::<String>(k).cloned();
    AddForm {
        title: get("title").unwrap_or_default(),
        amount: get("amount").unwrap_or_default(),
        r#type: get("type").unwrap_or_default(),
        category: get("category"),
        date: get("date"),
    }
}

fn refreshed<B: Backend>(app: &mut App<'_, B>, nav: Navigation) -> Navigation {
    if nav == Navigation::Dashboard {
        print!("{}", app.render(&FilterState::default(), Local::now()));
    }
    nav
}

fn add<B: Backend>(app: &mut App<'_, B>, sub: &clap::ArgMatches) -> Result<Navigation> {
    let mut form = form_from(sub);
    let nav = app.add(&mut form)?;
    Ok(refreshed(app, nav))
}

fn list<B: Backend>(app: &mut App<'_, B>, sub: &clap::ArgMatches) -> Result<Navigation> {
    let filter = filter_state(sub)?;
    let nav = app.load()?;
    if nav != Navigation::Stay {
        return Ok(nav);
    }
    let view = app.view(&filter, Local::now());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view.transactions)? {
        println!("{}", view.table());
    }
    Ok(nav)
}

fn rm<B: Backend>(app: &mut App<'_, B>, sub: &clap::ArgMatches) -> Result<Navigation> {
    let Some(id) = sub.get_one::<i64>("id").copied() else {
        return Ok(Navigation::Stay);
    };
    let skip_prompt = sub.get_flag("yes");
    let nav = app.delete(id, |id| {
        if skip_prompt {
            return Ok(true);
        }
        confirm(&format!("Delete transaction {}?", id))
    })?;
    Ok(refreshed(app, nav))
}
