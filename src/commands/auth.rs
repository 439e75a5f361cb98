// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::Backend;
use crate::app::{App, Navigation};
use crate::models::Credentials;
use crate::utils::read_line;
use anyhow::{bail, Result};

pub fn credentials(sub: &clap::ArgMatches) -> Result<Credentials> {
    let username = match sub.get_one::<String>("username") {
        Some(u) => u.trim().to_string(),
        None => read_line("Username: ")?,
    };
    let password = match sub.get_one::<String>("password") {
        Some(p) => p.clone(),
        None => rpassword::prompt_password("Password: ")?,
    };
    if username.is_empty() || password.is_empty() {
        bail!("Username and password are required");
    }
    Ok(Credentials { username, password })
}

pub fn register<B: Backend>(app: &mut App<'_, B>, sub: &clap::ArgMatches) -> Result<Navigation> {
    let creds = credentials(sub)?;
    app.register(&creds)
}

pub fn login<B: Backend>(app: &mut App<'_, B>, sub: &clap::ArgMatches) -> Result<Navigation> {
    let creds = credentials(sub)?;
    app.login(&creds)
}

pub fn logout<B: Backend>(app: &mut App<'_, B>) -> Result<Navigation> {
    app.logout()
}
