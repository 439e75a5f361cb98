// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ledgerline::api::HttpBackend;
use ledgerline::app::{App, Navigation};
use ledgerline::config::Config;
use ledgerline::{cli, commands, db};

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledgerline=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = cli::build_cli().get_matches();
    let config = Config::load(
        cli::global_value(&matches, "origin"),
        cli::global_value(&matches, "data-dir"),
    )?;
    tracing::debug!(api = %config.api_base, "resolved API base");

    let conn = db::open_or_init(config.data_dir.as_deref())?;
    let backend = HttpBackend::new(&config)?;
    let mut app = App::new(backend, &conn);

    let nav = match matches.subcommand() {
        Some(("register", sub)) => commands::auth::register(&mut app, sub)?,
        Some(("login", sub)) => commands::auth::login(&mut app, sub)?,
        Some(("logout", _)) => commands::auth::logout(&mut app)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&mut app, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut app, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&mut app, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&mut app, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Navigation::Stay
        }
    };
    if commands::finish(&mut app, nav) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
