// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON instead of tables"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("filter")
            .long("filter")
            .short('f')
            .value_parser(["all", "week", "month", "year"])
            .default_value("all")
            .help("Time window: all, last 7 days, this month, or a calendar year"),
    )
    .arg(
        Arg::new("year")
            .long("year")
            .help("Year for --filter year (YYYY or 'all'); defaults to the current year"),
    )
}

fn credential_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("username").long("username").short('u'))
        .arg(
            Arg::new("password")
                .long("password")
                .env("LEDGERLINE_PASSWORD")
                .hide_env_values(true)
                .help("Prompted for when omitted"),
        )
}

pub fn build_cli() -> Command {
    Command::new("ledgerline")
        .about("Track income and expenses against a Ledgerline server")
        .version(clap::crate_version!())
        .arg(
            Arg::new("origin")
                .long("origin")
                .global(true)
                .help("Server origin (env LEDGERLINE_ORIGIN)"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .help("Directory for local state (env LEDGERLINE_DATA_DIR)"),
        )
        .subcommand(credential_args(
            Command::new("register").about("Create an account"),
        ))
        .subcommand(credential_args(
            Command::new("login").about("Log in and remember the session"),
        ))
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(json_flags(filter_args(
            Command::new("dashboard").about("Show transactions, totals and charts"),
        )))
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .short('t')
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD or RFC 3339; server time when omitted"),
                        ),
                )
                .subcommand(json_flags(filter_args(
                    Command::new("list").about("List transactions"),
                )))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .short('y')
                                .action(ArgAction::SetTrue)
                                .help("Skip the confirmation prompt"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Download all transactions as CSV")
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .help("Output path; defaults to the server-provided file name"),
                ),
        )
        .subcommand(json_flags(
            Command::new("summary").about("Show totals computed by the server"),
        ))
}

/// Value of a global flag, wherever on the command line it was given.
pub fn global_value<'a>(m: &'a ArgMatches, id: &str) -> Option<&'a str> {
    let mut found = m.try_get_one::<String>(id).ok().flatten();
    let mut cur = m;
    while let Some((_, sub)) = cur.subcommand() {
        if let Some(v) = sub.try_get_one::<String>(id).ok().flatten() {
            found = Some(v);
        }
        cur = sub;
    }
    found.map(String::as_str)
}
