// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod dashboard;
pub mod exporter;
pub mod summary;
pub mod transactions;

use crate::api::Backend;
use crate::app::{App, Navigation, Notice};

/// Prints queued notices and, when bounced to login, how to get back in.
/// Returns `true` when any of them was an error.
pub fn finish<B: Backend>(app: &mut App<'_, B>, nav: Navigation) -> bool {
    let mut failed = false;
    for notice in app.take_notices() {
        match notice {
            Notice::Info(_) => println!("{}", notice),
            Notice::Error(_) => {
                failed = true;
                eprintln!("{}", notice);
            }
        }
    }
    if failed && nav == Navigation::Login {
        eprintln!("Log in with: ledgerline login");
    }
    failed
}
