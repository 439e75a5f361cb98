// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::Backend;
use crate::app::{App, Navigation};
use crate::models::ExportFile;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_EXPORT_NAME: &str = "transactions.csv";

/// `--out` wins, then the server's file name, then a fixed default.
pub fn output_path(out: Option<&str>, file: &ExportFile) -> PathBuf {
    match out {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(file.filename.as_deref().unwrap_or(DEFAULT_EXPORT_NAME)),
    }
}

pub fn handle<B: Backend>(app: &mut App<'_, B>, sub: &clap::ArgMatches) -> Result<Navigation> {
    let out = sub.get_one::<String>("out").cloned();
    app.export(|file| {
        let path = output_path(out.as_deref(), file);
        std::fs::write(&path, &file.bytes)
            .with_context(|| format!("Write export to {}", path.display()))?;
        Ok(path.display().to_string())
    })
}
