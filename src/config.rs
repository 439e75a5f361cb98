// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use reqwest::Url;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";
/// Port the backend API listens on during local development.
pub const API_PORT: u16 = 8000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
const LOCAL_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

#[derive(Debug, Clone)]
pub struct Config {
    pub origin: Url,
    pub api_base: Url,
    pub data_dir: Option<PathBuf>,
    pub timeout: Duration,
}

impl Config {
    /// Flags win over `LEDGERLINE_*` environment variables, which win over defaults.
    pub fn load(origin_flag: Option<&str>, data_dir_flag: Option<&str>) -> Result<Self> {
        let origin_raw = origin_flag
            .map(str::to_string)
            .or_else(|| env::var("LEDGERLINE_ORIGIN").ok())
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let origin = Url::parse(origin_raw.trim())
            .with_context(|| format!("Invalid origin URL '{}'", origin_raw))?;
        let data_dir = data_dir_flag
            .map(PathBuf::from)
            .or_else(|| env::var("LEDGERLINE_DATA_DIR").ok().map(PathBuf::from));
        let timeout = timeout_from(env::var("LEDGERLINE_TIMEOUT_SECS").ok().as_deref());
        Ok(Self {
            api_base: resolve_base_url(&origin),
            origin,
            data_dir,
            timeout,
        })
    }
}

/// Request timeout in whole seconds; unset or unreadable means the default,
/// and anything below one second is raised to one.
pub fn timeout_from(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
        .max(1);
    Duration::from_secs(secs)
}

/// A local origin on some other port (a dev server) talks to the local API;
/// everything else is its own API.
pub fn resolve_base_url(origin: &Url) -> Url {
    let is_local = origin
        .host_str()
        .map(|h| LOCAL_HOSTS.contains(&h))
        .unwrap_or(false);
    if is_local && origin.port_or_known_default() != Some(API_PORT) {
        if let Ok(u) = Url::parse(&format!("http://127.0.0.1:{}", API_PORT)) {
            return u;
        }
    }
    let mut base = origin.clone();
    base.set_path("");
    base.set_query(None);
    base.set_fragment(None);
    base
}
