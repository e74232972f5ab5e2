// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// There is no config file. Defaults can be overridden from the environment,
// which is read once at startup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::ClaheParams;

/// Environment variable overriding the initial clip limit.
pub const ENV_CLIP_LIMIT: &str = "KONTRAST_CLIP_LIMIT";
/// Environment variable overriding the initial tile-grid rows.
pub const ENV_TILE_ROWS: &str = "KONTRAST_TILE_ROWS";
/// Environment variable overriding the initial tile-grid columns.
pub const ENV_TILE_COLS: &str = "KONTRAST_TILE_COLS";
/// Environment variable overriding the default log filter.
pub const ENV_LOG: &str = "KONTRAST_LOG";
/// Environment variable overriding the download directory.
pub const ENV_DOWNLOAD_DIR: &str = "KONTRAST_DOWNLOAD_DIR";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Slider positions when the app opens.
    pub initial_params: ClaheParams,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Directory the download dialog starts in. `None` lets the platform decide.
    pub download_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_params: ClaheParams::default(),
            log_filter: "info".into(),
            download_dir: None,
        }
    }
}

impl AppConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from an arbitrary key lookup.
    ///
    /// Unparseable values are ignored with a warning. Parameters are clamped
    /// into the slider ranges.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_var::<f32, _>(&lookup, ENV_CLIP_LIMIT) {
            config.initial_params.clip_limit = v;
        }
        if let Some(v) = parse_var::<u32, _>(&lookup, ENV_TILE_ROWS) {
            config.initial_params.grid.rows = v;
        }
        if let Some(v) = parse_var::<u32, _>(&lookup, ENV_TILE_COLS) {
            config.initial_params.grid.cols = v;
        }
        config.initial_params = config.initial_params.clamped();

        if let Some(filter) = lookup(ENV_LOG).filter(|s| !s.trim().is_empty()) {
            config.log_filter = filter;
        }
        if let Some(dir) = lookup(ENV_DOWNLOAD_DIR).filter(|s| !s.trim().is_empty()) {
            config.download_dir = Some(PathBuf::from(dir));
        }

        config
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}
