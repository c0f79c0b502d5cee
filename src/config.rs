//! Environment-driven reload settings.
//!
//! `TRADEBOOK_TRADE_DIRS` lists catalog directories (comma or whitespace
//! separated) and `TRADEBOOK_STRICT` turns any diagnostic into a failing exit.
//! Command-line flags layered on top via the `with_*` methods win.

use crate::split_list;
use std::env;
use std::path::PathBuf;

pub const TRADE_DIRS_ENV: &str = "TRADEBOOK_TRADE_DIRS";
pub const STRICT_ENV: &str = "TRADEBOOK_STRICT";
pub const LOG_ENV: &str = "TRADEBOOK_LOG";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReloadConfig {
    pub trade_dirs: Vec<PathBuf>,
    pub strict: bool,
}

impl ReloadConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source so callers and tests need not
    /// touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let trade_dirs = lookup(TRADE_DIRS_ENV)
            .map(|raw| split_list(&raw).into_iter().map(PathBuf::from).collect())
            .unwrap_or_default();
        let strict = lookup(STRICT_ENV).map(|v| flag_enabled(&v)).unwrap_or(false);
        Self { trade_dirs, strict }
    }

    /// Layer command-line values over the environment: `dirs` replaces the
    /// directory list only when non-empty, and `--strict` can only turn strict
    /// mode on.
    pub fn merge_args(mut self, dirs: Vec<PathBuf>, strict: bool) -> Self {
        if !dirs.is_empty() {
            self.trade_dirs = dirs;
        }
        self.strict |= strict;
        self
    }
}

fn flag_enabled(value: &str) -> bool {
    !value.trim().is_empty() && value.trim() != "0"
}
