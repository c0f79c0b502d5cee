//! Catalog discovery on disk and the reload cycle that feeds the loader.
//!
//! Directories are scanned recursively for `.json` files and loaded in sorted
//! path order. A file that cannot be read or is not valid JSON is recorded as
//! a malformed document; the cycle always runs to the end.

use crate::diagnostics::LoadError;
use crate::host::TradeRegistry;
use crate::loader::{CatalogDocument, TradeLoader};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Counters for one completed reload cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReloadSummary {
    pub documents: usize,
    pub registered: usize,
    pub diagnostics: usize,
}

/// One catalog file plus the directory it was found under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogFile {
    pub root: PathBuf,
    pub path: PathBuf,
}

impl CatalogFile {
    /// Source name shown in diagnostics: `<root dir name>:<relative path>`.
    pub fn source_name(&self) -> String {
        let root_name = self
            .root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string());
        let relative = self.path.strip_prefix(&self.root).unwrap_or(&self.path);
        let relative = relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{root_name}:{relative}")
    }
}

/// Every `.json` file under `dirs`, sorted. Missing directories are skipped and
/// symlinked directories are never descended into.
pub fn collect_trade_files(dirs: &[PathBuf]) -> Result<Vec<CatalogFile>> {
    let mut files = Vec::new();
    for dir in dirs {
        let mut found = Vec::new();
        collect_json(dir, &mut found)
            .with_context(|| format!("scanning trade directory {}", dir.display()))?;
        found.sort();
        files.extend(found.into_iter().map(|path| CatalogFile {
            root: dir.clone(),
            path,
        }));
    }
    Ok(files)
}

fn collect_json(dir: &Path, acc: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_json(&path, acc)?;
        } else if file_type.is_symlink() && path.is_dir() {
            debug!(path = %path.display(), "skipping symlinked trade directory");
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            acc.push(path);
        }
    }
    Ok(())
}

/// Read and parse one catalog file.
pub fn read_document(file: &CatalogFile) -> Result<CatalogDocument, LoadError> {
    let data = fs::read_to_string(&file.path).map_err(|err| {
        LoadError::MalformedDocument(format!("unable to read {}: {err}", file.path.display()))
    })?;
    let root: Value = serde_json::from_str(&data)
        .map_err(|err| LoadError::MalformedDocument(format!("invalid JSON: {err}")))?;
    Ok(CatalogDocument::new(file.source_name(), root))
}

/// Run one reload cycle over every catalog under `dirs`.
///
/// Diagnostics stay in the loader's sink for the caller to deliver.
pub fn reload(
    loader: &mut TradeLoader,
    host: &mut dyn TradeRegistry,
    dirs: &[PathBuf],
) -> Result<ReloadSummary> {
    let files = collect_trade_files(dirs)?;
    loader.begin_reload();

    let mut summary = ReloadSummary::default();
    for file in &files {
        summary.documents += 1;
        match read_document(file) {
            Ok(document) => summary.registered += loader.load_document(&document, host),
            Err(err) => loader.reject_source(&file.source_name(), err),
        }
    }
    summary.diagnostics = loader.diagnostics().len();

    info!(
        documents = summary.documents,
        registered = summary.registered,
        diagnostics = summary.diagnostics,
        "trade reload finished"
    );
    Ok(summary)
}
