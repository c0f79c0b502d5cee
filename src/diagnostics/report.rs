//! Fixed-format rendering of collected diagnostics and the audiences that
//! receive it.

use crate::diagnostics::context::ContextSnapshot;
use crate::diagnostics::error::DiagnosticKind;
use crate::diagnostics::sink::Diagnostic;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

pub const REPORT_HEADER: &str = "The following errors have occurred during trade reload:";

/// Rendered batch handed to every audience during one delivery.
#[derive(Clone, Debug, Serialize)]
pub struct DiagnosticReport {
    pub header: String,
    pub entries: Vec<ReportEntry>,
}

/// One diagnostic, rendered as a one-line summary plus a detail view.
#[derive(Clone, Debug, Serialize)]
pub struct ReportEntry {
    pub kind: DiagnosticKind,
    pub message: String,
    pub summary: String,
    pub detail: String,
    pub context: ContextSnapshot,
}

impl DiagnosticReport {
    pub fn render(diagnostics: &[Diagnostic]) -> Self {
        Self {
            header: REPORT_HEADER.to_string(),
            entries: diagnostics.iter().map(ReportEntry::render).collect(),
        }
    }
}

impl ReportEntry {
    fn render(diagnostic: &Diagnostic) -> Self {
        let message = diagnostic.message();
        let ctx = diagnostic.context();
        Self {
            kind: diagnostic.kind(),
            summary: format!("-> {message}"),
            detail: render_detail(ctx),
            message,
            context: ctx.clone(),
        }
    }
}

fn render_detail(ctx: &ContextSnapshot) -> String {
    let trade = ctx
        .entry
        .as_ref()
        .and_then(|entry| serde_json::to_string_pretty(entry).ok())
        .unwrap_or_else(|| "<none>".to_string());
    let level = ctx
        .tier_level()
        .map(|level| level.to_string())
        .unwrap_or_else(|| "<none>".to_string());
    format!(
        "File: {}\n\nProfession: {}\nLevel: {}\n\nProblematic trade:\n{}",
        ctx.source.as_deref().unwrap_or("<none>"),
        ctx.profession.as_deref().unwrap_or("<none>"),
        level,
        trade
    )
}

/// Anything that can be shown a diagnostic report (a console, connected
/// operators, a log file).
pub trait DiagnosticAudience {
    fn deliver(&mut self, report: &DiagnosticReport) -> Result<()>;
}

/// Plain-text audience: header, then each summary with its detail indented.
pub struct TextAudience<W: Write> {
    out: W,
}

impl<W: Write> TextAudience<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagnosticAudience for TextAudience<W> {
    fn deliver(&mut self, report: &DiagnosticReport) -> Result<()> {
        writeln!(self.out, "{}", report.header).context("writing report header")?;
        writeln!(self.out)?;
        for entry in &report.entries {
            writeln!(self.out, "{}", entry.summary)?;
            for line in entry.detail.lines() {
                writeln!(self.out, "     {line}")?;
            }
            writeln!(self.out)?;
        }
        self.out.flush().context("flushing report")
    }
}

/// NDJSON audience: one object per diagnostic, no header.
pub struct JsonAudience<W: Write> {
    out: W,
}

impl<W: Write> JsonAudience<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagnosticAudience for JsonAudience<W> {
    fn deliver(&mut self, report: &DiagnosticReport) -> Result<()> {
        for entry in &report.entries {
            serde_json::to_writer(&mut self.out, entry).context("serializing diagnostic")?;
            writeln!(self.out)?;
        }
        self.out.flush().context("flushing report")
    }
}
