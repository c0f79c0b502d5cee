//! Diagnostic accumulation across one reload cycle.
//!
//! The sink only grows while documents load. Delivery renders everything
//! collected into a single report, pushes it to each audience, and clears the
//! sink whether or not every audience accepted it; diagnostics are never
//! re-delivered on the next cycle.

use crate::diagnostics::context::ContextSnapshot;
use crate::diagnostics::error::{DiagnosticKind, LoadError};
use crate::diagnostics::report::{DiagnosticAudience, DiagnosticReport};
use tracing::{error, warn};

/// One captured failure: the error plus where the walk was when it happened.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    error: LoadError,
    context: ContextSnapshot,
}

impl Diagnostic {
    pub fn new(error: LoadError, context: ContextSnapshot) -> Self {
        Self { error, context }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.error.kind()
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn error(&self) -> &LoadError {
        &self.error
    }

    pub fn context(&self) -> &ContextSnapshot {
        &self.context
    }
}

#[derive(Debug, Default)]
pub struct DiagnosticSink {
    entries: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Append a diagnostic and log it with its location.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        let ctx = diagnostic.context();
        error!(
            kind = %diagnostic.kind(),
            source = ctx.source.as_deref().unwrap_or("<unknown>"),
            profession = ctx.profession.as_deref().unwrap_or("<unknown>"),
            tier = ctx.tier_level(),
            "trade definition rejected: {}",
            diagnostic.message()
        );
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Render and push collected diagnostics to every audience, then clear.
    ///
    /// Returns the number of diagnostics drained. An empty sink performs no
    /// delivery at all. A failing audience is logged and skipped.
    pub fn drain_and_deliver(&mut self, audiences: &mut [&mut dyn DiagnosticAudience]) -> usize {
        if self.entries.is_empty() {
            return 0;
        }

        let report = DiagnosticReport::render(&self.entries);
        for audience in audiences.iter_mut() {
            if let Err(err) = audience.deliver(&report) {
                warn!(error = %format!("{err:#}"), "failed to deliver trade diagnostics");
            }
        }

        let drained = self.entries.len();
        self.entries.clear();
        drained
    }
}
