//! Located diagnostics for trade loading.
//!
//! The loader keeps a `DiagnosticContext` current while it walks a document;
//! every failure is turned into a `Diagnostic` carrying a snapshot of that
//! context and appended to a `DiagnosticSink`. Delivery happens once per
//! reload through one or more `DiagnosticAudience`s.

pub mod context;
pub mod error;
pub mod report;
pub mod sink;

pub use context::{ContextSnapshot, DiagnosticContext};
pub use error::{ConversionError, DiagnosticKind, LoadError};
pub use report::{
    DiagnosticAudience, DiagnosticReport, JsonAudience, REPORT_HEADER, ReportEntry, TextAudience,
};
pub use sink::{Diagnostic, DiagnosticSink};
