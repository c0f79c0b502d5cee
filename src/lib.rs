//! Profession trade catalog loading.
//!
//! Catalogs are JSON documents naming a profession and listing trade entries
//! per tier. Each entry declares a `kind`; the matching converter from the
//! `ConverterRegistry` validates it and produces a `TradeFactory` that is
//! handed to the host's `TradeRegistry`. Failures never abort a reload: they
//! are captured as located `Diagnostic`s and delivered as one report at the
//! end of the cycle.
//!
//! Typical use: build a `TradeLoader`, call `source::reload` (or
//! `TradeLoader::load_document` per parsed document), then
//! `TradeLoader::drain_and_deliver`.

pub mod config;
pub mod converters;
pub mod diagnostics;
pub mod host;
pub mod identity;
pub mod loader;
pub mod source;

pub use config::ReloadConfig;
pub use converters::{
    Converter, ConverterRegistry, ItemStack, OfferTerms, TradeFactory, builtin_kind,
    register_default_converters,
};
pub use diagnostics::{
    ContextSnapshot, ConversionError, Diagnostic, DiagnosticAudience, DiagnosticContext,
    DiagnosticKind, DiagnosticReport, DiagnosticSink, JsonAudience, LoadError, ReportEntry,
    TextAudience,
};
pub use host::{TradeRegistry, TradeTable};
pub use identity::{Identifier, Tier};
pub use loader::{CatalogDocument, TradeLoader};
pub use source::{CatalogFile, ReloadSummary, collect_trade_files, read_document, reload};

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
