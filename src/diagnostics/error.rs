//! Failure taxonomy for trade loading.
//!
//! Document-fatal variants abandon the rest of a document; entry-fatal
//! variants only skip the offending entry. Both end up as a single
//! `Diagnostic` in the sink; neither escapes `TradeLoader::load_document`.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Kind-specific validation failure raised by a converter.
///
/// Converters never attach location; the loader pairs this with the current
/// context snapshot when recording it.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{message}")]
pub struct ConversionError {
    pub message: String,
}

impl ConversionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LoadError {
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    #[error("unknown profession {0}")]
    UnknownProfession(String),
    #[error("unknown tier '{0}'")]
    UnknownTier(String),
    #[error("{0} is not an object")]
    NotAnObject(String),
    #[error("trade kind missing")]
    MissingKind,
    #[error("unknown trade kind {0}")]
    UnknownKind(String),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl LoadError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            LoadError::MalformedDocument(_) => DiagnosticKind::MalformedDocument,
            LoadError::UnknownProfession(_) => DiagnosticKind::UnknownProfession,
            LoadError::UnknownTier(_) => DiagnosticKind::UnknownTier,
            LoadError::NotAnObject(_) => DiagnosticKind::NotAnObject,
            LoadError::MissingKind => DiagnosticKind::MissingKind,
            LoadError::UnknownKind(_) => DiagnosticKind::UnknownKind,
            LoadError::Conversion(_) => DiagnosticKind::ConversionError,
        }
    }

    /// Whether this failure abandons the remainder of its document.
    pub fn is_document_fatal(&self) -> bool {
        self.kind().is_document_fatal()
    }
}

/// Fieldless discriminant of `LoadError`, used for filtering and reporting.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MalformedDocument,
    UnknownProfession,
    UnknownTier,
    NotAnObject,
    MissingKind,
    UnknownKind,
    ConversionError,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MalformedDocument => "malformed_document",
            DiagnosticKind::UnknownProfession => "unknown_profession",
            DiagnosticKind::UnknownTier => "unknown_tier",
            DiagnosticKind::NotAnObject => "not_an_object",
            DiagnosticKind::MissingKind => "missing_kind",
            DiagnosticKind::UnknownKind => "unknown_kind",
            DiagnosticKind::ConversionError => "conversion_error",
        }
    }

    pub fn is_document_fatal(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::MalformedDocument
                | DiagnosticKind::UnknownProfession
                | DiagnosticKind::UnknownTier
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
