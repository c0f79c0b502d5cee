//! Location of the walk inside the document currently being loaded.
//!
//! One context exists per loader and is overwritten slot by slot as the walk
//! descends. Nothing is restored when an entry finishes: the next entry simply
//! overwrites the stale slots. Loads are sequential, so a single value is
//! enough and diagnostics copy it out via [`DiagnosticContext::snapshot`].

use crate::identity::Tier;
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, Default)]
pub struct DiagnosticContext {
    source: Option<String>,
    profession: Option<String>,
    tier: Option<Tier>,
    entry: Option<Value>,
}

impl DiagnosticContext {
    /// Clear every slot; called at the start of each document.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_source(&mut self, name: impl Into<String>) {
        self.source = Some(name.into());
    }

    pub fn set_profession(&mut self, label: impl Into<String>) {
        self.profession = Some(label.into());
    }

    pub fn set_tier(&mut self, tier: Tier) {
        self.tier = Some(tier);
    }

    pub fn set_entry(&mut self, node: &Value) {
        self.entry = Some(node.clone());
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn profession(&self) -> Option<&str> {
        self.profession.as_deref()
    }

    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    pub fn entry(&self) -> Option<&Value> {
        self.entry.as_ref()
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            source: self.source.clone(),
            profession: self.profession.clone(),
            tier: self.tier,
            entry: self.entry.clone(),
        }
    }
}

/// Immutable copy of the context taken when a diagnostic is raised.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContextSnapshot {
    pub source: Option<String>,
    pub profession: Option<String>,
    pub tier: Option<Tier>,
    pub entry: Option<Value>,
}

impl ContextSnapshot {
    pub fn tier_level(&self) -> Option<u8> {
        self.tier.map(|tier| tier.level())
    }
}
