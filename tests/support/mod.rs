use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tradebook::{
    DiagnosticAudience, DiagnosticReport, Identifier, ReportEntry, Tier, TradeFactory,
    TradeRegistry,
};

/// Host double that records every registration call in order.
pub struct RecordingHost {
    known: Vec<Identifier>,
    pub calls: Vec<Registration>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    Leveled(Identifier, Tier, TradeFactory),
    Unleveled(TradeFactory),
}

impl RecordingHost {
    pub fn knowing(professions: &[&str]) -> Self {
        Self {
            known: professions.iter().map(|raw| id(raw)).collect(),
            calls: Vec::new(),
        }
    }

    /// (tier level, price) of each leveled registration, in call order.
    pub fn leveled_prices(&self) -> Vec<(u8, u64)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Registration::Leveled(_, tier, factory) => {
                    Some((tier.level(), factory.terms().price))
                }
                Registration::Unleveled(_) => None,
            })
            .collect()
    }
}

impl TradeRegistry for RecordingHost {
    fn knows_profession(&self, profession: &Identifier) -> bool {
        self.known.contains(profession)
    }

    fn register_leveled(&mut self, profession: &Identifier, tier: Tier, factory: TradeFactory) {
        self.calls
            .push(Registration::Leveled(profession.clone(), tier, factory));
    }

    fn register_unleveled(&mut self, factory: TradeFactory) {
        self.calls.push(Registration::Unleveled(factory));
    }
}

/// Audience that keeps every report it receives.
#[derive(Default)]
pub struct CollectingAudience {
    pub reports: Vec<Vec<ReportEntry>>,
}

impl DiagnosticAudience for CollectingAudience {
    fn deliver(&mut self, report: &DiagnosticReport) -> Result<()> {
        self.reports.push(report.entries.clone());
        Ok(())
    }
}

pub fn id(raw: &str) -> Identifier {
    Identifier::try_parse(raw).expect("fixture identifier must parse")
}

pub fn write_catalog(dir: &Path, relative: &str, value: &Value) -> Result<PathBuf> {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
