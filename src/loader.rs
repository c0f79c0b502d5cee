//! Walks one catalog document and registers every entry that converts.
//!
//! Document shape problems (not an object, bad `profession`, missing or
//! malformed `trades`, an unknown tier label) abandon the whole document.
//! Problems with a single entry only skip that entry. Either way the failure
//! becomes one `Diagnostic` in the loader's sink; `load_document` itself
//! never fails.

use crate::converters::{ConverterRegistry, TradeFactory};
use crate::diagnostics::{
    Diagnostic, DiagnosticAudience, DiagnosticContext, DiagnosticSink, LoadError,
};
use crate::host::TradeRegistry;
use crate::identity::{Identifier, Tier};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// One parsed catalog: where it came from plus its raw JSON tree.
#[derive(Clone, Debug)]
pub struct CatalogDocument {
    pub source: String,
    pub root: Value,
}

impl CatalogDocument {
    pub fn new(source: impl Into<String>, root: Value) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }
}

/// Where converted factories of the current document go.
enum Destination {
    Leveled(Identifier),
    Unleveled,
}

/// Owns the converter registry plus the context and sink of the reload in
/// progress. Documents must be loaded one at a time.
#[derive(Debug, Default)]
pub struct TradeLoader {
    registry: ConverterRegistry,
    context: DiagnosticContext,
    sink: DiagnosticSink,
}

impl TradeLoader {
    pub fn new(registry: ConverterRegistry) -> Self {
        Self {
            registry,
            context: DiagnosticContext::default(),
            sink: DiagnosticSink::default(),
        }
    }

    pub fn with_default_converters() -> Self {
        Self::new(ConverterRegistry::with_defaults())
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Only call between reloads; registrations must not race a load.
    pub fn registry_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.registry
    }

    pub fn context(&self) -> &DiagnosticContext {
        &self.context
    }

    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.sink
    }

    /// Start a reload cycle with an empty sink.
    ///
    /// Diagnostics left over from a cycle that was never delivered are
    /// dropped with a warning.
    pub fn begin_reload(&mut self) {
        if !self.sink.is_empty() {
            warn!(
                pending = self.sink.len(),
                "discarding undelivered trade diagnostics from previous reload"
            );
            self.sink.clear();
        }
        self.context.reset();
    }

    /// Record a document that could not even be read or parsed.
    pub fn reject_source(&mut self, source: &str, error: LoadError) {
        self.context.reset();
        self.context.set_source(source);
        self.raise(error);
    }

    /// Load one document into `host`, returning how many trades were registered.
    pub fn load_document(
        &mut self,
        document: &CatalogDocument,
        host: &mut dyn TradeRegistry,
    ) -> usize {
        self.context.reset();
        self.context.set_source(&document.source);
        debug!(source = %document.source, "loading trade catalog");

        let mut registered = 0;
        if let Err(err) = self.walk(&document.root, host, &mut registered) {
            self.raise(err);
        }

        info!(source = %document.source, registered, "loaded trade catalog");
        registered
    }

    /// Deliver everything collected this cycle and empty the sink.
    pub fn drain_and_deliver(&mut self, audiences: &mut [&mut dyn DiagnosticAudience]) -> usize {
        self.sink.drain_and_deliver(audiences)
    }

    fn raise(&mut self, error: LoadError) {
        self.sink
            .record(Diagnostic::new(error, self.context.snapshot()));
    }

    fn walk(
        &mut self,
        root: &Value,
        host: &mut dyn TradeRegistry,
        registered: &mut usize,
    ) -> Result<(), LoadError> {
        let Value::Object(root) = root else {
            return Err(LoadError::MalformedDocument(format!(
                "{} is not an object",
                describe(root)
            )));
        };

        let profession = self.resolve_profession(root)?;
        let destination = if profession.is_wandering_trader() {
            Destination::Unleveled
        } else if host.knows_profession(&profession) {
            Destination::Leveled(profession)
        } else {
            return Err(LoadError::UnknownProfession(profession.to_string()));
        };

        // Every tier is checked before anything registers so a broken tier map
        // leaves no partial document behind.
        let tiers = resolve_tiers(root)?;

        for (tier, entries) in tiers {
            self.context.set_tier(tier);
            for entry in entries {
                self.context.set_entry(entry);
                match self.convert_entry(entry) {
                    Ok(factory) => {
                        match &destination {
                            Destination::Leveled(profession) => {
                                host.register_leveled(profession, tier, factory)
                            }
                            Destination::Unleveled => host.register_unleveled(factory),
                        }
                        *registered += 1;
                    }
                    Err(err) => self.raise(err),
                }
            }
        }
        Ok(())
    }

    fn resolve_profession(&mut self, root: &Map<String, Value>) -> Result<Identifier, LoadError> {
        let raw = match root.get("profession") {
            Some(Value::String(raw)) => raw,
            Some(other) => {
                return Err(LoadError::MalformedDocument(format!(
                    "'profession' must be a string, got {}",
                    describe(other)
                )));
            }
            None => {
                return Err(LoadError::MalformedDocument(
                    "missing 'profession' field".to_string(),
                ));
            }
        };
        self.context.set_profession(raw.as_str());

        let profession = Identifier::try_parse(raw).ok_or_else(|| {
            LoadError::MalformedDocument(format!("invalid profession identifier '{raw}'"))
        })?;
        self.context.set_profession(profession.to_string());
        Ok(profession)
    }

    fn convert_entry(&self, entry: &Value) -> Result<TradeFactory, LoadError> {
        let Value::Object(object) = entry else {
            return Err(LoadError::NotAnObject(entry.to_string()));
        };

        let declared = object
            .get("kind")
            .filter(|kind| !kind.is_null())
            .ok_or(LoadError::MissingKind)?;
        let kind = declared
            .as_str()
            .and_then(Identifier::try_parse)
            .ok_or_else(|| LoadError::UnknownKind(declared.to_string()))?;
        let converter = self
            .registry
            .lookup(&kind)
            .ok_or_else(|| LoadError::UnknownKind(kind.to_string()))?;

        Ok(converter.convert(object, &self.context)?)
    }
}

fn resolve_tiers(root: &Map<String, Value>) -> Result<Vec<(Tier, &Vec<Value>)>, LoadError> {
    let trades = match root.get("trades") {
        Some(Value::Object(trades)) => trades,
        Some(other) => {
            return Err(LoadError::MalformedDocument(format!(
                "'trades' must be an object, got {}",
                describe(other)
            )));
        }
        None => {
            return Err(LoadError::MalformedDocument(
                "missing 'trades' object".to_string(),
            ));
        }
    };

    let mut tiers = Vec::with_capacity(trades.len());
    for (label, entries) in trades {
        let tier = Tier::from_label(label).ok_or_else(|| LoadError::UnknownTier(label.clone()))?;
        let Value::Array(entries) = entries else {
            return Err(LoadError::MalformedDocument(format!(
                "tier '{label}' must be a list, got {}",
                describe(entries)
            )));
        };
        tiers.push((tier, entries));
    }
    Ok(tiers)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::host::TradeTable;
    use serde_json::json;

    fn load(root: Value) -> (TradeLoader, TradeTable, usize) {
        let mut loader = TradeLoader::with_default_converters();
        let mut table = TradeTable::vanilla();
        loader.begin_reload();
        let registered =
            loader.load_document(&CatalogDocument::new("test:fixture.json", root), &mut table);
        (loader, table, registered)
    }

    fn kinds(loader: &TradeLoader) -> Vec<DiagnosticKind> {
        loader.diagnostics().iter().map(Diagnostic::kind).collect()
    }

    #[test]
    fn non_object_root_is_malformed() {
        let (loader, _, registered) = load(json!([1, 2]));
        assert_eq!(registered, 0);
        assert_eq!(kinds(&loader), [DiagnosticKind::MalformedDocument]);
        let diag = loader.diagnostics().iter().next().unwrap();
        assert_eq!(diag.message(), "malformed document: a list is not an object");
        assert_eq!(diag.context().source.as_deref(), Some("test:fixture.json"));
    }

    #[test]
    fn profession_must_be_a_valid_identifier() {
        let (loader, _, _) = load(json!({"profession": 7, "trades": {}}));
        assert_eq!(kinds(&loader), [DiagnosticKind::MalformedDocument]);

        let (loader, _, _) = load(json!({"profession": "Not Valid", "trades": {}}));
        let diag = loader.diagnostics().iter().next().unwrap();
        assert_eq!(diag.kind(), DiagnosticKind::MalformedDocument);
        assert_eq!(diag.context().profession.as_deref(), Some("Not Valid"));
    }

    #[test]
    fn unknown_profession_is_document_fatal() {
        let (loader, table, registered) = load(json!({
            "profession": "minecraft:astronaut",
            "trades": {"novice": [
                {"kind": "numismatic-overhaul:sell_single_enchantment", "price": 3}
            ]}
        }));
        assert_eq!(registered, 0);
        assert_eq!(table.total(), 0);
        assert_eq!(kinds(&loader), [DiagnosticKind::UnknownProfession]);
    }

    #[test]
    fn non_list_tier_registers_nothing() {
        let (loader, table, _) = load(json!({
            "profession": "minecraft:cleric",
            "trades": {
                "novice": [{"kind": "numismatic-overhaul:sell_single_enchantment", "price": 3}],
                "apprentice": {"kind": "numismatic-overhaul:sell_single_enchantment"}
            }
        }));
        assert_eq!(table.total(), 0);
        assert_eq!(kinds(&loader), [DiagnosticKind::MalformedDocument]);
    }

    #[test]
    fn non_string_kind_is_unknown() {
        let (loader, _, _) = load(json!({
            "profession": "minecraft:cleric",
            "trades": {"novice": [{"kind": 12}, {"kind": null}]}
        }));
        assert_eq!(
            kinds(&loader),
            [DiagnosticKind::UnknownKind, DiagnosticKind::MissingKind]
        );
    }

    #[test]
    fn not_an_object_entry_captures_itself_as_context() {
        let (loader, table, registered) = load(json!({
            "profession": "minecraft:cleric",
            "trades": {"expert": [
                {"kind": "numismatic-overhaul:sell_single_enchantment", "price": 3},
                "just a string"
            ]}
        }));
        assert_eq!(registered, 1);
        assert_eq!(table.total(), 1);
        let diag = loader.diagnostics().iter().next().unwrap();
        assert_eq!(diag.kind(), DiagnosticKind::NotAnObject);
        assert_eq!(diag.context().entry, Some(json!("just a string")));
        assert_eq!(diag.context().tier, Some(Tier::Expert));
    }

    #[test]
    fn each_document_starts_from_clean_context() {
        let mut loader = TradeLoader::with_default_converters();
        let mut table = TradeTable::vanilla();
        loader.load_document(
            &CatalogDocument::new(
                "a.json",
                json!({"profession": "minecraft:cleric", "trades": {"master": [{"kind": "x:y"}]}}),
            ),
            &mut table,
        );
        loader.load_document(&CatalogDocument::new("b.json", json!({"trades": {}})), &mut table);

        let second = loader.diagnostics().iter().nth(1).unwrap();
        assert_eq!(second.context().source.as_deref(), Some("b.json"));
        assert_eq!(second.context().profession, None);
        assert_eq!(second.context().tier, None);
        assert_eq!(second.context().entry, None);
    }

    #[test]
    fn context_keeps_last_location_until_next_document() {
        let (loader, _, _) = load(json!({
            "profession": "minecraft:cleric",
            "trades": {"journeyman": [{"kind": "numismatic-overhaul:sell_dyed_armor"}]}
        }));
        assert_eq!(loader.registry().len(), 9);
        let context = loader.context();
        assert_eq!(context.profession(), Some("minecraft:cleric"));
        assert_eq!(context.tier(), Some(Tier::Journeyman));
        assert_eq!(
            context.entry(),
            Some(&json!({"kind": "numismatic-overhaul:sell_dyed_armor"}))
        );
    }

    #[test]
    fn begin_reload_discards_leftovers() {
        let (mut loader, _, _) = load(json!({"profession": "minecraft:cleric"}));
        assert_eq!(loader.diagnostics().len(), 1);
        loader.begin_reload();
        assert!(loader.diagnostics().is_empty());
    }
}
