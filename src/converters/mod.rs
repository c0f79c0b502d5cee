//! Trade kind registry.
//!
//! Each entry in a catalog declares a `kind`; the registry maps that id to a
//! `Converter` that validates the entry and builds a `TradeFactory`. The
//! registry is filled once before any load and only read afterwards.

pub mod builtin;
pub mod factory;
pub mod fields;

use crate::diagnostics::{ConversionError, DiagnosticContext};
use crate::identity::Identifier;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

pub use factory::{ItemStack, OfferTerms, TradeFactory};

/// Namespace of the built-in trade kinds.
pub const BUILTIN_NAMESPACE: &str = "numismatic-overhaul";

/// Converts one entry object of a known kind into a host factory value.
///
/// Implementations must be side-effect free and report every problem as a
/// `ConversionError`; the loader attaches location from `context`, which is
/// read-only here.
pub trait Converter: Send + Sync {
    fn convert(
        &self,
        entry: &Map<String, Value>,
        context: &DiagnosticContext,
    ) -> Result<TradeFactory, ConversionError>;
}

#[derive(Default)]
pub struct ConverterRegistry {
    converters: BTreeMap<Identifier, Box<dyn Converter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the nine built-in kinds.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        register_default_converters(&mut registry);
        registry
    }

    /// Insert or replace the converter for `kind`. The last registration wins.
    pub fn register(&mut self, kind: Identifier, converter: impl Converter + 'static) {
        if self.converters.insert(kind.clone(), Box::new(converter)).is_some() {
            debug!(%kind, "replaced trade converter");
        }
    }

    pub fn lookup(&self, kind: &Identifier) -> Option<&dyn Converter> {
        self.converters.get(kind).map(|converter| converter.as_ref())
    }

    /// Registered kinds in stable order.
    pub fn kinds(&self) -> impl Iterator<Item = &Identifier> {
        self.converters.keys()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.converters.keys()).finish()
    }
}

/// Id of a built-in kind, e.g. `numismatic-overhaul:sell_stack`.
pub fn builtin_kind(path: &'static str) -> Identifier {
    Identifier::from_static(BUILTIN_NAMESPACE, path)
}

pub fn register_default_converters(registry: &mut ConverterRegistry) {
    registry.register(builtin_kind("sell_stack"), builtin::SellStack);
    registry.register(builtin_kind("dimension_sell_stack"), builtin::DimensionSellStack);
    registry.register(builtin_kind("sell_map"), builtin::SellMap);
    registry.register(builtin_kind("sell_single_enchantment"), builtin::SellSingleEnchantment);
    registry.register(builtin_kind("enchant_item"), builtin::EnchantItem);
    registry.register(builtin_kind("process_item"), builtin::ProcessItem);
    registry.register(builtin_kind("sell_dyed_armor"), builtin::SellDyedArmor);
    registry.register(builtin_kind("sell_potion_container"), builtin::SellPotionContainer);
    registry.register(builtin_kind("buy_item"), builtin::BuyItem);
}
