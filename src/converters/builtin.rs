//! The nine built-in trade kinds.

use crate::converters::Converter;
use crate::converters::factory::TradeFactory;
use crate::converters::fields::EntryFields;
use crate::diagnostics::{ConversionError, DiagnosticContext};
use serde_json::{Map, Value};

pub const MAX_ENCHANT_LEVEL: u64 = 30;

type Entry = Map<String, Value>;

/// Sells a stack of items for coins.
pub struct SellStack;

impl Converter for SellStack {
    fn convert(
        &self,
        entry: &Entry,
        _context: &DiagnosticContext,
    ) -> Result<TradeFactory, ConversionError> {
        let fields = EntryFields::new(entry);
        Ok(TradeFactory::SellStack {
            sell: fields.stack("sell")?,
            terms: fields.terms()?,
        })
    }
}

/// `SellStack` that the host only offers in one dimension.
pub struct DimensionSellStack;

impl Converter for DimensionSellStack {
    fn convert(
        &self,
        entry: &Entry,
        _context: &DiagnosticContext,
    ) -> Result<TradeFactory, ConversionError> {
        let fields = EntryFields::new(entry);
        Ok(TradeFactory::DimensionSellStack {
            sell: fields.stack("sell")?,
            dimension: fields.identifier("dimension")?,
            terms: fields.terms()?,
        })
    }
}

/// Sells an explorer map pointing at the nearest `structure`.
pub struct SellMap;

impl Converter for SellMap {
    fn convert(
        &self,
        entry: &Entry,
        _context: &DiagnosticContext,
    ) -> Result<TradeFactory, ConversionError> {
        let fields = EntryFields::new(entry);
        Ok(TradeFactory::SellMap {
            structure: fields.identifier("structure")?,
            name: fields.optional_string("name")?,
            terms: fields.terms()?,
        })
    }
}

/// Sells an enchanted book; the host rolls the enchantment unless one is pinned.
pub struct SellSingleEnchantment;

impl Converter for SellSingleEnchantment {
    fn convert(
        &self,
        entry: &Entry,
        _context: &DiagnosticContext,
    ) -> Result<TradeFactory, ConversionError> {
        let fields = EntryFields::new(entry);
        Ok(TradeFactory::SellSingleEnchantment {
            enchantment: fields.optional_identifier("enchantment")?,
            terms: fields.terms()?,
        })
    }
}

pub struct EnchantItem;

impl Converter for EnchantItem {
    fn convert(
        &self,
        entry: &Entry,
        _context: &DiagnosticContext,
    ) -> Result<TradeFactory, ConversionError> {
        let fields = EntryFields::new(entry);
        Ok(TradeFactory::EnchantItem {
            item: fields.identifier("item")?,
            level: fields.integer_in("level", 1, MAX_ENCHANT_LEVEL)? as u32,
            allow_treasure: fields.optional_bool("allow_treasure", false)?,
            terms: fields.terms()?,
        })
    }
}

/// Takes `buy` plus coins, hands back `sell`.
pub struct ProcessItem;

impl Converter for ProcessItem {
    fn convert(
        &self,
        entry: &Entry,
        _context: &DiagnosticContext,
    ) -> Result<TradeFactory, ConversionError> {
        let fields = EntryFields::new(entry);
        Ok(TradeFactory::ProcessItem {
            buy: fields.stack("buy")?,
            sell: fields.stack("sell")?,
            terms: fields.terms()?,
        })
    }
}

pub struct SellDyedArmor;

impl Converter for SellDyedArmor {
    fn convert(
        &self,
        entry: &Entry,
        _context: &DiagnosticContext,
    ) -> Result<TradeFactory, ConversionError> {
        let fields = EntryFields::new(entry);
        Ok(TradeFactory::SellDyedArmor {
            item: fields.identifier("item")?,
            terms: fields.terms()?,
        })
    }
}

/// Fills `container_item` with a random potion in exchange for `buy_item`.
pub struct SellPotionContainer;

impl Converter for SellPotionContainer {
    fn convert(
        &self,
        entry: &Entry,
        _context: &DiagnosticContext,
    ) -> Result<TradeFactory, ConversionError> {
        let fields = EntryFields::new(entry);
        Ok(TradeFactory::SellPotionContainer {
            container_item: fields.stack("container_item")?,
            buy_item: fields.stack("buy_item")?,
            terms: fields.terms()?,
        })
    }
}

/// The villager buys `buy` and pays out `price` in coins.
pub struct BuyItem;

impl Converter for BuyItem {
    fn convert(
        &self,
        entry: &Entry,
        _context: &DiagnosticContext,
    ) -> Result<TradeFactory, ConversionError> {
        let fields = EntryFields::new(entry);
        Ok(TradeFactory::BuyItem {
            buy: fields.stack("buy")?,
            terms: fields.terms()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::factory::{ItemStack, OfferTerms};
    use crate::identity::Identifier;
    use serde_json::json;

    fn run(converter: &dyn Converter, value: Value) -> Result<TradeFactory, ConversionError> {
        let Value::Object(entry) = value else {
            panic!("fixture must be an object");
        };
        converter.convert(&entry, &DiagnosticContext::default())
    }

    fn id(raw: &str) -> Identifier {
        Identifier::try_parse(raw).unwrap()
    }

    #[test]
    fn sell_stack_reads_stack_and_terms() {
        let factory = run(
            &SellStack,
            json!({
                "sell": {"item": "minecraft:bookshelf", "count": 3},
                "price": 120,
                "max_uses": 4
            }),
        )
        .unwrap();
        let mut terms = OfferTerms::with_price(120);
        terms.max_uses = 4;
        assert_eq!(
            factory,
            TradeFactory::SellStack {
                sell: ItemStack {
                    item: id("minecraft:bookshelf"),
                    count: 3
                },
                terms,
            }
        );
    }

    #[test]
    fn dimension_sell_stack_requires_dimension() {
        let err = run(
            &DimensionSellStack,
            json!({"sell": "minecraft:netherrack", "price": 5}),
        )
        .unwrap_err();
        assert_eq!(err.message, "missing required field 'dimension'");
    }

    #[test]
    fn sell_map_keeps_optional_name() {
        let factory = run(
            &SellMap,
            json!({"structure": "minecraft:monument", "price": 900, "name": "Ocean Explorer Map"}),
        )
        .unwrap();
        match factory {
            TradeFactory::SellMap { structure, name, .. } => {
                assert_eq!(structure, id("minecraft:monument"));
                assert_eq!(name.as_deref(), Some("Ocean Explorer Map"));
            }
            other => panic!("unexpected factory {other:?}"),
        }
    }

    #[test]
    fn enchant_item_bounds_level() {
        let err = run(
            &EnchantItem,
            json!({"item": "minecraft:diamond_sword", "price": 10, "level": 31}),
        )
        .unwrap_err();
        assert!(err.message.contains("'level'"), "{}", err.message);

        let ok = run(
            &EnchantItem,
            json!({
                "item": "minecraft:diamond_sword",
                "price": 10,
                "level": 15,
                "allow_treasure": true
            }),
        )
        .unwrap();
        assert!(matches!(
            ok,
            TradeFactory::EnchantItem {
                level: 15,
                allow_treasure: true,
                ..
            }
        ));
    }

    #[test]
    fn process_item_needs_both_sides() {
        let err = run(&ProcessItem, json!({"buy": "minecraft:cod", "price": 2})).unwrap_err();
        assert_eq!(err.message, "missing required field 'sell'");
    }

    #[test]
    fn potion_container_rejects_non_identifier_item() {
        let err = run(
            &SellPotionContainer,
            json!({"container_item": 7, "buy_item": "minecraft:arrow", "price": 3}),
        )
        .unwrap_err();
        assert!(err.message.contains("container_item"));
    }

    #[test]
    fn single_enchantment_and_buy_item_convert() {
        assert!(run(&SellSingleEnchantment, json!({"price": 250})).is_ok());
        assert!(
            run(
                &SellDyedArmor,
                json!({"item": "minecraft:leather_helmet", "price": 30})
            )
            .is_ok()
        );
        let buy = run(
            &BuyItem,
            json!({"buy": {"item": "minecraft:wheat", "count": 20}, "price": 1}),
        )
        .unwrap();
        assert_eq!(buy.kind_name(), "buy_item");
        assert_eq!(buy.terms().price, 1);
    }
}
