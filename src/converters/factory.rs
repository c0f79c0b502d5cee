//! Host-facing trade factory values produced by the built-in converters.
//!
//! The loader treats these as opaque and only moves them from a converter to
//! the host registry. The host turns each variant into a live offer.

use crate::identity::Identifier;
use serde::Serialize;

pub const DEFAULT_MAX_USES: u32 = 12;
pub const DEFAULT_VILLAGER_EXPERIENCE: u32 = 5;
pub const DEFAULT_PRICE_MULTIPLIER: f32 = 0.05;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemStack {
    pub item: Identifier,
    pub count: u32,
}

/// Terms shared by every offer: coin price plus the host's restock knobs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OfferTerms {
    pub price: u64,
    pub max_uses: u32,
    pub villager_experience: u32,
    pub price_multiplier: f32,
}

impl OfferTerms {
    pub fn with_price(price: u64) -> Self {
        Self {
            price,
            max_uses: DEFAULT_MAX_USES,
            villager_experience: DEFAULT_VILLAGER_EXPERIENCE,
            price_multiplier: DEFAULT_PRICE_MULTIPLIER,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TradeFactory {
    SellStack {
        sell: ItemStack,
        terms: OfferTerms,
    },
    DimensionSellStack {
        sell: ItemStack,
        dimension: Identifier,
        terms: OfferTerms,
    },
    SellMap {
        structure: Identifier,
        name: Option<String>,
        terms: OfferTerms,
    },
    SellSingleEnchantment {
        enchantment: Option<Identifier>,
        terms: OfferTerms,
    },
    EnchantItem {
        item: Identifier,
        level: u32,
        allow_treasure: bool,
        terms: OfferTerms,
    },
    ProcessItem {
        buy: ItemStack,
        sell: ItemStack,
        terms: OfferTerms,
    },
    SellDyedArmor {
        item: Identifier,
        terms: OfferTerms,
    },
    SellPotionContainer {
        container_item: ItemStack,
        buy_item: ItemStack,
        terms: OfferTerms,
    },
    BuyItem {
        buy: ItemStack,
        terms: OfferTerms,
    },
}

impl TradeFactory {
    pub fn terms(&self) -> &OfferTerms {
        match self {
            TradeFactory::SellStack { terms, .. }
            | TradeFactory::DimensionSellStack { terms, .. }
            | TradeFactory::SellMap { terms, .. }
            | TradeFactory::SellSingleEnchantment { terms, .. }
            | TradeFactory::EnchantItem { terms, .. }
            | TradeFactory::ProcessItem { terms, .. }
            | TradeFactory::SellDyedArmor { terms, .. }
            | TradeFactory::SellPotionContainer { terms, .. }
            | TradeFactory::BuyItem { terms, .. } => terms,
        }
    }

    /// Short name of the variant, matching the path of its kind id.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TradeFactory::SellStack { .. } => "sell_stack",
            TradeFactory::DimensionSellStack { .. } => "dimension_sell_stack",
            TradeFactory::SellMap { .. } => "sell_map",
            TradeFactory::SellSingleEnchantment { .. } => "sell_single_enchantment",
            TradeFactory::EnchantItem { .. } => "enchant_item",
            TradeFactory::ProcessItem { .. } => "process_item",
            TradeFactory::SellDyedArmor { .. } => "sell_dyed_armor",
            TradeFactory::SellPotionContainer { .. } => "sell_potion_container",
            TradeFactory::BuyItem { .. } => "buy_item",
        }
    }
}
