//! Host-side registration surface for converted trades.
//!
//! `TradeRegistry` is what the loader talks to; `TradeTable` is an in-memory
//! implementation keyed by profession and tier, used by `trade-check` and the
//! tests.

use crate::converters::TradeFactory;
use crate::identity::{Identifier, Tier};
use std::collections::{BTreeMap, BTreeSet};

/// Professions the vanilla host knows about, in `minecraft:` namespace.
pub const VANILLA_PROFESSIONS: &[&str] = &[
    "armorer",
    "butcher",
    "cartographer",
    "cleric",
    "farmer",
    "fisherman",
    "fletcher",
    "leatherworker",
    "librarian",
    "mason",
    "nitwit",
    "shepherd",
    "toolsmith",
    "weaponsmith",
];

pub trait TradeRegistry {
    /// Whether `profession` resolves on the host.
    fn knows_profession(&self, profession: &Identifier) -> bool;

    fn register_leveled(&mut self, profession: &Identifier, tier: Tier, factory: TradeFactory);

    /// Wandering trader offers have no tier.
    fn register_unleveled(&mut self, factory: TradeFactory);
}

#[derive(Debug, Default)]
pub struct TradeTable {
    professions: BTreeSet<Identifier>,
    leveled: BTreeMap<Identifier, BTreeMap<Tier, Vec<TradeFactory>>>,
    unleveled: Vec<TradeFactory>,
}

impl TradeTable {
    /// Empty table that knows no professions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table that knows every vanilla profession.
    pub fn vanilla() -> Self {
        let mut table = Self::new();
        for path in VANILLA_PROFESSIONS.iter().copied() {
            table.add_profession(Identifier::from_static("minecraft", path));
        }
        table
    }

    pub fn add_profession(&mut self, profession: Identifier) {
        self.professions.insert(profession);
    }

    pub fn leveled(&self, profession: &Identifier, tier: Tier) -> &[TradeFactory] {
        self.leveled
            .get(profession)
            .and_then(|tiers| tiers.get(&tier))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn unleveled(&self) -> &[TradeFactory] {
        &self.unleveled
    }

    /// Registered counts per (profession, tier), in stable order.
    pub fn counts(&self) -> Vec<(Identifier, Tier, usize)> {
        self.leveled
            .iter()
            .flat_map(|(profession, tiers)| {
                tiers
                    .iter()
                    .map(move |(tier, trades)| (profession.clone(), *tier, trades.len()))
            })
            .collect()
    }

    pub fn total(&self) -> usize {
        self.unleveled.len()
            + self
                .leveled
                .values()
                .flat_map(BTreeMap::values)
                .map(Vec::len)
                .sum::<usize>()
    }

    /// Drop every registered trade, keeping the known professions.
    pub fn clear_trades(&mut self) {
        self.leveled.clear();
        self.unleveled.clear();
    }
}

impl TradeRegistry for TradeTable {
    fn knows_profession(&self, profession: &Identifier) -> bool {
        self.professions.contains(profession)
    }

    fn register_leveled(&mut self, profession: &Identifier, tier: Tier, factory: TradeFactory) {
        self.leveled
            .entry(profession.clone())
            .or_default()
            .entry(tier)
            .or_default()
            .push(factory);
    }

    fn register_unleveled(&mut self, factory: TradeFactory) {
        self.unleveled.push(factory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::OfferTerms;

    fn factory(price: u64) -> TradeFactory {
        TradeFactory::SellSingleEnchantment {
            enchantment: None,
            terms: OfferTerms::with_price(price),
        }
    }

    #[test]
    fn vanilla_table_knows_librarian_but_not_wanderer() {
        let table = TradeTable::vanilla();
        let known = |raw: &str| table.knows_profession(&Identifier::try_parse(raw).unwrap());
        assert!(known("minecraft:librarian"));
        assert!(!known("minecraft:wandering_trader"));
        assert!(!known("othermod:librarian"));
    }

    #[test]
    fn counts_group_by_profession_and_tier() {
        let mut table = TradeTable::vanilla();
        let librarian = Identifier::try_parse("minecraft:librarian").unwrap();
        table.register_leveled(&librarian, Tier::Novice, factory(1));
        table.register_leveled(&librarian, Tier::Novice, factory(2));
        table.register_leveled(&librarian, Tier::Master, factory(3));
        table.register_unleveled(factory(4));

        assert_eq!(
            table.counts(),
            vec![
                (librarian.clone(), Tier::Novice, 2),
                (librarian.clone(), Tier::Master, 1)
            ]
        );
        assert_eq!(table.total(), 4);
        assert_eq!(table.leveled(&librarian, Tier::Novice)[1].terms().price, 2);

        table.clear_trades();
        assert_eq!(table.total(), 0);
        assert!(table.knows_profession(&librarian));
    }
}
