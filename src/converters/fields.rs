//! Typed field access over a raw entry object.
//!
//! Every accessor fails with a `ConversionError` naming the field, so the
//! converters read as a list of requirements.

use crate::converters::factory::{
    DEFAULT_MAX_USES, DEFAULT_PRICE_MULTIPLIER, DEFAULT_VILLAGER_EXPERIENCE, ItemStack,
    OfferTerms,
};
use crate::diagnostics::ConversionError;
use crate::identity::Identifier;
use serde_json::{Map, Value};

pub const MAX_STACK_COUNT: u64 = 64;

type FieldResult<T> = Result<T, ConversionError>;

pub struct EntryFields<'a> {
    entry: &'a Map<String, Value>,
}

impl<'a> EntryFields<'a> {
    pub fn new(entry: &'a Map<String, Value>) -> Self {
        Self { entry }
    }

    fn require(&self, name: &str) -> FieldResult<&'a Value> {
        self.entry
            .get(name)
            .ok_or_else(|| ConversionError::new(format!("missing required field '{name}'")))
    }

    fn optional(&self, name: &str) -> Option<&'a Value> {
        self.entry.get(name).filter(|value| !value.is_null())
    }

    pub fn identifier(&self, name: &str) -> FieldResult<Identifier> {
        parse_identifier(name, self.require(name)?)
    }

    pub fn optional_identifier(&self, name: &str) -> FieldResult<Option<Identifier>> {
        self.optional(name)
            .map(|value| parse_identifier(name, value))
            .transpose()
    }

    pub fn optional_string(&self, name: &str) -> FieldResult<Option<String>> {
        match self.optional(name) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(other) => Err(ConversionError::new(format!(
                "field '{name}' must be a string, got {other}"
            ))),
        }
    }

    pub fn optional_bool(&self, name: &str, default: bool) -> FieldResult<bool> {
        match self.optional(name) {
            None => Ok(default),
            Some(Value::Bool(flag)) => Ok(*flag),
            Some(other) => Err(ConversionError::new(format!(
                "field '{name}' must be a boolean, got {other}"
            ))),
        }
    }

    /// Item stack written as a bare id (count 1) or `{ "item": id, "count": n }`.
    pub fn stack(&self, name: &str) -> FieldResult<ItemStack> {
        match self.require(name)? {
            value @ Value::String(_) => Ok(ItemStack {
                item: parse_identifier(name, value)?,
                count: 1,
            }),
            Value::Object(stack) => {
                let nested = EntryFields::new(stack);
                let item = nested
                    .identifier("item")
                    .map_err(|err| ConversionError::new(format!("{name}: {}", err.message)))?;
                let count = match nested.optional("count") {
                    None => 1,
                    Some(value) => {
                        bounded_integer(&format!("{name}.count"), value, 1, MAX_STACK_COUNT)?
                    }
                };
                Ok(ItemStack {
                    item,
                    count: count as u32,
                })
            }
            other => Err(ConversionError::new(format!(
                "field '{name}' must be an item id or an object with 'item', got {other}"
            ))),
        }
    }

    pub fn integer_in(&self, name: &str, min: u64, max: u64) -> FieldResult<u64> {
        bounded_integer(name, self.require(name)?, min, max)
    }

    pub fn optional_integer_in(
        &self,
        name: &str,
        default: u64,
        min: u64,
        max: u64,
    ) -> FieldResult<u64> {
        match self.optional(name) {
            None => Ok(default),
            Some(value) => bounded_integer(name, value, min, max),
        }
    }

    /// Required `price` plus the optional restock fields.
    pub fn terms(&self) -> FieldResult<OfferTerms> {
        let price = self.integer_in("price", 1, u64::MAX)?;
        let max_uses = self.optional_integer_in(
            "max_uses",
            u64::from(DEFAULT_MAX_USES),
            1,
            u64::from(u32::MAX),
        )?;
        let villager_experience = self.optional_integer_in(
            "villager_experience",
            u64::from(DEFAULT_VILLAGER_EXPERIENCE),
            0,
            u64::from(u32::MAX),
        )?;
        let price_multiplier = match self.optional("price_multiplier") {
            None => DEFAULT_PRICE_MULTIPLIER,
            Some(value) => {
                let multiplier = value.as_f64().ok_or_else(|| {
                    ConversionError::new(format!(
                        "field 'price_multiplier' must be a number, got {value}"
                    ))
                })?;
                let narrowed = multiplier as f32;
                if multiplier < 0.0 || !narrowed.is_finite() {
                    return Err(ConversionError::new(format!(
                        "field 'price_multiplier' must be a non-negative number within f32 \
                         range, got {multiplier}"
                    )));
                }
                narrowed
            }
        };
        Ok(OfferTerms {
            price,
            max_uses: max_uses as u32,
            villager_experience: villager_experience as u32,
            price_multiplier,
        })
    }
}

fn parse_identifier(name: &str, value: &Value) -> FieldResult<Identifier> {
    let raw = value.as_str().ok_or_else(|| {
        ConversionError::new(format!(
            "field '{name}' must be an identifier string, got {value}"
        ))
    })?;
    Identifier::try_parse(raw).ok_or_else(|| {
        ConversionError::new(format!("field '{name}' is not a valid identifier: '{raw}'"))
    })
}

fn bounded_integer(name: &str, value: &Value, min: u64, max: u64) -> FieldResult<u64> {
    let number = value.as_u64().ok_or_else(|| {
        ConversionError::new(format!(
            "field '{name}' must be a non-negative integer, got {value}"
        ))
    })?;
    if number < min || number > max {
        return Err(ConversionError::new(format!(
            "field '{name}' must be between {min} and {max}, got {number}"
        )));
    }
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn stack_accepts_bare_id_and_object_form() {
        let entry = object(json!({
            "a": "minecraft:emerald",
            "b": {"item": "paper", "count": 24}
        }));
        let fields = EntryFields::new(&entry);
        assert_eq!(fields.stack("a").unwrap().count, 1);
        let b = fields.stack("b").unwrap();
        assert_eq!(b.item.to_string(), "minecraft:paper");
        assert_eq!(b.count, 24);
    }

    #[test]
    fn stack_count_is_bounded() {
        let entry = object(json!({"sell": {"item": "minecraft:stone", "count": 65}}));
        let err = EntryFields::new(&entry).stack("sell").unwrap_err();
        assert!(err.message.contains("sell.count"), "{}", err.message);
    }

    #[test]
    fn nested_stack_errors_name_outer_field() {
        let entry = object(json!({"buy": {"count": 2}}));
        let err = EntryFields::new(&entry).stack("buy").unwrap_err();
        assert_eq!(err.message, "buy: missing required field 'item'");
    }

    #[test]
    fn terms_apply_defaults_and_reject_bad_price() {
        let entry = object(json!({"price": 40}));
        let terms = EntryFields::new(&entry).terms().unwrap();
        assert_eq!(terms, OfferTerms::with_price(40));

        for bad in [
            json!({"price": 0}),
            json!({"price": -3}),
            json!({"price": "10"}),
            json!({}),
        ] {
            let entry = object(bad);
            assert!(EntryFields::new(&entry).terms().is_err());
        }
    }

    #[test]
    fn terms_reject_negative_multiplier() {
        let entry = object(json!({"price": 5, "price_multiplier": -0.5}));
        let err = EntryFields::new(&entry).terms().unwrap_err();
        assert!(err.message.contains("price_multiplier"));
    }

    #[test]
    fn terms_reject_multiplier_beyond_f32_range() {
        let entry = object(json!({"price": 5, "price_multiplier": 1e300}));
        let err = EntryFields::new(&entry).terms().unwrap_err();
        assert!(err.message.contains("price_multiplier"), "{}", err.message);

        let entry = object(json!({"price": 5, "price_multiplier": 0.2}));
        let terms = EntryFields::new(&entry).terms().unwrap();
        assert!(terms.price_multiplier.is_finite());
        assert!((terms.price_multiplier - 0.2).abs() < 1e-6);
    }

    #[test]
    fn null_optional_fields_count_as_absent() {
        let entry = object(json!({"price": 5, "max_uses": null, "name": null}));
        let fields = EntryFields::new(&entry);
        assert_eq!(fields.terms().unwrap().max_uses, DEFAULT_MAX_USES);
        assert_eq!(fields.optional_string("name").unwrap(), None);
    }
}
