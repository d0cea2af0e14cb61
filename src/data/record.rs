//! Record Parser Module
//! Turns loosely typed source rows into typed items.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const FIELD_NAME: &str = "name";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_DEBUT_DATE: &str = "debutDate";
pub const FIELD_DURABILITY: &str = "durability";

/// Columns every source table must provide.
pub const REQUIRED_COLUMNS: [&str; 4] =
    [FIELD_NAME, FIELD_TYPE, FIELD_DEBUT_DATE, FIELD_DURABILITY];

/// One row as read from the source table, before any numeric coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub name: String,
    pub type_label: String,
    pub debut_date: Option<String>,
    pub durability: Option<String>,
}

impl RawRecord {
    pub fn new(
        name: impl Into<String>,
        type_label: impl Into<String>,
        debut_date: Option<&str>,
        durability: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            type_label: type_label.into(),
            debut_date: debut_date.map(str::to_string),
            durability: durability.map(str::to_string),
        }
    }

    /// Validate a field-name to text mapping against the record schema.
    ///
    /// `name` and `type` must be present and `name` must not be blank.
    /// `debutDate` and `durability` may be absent; they coerce to sentinels.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, ParseError> {
        let name = fields
            .get(FIELD_NAME)
            .ok_or(ParseError::MissingField(FIELD_NAME))?;
        if name.trim().is_empty() {
            return Err(ParseError::EmptyField(FIELD_NAME));
        }
        let type_label = fields
            .get(FIELD_TYPE)
            .ok_or(ParseError::MissingField(FIELD_TYPE))?;

        Ok(Self {
            name: name.trim().to_string(),
            type_label: type_label.clone(),
            debut_date: fields.get(FIELD_DEBUT_DATE).cloned(),
            durability: fields.get(FIELD_DURABILITY).cloned(),
        })
    }
}

/// Item family used to pick a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Tool,
    Armor,
    Other,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Weapon,
        ItemKind::Tool,
        ItemKind::Armor,
        ItemKind::Other,
    ];

    /// Classify a free-form type string.
    ///
    /// Case-insensitive substring match, checked in the fixed order
    /// weapon, tool, armor. "tool-weapon" is therefore a `Weapon`.
    pub fn classify(type_label: &str) -> Self {
        let lowered = type_label.to_lowercase();
        if lowered.contains("weapon") {
            ItemKind::Weapon
        } else if lowered.contains("tool") {
            ItemKind::Tool
        } else if lowered.contains("armor") {
            ItemKind::Armor
        } else {
            ItemKind::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "Weapon",
            ItemKind::Tool => "Tool",
            ItemKind::Armor => "Armor",
            ItemKind::Other => "Other",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A parsed item. `durability` is NaN when the raw value did not coerce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Type text exactly as it appeared in the source.
    pub type_label: String,
    pub kind: ItemKind,
    pub debut_year: Option<i32>,
    pub durability: f64,
}

impl Item {
    pub fn parse(raw: &RawRecord) -> Self {
        Self {
            name: raw.name.clone(),
            type_label: raw.type_label.clone(),
            kind: ItemKind::classify(&raw.type_label),
            debut_year: parse_debut_year(raw.debut_date.as_deref()),
            durability: parse_durability(raw.durability.as_deref()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.durability.is_finite()
    }
}

/// Parse every raw record. Never fails; invalid values become sentinels.
pub fn parse_records(records: &[RawRecord]) -> Vec<Item> {
    records.iter().map(Item::parse).collect()
}

/// Year from the leading four characters of a date-like string.
pub fn parse_debut_year(date: Option<&str>) -> Option<i32> {
    let date = date?;
    let head: String = date.chars().take(4).collect();
    if head.chars().count() < 4 {
        return None;
    }
    head.trim().parse::<i32>().ok()
}

pub fn parse_durability(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text.parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn classification_follows_fixed_priority() {
        assert_eq!(ItemKind::classify("toolweapon"), ItemKind::Weapon);
        assert_eq!(ItemKind::classify("Tool-Weapon"), ItemKind::Weapon);
        assert_eq!(ItemKind::classify("Armor Tool"), ItemKind::Tool);
        assert_eq!(ItemKind::classify("ARMOR"), ItemKind::Armor);
        assert_eq!(ItemKind::classify("Shield"), ItemKind::Other);
        assert_eq!(ItemKind::classify(""), ItemKind::Other);
    }

    #[test]
    fn debut_year_uses_leading_four_characters() {
        assert_eq!(parse_debut_year(Some("2011-01-01")), Some(2011));
        assert_eq!(parse_debut_year(Some("1999")), Some(1999));
        assert_eq!(parse_debut_year(Some("201")), None);
        assert_eq!(parse_debut_year(Some("")), None);
        assert_eq!(parse_debut_year(Some("ab12-01-01")), None);
        assert_eq!(parse_debut_year(None), None);
    }

    #[test]
    fn durability_coercion_yields_nan_sentinel() {
        assert_eq!(parse_durability(Some("250")), 250.0);
        assert_eq!(parse_durability(Some(" 12.5 ")), 12.5);
        assert!(parse_durability(Some("abc")).is_nan());
        assert!(parse_durability(Some("")).is_nan());
        assert!(parse_durability(None).is_nan());
    }

    #[test]
    fn from_fields_checks_schema() {
        let ok = RawRecord::from_fields(&fields(&[
            ("name", "Iron Sword"),
            ("type", "Weapon"),
            ("debutDate", "2011-01-01"),
        ]))
        .unwrap();
        assert_eq!(ok.name, "Iron Sword");
        assert_eq!(ok.durability, None);

        let missing = RawRecord::from_fields(&fields(&[("type", "Tool")]));
        assert_eq!(missing, Err(ParseError::MissingField("name")));

        let blank = RawRecord::from_fields(&fields(&[("name", "  "), ("type", "Tool")]));
        assert_eq!(blank, Err(ParseError::EmptyField("name")));
    }

    #[test]
    fn parse_keeps_type_text_verbatim() {
        let raw = RawRecord::new("Turtle Shell", "Armor (Helmet)", Some("2018-07-18"), Some("275"));
        let item = Item::parse(&raw);
        assert_eq!(item.type_label, "Armor (Helmet)");
        assert_eq!(item.kind, ItemKind::Armor);
        assert_eq!(item.debut_year, Some(2018));
        assert!(item.is_valid());
    }
}
