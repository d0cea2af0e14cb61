//! Data Processor Module
//! Validity screening and field extents over parsed items.

use crate::data::Item;
use tracing::{debug, warn};

/// Numeric field an extent or scale is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DebutYear,
    Durability,
}

impl Field {
    /// Value of this field for an item, `None` when it is not a finite number.
    pub fn value(&self, item: &Item) -> Option<f64> {
        let value = match self {
            Field::DebutYear => item.debut_year.map(f64::from),
            Field::Durability => Some(item.durability),
        };
        value.filter(|v| v.is_finite())
    }
}

/// Handles item screening and extent operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Drop every item whose durability is not finite, keeping input order.
    pub fn filter_valid(items: Vec<Item>) -> Vec<Item> {
        let total = items.len();
        let valid: Vec<Item> = items.into_iter().filter(Item::is_valid).collect();

        let dropped = total - valid.len();
        if dropped > 0 {
            warn!(dropped, total, "Dropped items without a numeric durability");
        }
        debug!(valid = valid.len(), "Validity filter done");
        valid
    }

    /// `(min, max)` of a field over the items that have a finite value for it.
    pub fn extent(items: &[Item], field: Field) -> Option<(f64, f64)> {
        items
            .iter()
            .filter_map(|item| field.value(item))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Item, RawRecord};

    fn item(name: &str, year: Option<&str>, durability: Option<&str>) -> Item {
        Item::parse(&RawRecord::new(name, "Tool", year, durability))
    }

    #[test]
    fn filter_keeps_only_finite_durability_in_order() {
        let items = vec![
            item("a", Some("2001"), Some("10")),
            item("b", Some("2002"), Some("abc")),
            item("c", Some("2003"), None),
            item("d", Some("2004"), Some("inf")),
            item("e", Some("2005"), Some("-3")),
            item("f", Some("2006"), Some("NaN")),
            item("g", Some("2007"), Some("7.5")),
        ];
        let names: Vec<String> = DataProcessor::filter_valid(items)
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["a", "e", "g"]);
    }

    #[test]
    fn filter_of_empty_input_is_empty() {
        assert!(DataProcessor::filter_valid(Vec::new()).is_empty());
    }

    #[test]
    fn extent_skips_missing_years() {
        let items = vec![
            item("a", Some("2011-01-01"), Some("5")),
            item("b", None, Some("50")),
            item("c", Some("2004"), Some("20")),
        ];
        assert_eq!(
            DataProcessor::extent(&items, Field::DebutYear),
            Some((2004.0, 2011.0))
        );
        assert_eq!(
            DataProcessor::extent(&items, Field::Durability),
            Some((5.0, 50.0))
        );
        assert_eq!(DataProcessor::extent(&[], Field::Durability), None);
    }
}
