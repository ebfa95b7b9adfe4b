//! Deduplication of numbered unit variants
//!
//! The sheet lists each physical unit as its own row ("Lamp #1",
//! "Lamp #2"). The catalog shows one record per item with an availability
//! count, so variants sharing a base name within a category are collapsed,
//! merging their metadata.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Category, EquipmentItem};

static ANY_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*#\d+-#\d+\s*").unwrap());
static ANY_UNIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*#\d+\s*").unwrap());
static TRAILING_PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(.*?\)\s*$").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static UNIT_ONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#1($|\s|\()").unwrap());

/// Strip unit-number tokens (`#N`, `#N-#M` anywhere) and one trailing
/// parenthesized group, then collapse whitespace. The result is the shared
/// display name and half of the dedup grouping key.
pub fn base_name(name: &str) -> String {
    let no_range = ANY_RANGE.replace_all(name, "");
    let no_unit = ANY_UNIT.replace_all(&no_range, "");
    let no_parens = TRAILING_PARENS.replace(&no_unit, "");
    WHITESPACE.replace_all(&no_parens, " ").trim().to_string()
}

/// Whether a raw row name designates the first physical unit, whose image
/// is preferred for the merged record
fn is_unit_one(name: &str) -> bool {
    UNIT_ONE.is_match(name) || name.ends_with("#1")
}

/// Collapse numbered variants of the same physical item into one record
/// with an availability count.
///
/// Grouping key is (category, lower-cased base name); groups keep the
/// order their first member appeared in. Ids are reassigned sequentially
/// over the aggregated set.
pub fn aggregate(items: Vec<EquipmentItem>) -> Vec<EquipmentItem> {
    let mut groups: IndexMap<(Category, String), (EquipmentItem, u32)> = IndexMap::new();

    for item in items {
        let base = base_name(&item.name);
        let key = (item.category, base.to_lowercase());

        match groups.get_mut(&key) {
            Some((merged, count)) => {
                *count += 1;
                if is_unit_one(&item.name) && item.image.is_some() {
                    merged.image = item.image;
                } else if merged.image.is_none() && item.image.is_some() {
                    merged.image = item.image;
                }
                if item.restricted {
                    merged.restricted = true;
                }
                if merged.description.is_none() && item.description.is_some() {
                    merged.description = item.description;
                }
                if merged.notes.is_none() && item.notes.is_some() {
                    merged.notes = item.notes;
                }
            }
            None => {
                let mut first = item;
                if !base.is_empty() {
                    first.name = base;
                }
                groups.insert(key, (first, 1));
            }
        }
    }

    groups
        .into_values()
        .enumerate()
        .map(|(index, (mut item, count))| {
            item.id = index as u32 + 1;
            item.available_count = count;
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(name: &str, category: Category) -> EquipmentItem {
        EquipmentItem {
            id: 0,
            name: name.to_string(),
            category,
            description: None,
            day_rate: dec!(100),
            weekly_rate: dec!(425),
            image: None,
            restricted: false,
            available_count: 1,
            notes: None,
        }
    }

    #[test]
    fn base_name_strips_unit_tokens_and_trailing_parens() {
        assert_eq!(base_name("Tripod #1"), "Tripod");
        assert_eq!(base_name("Sandbag #1-#8"), "Sandbag");
        assert_eq!(base_name("Tripod (case)"), "Tripod");
        assert_eq!(base_name("Lamp #2 (no barn doors)"), "Lamp");
        assert_eq!(base_name("Plain Name"), "Plain Name");
    }

    #[test]
    fn numbered_variants_collapse_into_one_counted_record() {
        let items = vec![
            item("Tripod #1", Category::Grip),
            item("Tripod #2", Category::Grip),
            item("Tripod (case)", Category::Grip),
        ];
        let out = aggregate(items);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Tripod");
        assert_eq!(out[0].available_count, 3);
    }

    #[test]
    fn same_base_name_in_different_categories_stays_separate() {
        let items = vec![
            item("Stand #1", Category::Grip),
            item("Stand #1", Category::Lights),
        ];
        let out = aggregate(items);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn unit_one_image_is_preferred_over_earlier_images() {
        let mut a = item("Lamp #2", Category::Lights);
        a.image = Some("u/two".to_string());
        let mut b = item("Lamp #1", Category::Lights);
        b.image = Some("u/one".to_string());
        let out = aggregate(vec![a, b]);
        assert_eq!(out[0].image.as_deref(), Some("u/one"));
    }

    #[test]
    fn first_non_empty_image_is_kept_otherwise() {
        let a = item("Lamp #2", Category::Lights);
        let mut b = item("Lamp #3", Category::Lights);
        b.image = Some("u/three".to_string());
        let mut c = item("Lamp #4", Category::Lights);
        c.image = Some("u/four".to_string());
        let out = aggregate(vec![a, b, c]);
        assert_eq!(out[0].image.as_deref(), Some("u/three"));
    }

    #[test]
    fn restriction_and_first_metadata_win_on_merge() {
        let mut a = item("Mixer #1", Category::Sound);
        a.description = Some("first desc".to_string());
        let mut b = item("Mixer #2", Category::Sound);
        b.description = Some("second desc".to_string());
        b.restricted = true;
        b.notes = Some("missing cable".to_string());
        let out = aggregate(vec![a, b]);
        assert!(out[0].restricted);
        assert_eq!(out[0].description.as_deref(), Some("first desc"));
        assert_eq!(out[0].notes.as_deref(), Some("missing cable"));
    }

    #[test]
    fn ids_are_reassigned_in_first_seen_group_order() {
        let items = vec![
            item("B Light #1", Category::Lights),
            item("A Light #1", Category::Lights),
            item("B Light #2", Category::Lights),
        ];
        let out = aggregate(items);
        assert_eq!(out[0].name, "B Light");
        assert_eq!(out[0].id, 1);
        assert_eq!(out[1].name, "A Light");
        assert_eq!(out[1].id, 2);
    }
}
