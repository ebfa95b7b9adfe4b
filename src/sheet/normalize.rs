//! Catalog normalizer
//!
//! Turns raw feed rows into typed equipment drafts. The sheet interleaves
//! category header rows with item rows and sub-header annotation rows;
//! a running "current category" tracks which section an item row belongs to.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Category, EquipmentItem};
use crate::pricing;

use super::images::{resolve_image, ImageManifest};

/// Column layout of the catalog sheet
const COL_CATEGORY: usize = 1;
const COL_COHORT: usize = 2;
const COL_NAME: usize = 3;
const COL_DESCRIPTION: usize = 4;
const COL_DAY_RATE: usize = 5;
const COL_WEEKLY_RATE: usize = 6;
const COL_NOTES: usize = 7;

/// Cohort marker that restricts an item to the advanced class
const RESTRICTED_MARKER: &str = "film year 2";

/// Name-column placeholders marking annotation rows, not items
const PLACEHOLDER_NAMES: [&str; 2] = ["Product:", "Contains:"];

/// Parse a currency cell: strips whitespace, a trailing `kr`
/// (case-insensitive) and thousand-separator commas. Unparseable or empty
/// cells are 0 ("free/TBD").
pub fn parse_price(raw: &str) -> Decimal {
    let mut cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    // suffix check must stay on byte boundaries; lowercasing can change
    // byte lengths (e.g. the Kelvin sign shrinks to ASCII "k")
    if cleaned.len() >= 2
        && cleaned.is_char_boundary(cleaned.len() - 2)
        && cleaned[cleaned.len() - 2..].eq_ignore_ascii_case("kr")
    {
        cleaned.truncate(cleaned.len() - 2);
    }
    let cleaned = cleaned.replace(',', "");
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

fn non_empty(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

/// Normalize raw feed rows into one equipment draft per surviving item row.
///
/// Row 0 is the sheet title and is always skipped. Drafts carry a running
/// unique id and `available_count` 1; numbered duplicates are collapsed
/// later by [`super::aggregate`].
pub fn normalize_rows(rows: &[Vec<String>], manifest: &ImageManifest) -> Vec<EquipmentItem> {
    let mut items = Vec::new();
    let mut current_category = Category::Camera;
    let mut id: u32 = 1;

    for row in rows.iter().skip(1) {
        let cell = |col: usize| row.get(col).map(|s| s.trim()).unwrap_or("");

        let marker = cell(COL_CATEGORY).to_uppercase();
        let name = cell(COL_NAME);

        if let Ok(category) = marker.trim().parse::<Category>() {
            current_category = category;
            if name.is_empty() {
                // pure header row
                continue;
            }
        }

        if name.is_empty() || PLACEHOLDER_NAMES.contains(&name) {
            continue;
        }

        let day_rate = parse_price(cell(COL_DAY_RATE));
        let weekly_override = parse_price(cell(COL_WEEKLY_RATE));
        let weekly_rate = if weekly_override > Decimal::ZERO {
            weekly_override
        } else if day_rate > Decimal::ZERO {
            pricing::weekly_rate(day_rate)
        } else {
            Decimal::ZERO
        };

        let restricted = cell(COL_COHORT).to_lowercase().contains(RESTRICTED_MARKER);

        items.push(EquipmentItem {
            id,
            name: name.to_string(),
            category: current_category,
            description: non_empty(cell(COL_DESCRIPTION)),
            day_rate,
            weekly_rate,
            image: resolve_image(name, manifest),
            restricted,
            available_count: 1,
            notes: non_empty(cell(COL_NOTES)),
        });
        id += 1;
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn title_row() -> Vec<String> {
        row(&["", "Equipment list 2026", "", "", "", "", "", ""])
    }

    #[test]
    fn price_parser_handles_currency_noise() {
        assert_eq!(parse_price("500kr"), dec!(500));
        assert_eq!(parse_price(" 1,250 KR "), dec!(1250));
        assert_eq!(parse_price("500Kr"), dec!(500));
        assert_eq!(parse_price("99.50"), dec!(99.50));
        assert_eq!(parse_price(""), Decimal::ZERO);
        assert_eq!(parse_price("TBD"), Decimal::ZERO);
    }

    #[test]
    fn multibyte_currency_noise_is_zero_not_a_panic() {
        // the Kelvin sign lowercases to a shorter byte sequence; the cell
        // is unparseable and must read as 0
        assert_eq!(parse_price("5\u{212A}R"), Decimal::ZERO);
        assert_eq!(parse_price("\u{212A}"), Decimal::ZERO);
        assert_eq!(parse_price("500\u{00E9}"), Decimal::ZERO);
    }

    #[test]
    fn title_row_is_always_skipped() {
        let rows = vec![row(&["", "CAMERA", "", "Looks Like An Item", "", "500kr", ""])];
        assert!(normalize_rows(&rows, &ImageManifest::new()).is_empty());
    }

    #[test]
    fn category_headers_drive_following_rows() {
        let rows = vec![
            title_row(),
            row(&["", "SOUND", "", "", "", "", ""]),
            row(&["", "", "", "Boom Pole", "", "100kr", ""]),
            row(&["", "LIGHTS", "", "", "", "", ""]),
            row(&["", "", "", "Aputure 300D", "", "300kr", ""]),
        ];
        let items = normalize_rows(&rows, &ImageManifest::new());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, Category::Sound);
        assert_eq!(items[1].category, Category::Lights);
    }

    #[test]
    fn marker_row_with_a_name_is_both_header_and_item() {
        let rows = vec![
            title_row(),
            row(&["", "GRIP", "", "C-Stand", "", "50kr", ""]),
        ];
        let items = normalize_rows(&rows, &ImageManifest::new());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, Category::Grip);
        assert_eq!(items[0].name, "C-Stand");
    }

    #[test]
    fn unrecognized_markers_do_not_change_the_category() {
        let rows = vec![
            title_row(),
            row(&["", "SOUND", "", "", "", "", ""]),
            row(&["", "VEHICLES", "", "Zoom H6", "", "100kr", ""]),
        ];
        let items = normalize_rows(&rows, &ImageManifest::new());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, Category::Sound);
    }

    #[test]
    fn annotation_rows_are_not_items() {
        let rows = vec![
            title_row(),
            row(&["", "", "", "Product:", "", "", ""]),
            row(&["", "", "", "Contains:", "", "", ""]),
            row(&["", "", "", "", "orphan description", "100kr", ""]),
        ];
        assert!(normalize_rows(&rows, &ImageManifest::new()).is_empty());
    }

    #[test]
    fn weekly_override_beats_the_derived_weekly_rate() {
        let rows = vec![
            title_row(),
            row(&["", "", "", "Camera A", "", "100kr", "400kr"]),
            row(&["", "", "", "Camera B", "", "100kr", ""]),
            row(&["", "", "", "Free Thing", "", "", ""]),
        ];
        let items = normalize_rows(&rows, &ImageManifest::new());
        assert_eq!(items[0].weekly_rate, dec!(400));
        assert_eq!(items[1].weekly_rate, dec!(425));
        assert_eq!(items[2].day_rate, Decimal::ZERO);
        assert_eq!(items[2].weekly_rate, Decimal::ZERO);
    }

    #[test]
    fn cohort_marker_sets_the_restricted_flag() {
        let rows = vec![
            title_row(),
            row(&["", "", "Film Year 2 only", "Alexa Mini", "", "900kr", ""]),
            row(&["", "", "everyone", "Pocket 4K", "", "200kr", ""]),
        ];
        let items = normalize_rows(&rows, &ImageManifest::new());
        assert!(items[0].restricted);
        assert!(!items[1].restricted);
    }

    #[test]
    fn description_notes_and_running_ids_are_carried() {
        let rows = vec![
            title_row(),
            row(&["", "", "", "Camera A", "4K body", "500kr", "", "charger included"]),
            row(&["", "", "", "Camera B", "", "500kr", "", ""]),
        ];
        let items = normalize_rows(&rows, &ImageManifest::new());
        assert_eq!(items[0].id, 1);
        assert_eq!(items[1].id, 2);
        assert_eq!(items[0].description.as_deref(), Some("4K body"));
        assert_eq!(items[0].notes.as_deref(), Some("charger included"));
        assert_eq!(items[1].description, None);
    }

    #[test]
    fn short_rows_are_padded_with_empty_cells() {
        let rows = vec![title_row(), row(&["", "", "", "Camera A"])];
        let items = normalize_rows(&rows, &ImageManifest::new());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].day_rate, Decimal::ZERO);
    }
}
