//! Terminal and JSON rendering of quotes and item listings

use std::fmt::Write;

use rust_decimal::Decimal;
use serde::Serialize;

use rma_calculator_core_rs::{
    format_currency, CostConfig, Highlight, ItemAttribute, ItemCatalog, Quote, RankedRow,
    RankedView,
};

fn attribute_text(attr: &ItemAttribute) -> String {
    match attr {
        ItemAttribute::Value(v) => format_currency(*v),
        ItemAttribute::Missing => "-".to_string(),
        ItemAttribute::Malformed(raw) => format!("?{}", raw),
    }
}

fn rows_in_order<'a>(view: &RankedView<'a>, sort: bool) -> Vec<RankedRow<'a>> {
    if sort {
        view.sorted_by_cost()
    } else {
        view.rows().to_vec()
    }
}

pub fn render_items(catalog: &ItemCatalog) -> String {
    let width = catalog
        .item_ids()
        .map(|id| id.chars().count())
        .max()
        .unwrap_or(0)
        .max("Item".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:>14}  {:>14}", "Item", "RegPrice", "STD Cost");
    for item in catalog.items() {
        let _ = writeln!(
            out,
            "{:<width$}  {:>14}  {:>14}",
            item.id(),
            attribute_text(item.regular_price()),
            attribute_text(item.standard_cost()),
        );
    }
    out
}

pub fn render_table(quote: &Quote, view: &RankedView<'_>, sort: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Item: {}", quote.item_id());
    let _ = writeln!(
        out,
        "STD Cost: {} | RegPrice: {}",
        attribute_text(quote.item.standard_cost()),
        attribute_text(quote.item.regular_price()),
    );
    let _ = writeln!(out, "Quantity: {} | Category: {}", quote.qty, view.filter());
    let _ = writeln!(out, "{}", "-".repeat(72));

    if view.is_empty() {
        let _ = writeln!(out, "No RMA types in this category.");
        return out;
    }

    let name_width = view
        .rows()
        .iter()
        .map(|r| r.result.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("RMA Type".len());

    let _ = writeln!(
        out,
        "{:<name_width$}  {:<11}  {:>14}",
        "RMA Type", "Category", "Total Cost"
    );
    for row in rows_in_order(view, sort) {
        let marker = match row.highlight() {
            Highlight::Max => "  MAX",
            Highlight::Min => "  MIN",
            Highlight::None => "",
        };
        // Pad by char count: names contain multi-byte dashes
        let pad = name_width - row.result.name.chars().count();
        let _ = writeln!(
            out,
            "{}{}  {:<11}  {:>14}{}",
            row.result.name,
            " ".repeat(pad),
            row.result.category.as_str(),
            format_currency(row.result.cost),
            marker,
        );
    }
    out
}

#[derive(Serialize)]
struct QuoteJson<'a> {
    item_id: &'a str,
    qty: Decimal,
    category_filter: String,
    config: &'a CostConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_cost: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_cost: Option<Decimal>,
    results: Vec<RowJson<'a>>,
}

#[derive(Serialize)]
struct RowJson<'a> {
    name: &'a str,
    category: &'a str,
    cost: Decimal,
    display_cost: String,
    is_min: bool,
    is_max: bool,
}

pub fn render_json(quote: &Quote, view: &RankedView<'_>, sort: bool) -> serde_json::Result<String> {
    let extremes = view.extremes();
    let doc = QuoteJson {
        item_id: quote.item_id(),
        qty: quote.qty,
        category_filter: view.filter().to_string(),
        config: &quote.config,
        min_cost: extremes.map(|e| e.min),
        max_cost: extremes.map(|e| e.max),
        results: rows_in_order(view, sort)
            .into_iter()
            .map(|row| RowJson {
                name: &row.result.name,
                category: row.result.category.as_str(),
                cost: row.result.cost,
                display_cost: format_currency(row.result.cost),
                is_min: row.is_min,
                is_max: row.is_max,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rma_calculator_core_rs::{CategoryFilter, CostOverrides, ItemRecord, RmaCalculator, RmaCategory};

    fn sample_quote() -> Quote {
        let catalog = ItemCatalog::from_records(vec![ItemRecord::new(
            "1001",
            Decimal::from(100),
            Decimal::from(40),
        )]);
        RmaCalculator::new(catalog)
            .quote("1001", Decimal::ONE, &CostOverrides::default())
            .unwrap()
    }

    #[test]
    fn test_table_marks_extremes() {
        let quote = sample_quote();
        let view = quote.view(CategoryFilter::All);
        let table = render_table(&quote, &view, false);

        assert!(table.contains("STD Cost: $40.00 | RegPrice: $100.00"));
        let alpha = table
            .lines()
            .find(|l| l.starts_with("Credit Issued – Scrapped at ALPHA"))
            .unwrap();
        assert!(alpha.ends_with("$165.00  MAX"));
        let labels = table
            .lines()
            .find(|l| l.starts_with("Shipping Labels Only"))
            .unwrap();
        assert!(labels.ends_with("$26.00  MIN"));
        let resellable = table
            .lines()
            .find(|l| l.starts_with("Replacement – Good & Resellable Return"))
            .unwrap();
        assert!(resellable.ends_with("$30.00"));
    }

    #[test]
    fn test_json_lists_filtered_rows() {
        let quote = sample_quote();
        let view = quote.view(CategoryFilter::Only(RmaCategory::Repair));
        let json = render_json(&quote, &view, false).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let results = parsed["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["display_cost"], "$65.00");
        assert_eq!(results[0]["is_min"], true);
        assert_eq!(parsed["category_filter"], "Repair");
    }

    #[test]
    fn test_render_items_lists_ids() {
        let catalog = ItemCatalog::from_records(vec![
            ItemRecord::new("A", Decimal::from(10), Decimal::from(5)),
            ItemRecord::from_attributes("B", ItemAttribute::Missing, Decimal::from(3).into()),
        ]);
        let text = render_items(&catalog);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("A "));
        assert!(lines[2].contains('-'));
    }
}
