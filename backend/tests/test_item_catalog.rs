//! Tests for item catalog loading and lookup

use std::io::Write;

use rma_calculator_core_rs::{
    ItemAttribute, ItemCatalog, ItemLookup, RmaError,
};
use rust_decimal_macros::dec;

const CATALOG_CSV: &str = "\
 ITEM ,RegPrice , Std Cost,Description,OnHand
A-100,100.00,40.00,Widget,12
A-200,\"$2,400.00\",\"$1,100.50\",Gadget,0
A-300,15,,Spring,400
";

#[test]
fn test_headers_case_and_whitespace_insensitive() {
    let catalog = ItemCatalog::from_csv_reader(CATALOG_CSV.as_bytes()).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(
        catalog.columns(),
        &["item", "regprice", "stdcost", "description", "onhand"]
    );
}

#[test]
fn test_lookup_returns_attributes() {
    let catalog = ItemCatalog::from_csv_reader(CATALOG_CSV.as_bytes()).unwrap();

    let item = catalog.get_item("A-200").unwrap();
    assert_eq!(item.regular_price(), &ItemAttribute::Value(dec!(2400)));
    assert_eq!(item.standard_cost(), &ItemAttribute::Value(dec!(1100.50)));
    assert_eq!(item.attribute("description"), Some("Gadget"));
    assert_eq!(item.margin(), Some(dec!(1299.50)));

    let partial = catalog.get_item("A-300").unwrap();
    assert_eq!(partial.standard_cost(), &ItemAttribute::Missing);
}

#[test]
fn test_item_not_found() {
    let catalog = ItemCatalog::from_csv_reader(CATALOG_CSV.as_bytes()).unwrap();
    for id in ["A-999", "a-100", ""] {
        assert_eq!(
            catalog.get_item(id).unwrap_err(),
            RmaError::ItemNotFound {
                item_id: id.to_string()
            }
        );
    }
}

#[test]
fn test_item_ids_in_file_order() {
    let catalog = ItemCatalog::from_csv_reader(CATALOG_CSV.as_bytes()).unwrap();
    assert_eq!(
        catalog.item_ids().collect::<Vec<_>>(),
        vec!["A-100", "A-200", "A-300"]
    );
}

#[test]
fn test_missing_all_required_columns() {
    let csv = "sku,price,cost\nA,1,2\n";
    let err = ItemCatalog::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert_eq!(
        err,
        RmaError::MissingColumns {
            missing: vec![
                "item".to_string(),
                "regprice".to_string(),
                "stdcost".to_string()
            ]
        }
    );
}

#[test]
fn test_missing_single_column() {
    let csv = "Item,RegPrice\nA,1\n";
    let err = ItemCatalog::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert_eq!(
        err,
        RmaError::MissingColumns {
            missing: vec!["stdcost".to_string()]
        }
    );
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG_CSV.as_bytes()).unwrap();
    file.flush().unwrap();

    let catalog = ItemCatalog::from_csv_path(file.path()).unwrap();
    assert!(catalog.contains("A-100"));
}

#[test]
fn test_load_from_missing_path() {
    let err = ItemCatalog::from_csv_path("/nonexistent/catalog.csv").unwrap_err();
    assert!(matches!(err, RmaError::CatalogRead(ref msg) if msg.contains("/nonexistent/catalog.csv")));
}

#[test]
fn test_header_only_catalog_is_empty() {
    let catalog = ItemCatalog::from_csv_reader("item,regprice,stdcost\n".as_bytes()).unwrap();
    assert!(catalog.is_empty());
}

fn fixture(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_load_xlsx_first_sheet() {
    let catalog = ItemCatalog::from_xlsx_path(fixture("items.xlsx")).unwrap();
    assert_eq!(
        catalog.columns(),
        &["item", "regprice", "stdcost", "onhand"]
    );
    assert_eq!(
        catalog.item_ids().collect::<Vec<_>>(),
        vec!["1001", "A-7", "1003", "1004"]
    );

    let numeric = catalog.get_item("1001").unwrap();
    assert_eq!(numeric.regular_price(), &ItemAttribute::Value(dec!(100)));
    assert_eq!(numeric.standard_cost(), &ItemAttribute::Value(dec!(40)));
    assert_eq!(numeric.attribute("onhand"), Some("12"));

    let text = catalog.get_item("A-7").unwrap();
    assert_eq!(text.regular_price(), &ItemAttribute::Value(dec!(1250)));
    assert_eq!(text.standard_cost(), &ItemAttribute::Value(dec!(800.5)));
}

#[test]
fn test_xlsx_empty_and_malformed_cells() {
    let catalog = ItemCatalog::from_xlsx_path(fixture("items.xlsx")).unwrap();
    let blank = catalog.get_item("1003").unwrap();
    assert_eq!(blank.regular_price(), &ItemAttribute::Missing);
    assert_eq!(blank.attribute("onhand"), Some(""));
    assert_eq!(
        catalog.get_item("1004").unwrap().regular_price(),
        &ItemAttribute::Malformed("TBD".to_string())
    );
}

#[test]
fn test_xlsx_missing_columns() {
    let err = ItemCatalog::from_xlsx_path(fixture("items_missing_columns.xlsx")).unwrap_err();
    assert_eq!(
        err,
        RmaError::MissingColumns {
            missing: vec!["regprice".to_string(), "stdcost".to_string()]
        }
    );
}

#[test]
fn test_xlsx_unreadable_file() {
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(CATALOG_CSV.as_bytes()).unwrap();
    file.flush().unwrap();

    let err = ItemCatalog::from_xlsx_path(file.path()).unwrap_err();
    assert!(matches!(err, RmaError::CatalogRead(_)));
}

#[test]
fn test_from_path_dispatches_on_extension() {
    let workbook = ItemCatalog::from_path(fixture("items.xlsx")).unwrap();
    assert!(workbook.contains("A-7"));

    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(CATALOG_CSV.as_bytes()).unwrap();
    file.flush().unwrap();
    let csv = ItemCatalog::from_path(file.path()).unwrap();
    assert!(csv.contains("A-100"));
}
