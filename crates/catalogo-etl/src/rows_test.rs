use calamine::Data;

use super::*;

fn s(v: &str) -> Data {
    Data::String(v.to_string())
}

fn n(v: f64) -> Data {
    Data::Float(v)
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|h| (*h).to_string()).collect()
}

fn products_sheet(rows: Vec<Vec<Data>>) -> Sheet {
    Sheet::new("Productos", &headers(&PRODUCT_COLUMNS), rows)
}

fn product_cells(id: Data, name: &str, brand: &str) -> Vec<Data> {
    vec![
        id,
        s(name),
        s(brand),
        s("vitaminas"),
        s("Descripción corta"),
        s("a, b"),
    ]
}

const FULL_VARIANT_HEADERS: [&str; 12] = [
    "variantId",
    "productId",
    "name",
    "presentation",
    "dosage",
    "quantity",
    "images",
    "tier1_price",
    "tier2_minQty",
    "tier2_price",
    "tier3_minQty",
    "tier3_price",
];

fn variants_sheet(rows: Vec<Vec<Data>>) -> Sheet {
    Sheet::new("Variantes", &headers(&FULL_VARIANT_HEADERS), rows)
}

fn variant_cells(variant_id: f64, product_id: f64) -> Vec<Data> {
    vec![
        n(variant_id),
        n(product_id),
        s("Vitamina C 1000mg"),
        s("Tabletas"),
        n(1000.0),
        n(60.0),
        s("c1.jpg, c2.jpg"),
        n(199.0),
        n(6.0),
        n(179.5),
        Data::Empty,
        Data::Empty,
    ]
}

#[test]
fn read_products_parses_fields() {
    let sheet = products_sheet(vec![product_cells(n(1.0), "Vitamina C", "Acme")]);
    let rows = read_products(&sheet).unwrap();
    assert_eq!(
        rows,
        vec![ProductRow {
            row: 2,
            id: 1,
            name: "Vitamina C".to_string(),
            brand: "Acme".to_string(),
            category: Some("vitaminas".to_string()),
            short_description: Some("Descripción corta".to_string()),
            tags: Some("a, b".to_string()),
        }]
    );
}

#[test]
fn read_products_keeps_optional_fields_empty() {
    let sheet = products_sheet(vec![vec![
        n(3.0),
        s("Zinc"),
        s("Acme"),
        Data::Empty,
        Data::Empty,
        Data::Empty,
    ]]);
    let rows = read_products(&sheet).unwrap();
    assert!(rows[0].category.is_none());
    assert!(rows[0].short_description.is_none());
    assert!(rows[0].tags.is_none());
}

#[test]
fn read_products_requires_all_columns() {
    let sheet = Sheet::new(
        "Productos",
        &headers(&["id", "name", "brand", "category", "shortDescription"]),
        vec![],
    );
    let err = read_products(&sheet).unwrap_err();
    assert!(
        matches!(err, EtlError::MissingColumn { ref column, .. } if column == "tags"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn read_products_rejects_unparseable_id() {
    let sheet = products_sheet(vec![
        product_cells(n(1.0), "Vitamina C", "Acme"),
        product_cells(s("abc"), "Zinc", "Acme"),
    ]);
    let err = read_products(&sheet).unwrap_err();
    assert!(
        matches!(err, EtlError::InvalidRecord { row: 3, ref field, .. } if field == "id"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn read_products_rejects_missing_brand() {
    let sheet = products_sheet(vec![product_cells(n(1.0), "Vitamina C", " ")]);
    let err = read_products(&sheet).unwrap_err();
    assert!(
        matches!(err, EtlError::InvalidRecord { ref field, .. } if field == "brand"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn read_products_rejects_duplicate_ids() {
    let sheet = products_sheet(vec![
        product_cells(n(7.0), "Vitamina C", "Acme"),
        product_cells(n(8.0), "Zinc", "Acme"),
        product_cells(n(7.0), "Magnesio", "Acme"),
    ]);
    let err = read_products(&sheet).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid record in sheet 'Productos', row 4, field 'id': duplicate id 7 (first used on row 2)"
    );
}

#[test]
fn read_variants_parses_tiers() {
    let sheet = variants_sheet(vec![variant_cells(10.0, 1.0)]);
    let rows = read_variants(&sheet).unwrap();
    let row = &rows[0];
    assert_eq!(row.variant_id, 10);
    assert_eq!(row.product_id, 1);
    assert_eq!(row.dosage, "1000");
    assert_eq!(row.quantity, "60");
    assert_eq!(row.images.as_deref(), Some("c1.jpg, c2.jpg"));
    assert_eq!(row.tier1_price, Decimal::from(199));
    assert_eq!(row.tier2.complete(), Some((6, Decimal::new(1795, 1))));
    assert_eq!(row.tier3, TierInput::default());
}

#[test]
fn read_variants_without_optional_tier_columns() {
    let sheet = Sheet::new(
        "Variantes",
        &headers(&VARIANT_COLUMNS),
        vec![vec![
            n(1.0),
            n(1.0),
            s("Omega 3"),
            s("Cápsulas"),
            s("1000 mg"),
            n(90.0),
            Data::Empty,
            n(12.5),
        ]],
    );
    let rows = read_variants(&sheet).unwrap();
    assert_eq!(rows[0].dosage, "1000 mg");
    assert!(rows[0].images.is_none());
    assert_eq!(rows[0].tier2, TierInput::default());
    assert_eq!(rows[0].tier3, TierInput::default());
}

#[test]
fn read_variants_requires_tier1_price() {
    let mut cells = variant_cells(10.0, 1.0);
    cells[7] = Data::Empty;
    let sheet = variants_sheet(vec![cells]);
    let err = read_variants(&sheet).unwrap_err();
    assert!(
        matches!(err, EtlError::InvalidRecord { row: 2, ref field, .. } if field == "tier1_price"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn read_variants_rejects_fractional_min_qty() {
    let mut cells = variant_cells(10.0, 1.0);
    cells[8] = n(2.5);
    let sheet = variants_sheet(vec![cells]);
    let err = read_variants(&sheet).unwrap_err();
    assert!(
        matches!(err, EtlError::InvalidRecord { ref field, .. } if field == "tier2_minQty"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn read_variants_rejects_duplicate_variant_ids() {
    let sheet = variants_sheet(vec![variant_cells(10.0, 1.0), variant_cells(10.0, 2.0)]);
    let err = read_variants(&sheet).unwrap_err();
    assert!(
        matches!(err, EtlError::InvalidRecord { row: 3, ref field, .. } if field == "variantId"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn tier_input_partial_detection() {
    let partial = TierInput {
        min_qty: Some(6),
        price: None,
    };
    assert!(partial.is_partial());
    assert!(partial.complete().is_none());
    assert!(!TierInput::default().is_partial());
}
