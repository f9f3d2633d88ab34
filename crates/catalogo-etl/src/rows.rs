//! Typed rows for the two catalog sheets.
//!
//! Every row is coerced up front so a malformed cell stops the run with a
//! precise location before any output is produced.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::EtlError;
use crate::sheet::{Record, Sheet};

pub const PRODUCT_COLUMNS: [&str; 6] = [
    "id",
    "name",
    "brand",
    "category",
    "shortDescription",
    "tags",
];

pub const VARIANT_COLUMNS: [&str; 8] = [
    "variantId",
    "productId",
    "name",
    "presentation",
    "dosage",
    "quantity",
    "images",
    "tier1_price",
];

/// One row of the products sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    /// Spreadsheet row number, for diagnostics.
    pub row: usize,
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub category: Option<String>,
    pub short_description: Option<String>,
    /// Raw comma-separated tag list.
    pub tags: Option<String>,
}

/// The optional `tierN_minQty` / `tierN_price` column pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierInput {
    pub min_qty: Option<i64>,
    pub price: Option<Decimal>,
}

impl TierInput {
    /// Both halves, when both are present.
    #[must_use]
    pub fn complete(&self) -> Option<(i64, Decimal)> {
        Some((self.min_qty?, self.price?))
    }

    /// `true` when exactly one half of the pair was filled in.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.min_qty.is_some() != self.price.is_some()
    }
}

/// One row of the variants sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRow {
    pub row: usize,
    pub variant_id: i64,
    pub product_id: i64,
    pub name: String,
    pub presentation: Option<String>,
    pub dosage: String,
    pub quantity: String,
    /// Raw comma-separated image file names.
    pub images: Option<String>,
    pub tier1_price: Decimal,
    pub tier2: TierInput,
    pub tier3: TierInput,
}

/// Read and validate every product row.
///
/// # Errors
///
/// Returns [`EtlError::MissingColumn`] if a required header is absent, or
/// [`EtlError::InvalidRecord`] for the first row with a missing or
/// malformed required field or a repeated `id`.
pub fn read_products(sheet: &Sheet) -> Result<Vec<ProductRow>, EtlError> {
    sheet.require_columns(&PRODUCT_COLUMNS)?;

    let mut seen: HashMap<i64, usize> = HashMap::new();
    let mut products = Vec::new();

    for record in sheet.records() {
        let product = product_from_record(&record)?;
        if let Some(first_row) = seen.insert(product.id, product.row) {
            return Err(record.invalid(
                "id",
                format!("duplicate id {} (first used on row {first_row})", product.id),
            ));
        }
        products.push(product);
    }

    Ok(products)
}

fn product_from_record(record: &Record<'_>) -> Result<ProductRow, EtlError> {
    Ok(ProductRow {
        row: record.row(),
        id: record.required_integer("id")?,
        name: record.required_text("name")?,
        brand: record.required_text("brand")?,
        category: record.text("category"),
        short_description: record.text("shortDescription"),
        tags: record.text("tags"),
    })
}

/// Read and validate every variant row.
///
/// The tier 2 and tier 3 columns are optional; a sheet without them simply
/// has no quantity breaks.
///
/// # Errors
///
/// Returns [`EtlError::MissingColumn`] if a required header is absent, or
/// [`EtlError::InvalidRecord`] for the first row with a missing or
/// malformed required field or a repeated `variantId`.
pub fn read_variants(sheet: &Sheet) -> Result<Vec<VariantRow>, EtlError> {
    sheet.require_columns(&VARIANT_COLUMNS)?;

    let mut seen: HashMap<i64, usize> = HashMap::new();
    let mut variants = Vec::new();

    for record in sheet.records() {
        let variant = variant_from_record(&record)?;
        if let Some(first_row) = seen.insert(variant.variant_id, variant.row) {
            return Err(record.invalid(
                "variantId",
                format!(
                    "duplicate variantId {} (first used on row {first_row})",
                    variant.variant_id
                ),
            ));
        }
        variants.push(variant);
    }

    Ok(variants)
}

fn variant_from_record(record: &Record<'_>) -> Result<VariantRow, EtlError> {
    Ok(VariantRow {
        row: record.row(),
        variant_id: record.required_integer("variantId")?,
        product_id: record.required_integer("productId")?,
        name: record.required_text("name")?,
        presentation: record.text("presentation"),
        dosage: record.scalar("dosage"),
        quantity: record.scalar("quantity"),
        images: record.text("images"),
        tier1_price: record.required_decimal("tier1_price")?,
        tier2: tier_from_record(record, "tier2_minQty", "tier2_price")?,
        tier3: tier_from_record(record, "tier3_minQty", "tier3_price")?,
    })
}

fn tier_from_record(
    record: &Record<'_>,
    min_qty_column: &str,
    price_column: &str,
) -> Result<TierInput, EtlError> {
    Ok(TierInput {
        min_qty: record.integer(min_qty_column)?,
        price: record.decimal(price_column)?,
    })
}

#[cfg(test)]
#[path = "rows_test.rs"]
mod tests;
