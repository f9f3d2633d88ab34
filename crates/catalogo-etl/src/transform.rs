//! Join product and variant rows into the nested storefront document.

use std::collections::{HashMap, HashSet};

use catalogo_core::{CatalogDocument, CategoriesFile, Product, Variant};

use crate::categories::derive_category_definitions;
use crate::pricing::build_pricing_tiers;
use crate::rows::{ProductRow, VariantRow};
use crate::workbook::CatalogTables;

/// The assembled document plus what was noticed while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedCatalog {
    pub document: CatalogDocument,
    pub synthesized_categories: Vec<String>,
    /// `variantId`s whose `productId` matched no product, in sheet order.
    pub orphan_variants: Vec<i64>,
    pub variants_missing_images: usize,
}

/// Split a comma-separated cell into trimmed, non-empty pieces.
///
/// `Some("a, b")` → `["a", "b"]`; `None` → `[]`.
#[must_use]
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Build the storefront document from validated rows.
///
/// Products keep sheet order; each product's variants are the variant rows
/// pointing at it, in sheet order. Variants pointing at an unknown product
/// are left out and reported.
#[must_use]
pub fn build_catalog(
    tables: &CatalogTables,
    categories: &CategoriesFile,
    images_base: &str,
) -> TransformedCatalog {
    let derived = derive_category_definitions(&tables.products, categories);

    let product_ids: HashSet<i64> = tables.products.iter().map(|p| p.id).collect();
    let mut by_product: HashMap<i64, Vec<&VariantRow>> = HashMap::new();
    let mut orphan_variants = Vec::new();

    for variant in &tables.variants {
        if product_ids.contains(&variant.product_id) {
            by_product.entry(variant.product_id).or_default().push(variant);
        } else {
            tracing::warn!(
                variant_id = variant.variant_id,
                product_id = variant.product_id,
                row = variant.row,
                "variant references an unknown product; leaving it out"
            );
            orphan_variants.push(variant.variant_id);
        }
    }

    let mut variants_missing_images = 0;
    let mut products = Vec::with_capacity(tables.products.len());

    for row in &tables.products {
        let variant_rows = by_product.remove(&row.id).unwrap_or_default();
        let variants = variant_rows
            .into_iter()
            .map(|v| {
                let variant = build_variant(v, &row.brand, images_base);
                if variant.images.is_empty() {
                    variants_missing_images += 1;
                }
                variant
            })
            .collect();
        products.push(build_product(row, variants));
    }

    TransformedCatalog {
        document: CatalogDocument {
            products,
            category_definitions: derived.definitions,
        },
        synthesized_categories: derived.synthesized,
        orphan_variants,
        variants_missing_images,
    }
}

fn build_product(row: &ProductRow, variants: Vec<Variant>) -> Product {
    Product {
        id: row.id,
        name: row.name.clone(),
        brand: row.brand.clone(),
        category: row.category.clone(),
        short_description: row.short_description.clone().unwrap_or_default(),
        tags: split_list(row.tags.as_deref()),
        variants,
    }
}

fn build_variant(row: &VariantRow, brand: &str, images_base: &str) -> Variant {
    let images = image_paths(row.images.as_deref(), brand, images_base);
    if images.is_empty() {
        tracing::warn!(
            variant_id = row.variant_id,
            name = %row.name,
            row = row.row,
            "variant has no images"
        );
    }

    Variant {
        variant_id: row.variant_id,
        name: row.name.clone(),
        presentation: row.presentation.clone().unwrap_or_default(),
        dosage: row.dosage.clone(),
        quantity: row.quantity.clone(),
        images,
        pricing_tiers: build_pricing_tiers(row),
    }
}

/// Prefix each image file name with `{images_base}/{brand}/`.
///
/// Plain string concatenation: the brand is used exactly as written.
fn image_paths(raw: Option<&str>, brand: &str, images_base: &str) -> Vec<String> {
    let base = images_base.trim_end_matches('/');
    split_list(raw)
        .into_iter()
        .map(|file| format!("{base}/{brand}/{file}"))
        .collect()
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
