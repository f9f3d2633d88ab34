//! End-to-end conversion: workbook in, storefront JSON out.

use catalogo_core::{AppConfig, CatalogDocument, CategoriesFile};

use crate::error::EtlError;
use crate::output::write_catalog;
use crate::transform::{build_catalog, TransformedCatalog};
use crate::workbook::load_workbook;

/// Counts reported after a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub products: usize,
    pub variants: usize,
    pub categories: usize,
    pub synthesized_categories: usize,
    pub orphan_variants: usize,
    pub variants_missing_images: usize,
}

impl From<&TransformedCatalog> for ConversionSummary {
    fn from(catalog: &TransformedCatalog) -> Self {
        Self {
            products: catalog.document.products.len(),
            variants: catalog.document.variant_count(),
            categories: catalog.document.category_definitions.len(),
            synthesized_categories: catalog.synthesized_categories.len(),
            orphan_variants: catalog.orphan_variants.len(),
            variants_missing_images: catalog.variants_missing_images,
        }
    }
}

/// A built document that has not been written anywhere yet.
#[derive(Debug, Clone)]
pub struct PreparedCatalog {
    pub document: CatalogDocument,
    pub summary: ConversionSummary,
}

/// Load the workbook and build the document without writing output.
///
/// 1. Read and validate both sheets.
/// 2. Derive category definitions.
/// 3. Join variants onto products.
///
/// # Errors
///
/// Returns [`EtlError`] if the workbook is missing, structurally broken,
/// or contains an invalid row. Nothing is built in that case.
pub fn prepare_catalog(
    config: &AppConfig,
    categories: &CategoriesFile,
) -> Result<PreparedCatalog, EtlError> {
    tracing::info!(
        workbook = %config.workbook_path.display(),
        products_sheet = %config.products_sheet,
        variants_sheet = %config.variants_sheet,
        "starting catalog conversion"
    );

    let tables = load_workbook(
        &config.workbook_path,
        &config.products_sheet,
        &config.variants_sheet,
    )?;
    let transformed = build_catalog(&tables, categories, &config.images_base);
    let summary = ConversionSummary::from(&transformed);

    Ok(PreparedCatalog {
        document: transformed.document,
        summary,
    })
}

/// Run the whole conversion and write the result to `config.output_path`.
///
/// The output file is only touched once the document has been fully built.
///
/// # Errors
///
/// Returns [`EtlError`] from loading, or [`EtlError::Serialize`] /
/// [`EtlError::Output`] from writing.
pub fn convert_catalog(
    config: &AppConfig,
    categories: &CategoriesFile,
) -> Result<ConversionSummary, EtlError> {
    let prepared = prepare_catalog(config, categories)?;
    write_catalog(&prepared.document, &config.output_path)?;

    tracing::info!(
        output = %config.output_path.display(),
        products = prepared.summary.products,
        variants = prepared.summary.variants,
        categories = prepared.summary.categories,
        "catalog written"
    );

    Ok(prepared.summary)
}
