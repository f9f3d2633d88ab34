use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook_auto, Reader, Sheets};

use crate::error::EtlError;
use crate::rows::{read_products, read_variants, ProductRow, VariantRow};
use crate::sheet::Sheet;

/// Both catalog sheets, fully validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogTables {
    pub products: Vec<ProductRow>,
    pub variants: Vec<VariantRow>,
}

/// Open the workbook at `path` and read the products and variants sheets.
///
/// The format (xlsx, xlsm, xls, ods) is picked from the file extension.
///
/// # Errors
///
/// - [`EtlError::InputNotFound`] if nothing exists at `path`.
/// - [`EtlError::InputParse`] if the file cannot be opened as a workbook or
///   a sheet cannot be decoded.
/// - [`EtlError::MissingSheet`] / [`EtlError::MissingColumn`] for missing
///   tabs or headers.
/// - [`EtlError::InvalidRecord`] for the first malformed row.
pub fn load_workbook(
    path: &Path,
    products_sheet: &str,
    variants_sheet: &str,
) -> Result<CatalogTables, EtlError> {
    if !path.exists() {
        return Err(EtlError::InputNotFound {
            path: path.display().to_string(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| EtlError::InputParse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let products = read_sheet(&mut workbook, path, products_sheet)?;
    let variants = read_sheet(&mut workbook, path, variants_sheet)?;

    let tables = CatalogTables {
        products: read_products(&products)?,
        variants: read_variants(&variants)?,
    };

    tracing::info!(
        path = %path.display(),
        products = tables.products.len(),
        variants = tables.variants.len(),
        "workbook loaded"
    );

    Ok(tables)
}

fn read_sheet(
    workbook: &mut Sheets<BufReader<File>>,
    path: &Path,
    name: &str,
) -> Result<Sheet, EtlError> {
    if !workbook.sheet_names().iter().any(|s| s.as_str() == name) {
        return Err(EtlError::MissingSheet {
            path: path.display().to_string(),
            sheet: name.to_string(),
        });
    }

    let range = workbook
        .worksheet_range(name)
        .map_err(|e| EtlError::InputParse {
            path: path.display().to_string(),
            reason: format!("sheet '{name}': {e}"),
        })?;

    Ok(Sheet::from_range(name, &range))
}
