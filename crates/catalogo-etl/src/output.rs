use std::ffi::OsString;
use std::path::{Path, PathBuf};

use catalogo_core::CatalogDocument;

use crate::error::EtlError;

/// Serialize the document as the storefront expects it: two-space
/// indentation, keys in construction order, non-ASCII written literally.
///
/// # Errors
///
/// Returns [`EtlError::Serialize`] if serialization fails.
pub fn render_catalog(document: &CatalogDocument) -> Result<Vec<u8>, EtlError> {
    Ok(serde_json::to_vec_pretty(document)?)
}

/// Write the document to `path`, replacing any existing file.
///
/// The JSON goes to a sibling `.tmp` file first and is renamed into place,
/// so readers never observe a half-written catalog.
///
/// # Errors
///
/// Returns [`EtlError::Serialize`] or [`EtlError::Output`].
pub fn write_catalog(document: &CatalogDocument, path: &Path) -> Result<(), EtlError> {
    let bytes = render_catalog(document)?;
    let tmp = temp_path(path);

    std::fs::write(&tmp, &bytes).map_err(|source| EtlError::Output {
        path: tmp.display().to_string(),
        source,
    })?;

    if let Err(source) = std::fs::rename(&tmp, path) {
        if let Err(e) = std::fs::remove_file(&tmp) {
            tracing::warn!(path = %tmp.display(), error = %e, "failed to remove temporary output");
        }
        return Err(EtlError::Output {
            path: path.display().to_string(),
            source,
        });
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use catalogo_core::{CategoryDefinition, CategoryDefinitions, PricingTier, Product, Variant};

    use super::*;

    fn document() -> CatalogDocument {
        let mut defs = CategoryDefinitions::new();
        defs.insert(
            "sueño",
            CategoryDefinition {
                title: "Sueño y Relax".to_string(),
                description: "Descanso".to_string(),
            },
        );
        CatalogDocument {
            products: vec![Product {
                id: 1,
                name: "Melatonina".to_string(),
                brand: "Acme".to_string(),
                category: Some("sueño".to_string()),
                short_description: "Ayuda a dormir".to_string(),
                tags: vec!["sueño".to_string()],
                variants: vec![Variant {
                    variant_id: 10,
                    name: "Melatonina 5mg".to_string(),
                    presentation: "Tabletas".to_string(),
                    dosage: "5".to_string(),
                    quantity: "60".to_string(),
                    images: vec![],
                    pricing_tiers: vec![PricingTier {
                        min_qty: 1,
                        price: "12.50".to_string(),
                        tier_name: "Precio Individual".to_string(),
                    }],
                }],
            }],
            category_definitions: defs,
        }
    }

    #[test]
    fn render_uses_two_space_indent_and_literal_unicode() {
        let text = String::from_utf8(render_catalog(&document()).unwrap()).unwrap();
        assert!(text.starts_with("{\n  \"products\": [\n    {\n      \"id\": 1,"));
        assert!(text.contains("\"sueño\""));
        assert!(!text.contains("\\u00f1"));
        assert!(text.ends_with('}'));
    }

    #[test]
    fn render_puts_products_before_category_definitions() {
        let text = String::from_utf8(render_catalog(&document()).unwrap()).unwrap();
        let products = text.find("\"products\"").unwrap();
        let defs = text.find("\"categoryDefinitions\"").unwrap();
        assert!(products < defs);
    }

    #[test]
    fn write_catalog_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "stale content that is much longer than nothing").unwrap();

        write_catalog(&document(), &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, render_catalog(&document()).unwrap());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn write_catalog_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("products.json");
        let err = write_catalog(&document(), &path).unwrap_err();
        assert!(matches!(err, EtlError::Output { .. }), "unexpected error: {err:?}");
    }

    #[test]
    fn temp_path_appends_suffix() {
        assert_eq!(
            temp_path(Path::new("site/products.json")),
            PathBuf::from("site/products.json.tmp")
        );
    }
}
