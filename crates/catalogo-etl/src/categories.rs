use catalogo_core::{synthesize_definition, CategoriesFile, CategoryDefinitions};

use crate::rows::ProductRow;

/// Category definitions for exactly the codes used by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedCategories {
    pub definitions: CategoryDefinitions,
    /// Codes that had no configured entry and got a generated definition,
    /// in first-seen order.
    pub synthesized: Vec<String>,
}

/// Collect the distinct category codes of `products` in first-seen order and
/// attach a definition to each: the configured one when present, otherwise
/// one generated from the code. Never fails.
#[must_use]
pub fn derive_category_definitions(
    products: &[ProductRow],
    config: &CategoriesFile,
) -> DerivedCategories {
    let mut derived = DerivedCategories::default();

    for code in products.iter().filter_map(|p| p.category.as_deref()) {
        if derived.definitions.contains(code) {
            continue;
        }
        match config.lookup(code) {
            Some(configured) => derived.definitions.insert(code, configured.definition()),
            None => {
                let definition = synthesize_definition(code);
                tracing::info!(
                    category = code,
                    title = %definition.title,
                    "new category detected; generated title and description"
                );
                derived.definitions.insert(code, definition);
                derived.synthesized.push(code.to_string());
            }
        }
    }

    derived
}
