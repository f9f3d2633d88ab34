use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::CategoryDefinition;
use crate::ConfigError;

const BUILTIN_CATEGORIES: &str = include_str!("../../../config/categories.yaml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Code as it appears in the products sheet, e.g. `"sueño"`.
    pub code: String,
    pub title: String,
    pub description: String,
}

impl CategoryConfig {
    #[must_use]
    pub fn definition(&self) -> CategoryDefinition {
        CategoryDefinition {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategoryConfig>,
}

impl CategoriesFile {
    /// Finds the configured entry for `code`. Matching is exact.
    #[must_use]
    pub fn lookup(&self, code: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.code == code)
    }
}

/// Load and validate category definitions from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_categories(&content)
}

/// The definitions shipped in `config/categories.yaml`, compiled into the binary.
///
/// # Errors
///
/// Returns `ConfigError` if the embedded file is malformed.
pub fn builtin_categories() -> Result<CategoriesFile, ConfigError> {
    parse_categories(BUILTIN_CATEGORIES)
}

fn parse_categories(content: &str) -> Result<CategoriesFile, ConfigError> {
    let categories_file: CategoriesFile = serde_yaml::from_str(content)?;
    validate_categories(&categories_file)?;
    Ok(categories_file)
}

fn validate_categories(categories_file: &CategoriesFile) -> Result<(), ConfigError> {
    let mut seen_codes = HashSet::new();

    for category in &categories_file.categories {
        if category.code.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category code must be non-empty".to_string(),
            ));
        }

        if category.code.trim() != category.code {
            return Err(ConfigError::Validation(format!(
                "category code '{}' has leading or trailing whitespace",
                category.code
            )));
        }

        if category.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has an empty title",
                category.code
            )));
        }

        if !seen_codes.insert(category.code.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category code: '{}'",
                category.code
            )));
        }
    }

    Ok(())
}

/// Turn a category code into readable text: underscores become spaces.
///
/// `"salud_mujer"` → `"salud mujer"`.
#[must_use]
pub fn humanize_code(code: &str) -> String {
    code.replace('_', " ")
}

/// Build a definition for a code that has no configured entry.
///
/// The title is the humanized code with its first letter uppercased; the
/// description embeds the humanized code unchanged.
#[must_use]
pub fn synthesize_definition(code: &str) -> CategoryDefinition {
    let humanized = humanize_code(code);
    let mut chars = humanized.chars();
    let title = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    CategoryDefinition {
        title,
        description: format!("Descubre nuestra selección de productos para {humanized}."),
    }
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
