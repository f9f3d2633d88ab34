use crate::app_config::{
    AppConfig, DEFAULT_IMAGES_BASE, DEFAULT_LOG_LEVEL, DEFAULT_OUTPUT_PATH,
    DEFAULT_PRODUCTS_SHEET, DEFAULT_VARIANTS_SHEET, DEFAULT_WORKBOOK_PATH,
};
use crate::ConfigError;

/// Load run configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load run configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build run configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields
/// [`AppConfig::default`].
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "value must be non-empty".to_string(),
            });
        }
        Ok(trimmed.to_string())
    };

    let workbook_path = PathBuf::from(non_empty("CATALOGO_WORKBOOK_PATH", DEFAULT_WORKBOOK_PATH)?);
    let products_sheet = non_empty("CATALOGO_PRODUCTS_SHEET", DEFAULT_PRODUCTS_SHEET)?;
    let variants_sheet = non_empty("CATALOGO_VARIANTS_SHEET", DEFAULT_VARIANTS_SHEET)?;
    let output_path = PathBuf::from(non_empty("CATALOGO_OUTPUT_PATH", DEFAULT_OUTPUT_PATH)?);
    let images_base = non_empty("CATALOGO_IMAGES_BASE", DEFAULT_IMAGES_BASE)?;
    let log_level = or_default("CATALOGO_LOG_LEVEL", DEFAULT_LOG_LEVEL);

    // An empty value is treated the same as an unset one.
    let categories_path = lookup("CATALOGO_CATEGORIES_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    if products_sheet == variants_sheet {
        return Err(ConfigError::InvalidEnvVar {
            var: "CATALOGO_VARIANTS_SHEET".to_string(),
            reason: format!("must differ from the products sheet ('{products_sheet}')"),
        });
    }

    Ok(AppConfig {
        workbook_path,
        products_sheet,
        variants_sheet,
        output_path,
        images_base,
        categories_path,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
