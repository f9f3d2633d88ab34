use std::path::PathBuf;

pub const DEFAULT_WORKBOOK_PATH: &str = "productos.xlsx";
pub const DEFAULT_PRODUCTS_SHEET: &str = "Productos";
pub const DEFAULT_VARIANTS_SHEET: &str = "Variantes";
pub const DEFAULT_OUTPUT_PATH: &str = "products.json";
pub const DEFAULT_IMAGES_BASE: &str = "./images";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Everything a conversion run needs to know about where to read from and
/// write to. Built by [`crate::load_app_config`] or directly by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub workbook_path: PathBuf,
    pub products_sheet: String,
    pub variants_sheet: String,
    pub output_path: PathBuf,
    /// Directory prefix for variant image paths; the product brand is
    /// appended as a sub-directory.
    pub images_base: String,
    /// YAML file with category definitions. `None` uses the built-in set.
    pub categories_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from(DEFAULT_WORKBOOK_PATH),
            products_sheet: DEFAULT_PRODUCTS_SHEET.to_string(),
            variants_sheet: DEFAULT_VARIANTS_SHEET.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            images_base: DEFAULT_IMAGES_BASE.to_string(),
            categories_path: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
