pub mod categories;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod pricing;
pub mod rows;
pub mod sheet;
pub mod transform;
pub mod workbook;

pub use categories::{derive_category_definitions, DerivedCategories};
pub use error::EtlError;
pub use output::{render_catalog, write_catalog};
pub use pipeline::{convert_catalog, prepare_catalog, ConversionSummary, PreparedCatalog};
pub use pricing::{build_pricing_tiers, format_price};
pub use rows::{read_products, read_variants, ProductRow, TierInput, VariantRow};
pub use sheet::Sheet;
pub use transform::{build_catalog, split_list, TransformedCatalog};
pub use workbook::{load_workbook, CatalogTables};
