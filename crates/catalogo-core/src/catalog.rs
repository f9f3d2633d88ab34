use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A catalog entry as the storefront consumes it: one product family with
/// all of its purchasable variants nested inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub brand: String,
    /// Category code, e.g. `"vitaminas"`. `None` when the cell was blank.
    pub category: Option<String>,
    pub short_description: String,
    /// Individual tags split from the sheet's comma-separated tag cell.
    pub tags: Vec<String>,
    pub variants: Vec<Variant>,
}

/// A purchasable configuration of a [`Product`], e.g. a bottle size and dose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub variant_id: i64,
    pub name: String,
    pub presentation: String,
    /// Dose exactly as written in the sheet (`"500"`, `"1000 UI"`).
    pub dosage: String,
    pub quantity: String,
    /// Relative image paths, already prefixed with the brand directory.
    pub images: Vec<String>,
    pub pricing_tiers: Vec<PricingTier>,
}

/// A quantity-break price: buy at least `min_qty` units, pay `price` each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub min_qty: i64,
    /// Fixed-point string with exactly two decimals, e.g. `"12.50"`.
    pub price: String,
    pub tier_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub title: String,
    pub description: String,
}

/// Category code → display metadata, kept in first-seen order so the
/// storefront renders category sections in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDefinitions {
    entries: Vec<(String, CategoryDefinition)>,
}

impl CategoryDefinitions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, replacing the existing one for `code` in place.
    pub fn insert(&mut self, code: impl Into<String>, definition: CategoryDefinition) {
        let code = code.into();
        if let Some(slot) = self.entries.iter_mut().find(|(c, _)| *c == code) {
            slot.1 = definition;
        } else {
            self.entries.push((code, definition));
        }
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CategoryDefinition> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, d)| d)
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CategoryDefinitions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, definition) in &self.entries {
            map.serialize_entry(code, definition)?;
        }
        map.end()
    }
}

/// The full document written for the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub products: Vec<Product>,
    pub category_definitions: CategoryDefinitions,
}

impl CatalogDocument {
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.products.iter().map(|p| p.variants.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(min_qty: i64, price: &str) -> PricingTier {
        PricingTier {
            min_qty,
            price: price.to_string(),
            tier_name: "Precio Individual".to_string(),
        }
    }

    fn make_variant(id: i64, tiers: Vec<PricingTier>) -> Variant {
        Variant {
            variant_id: id,
            name: "Magnesio 60 cápsulas".to_string(),
            presentation: "Cápsulas".to_string(),
            dosage: "500".to_string(),
            quantity: "60".to_string(),
            images: vec!["./images/Acme/mag.jpg".to_string()],
            pricing_tiers: tiers,
        }
    }

    fn make_product(variants: Vec<Variant>) -> Product {
        Product {
            id: 1,
            name: "Magnesio".to_string(),
            brand: "Acme".to_string(),
            category: Some("huesos".to_string()),
            short_description: "Citrato de magnesio".to_string(),
            tags: vec!["minerales".to_string()],
            variants,
        }
    }

    fn definition(title: &str) -> CategoryDefinition {
        CategoryDefinition {
            title: title.to_string(),
            description: format!("{title} desc"),
        }
    }

    #[test]
    fn product_serializes_with_camel_case_keys_in_declaration_order() {
        let product = make_product(vec![make_variant(10, vec![tier(1, "9.00")])]);
        let json = serde_json::to_string(&product).unwrap();
        let expected_order = [
            "\"id\"",
            "\"name\"",
            "\"brand\"",
            "\"category\"",
            "\"shortDescription\"",
            "\"tags\"",
            "\"variants\"",
            "\"variantId\"",
            "\"presentation\"",
            "\"dosage\"",
            "\"quantity\"",
            "\"images\"",
            "\"pricingTiers\"",
            "\"minQty\"",
            "\"price\"",
            "\"tierName\"",
        ];
        let mut last = 0;
        for key in expected_order {
            let pos = json[last..]
                .find(key)
                .unwrap_or_else(|| panic!("{key} missing or out of order in {json}"));
            last += pos;
        }
    }

    #[test]
    fn missing_category_serializes_as_null() {
        let mut product = make_product(vec![]);
        product.category = None;
        let value = serde_json::to_value(&product).unwrap();
        assert!(value["category"].is_null());
    }

    #[test]
    fn category_definitions_keep_insertion_order() {
        let mut defs = CategoryDefinitions::new();
        defs.insert("vitaminas", definition("Vitaminas"));
        defs.insert("cardiovascular", definition("Cardio"));
        defs.insert("huesos", definition("Huesos"));
        let json = serde_json::to_string(&defs).unwrap();
        let v = json.find("vitaminas").unwrap();
        let c = json.find("cardiovascular").unwrap();
        let h = json.find("huesos").unwrap();
        assert!(v < c && c < h, "unexpected order: {json}");
    }

    #[test]
    fn category_definitions_insert_replaces_in_place() {
        let mut defs = CategoryDefinitions::new();
        defs.insert("a", definition("A"));
        defs.insert("b", definition("B"));
        defs.insert("a", definition("A2"));
        assert_eq!(defs.len(), 2);
        assert_eq!(defs.codes().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(defs.get("a").unwrap().title, "A2");
    }

    #[test]
    fn document_serializes_top_level_shape() {
        let mut defs = CategoryDefinitions::new();
        defs.insert("huesos", definition("Huesos"));
        let doc = CatalogDocument {
            products: vec![make_product(vec![make_variant(1, vec![tier(1, "1.00")])])],
            category_definitions: defs,
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value["products"].is_array());
        assert_eq!(value["categoryDefinitions"]["huesos"]["title"], "Huesos");
        assert_eq!(doc.variant_count(), 1);
    }
}
