//! Product records and the filter used to look them up.

use serde::{Deserialize, Serialize};

/// A product document as stored in (and returned from) the document store.
///
/// Prices are whole currency units; the catalog does not carry fractional prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: u64,
    /// Average rating in `0.0..=5.0`.
    pub rating: f32,
    #[serde(default)]
    pub features: Vec<String>,
    /// Retailer key used to build the affiliate link (`amazon`, `flipkart`, ...).
    pub retailer: String,
}

/// Lookup filter derived from a free-text shopping query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Lowercased keywords; every keyword must match name, brand or category.
    pub keywords: Vec<String>,
    pub max_price: Option<u64>,
    pub category: Option<String>,
}

impl ProductFilter {
    /// Evaluate the filter against a single product.
    ///
    /// Stores that cannot push the filter down use this directly; SQL-backed
    /// stores mirror the same rules in their query.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }

        let haystack = format!(
            "{} {} {}",
            product.name.to_lowercase(),
            product.brand.to_lowercase(),
            product.category.to_lowercase()
        );
        self.keywords.iter().all(|k| haystack.contains(k.as_str()))
    }
}

/// Fixed product sample served when the document store is unavailable.
///
/// Always exactly two items, so degraded responses have a predictable shape.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: "sample-1".to_string(),
            name: "Lenovo IdeaPad Slim 3".to_string(),
            brand: "Lenovo".to_string(),
            category: "laptop".to_string(),
            price: 45_990,
            rating: 4.3,
            features: vec![
                "Intel Core i5".to_string(),
                "16GB RAM".to_string(),
                "512GB SSD".to_string(),
            ],
            retailer: "amazon".to_string(),
        },
        Product {
            id: "sample-2".to_string(),
            name: "Samsung Galaxy M34 5G".to_string(),
            brand: "Samsung".to_string(),
            category: "smartphone".to_string(),
            price: 16_999,
            rating: 4.1,
            features: vec![
                "6000mAh battery".to_string(),
                "120Hz AMOLED".to_string(),
                "50MP camera".to_string(),
            ],
            retailer: "flipkart".to_string(),
        },
    ]
}
