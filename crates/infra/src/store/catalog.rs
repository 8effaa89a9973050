//! Built-in demo catalog used by the in-memory store.

use shopadvisor_core::Product;

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    brand: &str,
    category: &str,
    price: u64,
    rating: f32,
    features: &[&str],
    retailer: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        category: category.to_string(),
        price,
        rating,
        features: features.iter().map(|f| f.to_string()).collect(),
        retailer: retailer.to_string(),
    }
}

/// Products served in stub mode.
pub fn demo_catalog() -> Vec<Product> {
    vec![
        product("lap-001", "Lenovo IdeaPad Slim 3", "Lenovo", "laptop", 45_990, 4.3, &["Intel Core i5-12450H", "16GB RAM", "512GB SSD"], "amazon"),
        product("lap-002", "HP 15s Ryzen 5", "HP", "laptop", 42_490, 4.2, &["AMD Ryzen 5 5500U", "8GB RAM", "512GB SSD"], "flipkart"),
        product("lap-003", "ASUS Vivobook 15", "ASUS", "laptop", 38_990, 4.1, &["Intel Core i3-1215U", "8GB RAM", "512GB SSD"], "amazon"),
        product("lap-004", "Acer Nitro V Gaming", "Acer", "laptop", 67_990, 4.4, &["Intel Core i5-13420H", "RTX 4050", "16GB RAM"], "amazon"),
        product("lap-005", "Apple MacBook Air M2", "Apple", "laptop", 99_900, 4.7, &["Apple M2", "8GB unified memory", "256GB SSD"], "flipkart"),
        product("lap-006", "Dell Inspiron 3520", "Dell", "laptop", 48_990, 4.0, &["Intel Core i5-1235U", "8GB RAM", "512GB SSD"], "amazon"),
        product("phn-001", "Samsung Galaxy M34 5G", "Samsung", "smartphone", 16_999, 4.1, &["6000mAh battery", "120Hz AMOLED", "50MP camera"], "flipkart"),
        product("phn-002", "Redmi Note 13 Pro", "Xiaomi", "smartphone", 24_999, 4.2, &["200MP camera", "120Hz AMOLED", "67W charging"], "amazon"),
        product("phn-003", "OnePlus Nord CE 3 Lite", "OnePlus", "smartphone", 19_999, 4.3, &["108MP camera", "5000mAh battery", "67W charging"], "amazon"),
        product("phn-004", "Apple iPhone 15", "Apple", "smartphone", 69_900, 4.6, &["A16 Bionic", "48MP camera", "USB-C"], "flipkart"),
        product("aud-001", "boAt Airdopes 141", "boAt", "audio", 1_299, 3.9, &["42h playback", "ENx noise cancellation"], "amazon"),
        product("aud-002", "Sony WH-1000XM5", "Sony", "audio", 29_990, 4.6, &["Active noise cancellation", "30h battery"], "amazon"),
        product("tv-001", "Xiaomi Smart TV X 43", "Xiaomi", "television", 26_999, 4.2, &["43-inch 4K", "Dolby Vision", "Google TV"], "flipkart"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_ratings_in_range() {
        let catalog = demo_catalog();
        let mut ids: Vec<_> = catalog.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
        assert!(catalog.iter().all(|p| (0.0..=5.0).contains(&p.rating)));
    }
}
