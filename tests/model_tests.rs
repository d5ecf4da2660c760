//! Tests for the catalog, its models and payload validation through the
//! public library API.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;

mod product_tests {
    use super::*;
    use product_catalog::models::{Product, seed_products};

    #[test]
    fn test_product_wire_format_is_camel_case() {
        let product = Product {
            id: "abc".to_string(),
            name: "Kettle".to_string(),
            description: "1.7L".to_string(),
            price: 35.5,
            category: "Kitchen".to_string(),
            in_stock: false,
        };

        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "abc",
                "name": "Kettle",
                "description": "1.7L",
                "price": 35.5,
                "category": "Kitchen",
                "inStock": false
            })
        );
    }

    #[test]
    fn test_seed_catalog_contents() {
        let seeds = seed_products();
        let names: Vec<&str> = seeds.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Laptop", "Smartphone", "Coffee Maker"]);
        assert_eq!(seeds[0].price, 1200.0);
        assert!(!seeds[2].in_stock);
    }
}

mod catalog_tests {
    use super::*;
    use product_catalog::validation::validate_product_payload;
    use product_catalog::{AppError, Catalog, Pagination};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn input(name: &str, category: &str) -> product_catalog::models::ProductInput {
        validate_product_payload(&json!({
            "name": name,
            "description": "test item",
            "price": 10,
            "category": category,
            "inStock": true
        }))
        .unwrap()
    }

    #[test]
    fn test_full_lifecycle() {
        let counter = AtomicUsize::new(100);
        let mut catalog = Catalog::seeded()
            .with_id_generator(move || counter.fetch_add(1, Ordering::SeqCst).to_string());

        let created = catalog.create(input("Toaster", "Kitchen")).unwrap();
        assert_eq!(created.id, "100");
        assert_eq!(catalog.get("100").unwrap(), &created);

        let replaced = catalog.replace("100", input("Oven", "kitchen")).unwrap();
        assert_eq!(replaced.id, "100");
        assert_eq!(replaced.name, "Oven");

        let removed = catalog.remove("100").unwrap();
        assert_eq!(removed, replaced);
        assert!(matches!(catalog.get("100"), Err(AppError::NotFound(_))));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_generated_id_collision_is_skipped() {
        let ids = ["1", "2", "fresh"];
        let next = AtomicUsize::new(0);
        let mut catalog = Catalog::seeded()
            .with_id_generator(move || ids[next.fetch_add(1, Ordering::SeqCst)].to_string());

        let created = catalog.create(input("Lamp", "home")).unwrap();

        assert_eq!(created.id, "fresh");
    }

    #[test]
    fn test_list_filter_and_pagination_compose() {
        let catalog = Catalog::seeded();
        let pagination = Pagination::from_params(Some("1"), Some("5")).unwrap();

        let page = catalog.list(Some("Kitchen"), pagination);

        assert_eq!(page.total, 1);
        assert_eq!(page.products[0].name, "Coffee Maker");
    }

    #[test]
    fn test_search_is_read_only() {
        let catalog = Catalog::seeded();

        let hits = catalog.search(Some("a")).unwrap();

        assert_eq!(hits.len(), 3);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_stats_sum_matches_len() {
        let mut catalog = Catalog::seeded();
        catalog.create(input("Chair", "Furniture")).unwrap();
        catalog.create(input("Table", "FURNITURE")).unwrap();

        let stats = catalog.stats();

        assert_eq!(stats.get("furniture"), Some(&2));
        assert_eq!(stats.values().sum::<usize>(), catalog.len());
    }
}
