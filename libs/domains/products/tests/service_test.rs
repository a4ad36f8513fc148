//! Service tests against the in-memory store
//!
//! These exercise the service end to end with a real store:
//! - Paging and case-insensitive search windows
//! - Create/get/update/delete round trips
//! - Rejected calls leave the store untouched

use domain_products::*;
use test_utils::{TestDataBuilder, assertions::*};
use uuid::Uuid;

const COLORS: [&str; 5] = ["red", "yellow", "blue", "white", "green"];

/// 100 products, 20 per color, with mixed-case color words, stored sorted by name
fn catalog() -> Vec<Product> {
    let builder = TestDataBuilder::from_test_name("catalog");

    let mut products: Vec<Product> = (0..100u64)
        .map(|i| {
            let color = COLORS[(i % 5) as usize];
            let color = match i % 3 {
                0 => color.to_string(),
                1 => color.to_uppercase(),
                _ => format!("{}{}", color[..1].to_uppercase(), &color[1..]),
            };
            let mut product = Product::new(
                format!("{color} item {i:03}"),
                "seeded",
                builder.price(i),
            );
            product.id = Uuid::now_v7();
            product
        })
        .collect();

    products.sort_by(|a, b| a.name.cmp(&b.name));
    products
}

fn seeded() -> (ProductService<InMemoryProductStore>, InMemoryProductStore, Vec<Product>) {
    let products = catalog();
    let store = InMemoryProductStore::with_products(products.clone());
    (ProductService::new(store.clone()), store, products)
}

#[tokio::test]
async fn test_second_page_of_green_matches() {
    let (service, _, products) = seeded();
    let greens: Vec<Product> = products
        .iter()
        .filter(|p| p.name.to_lowercase().contains("green"))
        .cloned()
        .collect();
    assert_eq!(greens.len(), 20);

    let page = service.get_products(Some("green"), 1, 15).await.unwrap();

    assert_eq!(page, greens[15..20].to_vec());
}

#[tokio::test]
async fn test_term_case_does_not_matter() {
    let (service, _, _) = seeded();

    let lower = service.get_products(Some("blue"), 0, 50).await.unwrap();
    let upper = service.get_products(Some("BLUE"), 0, 50).await.unwrap();

    assert_eq!(lower.len(), 20);
    assert_eq!(lower, upper);
}

#[tokio::test]
async fn test_blank_term_lists_everything_windowed() {
    let (service, _, products) = seeded();

    let page = service.get_products(Some(""), 3, 30).await.unwrap();

    assert_eq!(page, products[90..100].to_vec());
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let (service, _, _) = seeded();

    assert!(service.get_products(None, 10, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_paging_rejected_regardless_of_term() {
    let (service, _, _) = seeded();

    for term in [None, Some(""), Some("green")] {
        assert!(matches!(
            service.get_products(term, -1, 10).await,
            Err(ProductError::OutOfRange("page"))
        ));
        assert!(matches!(
            service.get_products(term, 0, 0).await,
            Err(ProductError::OutOfRange("pageSize"))
        ));
    }
}

#[tokio::test]
async fn test_create_then_get_returns_equivalent_record() {
    let (service, store, _) = seeded();
    let builder = TestDataBuilder::from_test_name("create_then_get");

    let created = service
        .create_product(Some(Product::new(
            builder.name("product", "lamp"),
            "brass",
            builder.price(1),
        )))
        .await
        .unwrap();
    assert!(!created.id.is_nil());
    assert_eq!(store.len().await, 101);

    let fetched = service.get_product_by_id(created.id).await.unwrap();
    let fetched = assert_some(fetched, "created product should be stored");

    assert_uuid_eq(fetched.id, created.id, "fetched product id");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_none_leaves_store_untouched() {
    let (service, store, _) = seeded();

    assert!(matches!(
        service.create_product(None).await,
        Err(ProductError::MissingArgument("product"))
    ));
    assert!(matches!(
        service.create_product(Some(Product::new("", "", 1.0))).await,
        Err(ProductError::Validation(_))
    ));

    assert_eq!(store.len().await, 100);
}

#[tokio::test]
async fn test_unknown_id_is_absent_not_an_error() {
    let (service, _, _) = seeded();
    let unknown = TestDataBuilder::from_test_name("unknown_lookup").unknown_id();

    assert_eq!(service.get_product_by_id(unknown).await.unwrap(), None);
    assert!(matches!(
        service.get_product_by_id(Uuid::nil()).await,
        Err(ProductError::OutOfRange("id"))
    ));
}

#[tokio::test]
async fn test_update_is_reflected_by_get() {
    let (service, _, products) = seeded();
    let mut edited = products[42].clone();
    edited.name = "Renamed".to_string();
    edited.price = 1234.5;

    service.update_product(Some(edited.clone())).await.unwrap();

    let fetched = service.get_product_by_id(edited.id).await.unwrap();
    assert_eq!(fetched, Some(edited));
}

#[tokio::test]
async fn test_update_of_unknown_id_is_not_found() {
    let (service, store, _) = seeded();
    let mut ghost = Product::new("Ghost", "", 3.0);
    ghost.id = TestDataBuilder::from_test_name("update_unknown").unknown_id();

    assert!(matches!(
        service.update_product(Some(ghost.clone())).await,
        Err(ProductError::NotFound(id)) if id == ghost.id
    ));
    assert_eq!(store.len().await, 100);
}

#[tokio::test]
async fn test_delete_removes_record() {
    let (service, store, products) = seeded();
    let id = products[7].id;

    service.delete_product(id).await.unwrap();

    assert_eq!(service.get_product_by_id(id).await.unwrap(), None);
    assert_eq!(store.len().await, 99);
}

#[tokio::test]
async fn test_delete_of_nil_or_unknown_id_is_out_of_range() {
    let (service, store, _) = seeded();
    let unknown = TestDataBuilder::from_test_name("delete_unknown").unknown_id();

    for id in [Uuid::nil(), unknown] {
        assert!(matches!(
            service.delete_product(id).await,
            Err(ProductError::OutOfRange("id"))
        ));
    }
    assert_eq!(store.len().await, 100);
}
