use shelfsort::{
    Direction, InventoryError, InventoryService, InventoryStore, MemoryStore, NewProduct,
    ProductPatch, SearchOutcome, SearchRequest, ServiceConfig, SortField, SortRequest,
};

fn stocked_service() -> InventoryService<MemoryStore> {
    let store = MemoryStore::with_products([
        NewProduct::new("banana", "Produce", 0.25, 120),
        NewProduct::new("Apple", "Produce", 0.5, 80),
        NewProduct::new("carrot", "Produce", 0.1, 300),
        NewProduct::new("apple", "Orchard", 0.45, 80),
        NewProduct::new("Hammer", "Tools", 12.0, 4),
    ])
    .unwrap();
    InventoryService::new(store)
}

fn names(products: &[shelfsort::Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_sort_by_name_ascending_by_default() {
    let service = stocked_service();
    let response = service.handle_sort("name", None).unwrap();

    assert_eq!(response.order, Direction::Ascending);
    assert_eq!(response.count, 5);
    assert_eq!(names(&response.products), vec!["Apple", "apple", "banana", "carrot", "Hammer"]);
}

#[test]
fn test_sort_by_price_descending() {
    let service = stocked_service();
    let response = service.handle_sort("price", Some("DeSc")).unwrap();
    let prices: Vec<f64> = response.products.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![12.0, 0.5, 0.45, 0.25, 0.1]);
}

#[test]
fn test_sort_does_not_touch_the_store() {
    let service = stocked_service();
    let before = service.list_products();
    service.handle_sort("quantity", Some("asc")).unwrap();
    assert_eq!(service.list_products(), before);
}

#[test]
fn test_sort_empty_inventory() {
    let service = InventoryService::new(MemoryStore::new());
    let response = service.handle_sort("category", None).unwrap();
    assert_eq!(response.count, 0);
    assert!(response.products.is_empty());
}

#[test]
fn test_invalid_sort_parameters() {
    let service = stocked_service();

    let err = service.handle_sort("sku", None).unwrap_err();
    assert!(matches!(err, InventoryError::InvalidField { .. }));
    assert!(err.to_string().contains("name, category, price, quantity"));

    let err = service.handle_sort("price", Some("sideways")).unwrap_err();
    assert!(err.to_string().contains("asc, desc"));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_search_found_and_missing() {
    let service = stocked_service();

    let hit = service.handle_search("name", "CARROT").unwrap();
    assert_eq!(hit.into_product().map(|p| p.name), Some("carrot".to_string()));

    let hit = service.handle_search("price", "12").unwrap();
    assert!(matches!(hit, SearchOutcome::Found(ref p) if p.name == "Hammer"));

    let miss = service.handle_search("quantity", "7").unwrap();
    assert_eq!(miss, SearchOutcome::NoMatch);

    let miss = service.handle_search("category", "Dairy").unwrap();
    assert!(!miss.is_found());
}

#[test]
fn test_search_duplicate_values_returns_one_of_them() {
    let service = stocked_service();
    let hit = service.handle_search("quantity", "80").unwrap().into_product().unwrap();
    assert_eq!(hit.quantity, 80);
    assert!(hit.name.eq_ignore_ascii_case("apple"));
}

#[test]
fn test_search_rejects_non_numeric_values() {
    let service = stocked_service();
    let err = service.handle_search("quantity", "lots").unwrap_err();
    assert!(matches!(err, InventoryError::NonNumericValue { .. }));

    let err = service.handle_search("weight", "1").unwrap_err();
    assert!(matches!(err, InventoryError::InvalidField { .. }));
}

#[test]
fn test_configured_default_direction() {
    let config = ServiceConfig::default().with_default_direction(Direction::Descending);
    let store = MemoryStore::with_products([
        NewProduct::new("a", "x", 1.0, 1),
        NewProduct::new("b", "x", 2.0, 2),
    ])
    .unwrap();
    let service = InventoryService::with_config(store, config);

    let response = service.handle_sort("quantity", None).unwrap();
    assert_eq!(response.order, Direction::Descending);
    assert_eq!(names(&response.products), vec!["b", "a"]);
}

#[test]
fn test_collection_limit() {
    let config = ServiceConfig::default().with_max_records(2);
    let store = MemoryStore::with_products([
        NewProduct::new("a", "x", 1.0, 1),
        NewProduct::new("b", "x", 2.0, 2),
        NewProduct::new("c", "x", 3.0, 3),
    ])
    .unwrap();
    let service = InventoryService::with_config(store, config);

    let err = service
        .sort_products(&SortRequest::parse("name", None).unwrap())
        .unwrap_err();
    assert_eq!(err, InventoryError::TooManyRecords { count: 3, limit: 2 });
    assert_eq!(err.status_code(), 413);

    let err = service
        .search_products(&SearchRequest::parse("name", "a").unwrap())
        .unwrap_err();
    assert_eq!(err.status_code(), 413);
}

#[test]
fn test_default_config_has_no_collection_limit() {
    let count = 10_001u32;
    // 7919 is coprime with the prime 10_007, so prices are distinct and unordered.
    let store = MemoryStore::with_products((0..count).map(|i| {
        let price = f64::from((i * 7919) % 10_007);
        NewProduct::new(format!("item-{i}"), "Bulk", price, i % 50)
    }))
    .unwrap();
    let service = InventoryService::new(store);
    assert_eq!(service.config().max_records, None);

    let response = service.handle_sort("price", Some("desc")).unwrap();
    assert_eq!(response.count, count as usize);
    assert!(response.products.windows(2).all(|w| w[0].price >= w[1].price));

    let hit = service.handle_search("quantity", "5").unwrap();
    assert_eq!(hit.into_product().map(|p| p.quantity), Some(5));
}

#[test]
fn test_crud_round_trip() {
    let service = InventoryService::new(MemoryStore::new());

    let created = service
        .create_product(NewProduct::new("Drill", "Tools", 89.0, 2))
        .unwrap();
    assert_eq!(service.get_product(created.id).unwrap(), created);

    let patch = ProductPatch {
        price: Some(79.0),
        ..ProductPatch::default()
    };
    let updated = service.update_product(created.id, patch).unwrap();
    assert_eq!(updated.price, 79.0);
    assert_eq!(updated.created_at, created.created_at);

    let bad = ProductPatch {
        category: Some(String::new()),
        ..ProductPatch::default()
    };
    assert!(service.update_product(created.id, bad).is_err());

    let removed = service.delete_product(created.id).unwrap();
    assert_eq!(removed.id, created.id);
    assert_eq!(
        service.get_product(created.id),
        Err(InventoryError::NotFound(created.id))
    );
    assert!(service.store().list().is_empty());
}

#[test]
fn test_sort_request_parse() {
    let request = SortRequest::parse("quantity", Some("DESC")).unwrap();
    assert_eq!(request.field, SortField::Quantity);
    assert_eq!(request.direction, Direction::Descending);
}

#[test]
fn test_responses_serialize() {
    let service = stocked_service();
    let response = service.handle_sort("price", None).unwrap();
    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["field"], "price");
    assert_eq!(body["order"], "asc");
    assert_eq!(body["products"][0]["name"], "carrot");

    let hit = service.handle_search("name", "hammer").unwrap();
    let body = serde_json::to_value(&hit).unwrap();
    assert_eq!(body["result"], "found");
    assert_eq!(body["product"]["category"], "Tools");
}
