mod common;

use common::TestApp;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stockroom_api::services::products::CreateProduct;

fn new_product(name: &str, sku: &str, quantity: i32, price: Decimal) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        sku: sku.to_string(),
        category_id: None,
        supplier_id: None,
        quantity: Some(quantity),
        price,
    }
}

#[tokio::test]
async fn empty_inventory_yields_zeroed_dashboard() {
    let app = TestApp::new().await;

    let metrics = app.state.services.reports.dashboard().await.unwrap();
    assert_eq!(metrics.total_products, 0);
    assert_eq!(metrics.total_units, 0);
    assert_eq!(metrics.inventory_value, Decimal::ZERO);
    assert!(metrics.low_stock.is_empty());
}

#[tokio::test]
async fn dashboard_aggregates_units_and_value() {
    let app = TestApp::new().await;
    let services = &app.state.services;

    services
        .products
        .create_product(new_product("Widget", "wd-1", 10, dec!(2.50)))
        .await
        .unwrap();
    services
        .products
        .create_product(new_product("Gadget", "gd-1", 3, dec!(1.00)))
        .await
        .unwrap();

    let metrics = services.reports.dashboard().await.unwrap();
    assert_eq!(metrics.total_products, 2);
    assert_eq!(metrics.total_units, 13);
    assert_eq!(metrics.inventory_value, dec!(28.00));
}

#[tokio::test]
async fn low_stock_contains_exactly_the_products_at_or_below_threshold() {
    let app = TestApp::new().await;
    let services = &app.state.services;

    // 5 is low stock, 6 is not; result is ordered by name
    services
        .products
        .create_product(new_product("Bolts", "bl-1", 2, dec!(0.10)))
        .await
        .unwrap();
    services
        .products
        .create_product(new_product("Anchors", "an-1", 5, dec!(0.25)))
        .await
        .unwrap();
    services
        .products
        .create_product(new_product("Screws", "sc-1", 6, dec!(0.05)))
        .await
        .unwrap();

    let metrics = services.reports.dashboard().await.unwrap();
    let names: Vec<_> = metrics.low_stock.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Anchors", "Bolts"]);
}

#[tokio::test]
async fn dashboard_tracks_stock_movements() {
    let app = TestApp::new().await;
    let services = &app.state.services;

    let product = services
        .products
        .create_product(new_product("Widget", "wd-1", 10, dec!(2.50)))
        .await
        .unwrap();

    services.stock.purchase(product.id, 5, None).await.unwrap();
    let metrics = services.reports.dashboard().await.unwrap();
    assert_eq!(metrics.total_units, 15);
    assert_eq!(metrics.inventory_value, dec!(37.50));

    services.stock.sell(product.id, 12, None).await.unwrap();
    let metrics = services.reports.dashboard().await.unwrap();
    assert_eq!(metrics.total_units, 3);
    assert_eq!(metrics.inventory_value, dec!(7.50));
    // Down to 3 units: the product is now on the low-stock list
    assert_eq!(metrics.low_stock.len(), 1);
    assert_eq!(metrics.low_stock[0].id, product.id);
}
