mod common;

use common::TestApp;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use stockroom_api::{
    entities::{purchase, sale},
    errors::ServiceError,
    services::products::CreateProduct,
};
use uuid::Uuid;

async fn create_widget(app: &TestApp, quantity: i32) -> Uuid {
    let product = app
        .state
        .services
        .products
        .create_product(CreateProduct {
            name: "Widget".to_string(),
            sku: "wd-1".to_string(),
            category_id: None,
            supplier_id: None,
            quantity: Some(quantity),
            price: dec!(2.50),
        })
        .await
        .expect("Failed to create product");
    product.id
}

#[tokio::test]
async fn purchase_and_sale_scenario() {
    let app = TestApp::new().await;
    let product_id = create_widget(&app, 10).await;
    let services = &app.state.services;

    // Purchase 5: quantity 10 -> 15, one purchase row at the current price
    let result = services
        .stock
        .purchase(product_id, 5, None)
        .await
        .expect("Purchase failed");
    assert_eq!(result.previous_quantity, 10);
    assert_eq!(result.new_quantity, 15);
    assert_eq!(result.price, dec!(2.50));

    let product = services
        .products
        .get_product(&product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.quantity, 15);

    let purchases = purchase::Entity::find()
        .filter(purchase::Column::ProductId.eq(product_id))
        .all(app.state.db.as_ref())
        .await
        .unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].quantity, 5);
    assert_eq!(purchases[0].price, dec!(2.50));

    // Selling 20 exceeds the 15 on hand: rejected, nothing changes
    let err = services
        .stock
        .sell(product_id, 20, None)
        .await
        .expect_err("Oversell should fail");
    assert!(matches!(err, ServiceError::InsufficientStock(_)));

    let product = services
        .products
        .get_product(&product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.quantity, 15);

    let sales = sale::Entity::find()
        .filter(sale::Column::ProductId.eq(product_id))
        .all(app.state.db.as_ref())
        .await
        .unwrap();
    assert!(sales.is_empty());

    // Selling exactly the on-hand quantity drains the stock to zero
    let result = services
        .stock
        .sell(product_id, 15, None)
        .await
        .expect("Sale failed");
    assert_eq!(result.new_quantity, 0);
    assert_eq!(result.price, dec!(2.50));

    let product = services
        .products
        .get_product(&product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.quantity, 0);

    let sales = sale::Entity::find()
        .filter(sale::Column::ProductId.eq(product_id))
        .all(app.state.db.as_ref())
        .await
        .unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].quantity, 15);
    assert_eq!(sales[0].price, dec!(2.50));
}

#[tokio::test]
async fn purchase_then_sale_restores_quantity() {
    let app = TestApp::new().await;
    let product_id = create_widget(&app, 7).await;
    let services = &app.state.services;

    services.stock.purchase(product_id, 4, None).await.unwrap();
    services.stock.sell(product_id, 4, None).await.unwrap();

    let product = services
        .products
        .get_product(&product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.quantity, 7);
}

#[tokio::test]
async fn movements_on_unknown_product_fail_with_not_found() {
    let app = TestApp::new().await;
    let services = &app.state.services;
    let unknown = Uuid::new_v4();

    let err = services.stock.purchase(unknown, 1, None).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = services.stock.sell(unknown, 1, None).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn non_positive_amounts_are_rejected_without_writing() {
    let app = TestApp::new().await;
    let product_id = create_widget(&app, 10).await;
    let services = &app.state.services;

    for amount in [0, -3] {
        let err = services
            .stock
            .purchase(product_id, amount, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));

        let err = services
            .stock
            .sell(product_id, amount, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));
    }

    let product = services
        .products
        .get_product(&product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.quantity, 10);

    let purchases = purchase::Entity::find()
        .all(app.state.db.as_ref())
        .await
        .unwrap();
    assert!(purchases.is_empty());
    let sales = sale::Entity::find().all(app.state.db.as_ref()).await.unwrap();
    assert!(sales.is_empty());
}

#[tokio::test]
async fn quantity_stays_non_negative_through_mixed_operations() {
    let app = TestApp::new().await;
    let product_id = create_widget(&app, 3).await;
    let services = &app.state.services;

    // A mix of accepted and rejected movements; rejected sales must not
    // push the quantity below zero.
    let operations: [(bool, i32); 8] = [
        (true, 2),  // purchase -> 5
        (false, 4), // sale -> 1
        (false, 9), // rejected, stays 1
        (true, 10), // purchase -> 11
        (false, 11),// sale -> 0
        (false, 1), // rejected, stays 0
        (true, 1),  // purchase -> 1
        (false, 1), // sale -> 0
    ];

    for (is_purchase, amount) in operations {
        let outcome = if is_purchase {
            services.stock.purchase(product_id, amount, None).await
        } else {
            services.stock.sell(product_id, amount, None).await
        };

        if let Err(err) = outcome {
            assert!(matches!(err, ServiceError::InsufficientStock(_)));
        }

        let product = services
            .products
            .get_product(&product_id)
            .await
            .unwrap()
            .unwrap();
        assert!(product.quantity >= 0);
    }

    let product = services
        .products
        .get_product(&product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.quantity, 0);
}

#[tokio::test]
async fn concurrent_sales_cannot_oversell() {
    let app = TestApp::new().await;
    let product_id = create_widget(&app, 10).await;
    let services = app.state.services.clone();

    // Two sales of 7 against 10 units: the transactions serialize on the
    // product row, so exactly one can succeed.
    let first = services.stock.sell(product_id, 7, None);
    let second = services.stock.sell(product_id, 7, None);
    let (first, second) = tokio::join!(first, second);

    let succeeded = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1);
    for outcome in [first, second] {
        if let Err(err) = outcome {
            assert!(matches!(err, ServiceError::InsufficientStock(_)));
        }
    }

    let product = app
        .state
        .services
        .products
        .get_product(&product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.quantity, 3);

    let sales = sale::Entity::find()
        .filter(sale::Column::ProductId.eq(product_id))
        .all(app.state.db.as_ref())
        .await
        .unwrap();
    assert_eq!(sales.len(), 1);
}

#[tokio::test]
async fn movement_price_follows_product_price_at_execution_time() {
    let app = TestApp::new().await;
    let product_id = create_widget(&app, 10).await;
    let services = &app.state.services;

    services.stock.purchase(product_id, 1, None).await.unwrap();

    // Reprice and move again: the second movement records the new price,
    // the first keeps the old one.
    services
        .products
        .update_product(
            product_id,
            stockroom_api::services::products::UpdateProduct {
                price: Some(dec!(3.75)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let result = services.stock.sell(product_id, 2, None).await.unwrap();
    assert_eq!(result.price, dec!(3.75));

    let purchases = purchase::Entity::find()
        .filter(purchase::Column::ProductId.eq(product_id))
        .all(app.state.db.as_ref())
        .await
        .unwrap();
    assert_eq!(purchases[0].price, dec!(2.50));
}
