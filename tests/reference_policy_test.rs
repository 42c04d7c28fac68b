mod common;

use common::TestApp;
use rust_decimal_macros::dec;
use stockroom_api::{
    errors::ServiceError,
    services::products::CreateProduct,
    services::suppliers::CreateSupplier,
};
use uuid::Uuid;

#[tokio::test]
async fn deleting_a_category_clears_product_references() {
    let app = TestApp::new().await;
    let services = &app.state.services;

    let category = services
        .categories
        .create_category("Hardware".to_string(), None)
        .await
        .unwrap();

    let product = services
        .products
        .create_product(CreateProduct {
            name: "Widget".to_string(),
            sku: "wd-1".to_string(),
            category_id: Some(category.id),
            supplier_id: None,
            quantity: Some(1),
            price: dec!(2.50),
        })
        .await
        .unwrap();
    assert_eq!(product.category_id, Some(category.id));

    services.categories.delete_category(category.id).await.unwrap();

    // The category is gone and the product survives without a reference
    assert!(services
        .categories
        .get_category(&category.id)
        .await
        .unwrap()
        .is_none());

    let product = services
        .products
        .get_product(&product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.category_id, None);
}

#[tokio::test]
async fn deleting_a_supplier_clears_product_references() {
    let app = TestApp::new().await;
    let services = &app.state.services;

    let supplier = services
        .suppliers
        .create_supplier(CreateSupplier {
            name: "Acme Corp".to_string(),
            contact_person: Some("Jane Doe".to_string()),
            phone: None,
            email: Some("sales@acme.example".to_string()),
            address: None,
        })
        .await
        .unwrap();

    let product = services
        .products
        .create_product(CreateProduct {
            name: "Widget".to_string(),
            sku: "wd-1".to_string(),
            category_id: None,
            supplier_id: Some(supplier.id),
            quantity: Some(1),
            price: dec!(2.50),
        })
        .await
        .unwrap();
    assert_eq!(product.supplier_id, Some(supplier.id));

    services.suppliers.delete_supplier(supplier.id).await.unwrap();

    assert!(services
        .suppliers
        .get_supplier(&supplier.id)
        .await
        .unwrap()
        .is_none());

    let product = services
        .products
        .get_product(&product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.supplier_id, None);
}

#[tokio::test]
async fn deleting_unknown_reference_rows_fails_with_not_found() {
    let app = TestApp::new().await;
    let services = &app.state.services;
    let unknown = Uuid::new_v4();

    let err = services.categories.delete_category(unknown).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = services.suppliers.delete_supplier(unknown).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn categories_and_suppliers_list_ordered_by_name() {
    let app = TestApp::new().await;
    let services = &app.state.services;

    for name in ["Tools", "Adhesives", "Fasteners"] {
        services
            .categories
            .create_category(name.to_string(), None)
            .await
            .unwrap();
    }

    let categories = services.categories.list_categories().await.unwrap();
    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Adhesives", "Fasteners", "Tools"]);
}
