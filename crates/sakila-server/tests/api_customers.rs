mod common;

use axum::http::{Method, StatusCode};
use common::{count, get, post, send, setup_app};
use serde_json::json;

#[tokio::test]
async fn list_customers_in_id_order() {
    let t = setup_app();
    let (status, body) = get(&t.app, "/customers").await;
    assert_eq!(status, StatusCode::OK);

    let customers = body.as_array().expect("array body");
    assert_eq!(customers.len(), 3);
    assert_eq!(customers[0]["customer_id"], 1);
    assert_eq!(customers[0]["store_id"], 1);
    assert_eq!(customers[0]["first_name"], "MARY");
    assert_eq!(customers[0]["active"], 1);
    assert_eq!(customers[0]["create_date"], "2006-02-14 22:04:36");
    assert_eq!(customers[2]["customer_id"], 3);
}

#[tokio::test]
async fn search_customers_by_each_kind() {
    let t = setup_app();

    let (status, body) = get(&t.app, "/customers/search?type=customer_id&query=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "customer_id": 2,
            "first_name": "PATRICIA",
            "last_name": "JOHNSON",
            "email": "PATRICIA.JOHNSON@sakilacustomer.org"
        }])
    );

    let (_, body) = get(&t.app, "/customers/search?type=first_name&query=lin").await;
    assert_eq!(body[0]["customer_id"], 3);

    let (_, body) = get(&t.app, "/customers/search?type=last_name&query=smi").await;
    assert_eq!(body[0]["customer_id"], 1);
}

#[tokio::test]
async fn search_customers_with_unusable_params_is_empty() {
    let t = setup_app();
    for uri in [
        "/customers/search?type=email&query=mary",
        "/customers/search?type=customer_id&query=abc",
        "/customers/search?type=first_name",
        "/customers/search",
    ] {
        let (status, body) = get(&t.app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!([]), "{uri}");
    }
}

#[tokio::test]
async fn add_customer_returns_new_record() {
    let t = setup_app();
    let (status, body) = post(
        &t.app,
        "/customers/add",
        json!({
            "first_name": "BARBARA",
            "last_name": "JONES",
            "email": "BARBARA.JONES@sakilacustomer.org",
            "store_id": 1,
            "address_id": "1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customer_id"], 4);
    assert_eq!(body["store_id"], 1);
    assert_eq!(body["address_id"], 1);
    assert_eq!(body["last_name"], "JONES");
    assert_eq!(
        count(&t.pool, "SELECT active FROM customer WHERE customer_id = 4"),
        1
    );
}

#[tokio::test]
async fn add_customer_requires_every_field() {
    let t = setup_app();
    let (status, body) = post(
        &t.app,
        "/customers/add",
        json!({"first_name": "BARBARA", "last_name": "JONES", "store_id": 1, "address_id": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(count(&t.pool, "SELECT COUNT(*) FROM customer"), 3);
}

#[tokio::test]
async fn add_customer_with_unknown_address_is_rejected() {
    let t = setup_app();
    let (status, body) = post(
        &t.app,
        "/customers/add",
        json!({
            "first_name": "BARBARA",
            "last_name": "JONES",
            "email": "b@example.org",
            "store_id": 1,
            "address_id": 77
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid store_id or address_id");
}

#[tokio::test]
async fn edit_customer_updates_row() {
    let t = setup_app();
    let (status, body) = send(
        &t.app,
        Method::PUT,
        "/edit_customer/2",
        Some(json!({
            "store_id": 1,
            "first_name": "PAT",
            "last_name": "JOHNSON",
            "email": "pat@example.org",
            "active": "0"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer updated successfully");
    assert_eq!(
        count(&t.pool, "SELECT active FROM customer WHERE customer_id = 2"),
        0
    );

    let (_, body) = get(&t.app, "/customers/search?type=customer_id&query=2").await;
    assert_eq!(body[0]["first_name"], "PAT");
}

#[tokio::test]
async fn edit_customer_validates_input() {
    let t = setup_app();

    let (status, body) = send(
        &t.app,
        Method::PUT,
        "/edit_customer/2",
        Some(json!({"first_name": "PAT"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, body) = send(
        &t.app,
        Method::PUT,
        "/edit_customer/999",
        Some(json!({
            "store_id": 1,
            "first_name": "NO",
            "last_name": "ONE",
            "email": "no@example.org",
            "active": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Customer not found");
}

#[tokio::test]
async fn delete_customer_removes_payments_and_rentals() {
    let t = setup_app();
    let (status, body) = send(&t.app, Method::DELETE, "/delete_customer/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer deleted successfully");

    assert_eq!(
        count(&t.pool, "SELECT COUNT(*) FROM customer WHERE customer_id = 1"),
        0
    );
    assert_eq!(
        count(&t.pool, "SELECT COUNT(*) FROM rental WHERE customer_id = 1"),
        0
    );
    assert_eq!(
        count(&t.pool, "SELECT COUNT(*) FROM payment WHERE customer_id = 1"),
        0
    );

    let (status, _) = send(&t.app, Method::DELETE, "/delete_customer/1", None).await;
    assert_eq!(status, StatusCode::OK, "deleting again is a no-op");
}

#[tokio::test]
async fn failed_delete_rolls_back_and_reports_500() {
    let t = setup_app();
    {
        let conn = t.pool.get().expect("connection");
        conn.execute_batch(
            "CREATE TRIGGER lock_customers BEFORE DELETE ON customer
             BEGIN
                 SELECT RAISE(ABORT, 'customer rows are locked');
             END;",
        )
        .expect("should create trigger");
    }

    let (status, body) = send(&t.app, Method::DELETE, "/delete_customer/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().expect("error message");
    assert!(message.starts_with("Error deleting customer: "), "{message}");
    assert!(message.contains("customer rows are locked"), "{message}");

    assert_eq!(
        count(&t.pool, "SELECT COUNT(*) FROM rental WHERE customer_id = 1"),
        3
    );
    assert_eq!(
        count(&t.pool, "SELECT COUNT(*) FROM payment WHERE customer_id = 1"),
        2
    );
}
