//! Handler tests for Orders domain

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_orders::*;
use domain_products::MockProductRepository;
use http_body_util::BodyExt;
use resource_query::{FilterRequest, ListQuery, UpdateManyRequest};
use serde_json::{Value, json};
use std::sync::Mutex;
use tower::ServiceExt;

#[derive(Default)]
struct InMemoryOrders {
    orders: Mutex<Vec<Order>>,
}

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn get(&self, id: &str) -> OrderResult<Option<Order>> {
        Ok(self.orders.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    async fn get_many(&self, _query: &ListQuery<OrderFilter>) -> OrderResult<Vec<Order>> {
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn count(&self, _request: &FilterRequest<OrderFilter>) -> OrderResult<u64> {
        Ok(self.orders.lock().unwrap().len() as u64)
    }

    async fn create(&self, order: Order) -> OrderResult<Order> {
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn update(&self, id: &str, fields: &OrderUpdate) -> OrderResult<Option<Order>> {
        let mut orders = self.orders.lock().unwrap();
        let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        if let Some(status) = fields.status {
            order.status = status;
        }
        if let Some(cart) = &fields.cart {
            order.cart = cart.clone();
        }
        Ok(Some(order.clone()))
    }

    async fn update_many(
        &self,
        _request: &UpdateManyRequest<OrderFilter, OrderUpdate>,
    ) -> OrderResult<u64> {
        Ok(0)
    }

    async fn delete(&self, id: &str) -> OrderResult<u64> {
        let mut orders = self.orders.lock().unwrap();
        let before = orders.len();
        orders.retain(|o| o.id != id);
        Ok((before - orders.len()) as u64)
    }

    async fn delete_many(&self, _request: &FilterRequest<OrderFilter>) -> OrderResult<u64> {
        Ok(0)
    }

    async fn exists(&self, id: &str) -> OrderResult<bool> {
        Ok(self.orders.lock().unwrap().iter().any(|o| o.id == id))
    }
}

/// Only product `p1` exists.
fn app() -> axum::Router {
    let mut products = MockProductRepository::new();
    products.expect_exists().returning(|id| Ok(id == "p1"));

    handlers::router(OrderService::new(InMemoryOrders::default(), products))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_order_returns_201() {
    let body = json!({ "clientId": "c1", "cart": { "p1": 2 } });
    let response = app().oneshot(json_request("POST", "/", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["collection"][0]["status"], "pending");
    assert_eq!(body["collection"][0]["cart"], json!({ "p1": 2 }));
}

#[tokio::test]
async fn test_create_with_unknown_product_returns_404() {
    let body = json!({ "clientId": "c1", "cart": { "p1": 1, "p2": 1 } });
    let response = app().oneshot(json_request("POST", "/", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response.into_body()).await,
        json!({ "status": 404, "error": "product p2 not found" })
    );
}

#[tokio::test]
async fn test_create_with_padded_product_id_returns_400() {
    let body = json!({ "clientId": "c1", "cart": { " p1 ": 1 } });
    let response = app().oneshot(json_request("POST", "/", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response.into_body()).await["error"],
        "product id \" p1 \" in cart must not have surrounding whitespace"
    );
}

#[tokio::test]
async fn test_create_with_unknown_status_returns_400() {
    let body = json!({ "clientId": "c1", "status": "lost", "cart": { "p1": 1 } });
    let response = app().oneshot(json_request("POST", "/", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = json_body(response.into_body()).await["error"].to_string();
    assert!(error.contains("pending"));
}

#[tokio::test]
async fn test_update_cart_checks_quantities() {
    let app = app();
    let created = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "clientId": "c1", "cart": { "p1": 1 } })))
        .await
        .unwrap();
    let id = json_body(created.into_body()).await["collection"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let update = json!({ "updateFields": { "cart": { "p1": 0 } } });
    let response = app
        .oneshot(json_request("PATCH", &format!("/{id}"), update))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response.into_body()).await["error"],
        "count of product p1 must be 1 or greater, got 0"
    );
}

#[tokio::test]
async fn test_query_with_status_and_regex_rejected() {
    let query = json!({ "filter": { "status": "paid", "statusRegex": "^p" } });
    let response = app().oneshot(json_request("POST", "/query", query)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response.into_body()).await["error"],
        "provide either status or statusRegex"
    );
}

#[tokio::test]
async fn test_delete_missing_order_returns_404() {
    let request = Request::delete("/o404").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response.into_body()).await["error"], "order o404 not found");
}
