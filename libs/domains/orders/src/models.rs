use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use resource_query::{
    Conditions, FieldCondition, FilterFields, ResourceSpec, UpdateFields, timestamp,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product id to ordered quantity.
pub type Cart = BTreeMap<String, i64>;

/// Order status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

/// Validation rules for order queries.
pub const ORDERS: ResourceSpec = ResourceSpec {
    name: "order",
    sortable: &["clientId", "status"],
    exclusive: &[("status", "statusRegex")],
    enums: &[("status", OrderStatus::VARIANTS)],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier (UUID v7)
    pub id: String,
    pub client_id: String,
    pub status: OrderStatus,
    pub cart: Cart,
    #[serde(with = "timestamp::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(input: CreateOrder) -> Self {
        let now = timestamp::now();
        Self {
            id: Uuid::now_v7().to_string(),
            client_id: input.client_id,
            status: input.status,
            cart: input.cart,
            created_at: now,
            updated_at: now,
        }
    }

    /// Units across all cart lines, saturating at `i64::MAX`
    pub fn item_count(&self) -> i64 {
        self.cart
            .values()
            .fold(0_i64, |total, count| total.saturating_add(*count))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    #[validate(length(min = 1, message = "provide clientId"))]
    pub client_id: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub cart: Cart,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_regex: Option<String>,
    /// Orders whose cart contains this product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

impl FilterFields for OrderFilter {
    fn conditions(&self) -> Vec<FieldCondition> {
        Conditions::new()
            .equals("clientId", "clientId", self.client_id.as_deref())
            .equals("status", "status", self.status.as_deref())
            .matches("statusRegex", "status", self.status_regex.as_deref())
            .exists(
                "productId",
                self.product_id.as_ref().map(|id| format!("cart.{id}")),
            )
            .build()
    }
}

/// Fields an order update may change. A new cart replaces the old one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart: Option<Cart>,
}

impl UpdateFields for OrderUpdate {
    fn is_empty(&self) -> bool {
        self.status.is_none() && self.cart.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, to_document};
    use resource_query::build_filter;

    #[test]
    fn test_product_filter_checks_cart_key() {
        let filter = OrderFilter {
            client_id: Some("c1".into()),
            product_id: Some("p1".into()),
            ..Default::default()
        };

        assert_eq!(
            build_filter(Some(&filter), None),
            doc! {
                "clientId": "c1",
                "cart.p1": { "$exists": true },
            }
        );
    }

    #[test]
    fn test_cart_stored_as_map() {
        let order = Order::new(CreateOrder {
            client_id: "c1".into(),
            status: OrderStatus::Paid,
            cart: Cart::from([("p1".to_string(), 2), ("p2".to_string(), 1)]),
        });

        let stored = to_document(&order).unwrap();
        assert_eq!(stored.get_str("status").unwrap(), "paid");
        assert_eq!(
            stored.get_document("cart").unwrap(),
            &doc! { "p1": 2_i64, "p2": 1_i64 }
        );
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_item_count_saturates() {
        let order = Order::new(CreateOrder {
            client_id: "c1".into(),
            status: OrderStatus::Pending,
            cart: Cart::from([("p1".to_string(), i64::MAX), ("p2".to_string(), 1)]),
        });

        assert_eq!(order.item_count(), i64::MAX);
    }

    #[test]
    fn test_status_defaults_to_pending() {
        let input: CreateOrder =
            serde_json::from_value(serde_json::json!({ "clientId": "c1", "cart": { "p1": 1 } }))
                .unwrap();
        assert_eq!(input.status, OrderStatus::Pending);
    }
}
