use chrono::{DateTime, Utc};
use resource_query::{
    Conditions, FieldCondition, FilterFields, NumberRange, ResourceSpec, UpdateFields, timestamp,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Validation rules for inventory queries.
pub const INVENTORY: ResourceSpec = ResourceSpec {
    name: "inventory record",
    sortable: &["count"],
    exclusive: &[("location", "locationRegex")],
    enums: &[],
};

/// Stock of one product at one location, keyed by the product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub product_id: String,
    /// Warehouse or shelf the stock is kept at
    pub location: String,
    pub count: i64,
    #[serde(with = "timestamp::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

impl InventoryRecord {
    pub fn new(input: CreateInventoryRecord) -> Self {
        let now = timestamp::now();
        Self {
            product_id: input.product_id.trim().to_string(),
            location: input.location,
            count: input.count,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryRecord {
    #[validate(length(min = 1, message = "provide productId"))]
    pub product_id: String,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub location: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "must be 0 or greater"))]
    pub count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<NumberRange>,
}

impl FilterFields for InventoryFilter {
    fn conditions(&self) -> Vec<FieldCondition> {
        Conditions::new()
            .equals("productId", "productId", self.product_id.as_deref())
            .equals("location", "location", self.location.as_deref())
            .matches("locationRegex", "location", self.location_regex.as_deref())
            .within("count", "count", self.count.as_ref())
            .build()
    }
}

/// Fields an inventory update may change.
///
/// `countDelta` is applied with `$inc` and never written through `$set`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "must be 0 or greater"))]
    pub count: Option<i64>,
    /// Signed amount added to the stored count
    #[serde(default, skip_serializing)]
    pub count_delta: Option<i64>,
}

impl UpdateFields for InventoryUpdate {
    fn is_empty(&self) -> bool {
        self.location.is_none() && self.count.is_none() && self.count_delta.is_none()
    }

    fn count_delta(&self) -> Option<i64> {
        self.count_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, to_document};
    use resource_query::{build_filter, build_update};

    #[test]
    fn test_filter_document() {
        let filter = InventoryFilter {
            location_regex: Some("^aisle".into()),
            count: Some(NumberRange::new(Some(1.0), Some(10.0))),
            ..Default::default()
        };

        assert_eq!(
            build_filter(Some(&filter), None),
            doc! {
                "location": { "$regex": "^aisle", "$options": "i" },
                "count": { "$gte": 1.0, "$lte": 10.0 },
            }
        );
    }

    #[test]
    fn test_count_delta_becomes_increment() {
        let update = InventoryUpdate {
            location: Some("B-2".into()),
            count_delta: Some(4),
            ..Default::default()
        };

        let document = build_update(&update).unwrap();
        assert_eq!(document.get_document("$inc").unwrap(), &doc! { "count": 4_i64 });
        assert_eq!(document.get_document("$set").unwrap().get_str("location").unwrap(), "B-2");
    }

    #[test]
    fn test_stored_form_is_camel_case() {
        let record = InventoryRecord::new(CreateInventoryRecord {
            product_id: " p1 ".into(),
            location: "A-1".into(),
            count: 2,
        });

        let stored = to_document(&record).unwrap();
        assert_eq!(stored.get_str("productId").unwrap(), "p1");
        assert!(stored.contains_key("updatedAt"));
    }
}
