use chrono::{DateTime, Utc};
use resource_query::{
    Conditions, FieldCondition, FilterFields, NumberRange, ResourceSpec, UpdateFields, timestamp,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product type
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
pub enum ProductType {
    /// Shipped goods
    #[default]
    Physical,
    /// Downloadable goods
    Digital,
    Service,
}

/// Product category
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
pub enum ProductCategory {
    #[default]
    General,
    Electronics,
    Clothing,
    Food,
    Books,
    HomeGarden,
    Sports,
    Toys,
    Health,
    Automotive,
    Other,
}

/// Validation rules for product queries.
pub const PRODUCTS: ResourceSpec = ResourceSpec {
    name: "product",
    sortable: &["name", "type", "costPrice", "markup", "createdAt", "updatedAt"],
    exclusive: &[
        ("name", "nameRegex"),
        ("type", "typeRegex"),
        ("category", "categoryRegex"),
    ],
    enums: &[
        ("type", ProductType::VARIANTS),
        ("category", ProductCategory::VARIANTS),
    ],
};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v7)
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub category: ProductCategory,
    /// Purchase price per unit
    pub cost_price: f64,
    /// Markup over the cost price
    pub markup: f64,
    /// Units on hand
    pub count: i64,
    #[serde(with = "timestamp::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(input: CreateProduct) -> Self {
        let now = timestamp::now();
        Self {
            id: Uuid::now_v7().to_string(),
            name: input.name,
            description: input.description.unwrap_or_default(),
            product_type: input.product_type,
            category: input.category,
            cost_price: input.cost_price,
            markup: input.markup,
            count: input.count,
            created_at: now,
            updated_at: now,
        }
    }
}

/// DTO for creating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[serde(default)]
    pub category: ProductCategory,
    #[validate(range(min = 0.0, message = "must be 0 or greater"))]
    pub cost_price: f64,
    #[validate(range(min = 0.0, message = "must be 0 or greater"))]
    pub markup: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "must be 0 or greater"))]
    pub count: i64,
}

/// Filter parameters for product queries.
///
/// Enumerated values arrive as strings so an unknown value is reported with
/// the allowed set rather than as a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_regex: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<NumberRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<NumberRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<NumberRange>,
}

impl FilterFields for ProductFilter {
    fn conditions(&self) -> Vec<FieldCondition> {
        Conditions::new()
            .equals("name", "name", self.name.as_deref())
            .matches("nameRegex", "name", self.name_regex.as_deref())
            .equals("type", "type", self.product_type.as_deref())
            .matches("typeRegex", "type", self.type_regex.as_deref())
            .equals("category", "category", self.category.as_deref())
            .matches("categoryRegex", "category", self.category_regex.as_deref())
            .within("costPrice", "costPrice", self.cost_price.as_ref())
            .within("markup", "markup", self.markup.as_ref())
            .within("count", "count", self.count.as_ref())
            .build()
    }
}

/// Fields a product update may change.
///
/// `countDelta` is applied with `$inc` and never written through `$set`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "must be 0 or greater"))]
    pub cost_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "must be 0 or greater"))]
    pub markup: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "must be 0 or greater"))]
    pub count: Option<i64>,
    /// Signed amount added to the stored count
    #[serde(default, skip_serializing)]
    pub count_delta: Option<i64>,
}

impl UpdateFields for ProductUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.product_type.is_none()
            && self.category.is_none()
            && self.cost_price.is_none()
            && self.markup.is_none()
            && self.count.is_none()
            && self.count_delta.is_none()
    }

    fn count_delta(&self) -> Option<i64> {
        self.count_delta
    }
}
