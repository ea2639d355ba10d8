//! Inventory request validation.
//!
//! Besides the generic query rules, inventory checks reach into the store:
//! a record may only be created for an existing product, at most once, and a
//! count delta is checked against the stored count.

use axum_helpers::errors::validation_message;
use domain_products::{ProductRepository, validation::require_product};
use resource_query::{
    FilterRequest, ListQuery, UpdateManyRequest, UpdateRequest, ValidationError, ValidationResult,
    require_id, require_update_fields,
};
use validator::Validate;

use crate::error::{InventoryError, InventoryResult};
use crate::models::{CreateInventoryRecord, INVENTORY, InventoryFilter, InventoryUpdate};
use crate::repository::InventoryRepository;

pub fn validate_list_query(query: &ListQuery<InventoryFilter>) -> ValidationResult {
    resource_query::validate_list_query(&INVENTORY, query)
}

pub fn validate_filter_request(request: &FilterRequest<InventoryFilter>) -> ValidationResult {
    resource_query::validate_filter_request(&INVENTORY, request)
}

pub fn validate_update_fields(fields: &InventoryUpdate) -> ValidationResult {
    if fields.count.is_some() && fields.count_delta.is_some() {
        return Err(ValidationError::bad_request(
            "provide either count or countDelta",
        ));
    }

    fields
        .validate()
        .map_err(|e| ValidationError::bad_request(validation_message(&e)))
}

pub fn validate_update_request(
    request: &UpdateRequest<InventoryUpdate>,
) -> ValidationResult<&InventoryUpdate> {
    let fields = require_update_fields(request.update_fields.as_ref())?;
    validate_update_fields(fields)?;
    Ok(fields)
}

pub fn validate_update_many(
    request: &UpdateManyRequest<InventoryFilter, InventoryUpdate>,
) -> ValidationResult {
    resource_query::validate_update_many(&INVENTORY, request)?;
    match request.update_fields.as_ref() {
        Some(fields) => validate_update_fields(fields),
        None => Ok(()),
    }
}

/// Field rules, then the product must exist and have no record yet.
pub async fn validate_create<R, P>(
    repository: &R,
    products: &P,
    input: &CreateInventoryRecord,
) -> InventoryResult<()>
where
    R: InventoryRepository + ?Sized,
    P: ProductRepository + ?Sized,
{
    input
        .validate()
        .map_err(|e| ValidationError::bad_request(validation_message(&e)))?;

    let product_id = require_product(products, &input.product_id).await?;
    if repository.exists(product_id).await? {
        return Err(ValidationError::bad_request(format!(
            "inventory record for product {product_id} already exists"
        ))
        .into());
    }

    Ok(())
}

/// Non-blank id of a stored record.
pub async fn require_record<'a, R: InventoryRepository + ?Sized>(
    repository: &R,
    product_id: &'a str,
) -> InventoryResult<&'a str> {
    let product_id = require_id(Some(product_id))?;
    if !repository.exists(product_id).await? {
        return Err(InventoryError::NotFound(product_id.to_string()));
    }
    Ok(product_id)
}

/// The stored count plus `delta` must not drop below zero.
///
/// A failed read is reported as an internal validation failure.
pub async fn validate_count_delta<R: InventoryRepository + ?Sized>(
    repository: &R,
    product_id: &str,
    delta: i64,
) -> ValidationResult {
    let record = repository
        .get(product_id)
        .await
        .map_err(|e| ValidationError::internal(format!("failed to read inventory record: {e}")))?
        .ok_or_else(|| {
            ValidationError::not_found(format!(
                "inventory record for product {product_id} not found"
            ))
        })?;

    resource_query::validate_count_delta(record.count, delta)
}
