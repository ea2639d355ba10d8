use mongodb::bson::{Document, doc, to_document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ValidationError, ValidationResult};
use crate::filter::{FilterFields, build_filter, validate_filter};
use crate::spec::ResourceSpec;
use crate::timestamp::{self, Timestamps, UPDATED_AT, validate_timestamps};

/// Partial update DTO.
///
/// Serialization must skip unset fields and the count delta: the serialized
/// form becomes the `$set` stage.
pub trait UpdateFields: Serialize {
    /// No field would change.
    fn is_empty(&self) -> bool;

    /// Amount to add to the stored count atomically.
    fn count_delta(&self) -> Option<i64> {
        None
    }
}

/// Body of `PATCH /{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest<U> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_fields: Option<U>,
}

impl<U> UpdateRequest<U> {
    pub fn new(update_fields: U) -> Self {
        Self {
            update_fields: Some(update_fields),
        }
    }
}

/// Body of `PATCH /`: a filter plus the fields to set on every match.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManyRequest<F, U> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<F>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_fields: Option<U>,
}

impl<F: FilterFields, U> UpdateManyRequest<F, U> {
    pub fn filter_document(&self) -> Document {
        build_filter(self.filter.as_ref(), self.timestamps.as_ref())
    }
}

/// Present and non-empty update fields.
pub fn require_update_fields<U: UpdateFields>(update_fields: Option<&U>) -> ValidationResult<&U> {
    match update_fields {
        Some(fields) if !fields.is_empty() => Ok(fields),
        _ => Err(ValidationError::bad_request(
            "provide at least one field to update",
        )),
    }
}

/// A count delta is only meaningful against one record.
pub fn validate_update_many<F: FilterFields, U: UpdateFields>(
    spec: &ResourceSpec,
    request: &UpdateManyRequest<F, U>,
) -> ValidationResult {
    let fields = require_update_fields(request.update_fields.as_ref())?;
    if fields.count_delta().is_some() {
        return Err(ValidationError::bad_request(
            "cannot update multiple records with count delta",
        ));
    }

    validate_filter(spec, request.filter.as_ref())?;
    validate_timestamps(request.timestamps.as_ref())
}

/// The stored count after applying `delta` must stay non-negative.
pub fn validate_count_delta(current: i64, delta: i64) -> ValidationResult {
    match current.checked_add(delta) {
        Some(count) if count >= 0 => Ok(()),
        _ => Err(ValidationError::bad_request("not enough products")),
    }
}

/// `{ $set: { ...fields, updatedAt }, $inc: { count: delta } }`.
pub fn build_update<U: UpdateFields>(fields: &U) -> ValidationResult<Document> {
    let mut set = to_document(fields)
        .map_err(|e| ValidationError::internal(format!("failed to encode update: {e}")))?;
    set.insert(UPDATED_AT, timestamp::format_timestamp(&timestamp::now()));

    let mut update = doc! { "$set": set };
    if let Some(delta) = fields.count_delta() {
        update.insert("$inc", doc! { "count": delta });
    }

    Ok(update)
}
