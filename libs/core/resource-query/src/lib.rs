//! Request validation and MongoDB query construction shared by every resource.
//!
//! Each resource describes itself once with a [`ResourceSpec`] (sortable
//! fields, mutually exclusive filter parameters, enumerated values) and
//! implements [`FilterFields`] for its filter DTO and [`UpdateFields`] for its
//! partial-update DTO. The functions here do the rest:
//!
//! ```text
//! ListQuery ──validate_list_query──► filter_document + find_options ──► collection.find
//! UpdateManyRequest ──validate_update_many──► filter_document + build_update ──► update_many
//! ```
//!
//! Validators are fail-fast: they return the first [`ValidationError`], whose
//! [`ErrorKind`] decides the HTTP status. Ranges are inclusive on both ends.

pub mod error;
pub mod filter;
pub mod page;
pub mod query;
pub mod range;
pub mod response;
pub mod sort;
pub mod spec;
pub mod timestamp;
pub mod update;

pub use error::{ErrorKind, ValidationError, ValidationResult};
pub use filter::{Condition, Conditions, FieldCondition, FilterFields, build_filter, validate_filter};
pub use page::{Page, validate_page};
pub use query::{FilterRequest, ListQuery, find_options, validate_filter_request, validate_list_query};
pub use range::{NumberRange, validate_number_range};
pub use response::{CollectionResponse, CommandResponse, CommandResult};
pub use sort::{Sort, SortOrder, validate_sort};
pub use spec::ResourceSpec;
pub use timestamp::{DateRange, Timestamps, validate_timestamps};
pub use update::{
    UpdateFields, UpdateManyRequest, UpdateRequest, build_update, require_update_fields,
    validate_count_delta, validate_update_many,
};

/// Blank or missing id.
pub fn require_id(id: Option<&str>) -> ValidationResult<&str> {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ValidationError::bad_request("provide id")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(Some(" p1 ")).unwrap(), "p1");
        assert_eq!(require_id(Some("  ")).unwrap_err().message, "provide id");
        assert_eq!(require_id(None).unwrap_err().kind, ErrorKind::BadRequest);
    }
}
