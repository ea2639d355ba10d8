use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString, VariantNames};
use utoipa::ToSchema;

use crate::error::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn direction(self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// Sort request; `field` and `order` go together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Sort {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// `asc` or `desc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

impl Sort {
    pub fn new(field: &str, order: SortOrder) -> Self {
        Self {
            field: Some(field.to_string()),
            order: Some(order.to_string()),
        }
    }

    /// `{ <field>: 1 | -1, _id: 1 }`, the id keeping equal keys in a stable order.
    pub fn to_document(&self) -> Option<Document> {
        let field = self.field.as_deref()?;
        let order = SortOrder::from_str(self.order.as_deref()?).ok()?;

        let mut sort = Document::new();
        sort.insert(field, order.direction());
        if field != "_id" {
            sort.insert("_id", 1);
        }
        Some(sort)
    }
}

pub fn validate_sort(sort: Option<&Sort>, sortable: &[&str]) -> ValidationResult {
    let Some(sort) = sort else {
        return Ok(());
    };

    let (field, order) = match (sort.field.as_deref(), sort.order.as_deref()) {
        (None, None) => return Ok(()),
        (Some(_), None) => return Err(ValidationError::bad_request("provide sort order")),
        (None, Some(_)) => return Err(ValidationError::bad_request("provide sort field")),
        (Some(field), Some(order)) => (field, order),
    };

    if !sortable.contains(&field) {
        return Err(ValidationError::bad_request(format!(
            "sort field must be one of: {}",
            sortable.join(", ")
        )));
    }

    if SortOrder::from_str(order).is_err() {
        return Err(ValidationError::bad_request(format!(
            "sort order must be one of: {}",
            SortOrder::VARIANTS.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mongodb::bson::doc;

    const SORTABLE: &[&str] = &["name", "costPrice", "createdAt"];

    fn sort(field: Option<&str>, order: Option<&str>) -> Sort {
        Sort {
            field: field.map(str::to_string),
            order: order.map(str::to_string),
        }
    }

    #[test]
    fn test_one_sided_sort_fails() {
        let err = validate_sort(Some(&sort(Some("name"), None)), SORTABLE).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.message, "provide sort order");

        let err = validate_sort(Some(&sort(None, Some("asc"))), SORTABLE).unwrap_err();
        assert_eq!(err.message, "provide sort field");
    }

    #[test]
    fn test_absent_sort_is_valid() {
        assert!(validate_sort(None, SORTABLE).is_ok());
        assert!(validate_sort(Some(&Sort::default()), SORTABLE).is_ok());
    }

    #[test]
    fn test_field_must_be_sortable() {
        let err = validate_sort(Some(&sort(Some("password"), Some("asc"))), SORTABLE).unwrap_err();
        assert_eq!(err.message, "sort field must be one of: name, costPrice, createdAt");
    }

    #[test]
    fn test_order_must_be_asc_or_desc() {
        let err = validate_sort(Some(&sort(Some("name"), Some("ASC"))), SORTABLE).unwrap_err();
        assert_eq!(err.message, "sort order must be one of: asc, desc");

        assert!(validate_sort(Some(&sort(Some("name"), Some("desc"))), SORTABLE).is_ok());
    }

    #[test]
    fn test_to_document() {
        assert_eq!(
            Sort::new("costPrice", SortOrder::Desc).to_document(),
            Some(doc! { "costPrice": -1, "_id": 1 })
        );
        assert_eq!(sort(Some("name"), None).to_document(), None);
    }
}
