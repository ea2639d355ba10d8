use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ValidationError, ValidationResult};

/// Numeric range; a missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NumberRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

impl NumberRange {
    pub fn new(start: Option<f64>, end: Option<f64>) -> Self {
        Self { start, end }
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// `{ $gte: start, $lte: end }` with only the present bounds; `None` when
    /// neither bound is set.
    pub fn to_document(&self) -> Option<Document> {
        bounds_document(self.start.map(Bson::Double), self.end.map(Bson::Double))
    }
}

/// Inclusive bounds document shared by numeric and date ranges.
pub(crate) fn bounds_document(start: Option<Bson>, end: Option<Bson>) -> Option<Document> {
    if start.is_none() && end.is_none() {
        return None;
    }

    let mut doc = Document::new();
    if let Some(start) = start {
        doc.insert("$gte", start);
    }
    if let Some(end) = end {
        doc.insert("$lte", end);
    }
    Some(doc)
}

/// Only defined bounds are checked; `end` must not precede `start`.
pub fn validate_number_range(name: &str, range: Option<&NumberRange>) -> ValidationResult {
    let Some(range) = range else {
        return Ok(());
    };

    if let Some(start) = range.start {
        if start < 0.0 {
            return Err(ValidationError::bad_request(format!(
                "{name} start must be 0 or greater"
            )));
        }
    }

    if let Some(end) = range.end {
        if end < 0.0 {
            return Err(ValidationError::bad_request(format!(
                "{name} end must be 0 or greater"
            )));
        }
    }

    if let (Some(start), Some(end)) = (range.start, range.end) {
        if end < start {
            return Err(ValidationError::bad_request(format!(
                "{name} end must be greater than or equal to start"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mongodb::bson::doc;

    #[test]
    fn test_missing_range_is_valid() {
        assert!(validate_number_range("costPrice", None).is_ok());
        assert!(validate_number_range("costPrice", Some(&NumberRange::default())).is_ok());
    }

    #[test]
    fn test_start_after_end_is_bad_request() {
        for (start, end) in [(10.0, 5.0), (0.5, 0.0), (1000.0, 999.99)] {
            let range = NumberRange::new(Some(start), Some(end));
            let err = validate_number_range("markup", Some(&range)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::BadRequest);
            assert_eq!(err.message, "markup end must be greater than or equal to start");
        }
    }

    #[test]
    fn test_equal_bounds_are_valid() {
        let range = NumberRange::new(Some(3.0), Some(3.0));
        assert!(validate_number_range("count", Some(&range)).is_ok());
    }

    #[test]
    fn test_single_bound_only_checks_itself() {
        assert!(validate_number_range("count", Some(&NumberRange::new(Some(0.0), None))).is_ok());
        assert!(validate_number_range("count", Some(&NumberRange::new(None, Some(7.0)))).is_ok());

        let err =
            validate_number_range("count", Some(&NumberRange::new(Some(-1.0), None))).unwrap_err();
        assert_eq!(err.message, "count start must be 0 or greater");

        let err =
            validate_number_range("count", Some(&NumberRange::new(None, Some(-0.5)))).unwrap_err();
        assert_eq!(err.message, "count end must be 0 or greater");
    }

    #[test]
    fn test_to_document_shapes() {
        assert_eq!(NumberRange::default().to_document(), None);
        assert_eq!(
            NumberRange::new(Some(1.0), None).to_document(),
            Some(doc! { "$gte": 1.0 })
        );
        assert_eq!(
            NumberRange::new(None, Some(9.0)).to_document(),
            Some(doc! { "$lte": 9.0 })
        );
        assert_eq!(
            NumberRange::new(Some(1.0), Some(9.0)).to_document(),
            Some(doc! { "$gte": 1.0, "$lte": 9.0 })
        );
    }

    #[test]
    fn test_deserialize_partial_range() {
        let range: NumberRange = serde_json::from_str(r#"{"end": 12}"#).unwrap();
        assert_eq!(range, NumberRange::new(None, Some(12.0)));
    }
}
