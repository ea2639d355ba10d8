use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ValidationError, ValidationResult};

/// Zero-based page request; `index` and `limit` go together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl Page {
    pub fn new(index: i64, limit: i64) -> Self {
        Self {
            index: Some(index),
            limit: Some(limit),
        }
    }

    /// Documents to skip, `index * limit`.
    pub fn skip(&self) -> Option<u64> {
        let (index, limit) = (self.index?, self.limit?);
        u64::try_from(index.checked_mul(limit)?).ok()
    }
}

pub fn validate_page(page: Option<&Page>) -> ValidationResult {
    let Some(page) = page else {
        return Ok(());
    };

    match (page.index, page.limit) {
        (None, None) => Ok(()),
        (Some(_), None) => Err(ValidationError::bad_request("provide page limit")),
        (None, Some(_)) => Err(ValidationError::bad_request("provide page index")),
        (Some(index), _) if index < 0 => {
            Err(ValidationError::bad_request("index must be 0 or greater"))
        }
        (_, Some(limit)) if limit < 1 => {
            Err(ValidationError::bad_request("limit must be 1 or greater"))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_zero_index_is_valid() {
        assert!(validate_page(Some(&Page::new(0, 10))).is_ok());
    }

    #[test]
    fn test_zero_limit_fails() {
        for index in [0, 1, 50] {
            let err = validate_page(Some(&Page::new(index, 0))).unwrap_err();
            assert_eq!(err.kind, ErrorKind::BadRequest);
            assert_eq!(err.message, "limit must be 1 or greater");
        }
    }

    #[test]
    fn test_negative_index_fails() {
        let err = validate_page(Some(&Page::new(-1, 10))).unwrap_err();
        assert_eq!(err.message, "index must be 0 or greater");
    }

    #[test]
    fn test_incomplete_page_fails() {
        let only_index = Page {
            index: Some(0),
            limit: None,
        };
        assert_eq!(
            validate_page(Some(&only_index)).unwrap_err().message,
            "provide page limit"
        );

        let only_limit = Page {
            index: None,
            limit: Some(5),
        };
        assert_eq!(
            validate_page(Some(&only_limit)).unwrap_err().message,
            "provide page index"
        );
    }

    #[test]
    fn test_skip() {
        assert_eq!(Page::new(0, 10).skip(), Some(0));
        assert_eq!(Page::new(3, 25).skip(), Some(75));
        assert_eq!(Page::default().skip(), None);
    }
}
