//! Product request validation on top of the generic resource validators.

use axum_helpers::errors::validation_message;
use resource_query::{
    FilterRequest, ListQuery, UpdateManyRequest, UpdateRequest, ValidationError, ValidationResult,
    require_id, require_update_fields,
};
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{PRODUCTS, ProductFilter, ProductUpdate};
use crate::repository::ProductRepository;

pub fn validate_list_query(query: &ListQuery<ProductFilter>) -> ValidationResult {
    resource_query::validate_list_query(&PRODUCTS, query)
}

pub fn validate_filter_request(request: &FilterRequest<ProductFilter>) -> ValidationResult {
    resource_query::validate_filter_request(&PRODUCTS, request)
}

/// Field rules shared by single and bulk updates.
pub fn validate_update_fields(fields: &ProductUpdate) -> ValidationResult {
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
    request: &UpdateRequest<ProductUpdate>,
) -> ValidationResult<&ProductUpdate> {
    let fields = require_update_fields(request.update_fields.as_ref())?;
    validate_update_fields(fields)?;
    Ok(fields)
}

pub fn validate_update_many(
    request: &UpdateManyRequest<ProductFilter, ProductUpdate>,
) -> ValidationResult {
    resource_query::validate_update_many(&PRODUCTS, request)?;
    match request.update_fields.as_ref() {
        Some(fields) => validate_update_fields(fields),
        None => Ok(()),
    }
}

/// Non-blank id of a stored product.
pub async fn require_product<'a, R: ProductRepository + ?Sized>(
    repository: &R,
    id: &'a str,
) -> ProductResult<&'a str> {
    let id = require_id(Some(id))?;
    if !repository.exists(id).await? {
        return Err(ProductError::NotFound(id.to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use resource_query::{ErrorKind, NumberRange, Sort, SortOrder};

    #[test]
    fn test_name_and_regex_are_exclusive() {
        let query = ListQuery::with_filter(ProductFilter {
            name: Some("Foo".into()),
            name_regex: Some("Fo.*".into()),
            ..Default::default()
        });

        let err = validate_list_query(&query).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.message, "provide either name or nameRegex");
    }

    #[test]
    fn test_malformed_name_regex_is_bad_request() {
        let query = ListQuery::with_filter(ProductFilter {
            name_regex: Some("(".into()),
            ..Default::default()
        });

        let err = validate_list_query(&query).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.message, "nameRegex must be a valid regular expression");
    }

    #[test]
    fn test_unknown_type_lists_allowed_values() {
        let query = ListQuery::with_filter(ProductFilter {
            product_type: Some("gadget".into()),
            ..Default::default()
        });

        let err = validate_list_query(&query).unwrap_err();
        assert_eq!(err.message, "type must be one of: physical, digital, service");
    }

    #[test]
    fn test_range_and_sort_rules() {
        let query = ListQuery::with_filter(ProductFilter {
            markup: Some(NumberRange::new(Some(-1.0), None)),
            ..Default::default()
        });
        assert_eq!(
            validate_list_query(&query).unwrap_err().message,
            "markup start must be 0 or greater"
        );

        let query = ListQuery::<ProductFilter> {
            sort: Some(Sort::new("count", SortOrder::Asc)),
            ..Default::default()
        };
        assert_eq!(
            validate_list_query(&query).unwrap_err().message,
            "sort field must be one of: name, type, costPrice, markup, createdAt, updatedAt"
        );
    }

    #[test]
    fn test_count_and_delta_are_exclusive() {
        let fields = ProductUpdate {
            count: Some(4),
            count_delta: Some(1),
            ..Default::default()
        };
        assert_eq!(
            validate_update_fields(&fields).unwrap_err().message,
            "provide either count or countDelta"
        );
    }

    #[test]
    fn test_negative_cost_price_rejected() {
        let request = UpdateRequest::new(ProductUpdate {
            cost_price: Some(-0.5),
            ..Default::default()
        });
        assert_eq!(
            validate_update_request(&request).unwrap_err().message,
            "cost_price: must be 0 or greater"
        );
    }

    #[test]
    fn test_bulk_update_with_count_delta_rejected() {
        let request = UpdateManyRequest {
            filter: Some(ProductFilter {
                category: Some("books".into()),
                ..Default::default()
            }),
            timestamps: None,
            update_fields: Some(ProductUpdate {
                count_delta: Some(5),
                ..Default::default()
            }),
        };
        assert_eq!(
            validate_update_many(&request).unwrap_err().message,
            "cannot update multiple records with count delta"
        );
    }

    #[tokio::test]
    async fn test_require_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_exists()
            .withf(|id| id == "p1")
            .returning(|_| Ok(true));
        repo.expect_exists()
            .withf(|id| id == "p2")
            .returning(|_| Ok(false));

        assert_eq!(require_product(&repo, " p1 ").await.unwrap(), "p1");
        assert!(matches!(
            require_product(&repo, "p2").await,
            Err(ProductError::NotFound(id)) if id == "p2"
        ));
        assert!(matches!(
            require_product(&repo, "  ").await,
            Err(ProductError::Validation(e)) if e.message == "provide id"
        ));
    }
}
