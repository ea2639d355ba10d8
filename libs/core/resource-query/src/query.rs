use mongodb::bson::{Document, doc};
use mongodb::options::FindOptions;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationResult;
use crate::filter::{FilterFields, build_filter, validate_filter};
use crate::page::{Page, validate_page};
use crate::sort::{Sort, validate_sort};
use crate::spec::ResourceSpec;
use crate::timestamp::{Timestamps, validate_timestamps};

/// Body of `POST /query`: filter, timestamps, sort and page validated together.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery<F> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<F>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
}

impl<F> Default for ListQuery<F> {
    fn default() -> Self {
        Self {
            filter: None,
            timestamps: None,
            sort: None,
            page: None,
        }
    }
}

impl<F> ListQuery<F> {
    /// Unfiltered listing, optionally paged.
    pub fn paged(page: Option<Page>) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn with_filter(filter: F) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }
}

impl<F: FilterFields> ListQuery<F> {
    pub fn filter_document(&self) -> Document {
        build_filter(self.filter.as_ref(), self.timestamps.as_ref())
    }

    pub fn find_options(&self) -> FindOptions {
        find_options(self.sort.as_ref(), self.page.as_ref())
    }
}

/// Body of `DELETE /`: which records a bulk operation targets.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest<F> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<F>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
}

impl<F> Default for FilterRequest<F> {
    fn default() -> Self {
        Self {
            filter: None,
            timestamps: None,
        }
    }
}

impl<F: FilterFields> FilterRequest<F> {
    pub fn filter_document(&self) -> Document {
        build_filter(self.filter.as_ref(), self.timestamps.as_ref())
    }
}

impl<F: Clone> From<&ListQuery<F>> for FilterRequest<F> {
    fn from(query: &ListQuery<F>) -> Self {
        Self {
            filter: query.filter.clone(),
            timestamps: query.timestamps.clone(),
        }
    }
}

/// Filter, then timestamps, then sort, then page; the first violation wins.
pub fn validate_list_query<F: FilterFields>(spec: &ResourceSpec, query: &ListQuery<F>) -> ValidationResult {
    validate_filter(spec, query.filter.as_ref())?;
    validate_timestamps(query.timestamps.as_ref())?;
    validate_sort(query.sort.as_ref(), spec.sortable)?;
    validate_page(query.page.as_ref())
}

pub fn validate_filter_request<F: FilterFields>(
    spec: &ResourceSpec,
    request: &FilterRequest<F>,
) -> ValidationResult {
    validate_filter(spec, request.filter.as_ref())?;
    validate_timestamps(request.timestamps.as_ref())
}

/// Sort (falling back to `_id`, creation order for time-ordered ids) plus skip/limit.
pub fn find_options(sort: Option<&Sort>, page: Option<&Page>) -> FindOptions {
    let mut options = FindOptions::default();
    options.sort = Some(sort.and_then(Sort::to_document).unwrap_or_else(|| doc! { "_id": 1 }));

    if let Some(page) = page {
        options.skip = page.skip();
        options.limit = page.limit;
    }

    options
}
