use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::page::Page;

/// Success body for reads and creates.
///
/// `count` is the number of records matching the query, independent of paging;
/// `index`/`limit` echo the page that produced `collection`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectionResponse<T> {
    pub status: u16,
    pub collection: Vec<T>,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl<T> CollectionResponse<T> {
    pub fn ok(collection: Vec<T>, count: u64, page: Option<&Page>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            collection,
            count,
            index: page.and_then(|p| p.index),
            limit: page.and_then(|p| p.limit),
        }
    }

    pub fn single(item: T) -> Self {
        Self::ok(vec![item], 1, None)
    }

    pub fn created(item: T) -> Self {
        Self {
            status: StatusCode::CREATED.as_u16(),
            ..Self::single(item)
        }
    }
}

impl<T: Serialize> IntoResponse for CollectionResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Outcome of a bulk update/delete or a delete by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub success: bool,
    pub affected_count: u64,
}

impl CommandResult {
    /// Successful when at least one record was affected.
    pub fn affected(affected_count: u64) -> Self {
        Self {
            success: affected_count > 0,
            affected_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommandResponse {
    pub status: u16,
    #[serde(flatten)]
    pub result: CommandResult,
}

impl From<CommandResult> for CommandResponse {
    fn from(result: CommandResult) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            result,
        }
    }
}

impl IntoResponse for CommandResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn json_of(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_collection_response_shape() {
        let response = CollectionResponse::ok(vec!["a", "b"], 12, Some(&Page::new(1, 2)));
        let response = response.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_of(response).await,
            json!({ "status": 200, "collection": ["a", "b"], "count": 12, "index": 1, "limit": 2 })
        );
    }

    #[tokio::test]
    async fn test_unpaged_response_omits_page() {
        let response = CollectionResponse::created("a").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            json_of(response).await,
            json!({ "status": 201, "collection": ["a"], "count": 1 })
        );
    }

    #[tokio::test]
    async fn test_command_response_shape() {
        let response = CommandResponse::from(CommandResult::affected(3)).into_response();
        assert_eq!(
            json_of(response).await,
            json!({ "status": 200, "success": true, "affectedCount": 3 })
        );

        let response = CommandResponse::from(CommandResult::affected(0)).into_response();
        assert_eq!(json_of(response).await["success"], false);
    }
}
