use serde_json::json;

use crate::{
    error::Result,
    net::{ApiClient, RequestOptions},
    types::{CategoryTag, ListParams, MutationResponse},
};

const ENDPOINT: &str = "/meta/category-tags/";

/// Category-tag endpoints under `/meta/category-tags/`.
///
/// Tags are addressed by their `(type, name)` pair rather than by id, so
/// delete and update send the pair as query parameters or body fields.
#[derive(Debug, Clone)]
pub struct CategoryTagsApi {
    client: ApiClient,
}

impl CategoryTagsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /meta/category-tags/`
    pub async fn list(&self, params: &ListParams) -> Result<Vec<CategoryTag>> {
        self.client
            .get(ENDPOINT, RequestOptions::new().query(params.clone()))
            .await
    }

    /// `POST /meta/category-tags/`. Announces "标签创建成功".
    pub async fn create(&self, tag: &CategoryTag) -> Result<MutationResponse> {
        self.client
            .post(
                ENDPOINT,
                RequestOptions::new()
                    .json(serde_json::to_value(tag)?)
                    .success_message("标签创建成功"),
            )
            .await
    }

    /// `DELETE /meta/category-tags/?type=..&name=..`
    pub async fn delete(&self, tag_type: &str, name: &str) -> Result<MutationResponse> {
        let params = ListParams::new().with("type", tag_type).with("name", name);
        self.client
            .delete(ENDPOINT, RequestOptions::new().query(params))
            .await
    }

    /// `PATCH /meta/category-tags/` setting the tag's R18 flag.
    pub async fn update_r18(&self, tag_type: &str, name: &str, is_r18: bool) -> Result<MutationResponse> {
        self.client
            .patch(
                ENDPOINT,
                RequestOptions::new().json(json!({
                    "type": tag_type,
                    "name": name,
                    "is_r18": is_r18,
                })),
            )
            .await
    }
}
