use async_trait::async_trait;
use reqwest::multipart::Form;
use serde_json::Value;

use crate::{
    api::{Collection, ListResource},
    error::Result,
    net::{ApiClient, RequestOptions},
    types::{Comic, ItemId, ListParams, MutationResponse, ResourceKind},
};

/// Comic endpoints under `/comics/`.
///
/// Mutating calls announce their own success message through the client's
/// notifier; see the individual methods for the text.
#[derive(Debug, Clone)]
pub struct ComicsApi {
    collection: Collection,
}

impl ComicsApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            collection: Collection::new(client, ResourceKind::Comic),
        }
    }

    /// `GET /comics/` with arbitrary query parameters.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Comic>> {
        self.collection.list(params).await
    }

    /// `POST /comics/` as a multipart upload. Announces "漫画上传成功".
    pub async fn create(&self, form: Form) -> Result<MutationResponse> {
        self.collection.create(form, "漫画上传成功").await
    }

    /// `GET /comics/{id}/`
    pub async fn get(&self, id: &ItemId) -> Result<Comic> {
        self.collection.get(id).await
    }

    /// `PATCH /comics/{id}/` with a JSON patch. Announces "漫画信息更新成功".
    pub async fn update(&self, id: &ItemId, patch: Value) -> Result<MutationResponse> {
        self.collection.update(id, patch, "漫画信息更新成功").await
    }

    /// `DELETE /comics/{id}/`. Announces "漫画删除成功".
    pub async fn delete(&self, id: &ItemId) -> Result<MutationResponse> {
        self.collection.delete(id, "漫画删除成功").await
    }

    /// `GET /comics/{id}/pages/`: page image URLs in reading order.
    pub async fn pages(&self, id: &ItemId) -> Result<Vec<String>> {
        self.collection.pages(id).await
    }

    /// `POST /comics/{id}/read-frequency/`
    ///
    /// The server answers with the read-count sentinel message, so no
    /// success notice is raised.
    pub async fn increase_read_frequency(&self, id: &ItemId) -> Result<MutationResponse> {
        self.collection
            .post_action(id, "read-frequency", RequestOptions::new())
            .await
    }
}

#[async_trait]
impl ListResource for ComicsApi {
    type Item = Comic;

    fn kind(&self) -> ResourceKind {
        self.collection.kind()
    }

    async fn list(&self, params: &ListParams) -> Result<Vec<Comic>> {
        ComicsApi::list(self, params).await
    }
}
