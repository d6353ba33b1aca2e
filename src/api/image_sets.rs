use async_trait::async_trait;
use reqwest::multipart::Form;
use serde_json::Value;

use crate::{
    api::{Collection, ListResource},
    error::Result,
    net::{ApiClient, RequestOptions},
    types::{ImageSet, ItemId, ListParams, MutationResponse, ResourceKind},
};

/// Image-set endpoints under `/imagesets/`.
#[derive(Debug, Clone)]
pub struct ImageSetsApi {
    collection: Collection,
}

impl ImageSetsApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            collection: Collection::new(client, ResourceKind::ImageSet),
        }
    }

    /// `GET /imagesets/`
    pub async fn list(&self, params: &ListParams) -> Result<Vec<ImageSet>> {
        self.collection.list(params).await
    }

    /// `POST /imagesets/` as a multipart upload. Announces "图集创建成功".
    pub async fn create(&self, form: Form) -> Result<MutationResponse> {
        self.collection.create(form, "图集创建成功").await
    }

    /// `GET /imagesets/{id}/`
    pub async fn get(&self, id: &ItemId) -> Result<ImageSet> {
        self.collection.get(id).await
    }

    /// `PATCH /imagesets/{id}/`. Announces "图集信息更新成功".
    pub async fn update(&self, id: &ItemId, patch: Value) -> Result<MutationResponse> {
        self.collection.update(id, patch, "图集信息更新成功").await
    }

    /// `DELETE /imagesets/{id}/`. Announces "图集删除成功".
    pub async fn delete(&self, id: &ItemId) -> Result<MutationResponse> {
        self.collection.delete(id, "图集删除成功").await
    }

    /// `GET /imagesets/{id}/pages/`
    pub async fn pages(&self, id: &ItemId) -> Result<Vec<String>> {
        self.collection.pages(id).await
    }

    /// `POST /imagesets/{id}/add-images/` as a multipart upload.
    /// Announces "图片添加成功".
    pub async fn add_images(&self, id: &ItemId, form: Form) -> Result<MutationResponse> {
        self.collection
            .post_action(
                id,
                "add-images",
                RequestOptions::new()
                    .multipart(form)
                    .success_message("图片添加成功"),
            )
            .await
    }
}

#[async_trait]
impl ListResource for ImageSetsApi {
    type Item = ImageSet;

    fn kind(&self) -> ResourceKind {
        self.collection.kind()
    }

    async fn list(&self, params: &ListParams) -> Result<Vec<ImageSet>> {
        ImageSetsApi::list(self, params).await
    }
}
