//! Typed request builders for the PVO REST API.
//!
//! One module per server resource:
//!
//! - [`comics`] - `/comics/`
//! - [`image_sets`] - `/imagesets/`
//! - [`category_tags`] - `/meta/category-tags/`
//!
//! The two media kinds share the [`ListResource`] trait, which is all the
//! generic [`Library`](crate::library::Library) needs to fetch a list.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pvo::prelude::*;
//!
//! # async fn example() -> pvo::Result<()> {
//! let client = ApiClient::new(ClientConfig::from_env()?)?;
//! let comics = ComicsApi::new(client.clone());
//! let image_sets = ImageSetsApi::new(client);
//!
//! let latest = comics.list(&ListParams::new().with("ordering", "-add_date")).await?;
//! if let Some(first) = latest.first() {
//!     let pages = comics.pages(&first.id).await?;
//!     println!("{} has {} pages", first.name, pages.len());
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::Result,
    net::{ApiClient, RequestOptions},
    types::{ItemId, LibraryItem, ListParams, MutationResponse, ResourceKind},
};

pub mod category_tags;
pub mod comics;
pub mod image_sets;

pub use category_tags::CategoryTagsApi;
pub use comics::ComicsApi;
pub use image_sets::ImageSetsApi;

/// A resource kind whose collection can be listed.
///
/// Implemented by [`ComicsApi`] and [`ImageSetsApi`]. Test code implements
/// it on fakes to drive a [`Library`](crate::library::Library) without a
/// server.
#[async_trait]
pub trait ListResource: Send + Sync {
    /// Item type returned by the list endpoint.
    type Item: LibraryItem + DeserializeOwned + 'static;

    /// Which resource kind this is; selects storage keys and history type.
    fn kind(&self) -> ResourceKind;

    /// Lists the collection with arbitrary query parameters.
    async fn list(&self, params: &ListParams) -> Result<Vec<Self::Item>>;
}

/// Endpoints shared by both media kinds, parameterized by collection path.
#[derive(Debug, Clone)]
pub(crate) struct Collection {
    client: ApiClient,
    kind: ResourceKind,
}

impl Collection {
    pub(crate) fn new(client: ApiClient, kind: ResourceKind) -> Self {
        Self { client, kind }
    }

    pub(crate) fn kind(&self) -> ResourceKind {
        self.kind
    }

    fn item_path(&self, id: &ItemId, suffix: &str) -> String {
        format!(
            "{}{}/{}",
            self.kind.endpoint(),
            urlencoding::encode(&id.to_string()),
            suffix
        )
    }

    pub(crate) async fn list<T: DeserializeOwned>(&self, params: &ListParams) -> Result<Vec<T>> {
        self.client
            .get(self.kind.endpoint(), RequestOptions::new().query(params.clone()))
            .await
    }

    pub(crate) async fn create(&self, form: Form, message: &str) -> Result<MutationResponse> {
        self.client
            .post(
                self.kind.endpoint(),
                RequestOptions::new().multipart(form).success_message(message),
            )
            .await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, id: &ItemId) -> Result<T> {
        self.client
            .get(&self.item_path(id, ""), RequestOptions::new())
            .await
    }

    pub(crate) async fn update(
        &self,
        id: &ItemId,
        patch: Value,
        message: &str,
    ) -> Result<MutationResponse> {
        self.client
            .patch(
                &self.item_path(id, ""),
                RequestOptions::new().json(patch).success_message(message),
            )
            .await
    }

    pub(crate) async fn delete(&self, id: &ItemId, message: &str) -> Result<MutationResponse> {
        self.client
            .delete(
                &self.item_path(id, ""),
                RequestOptions::new().success_message(message),
            )
            .await
    }

    pub(crate) async fn pages(&self, id: &ItemId) -> Result<Vec<String>> {
        self.client
            .get(&self.item_path(id, "pages/"), RequestOptions::new())
            .await
    }

    pub(crate) async fn post_action(
        &self,
        id: &ItemId,
        action: &str,
        options: RequestOptions,
    ) -> Result<MutationResponse> {
        self.client
            .post(&self.item_path(id, &format!("{}/", action)), options)
            .await
    }
}
