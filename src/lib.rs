//! # PVO - client library for a comic and image-set media library
//!
//! PVO talks to the media library's REST API and keeps the client-side
//! state a front-end needs between sessions. It provides typed API calls,
//! filtered and sorted library views, persisted preferences and a browsing
//! history.
//!
//! ## Features
//!
//! - **Typed API**: Comics, image sets and category tags with one call per
//!   endpoint
//! - **Central Feedback**: Every request outcome is announced exactly once
//!   through a pluggable [`Notifier`](net::Notifier)
//! - **Library Views**: R18 filtering and persisted sorting, recomputed on
//!   every read
//! - **Preference Stores**: R18 mode, display settings and sidebar state,
//!   persisted on every change
//! - **Browsing History**: Most recent first, deduplicated, capped at 20
//! - **Breadcrumbs**: Root-to-node label trails for a menu tree
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pvo::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> pvo::Result<()> {
//!     let client = ApiClient::new(ClientConfig::from_env()?)?;
//!     let storage = Storage::file("./pvo-state.json");
//!
//!     let r18 = Arc::new(R18ModeStore::new(storage.clone()));
//!     let history = HistoryStore::new(storage.clone());
//!     let comics = ComicLibrary::new(ComicsApi::new(client), r18, storage);
//!
//!     comics.fetch(&ListParams::new()).await;
//!     if let Some(err) = comics.fetch_error() {
//!         eprintln!("could not load comics: {}", err);
//!     }
//!
//!     for comic in comics.sorted().iter().take(5) {
//!         println!("{}", comic.name);
//!         history.add_item(HistoryItem::from_item(ResourceKind::Comic, comic));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`net`]: HTTP client, outcome messages and notifiers
//! - [`api`]: Typed endpoint calls per resource
//! - [`library`]: Fetched lists and their filtered/sorted views
//! - [`store`]: Preference and history stores
//! - [`storage`]: Key-value persistence used by every store
//! - [`breadcrumb`]: Menu tree breadcrumb lookup
//! - [`cli`]: Command bodies of the `pvo` binary
//! - [`types`]: Resource models, query parameters and sort settings
//! - [`config`]: Client configuration
//! - [`error`]: Error type

pub mod api;
pub mod breadcrumb;
pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod net;
pub mod storage;
pub mod store;
pub mod types;

/// Prelude module for convenient imports.
///
/// ```rust
/// use pvo::prelude::*;
///
/// // Now you have access to:
/// // - ApiClient, RequestOptions, Notice, Notifier
/// // - ComicsApi, ImageSetsApi, CategoryTagsApi
/// // - Library, ComicLibrary, ImageSetLibrary, LibraryViewExt
/// // - the preference and history stores, Storage
/// // - Comic, ImageSet, ListParams, SortField, SortOrder, ...
/// ```
pub mod prelude {
    pub use crate::{
        api::{CategoryTagsApi, ComicsApi, ImageSetsApi, ListResource},
        breadcrumb::{Crumb, MenuNode, find_breadcrumb},
        config::ClientConfig,
        library::{ComicLibrary, ImageSetLibrary, Library, LibraryViewExt, SortSettings},
        net::{ApiClient, ChannelNotifier, LogNotifier, Notice, NoticeKind, Notifier, RequestOptions},
        storage::Storage,
        store::{HistoryItem, HistoryStore, R18ModeStore, SettingsStore, UiStore},
        types::{
            CategoryTag, Comic, ImageSet, ItemId, LibraryItem, ListParams, MutationResponse,
            ResourceKind, SortField, SortOrder,
        },
    };
}

// Re-export main types at crate root for direct access
pub use error::{Error, Result};
pub use library::{ComicLibrary, ImageSetLibrary, Library};
pub use net::ApiClient;
pub use storage::Storage;
