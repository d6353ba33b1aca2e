//! Library views: fetch a resource list, hide R18 items, sort.
//!
//! A [`Library`] owns the most recently fetched list of one resource kind
//! and derives two views from it on every read:
//!
//! - [`filtered`](Library::filtered) - R18-flagged items removed unless the
//!   shared [`R18ModeStore`] says otherwise
//! - [`sorted`](Library::sorted) - the filtered view ordered by the current
//!   [`SortSettings`]
//!
//! Nothing is cached, so a change to the list, the R18 toggle or the sort
//! settings is visible on the next read. The same transformations are
//! available on plain vectors through [`LibraryViewExt`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use pvo::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> pvo::Result<()> {
//! let storage = Storage::memory();
//! let client = ApiClient::new(ClientConfig::from_env()?)?;
//! let r18 = Arc::new(R18ModeStore::new(storage.clone()));
//!
//! let comics = ComicLibrary::new(ComicsApi::new(client), r18, storage);
//! comics.fetch(&ListParams::new()).await;
//! comics.change_sort("add_date");
//! comics.change_sort("desc");
//!
//! for comic in comics.sorted() {
//!     println!("{} ({})", comic.name, comic.add_date);
//! }
//! println!("{} visible", comics.count());
//! # Ok(())
//! # }
//! ```

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    api::{ComicsApi, ImageSetsApi, ListResource},
    error::Error,
    storage::Storage,
    store::R18ModeStore,
    types::{LibraryItem, ListParams, ResourceKind, SortField, SortOrder},
};

/// Library of comics.
pub type ComicLibrary = Library<ComicsApi>;

/// Library of image sets.
pub type ImageSetLibrary = Library<ImageSetsApi>;

/// Current sort field and direction of a library view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSettings {
    pub field: SortField,
    pub order: SortOrder,
}

/// Filtering and sorting for lists of library items.
///
/// ```rust
/// use pvo::library::{LibraryViewExt, SortSettings};
/// use pvo::types::{Comic, SortField, SortOrder};
///
/// let comics: Vec<Comic> = serde_json::from_value(serde_json::json!([
///     {"id": 1, "name": "b", "add_date": "2024-01-02", "is_r18": false},
///     {"id": 2, "name": "a", "add_date": "2024-01-03", "is_r18": true},
///     {"id": 3, "name": "c", "add_date": "2024-01-01", "is_r18": false},
/// ]))
/// .unwrap();
///
/// let view = comics.without_r18(false).sorted_by(SortSettings {
///     field: SortField::Name,
///     order: SortOrder::Desc,
/// });
/// let names: Vec<_> = view.iter().map(|c| c.name.as_str()).collect();
/// assert_eq!(names, ["c", "b"]);
/// ```
pub trait LibraryViewExt {
    /// Drops R18-flagged items unless `show_r18` is set.
    fn without_r18(self, show_r18: bool) -> Self;

    /// Sorts by the given settings.
    ///
    /// Ascending order is a stable sort on the field. Descending order is
    /// exactly the ascending order reversed, so items with equal keys also
    /// appear reversed.
    fn sorted_by(self, settings: SortSettings) -> Self;
}

impl<T: LibraryItem> LibraryViewExt for Vec<T> {
    fn without_r18(mut self, show_r18: bool) -> Self {
        if !show_r18 {
            self.retain(|item| !item.is_r18());
        }
        self
    }

    fn sorted_by(mut self, settings: SortSettings) -> Self {
        match settings.field {
            SortField::Name => self.sort_by(|a, b| a.name().cmp(b.name())),
            SortField::AddDate => self.sort_by(|a, b| a.add_date().cmp(b.add_date())),
        }
        if settings.order == SortOrder::Desc {
            self.reverse();
        }
        self
    }
}

#[derive(Debug)]
struct Loaded<T> {
    items: Vec<T>,
    fetch_error: Option<Arc<Error>>,
}

/// Fetched items of one resource kind plus their derived views.
///
/// `Library` is `Send + Sync`; share it with an `Arc` when several tasks
/// need it.
///
/// # Overlapping fetches
///
/// Each [`fetch`](Library::fetch) takes a ticket when it starts. Its
/// outcome is applied only if no later fetch has started in the meantime,
/// so the most recently *started* fetch decides the list even when an older
/// request resolves last.
pub struct Library<A: ListResource> {
    api: A,
    r18: Arc<R18ModeStore>,
    storage: Storage,
    loaded: RwLock<Loaded<A::Item>>,
    sort: RwLock<SortSettings>,
    latest_fetch: AtomicU64,
}

impl<A: ListResource> Library<A> {
    /// Creates an empty library, restoring the persisted sort settings.
    pub fn new(api: A, r18: Arc<R18ModeStore>, storage: Storage) -> Self {
        let kind = api.kind();
        let sort = SortSettings {
            field: storage.load(kind.sort_field_key()).unwrap_or_default(),
            order: storage.load(kind.sort_order_key()).unwrap_or_default(),
        };

        Self {
            api,
            r18,
            storage,
            loaded: RwLock::new(Loaded {
                items: Vec::new(),
                fetch_error: None,
            }),
            sort: RwLock::new(sort),
            latest_fetch: AtomicU64::new(0),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.api.kind()
    }

    /// The underlying API, for calls beyond listing.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetches the list and replaces the current items.
    ///
    /// On failure the items are cleared and the error is kept for
    /// [`fetch_error`](Library::fetch_error); it is not returned. The HTTP
    /// client has already shown the user a notice for it.
    pub async fn fetch(&self, params: &ListParams) {
        let ticket = self.latest_fetch.fetch_add(1, Ordering::SeqCst) + 1;
        self.loaded.write().fetch_error = None;

        let result = self.api.list(params).await;

        let mut loaded = self.loaded.write();
        if self.latest_fetch.load(Ordering::SeqCst) != ticket {
            log::debug!("Discarding outdated {:?} list response", self.kind());
            return;
        }

        match result {
            Ok(items) => {
                log::debug!("Fetched {} {:?} items", items.len(), self.kind());
                loaded.items = items;
            }
            Err(e) => {
                log::error!("Failed to fetch {:?} data: {}", self.kind(), e);
                loaded.items.clear();
                loaded.fetch_error = Some(Arc::new(e));
            }
        }
    }

    /// The error of the last applied fetch, if it failed.
    pub fn fetch_error(&self) -> Option<Arc<Error>> {
        self.loaded.read().fetch_error.clone()
    }

    /// All fetched items, unfiltered.
    pub fn items(&self) -> Vec<A::Item> {
        self.loaded.read().items.clone()
    }

    /// Fetched items with R18 items removed unless R18 mode is on.
    pub fn filtered(&self) -> Vec<A::Item> {
        self.items().without_r18(self.r18.is_r18())
    }

    /// The filtered view in the current sort order.
    pub fn sorted(&self) -> Vec<A::Item> {
        self.filtered().sorted_by(self.sort_settings())
    }

    /// Number of visible items.
    pub fn count(&self) -> usize {
        let show_r18 = self.r18.is_r18();
        self.loaded
            .read()
            .items
            .iter()
            .filter(|item| show_r18 || !item.is_r18())
            .count()
    }

    pub fn sort_settings(&self) -> SortSettings {
        *self.sort.read()
    }

    /// Applies a sort command and persists the change.
    ///
    /// `"asc"` and `"desc"` set the direction. Any other command sets the
    /// field, see [`SortField::from_command`].
    pub fn change_sort(&self, command: &str) {
        let kind = self.kind();
        let mut sort = self.sort.write();

        match SortOrder::from_command(command) {
            Some(order) => {
                sort.order = order;
                self.storage.save(kind.sort_order_key(), &order);
            }
            None => {
                sort.field = SortField::from_command(command);
                self.storage.save(kind.sort_field_key(), &sort.field);
            }
        }
    }
}
