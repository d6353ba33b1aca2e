//! Core data types for library resources, list queries and sorting.
//!
//! This module defines the data structures shared across the crate:
//!
//! - [`Comic`] and [`ImageSet`] - the two resource kinds served by the API
//! - [`CategoryTag`] - tags used to categorize resources
//! - [`MutationResponse`] - payload returned by state-changing calls
//! - [`ListParams`] - arbitrary query parameters for list endpoints
//! - [`SortField`] and [`SortOrder`] - client-side sort settings
//! - [`LibraryItem`] - the fields every resource kind shares
//!
//! Fields the server sends that are not modelled here are kept in each
//! type's `extra` map, so a value read from the API serializes back without
//! losing anything.
//!
//! # Examples
//!
//! ```rust
//! use pvo::types::*;
//!
//! let comic: Comic = serde_json::from_value(serde_json::json!({
//!     "id": 7,
//!     "name": "Summer Days",
//!     "add_date": "2024-06-01T12:00:00Z",
//!     "is_r18": false,
//!     "page_count": 32,
//!     "cover": "/media/7/cover.jpg"
//! }))
//! .unwrap();
//!
//! assert_eq!(comic.id, ItemId::Int(7));
//! assert_eq!(comic.page_count, Some(32));
//! assert!(comic.extra.contains_key("cover"));
//! ```

use derive_builder::Builder;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of a resource as the server sends it.
///
/// The API may use numeric or string identifiers; both are accepted and
/// serialized back in their original form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Str(String),
}

impl ItemId {
    /// Returns `true` for an empty string id, which the server never issues.
    pub fn is_blank(&self) -> bool {
        matches!(self, ItemId::Str(s) if s.trim().is_empty())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(id) => write!(f, "{}", id),
            ItemId::Str(id) => f.write_str(id),
        }
    }
}

/// Reads `null` the same as a missing field, so one unset value cannot
/// fail a whole list.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId::Int(id)
    }
}

impl From<i32> for ItemId {
    fn from(id: i32) -> Self {
        ItemId::Int(id.into())
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        ItemId::Int(id.into())
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::Str(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId::Str(id)
    }
}

/// A comic as returned by the `/comics/` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comic {
    /// Server-side identifier
    pub id: ItemId,

    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Creation date as sent by the server (ISO 8601)
    #[serde(default, deserialize_with = "null_as_default")]
    pub add_date: String,

    /// Adult-content flag
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_r18: bool,

    /// Number of pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,

    /// Everything else the server sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An image set as returned by the `/imagesets/` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSet {
    /// Server-side identifier
    pub id: ItemId,

    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Creation date as sent by the server (ISO 8601)
    #[serde(default, deserialize_with = "null_as_default")]
    pub add_date: String,

    /// Adult-content flag
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_r18: bool,

    /// Number of images in the set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_count: Option<u32>,

    /// Everything else the server sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A category tag from `/meta/category-tags/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTag {
    /// Tag group, e.g. `"author"` or `"genre"`
    #[serde(rename = "type")]
    pub tag_type: String,

    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_r18: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload returned by create, update and delete calls.
///
/// The server always includes a human-readable `msg`; any further fields
/// are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub msg: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The two media categories served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Comic,
    ImageSet,
}

impl ResourceKind {
    /// Collection endpoint, relative to the API base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            ResourceKind::Comic => "/comics/",
            ResourceKind::ImageSet => "/imagesets/",
        }
    }

    /// Value of the `type` field in browsing-history entries.
    pub fn history_type(self) -> &'static str {
        match self {
            ResourceKind::Comic => "comic",
            ResourceKind::ImageSet => "imageset",
        }
    }

    /// Storage key holding this kind's sort field.
    pub fn sort_field_key(self) -> &'static str {
        match self {
            ResourceKind::Comic => "comics-sort-field",
            ResourceKind::ImageSet => "image-sets-sort-field",
        }
    }

    /// Storage key holding this kind's sort direction.
    pub fn sort_order_key(self) -> &'static str {
        match self {
            ResourceKind::Comic => "comics-sort-order",
            ResourceKind::ImageSet => "image-sets-sort-order",
        }
    }
}

/// Fields shared by every resource kind.
///
/// Generic list handling in [`library`](crate::library) only ever looks at
/// these four fields.
pub trait LibraryItem: Clone + Send + Sync {
    fn id(&self) -> &ItemId;
    fn name(&self) -> &str;
    fn add_date(&self) -> &str;
    fn is_r18(&self) -> bool;
}

impl LibraryItem for Comic {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn add_date(&self) -> &str {
        &self.add_date
    }

    fn is_r18(&self) -> bool {
        self.is_r18
    }
}

impl LibraryItem for ImageSet {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn add_date(&self) -> &str {
        &self.add_date
    }

    fn is_r18(&self) -> bool {
        self.is_r18
    }
}

/// Query parameters for list endpoints.
///
/// List endpoints accept arbitrary query parameters, so this is an ordered
/// list of key/value pairs. Build it with [`ListParamsBuilder`] or the
/// chaining [`with`](ListParams::with) helper.
///
/// ```rust
/// use pvo::types::{ListParams, ListParamsBuilder};
///
/// let params = ListParamsBuilder::default()
///     .param("tag", "action")
///     .param("limit", "20")
///     .build()
///     .unwrap();
/// assert_eq!(params.pairs().len(), 2);
///
/// let params = ListParams::new().with("search", "summer");
/// assert_eq!(params.pairs()[0], ("search".to_string(), "summer".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct ListParams {
    #[builder(default, setter(custom))]
    query: Vec<(String, String)>,
}

impl ListParamsBuilder {
    /// Appends one query parameter.
    pub fn param(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }
}

impl ListParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the list with one more parameter appended.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// The parameters in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ListParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            query: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Field used to sort library views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    AddDate,
}

impl SortField {
    /// Interprets a sort command that is not a direction.
    ///
    /// Only `"name"` selects [`SortField::Name`]; every other value sorts by
    /// date added.
    pub fn from_command(command: &str) -> Self {
        if command == "name" {
            SortField::Name
        } else {
            SortField::AddDate
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::AddDate => "add_date",
        }
    }
}

/// Direction used to sort library views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses `"asc"` or `"desc"`; anything else is not a direction.
    pub fn from_command(command: &str) -> Option<Self> {
        match command {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}
