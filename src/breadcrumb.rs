//! Breadcrumb lookup in a navigation menu tree.
//!
//! The menu is a forest of [`MenuNode`]s. [`find_breadcrumb`] returns the
//! labels from a root down to the node whose path matches, for display as a
//! breadcrumb trail.
//!
//! ```rust
//! use pvo::breadcrumb::{Crumb, MenuNode, find_breadcrumb};
//!
//! let menu = vec![
//!     MenuNode::leaf("Home", "/"),
//!     MenuNode::group("Library", vec![
//!         MenuNode::leaf("Comics", "/library/comics"),
//!         MenuNode::leaf("Image sets", "/library/image-sets"),
//!     ]),
//! ];
//!
//! let trail = find_breadcrumb(&menu, "/library/comics").unwrap();
//! assert_eq!(trail, vec![
//!     Crumb { name: "Library".into(), path: None },
//!     Crumb { name: "Comics".into(), path: Some("/library/comics".into()) },
//! ]);
//! assert!(find_breadcrumb(&menu, "/missing").is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::types::null_as_default;

/// One node of the menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// A node that links somewhere and has no children.
    pub fn leaf(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
            children: Vec::new(),
        }
    }

    /// A pathless node that only groups its children.
    pub fn group(name: impl Into<String>, children: Vec<MenuNode>) -> Self {
        Self {
            name: name.into(),
            path: None,
            children,
        }
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }
}

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub name: String,
    pub path: Option<String>,
}

impl From<&MenuNode> for Crumb {
    fn from(node: &MenuNode) -> Self {
        Self {
            name: node.name.clone(),
            path: node.path.clone(),
        }
    }
}

/// Finds the trail from a root to the first node, in depth-first order,
/// whose path equals `path`.
///
/// Returns `None` if no node in the tree matches.
pub fn find_breadcrumb(items: &[MenuNode], path: &str) -> Option<Vec<Crumb>> {
    search(items, path, Vec::new())
}

fn search(items: &[MenuNode], path: &str, mut trail: Vec<Crumb>) -> Option<Vec<Crumb>> {
    for item in items {
        trail.push(Crumb::from(item));

        if item.path.as_deref() == Some(path) {
            return Some(trail);
        }

        if let Some(found) = search(&item.children, path, trail.clone()) {
            return Some(found);
        }

        trail.pop();
    }
    None
}
