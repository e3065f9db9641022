//! Item identifiers.
//!
//! Item ids come straight from the page's `data-product-id` attributes, so
//! they are opaque strings. The newtype keeps them from being confused with
//! names or image references, which are also plain strings.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Product identifier, unique within one ledger. The same id may appear in
/// both ledgers; pair it with a [`Category`](crate::cart::Category) to
/// tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ItemId::new("vest-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""vest-7""#);
        let back: ItemId = serde_json::from_str(r#""vest-7""#).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_conversions() {
        let owned: ItemId = String::from("same").into();
        let borrowed: ItemId = "same".into();
        assert_eq!(owned, borrowed);
        assert_eq!(borrowed.to_string(), "same");
        assert_ne!(borrowed, ItemId::new("different"));
    }

    #[test]
    fn test_lookup_by_str() {
        let ids: HashSet<ItemId> = [ItemId::new("a"), ItemId::new("b")].into_iter().collect();
        assert!(ids.contains("a"));
        assert!(!ids.contains("c"));
    }
}
