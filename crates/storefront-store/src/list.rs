//! JSON list codec on top of a [`KeyValueStore`].

use serde::{de::DeserializeOwned, Serialize};

use crate::{KeyValueStore, StoreError};

/// Outcome of reading a persisted list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListLoad<T> {
    /// Nothing stored under the key.
    Missing,
    /// The stored value decoded cleanly.
    Loaded(Vec<T>),
    /// Something was stored but it is not a JSON array of `T`.
    Corrupt {
        /// Decoder message, for logging.
        reason: String,
    },
}

impl<T> ListLoad<T> {
    /// Collapse to the list, treating missing and corrupt values as empty.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListLoad::Loaded(items) => items,
            ListLoad::Missing | ListLoad::Corrupt { .. } => Vec::new(),
        }
    }

    /// Check if the stored value was unreadable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, ListLoad::Corrupt { .. })
    }
}

/// Read the list stored under `key`.
///
/// Only backend failures are errors; a value that does not decode is
/// reported as [`ListLoad::Corrupt`].
pub fn read_list<T, S>(store: &S, key: &str) -> Result<ListLoad<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(ListLoad::Missing);
    };

    // `null` is what a script writes after JSON.stringify(undefined).
    if raw.trim() == "null" {
        return Ok(ListLoad::Missing);
    }

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => Ok(ListLoad::Loaded(items)),
        Err(e) => Ok(ListLoad::Corrupt {
            reason: e.to_string(),
        }),
    }
}

/// Overwrite the list stored under `key`.
pub fn write_list<T, S>(store: &S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw)
}
