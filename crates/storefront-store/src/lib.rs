//! Key-value persistence for storefront carts.
//!
//! Every cart category is stored under a fixed key as a JSON array. The
//! store itself only knows about strings; [`read_list`] and [`write_list`]
//! add the JSON layer and the lenient decoding the cart relies on
//! (a missing or corrupt value reads back as an empty list).
//!
//! # Example
//!
//! ```rust
//! use storefront_store::{read_list, write_list, MemoryStore};
//!
//! let store = MemoryStore::new();
//! write_list(&store, "proWorkCart", &[1u32, 2, 3]).unwrap();
//!
//! let items: Vec<u32> = read_list(&store, "proWorkCart").unwrap().into_items();
//! assert_eq!(items, vec![1, 2, 3]);
//! ```

mod error;
mod kv;
mod list;

pub use error::StoreError;
#[cfg(target_arch = "wasm32")]
pub use kv::LocalStorage;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use list::{read_list, write_list, ListLoad};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{read_list, write_list, KeyValueStore, ListLoad, MemoryStore, StoreError};
}
