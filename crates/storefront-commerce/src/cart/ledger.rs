//! Cart ledger: the ordered, persisted list of line items for one category.

use storefront_store::{read_list, write_list, KeyValueStore, ListLoad};

use crate::cart::{Category, LineItem};
use crate::error::CommerceError;
use crate::ids::ItemId;
use crate::money::Amount;

/// How a ledger's persisted state was found at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing was stored under the key.
    Missing,
    /// Stored entries were read. Entries violating the line-item invariants
    /// (quantity below 1, invalid price, repeated id) are dropped and counted.
    Loaded {
        /// Entries kept.
        kept: usize,
        /// Entries dropped.
        dropped: usize,
    },
    /// The stored value was unreadable; the ledger starts empty.
    Recovered {
        /// Decoder message.
        reason: String,
    },
}

/// Result of a quantity change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The quantity was set.
    Updated {
        /// Quantity before the change.
        previous: u32,
        /// Quantity now stored.
        current: u32,
    },
    /// The request was below 1 and ignored.
    BelowMinimum,
    /// The line was removed (only under the remove-below-minimum policy).
    Removed,
    /// No line with that id.
    NotFound,
}

/// In-memory list of line items mirroring one store entry.
///
/// Insertion order is display order, ids are unique within the ledger, and
/// every mutation rewrites the whole list to the store before returning.
#[derive(Debug)]
pub struct Ledger<S> {
    category: Category,
    key: String,
    items: Vec<LineItem>,
    store: S,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Create an empty ledger without touching the store.
    pub fn empty(category: Category, key: impl Into<String>, store: S) -> Self {
        Self {
            category,
            key: key.into(),
            items: Vec::new(),
            store,
        }
    }

    /// Rehydrate a ledger from the store.
    ///
    /// Only a failing backend is an error; missing or corrupt data yields an
    /// empty ledger and is reported through [`LoadStatus`].
    pub fn load(
        category: Category,
        key: impl Into<String>,
        store: S,
    ) -> Result<(Self, LoadStatus), CommerceError> {
        let mut ledger = Self::empty(category, key, store);
        let status = match read_list::<LineItem, S>(&ledger.store, &ledger.key)? {
            ListLoad::Missing => LoadStatus::Missing,
            ListLoad::Corrupt { reason } => LoadStatus::Recovered { reason },
            ListLoad::Loaded(entries) => {
                let total = entries.len();
                for entry in entries {
                    if entry.is_well_formed() && ledger.position(&entry.id).is_none() {
                        ledger.items.push(entry);
                    }
                }
                LoadStatus::Loaded {
                    kept: ledger.items.len(),
                    dropped: total - ledger.items.len(),
                }
            }
        };
        Ok((ledger, status))
    }

    /// Add one unit of a product.
    ///
    /// Increments the quantity of an existing line, or appends a new line
    /// with quantity 1. Returns the line's quantity after the add.
    pub fn add(
        &mut self,
        id: ItemId,
        name: impl Into<String>,
        unit_price: Amount,
        image_ref: impl Into<String>,
    ) -> Result<u32, CommerceError> {
        if !unit_price.is_valid_price() {
            return Err(CommerceError::InvalidPrice(unit_price.value().to_string()));
        }

        let quantity = match self.items.iter_mut().find(|i| i.id == id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(1)
                    .ok_or(CommerceError::Overflow)?;
                existing.quantity
            }
            None => {
                self.items
                    .push(LineItem::new(id, name, unit_price, image_ref));
                1
            }
        };

        self.persist()?;
        Ok(quantity)
    }

    /// Remove the line with `id`, returning it if it existed.
    ///
    /// Removing a missing id is not an error and still rewrites the store.
    pub fn remove(&mut self, id: &ItemId) -> Result<Option<LineItem>, CommerceError> {
        let removed = self.position(id).map(|idx| self.items.remove(idx));
        self.persist()?;
        Ok(removed)
    }

    /// Set the quantity of the line with `id`.
    ///
    /// Requests below 1 are ignored ([`QuantityChange::BelowMinimum`]) and
    /// nothing is written; so is a missing id.
    pub fn set_quantity(
        &mut self,
        id: &ItemId,
        quantity: i64,
    ) -> Result<QuantityChange, CommerceError> {
        if quantity < 1 {
            return Ok(QuantityChange::BelowMinimum);
        }
        let quantity = u32::try_from(quantity).map_err(|_| CommerceError::Overflow)?;

        let Some(item) = self.items.iter_mut().find(|i| &i.id == id) else {
            return Ok(QuantityChange::NotFound);
        };
        let previous = item.quantity;
        item.quantity = quantity;

        self.persist()?;
        Ok(QuantityChange::Updated {
            previous,
            current: quantity,
        })
    }

    /// Rewrite the whole ledger to the store.
    pub fn persist(&self) -> Result<(), CommerceError> {
        write_list(&self.store, &self.key, &self.items)?;
        Ok(())
    }

    /// Sum of quantities, used for the badge count.
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Amount {
        self.items.iter().map(LineItem::total).sum()
    }

    /// Quantity of the line with `id`, if present.
    pub fn quantity_of(&self, id: &ItemId) -> Option<u32> {
        self.get(id).map(|i| i.quantity)
    }

    /// Get a line by id.
    pub fn get(&self, id: &ItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Lines in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Category this ledger holds.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Key the ledger is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }
}
