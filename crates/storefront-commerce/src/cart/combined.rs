//! Combined view over both ledgers.

use storefront_store::KeyValueStore;

use crate::cart::{Category, Ledger, LineItem};
use crate::ids::ItemId;
use crate::money::Amount;

/// A line item tagged with the ledger it came from.
///
/// `(category, item.id)` is the entry's identity: the same id may exist in
/// both ledgers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedEntry<'a> {
    /// Ledger the item belongs to.
    pub category: Category,
    /// The line item.
    pub item: &'a LineItem,
}

/// Concatenation of the primary and secondary ledgers, for rendering and
/// summary computation only. Never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedView<'a> {
    entries: Vec<CombinedEntry<'a>>,
}

impl<'a> CombinedView<'a> {
    /// Build a view from the two item lists, primary first.
    pub fn new(primary: &'a [LineItem], secondary: &'a [LineItem]) -> Self {
        let entries = primary
            .iter()
            .map(|item| CombinedEntry {
                category: Category::Primary,
                item,
            })
            .chain(secondary.iter().map(|item| CombinedEntry {
                category: Category::Secondary,
                item,
            }))
            .collect();
        Self { entries }
    }

    /// Build a view from two ledgers.
    pub fn from_ledgers<S: KeyValueStore>(primary: &'a Ledger<S>, secondary: &'a Ledger<S>) -> Self {
        Self::new(primary.items(), secondary.items())
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[CombinedEntry<'a>] {
        &self.entries
    }

    /// Iterate over entries.
    pub fn iter(&self) -> impl Iterator<Item = &CombinedEntry<'a>> {
        self.entries.iter()
    }

    /// Check if both ledgers are empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of quantities across both ledgers.
    pub fn total_units(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| u64::from(e.item.quantity))
            .sum()
    }

    /// Sum of line totals across both ledgers.
    pub fn subtotal(&self) -> Amount {
        self.entries.iter().map(|e| e.item.total()).sum()
    }

    /// Find an entry by its `(category, id)` identity.
    pub fn find(&self, category: Category, id: &ItemId) -> Option<&CombinedEntry<'a>> {
        self.entries
            .iter()
            .find(|e| e.category == category && &e.item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64, quantity: u32) -> LineItem {
        LineItem {
            quantity,
            ..LineItem::new(ItemId::new(id), id, Amount::new(price), "")
        }
    }

    #[test]
    fn test_primary_entries_come_first() {
        let primary = vec![item("a", 1.0, 1)];
        let secondary = vec![item("b", 2.0, 1), item("c", 3.0, 1)];
        let view = CombinedView::new(&primary, &secondary);

        let tags: Vec<(Category, &str)> = view
            .iter()
            .map(|e| (e.category, e.item.id.as_str()))
            .collect();
        assert_eq!(
            tags,
            vec![
                (Category::Primary, "a"),
                (Category::Secondary, "b"),
                (Category::Secondary, "c"),
            ]
        );
    }

    #[test]
    fn test_colliding_ids_are_distinguished_by_category() {
        let primary = vec![item("x", 10.0, 1)];
        let secondary = vec![item("x", 20.0, 3)];
        let view = CombinedView::new(&primary, &secondary);

        let id = ItemId::new("x");
        assert_eq!(view.len(), 2);
        assert_eq!(view.find(Category::Primary, &id).unwrap().item.quantity, 1);
        assert_eq!(view.find(Category::Secondary, &id).unwrap().item.quantity, 3);
        assert_eq!(view.total_units(), 4);
        assert_eq!(view.subtotal(), Amount::new(70.0));
    }

    #[test]
    fn test_empty_view() {
        let view = CombinedView::new(&[], &[]);
        assert!(view.is_empty());
        assert_eq!(view.total_units(), 0);
        assert_eq!(view.subtotal(), Amount::ZERO);
    }
}
