// ── Resource store ──
//
// Holds the cached snapshot of each remote collection. The store is
// mutated only through the coordinator; everything else reads.

mod slot;

use std::sync::Arc;

pub(crate) use slot::CollectionSlot;

use crate::model::{EntityId, Movement, Product};

/// Stable keys identifying the cached collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Products,
    Movements,
}

impl CollectionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Movements => "movements",
        }
    }

    /// The invalidation table: which collections a successful mutation on
    /// this key makes stale.
    ///
    /// Movement mutations also stale `products` -- dashboards aggregate
    /// both collections together, and whether the service adjusts product
    /// quantities from movements is its business; the refetch picks up
    /// whatever it decided.
    pub fn invalidates(self) -> &'static [CollectionKey] {
        match self {
            Self::Products => &[Self::Products],
            Self::Movements => &[Self::Movements, Self::Products],
        }
    }
}

impl std::fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entities the store can index by id.
pub(crate) trait Identified {
    fn id(&self) -> &EntityId;
}

impl Identified for Product {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Identified for Movement {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// One slot per collection key.
pub(crate) struct ResourceStore {
    pub(crate) products: Arc<CollectionSlot<Product>>,
    pub(crate) movements: Arc<CollectionSlot<Movement>>,
}

impl ResourceStore {
    pub(crate) fn new() -> Self {
        Self {
            products: Arc::new(CollectionSlot::new()),
            movements: Arc::new(CollectionSlot::new()),
        }
    }

    pub(crate) fn mark_stale(&self, key: CollectionKey) {
        match key {
            CollectionKey::Products => self.products.mark_stale(),
            CollectionKey::Movements => self.movements.mark_stale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidation_table() {
        assert_eq!(
            CollectionKey::Products.invalidates(),
            &[CollectionKey::Products][..]
        );
        assert_eq!(
            CollectionKey::Movements.invalidates(),
            &[CollectionKey::Movements, CollectionKey::Products][..]
        );
    }

    #[test]
    fn key_names_are_stable() {
        assert_eq!(CollectionKey::Products.to_string(), "products");
        assert_eq!(CollectionKey::Movements.to_string(), "movements");
    }
}
