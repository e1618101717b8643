use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use estore_core::{CategoryId, DomainError, DomainResult, ProductId};

use crate::category::Category;
use crate::store::EntityStore;

/// Catalog product.
///
/// Holds the many-relationship to categories on the product side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in smallest currency unit (e.g. cents).
    pub unit_price: u64,
    pub categories: BTreeSet<CategoryId>,
    pub created_at: DateTime<Utc>,
}

/// Lookup, lifecycle, and association operations for products.
pub struct ProductService<S> {
    store: S,
    next_id: AtomicI64,
}

impl<S> ProductService<S>
where
    S: EntityStore<ProductId, Product>,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            next_id: AtomicI64::new(1),
        }
    }

    pub fn create(&self, name: &str, unit_price: u64) -> DomainResult<Product> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }

        let id = ProductId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let product = Product {
            id,
            name: name.to_string(),
            unit_price,
            categories: BTreeSet::new(),
            created_at: Utc::now(),
        };
        self.store.upsert(id, product.clone());

        tracing::debug!(product_id = %id, "product created");
        Ok(product)
    }

    pub fn get_product_by_id(&self, id: ProductId) -> Option<Product> {
        self.store.get(&id)
    }

    pub fn all_products(&self) -> Vec<Product> {
        let mut products = self.store.list();
        products.sort_by_key(|p| p.id);
        products
    }

    /// Whether the product is already linked to the category.
    pub fn has_category(&self, product: &Product, category: &Category) -> bool {
        self.store
            .get(&product.id)
            .map(|p| p.categories.contains(&category.id))
            .unwrap_or(false)
    }

    /// Link the product to the category, returning the updated product.
    pub fn add_category(&self, product: &Product, category: &Category) -> DomainResult<Product> {
        let mut updated = self
            .store
            .get(&product.id)
            .ok_or_else(|| DomainError::not_found(format!("product {}", product.id)))?;
        updated.categories.insert(category.id);
        self.store.upsert(updated.id, updated.clone());

        tracing::debug!(product_id = %updated.id, category_id = %category.id, "product linked to category");
        Ok(updated)
    }

    /// Remove the product from the store entirely.
    pub fn delete_product(&self, product: &Product) -> DomainResult<()> {
        self.store
            .remove(&product.id)
            .ok_or_else(|| DomainError::not_found(format!("product {}", product.id)))?;

        tracing::debug!(product_id = %product.id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryEntityStore;

    fn service() -> ProductService<InMemoryEntityStore<ProductId, Product>> {
        ProductService::new(InMemoryEntityStore::new())
    }

    fn category(id: i64, name: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_starts_without_categories() {
        let svc = service();
        let p = svc.create("Keyboard", 4999).unwrap();
        assert!(p.categories.is_empty());
        assert_eq!(p.unit_price, 4999);
    }

    #[test]
    fn create_rejects_blank_name() {
        let svc = service();
        let err = svc.create("  ", 100).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn add_category_makes_has_category_true() {
        let svc = service();
        let p = svc.create("Keyboard", 4999).unwrap();
        let c = category(1, "Peripherals");

        assert!(!svc.has_category(&p, &c));
        let updated = svc.add_category(&p, &c).unwrap();
        assert!(updated.categories.contains(&c.id));
        assert!(svc.has_category(&p, &c));
    }

    #[test]
    fn add_category_is_idempotent_on_storage() {
        let svc = service();
        let p = svc.create("Keyboard", 4999).unwrap();
        let c = category(1, "Peripherals");

        svc.add_category(&p, &c).unwrap();
        let updated = svc.add_category(&p, &c).unwrap();
        assert_eq!(updated.categories.len(), 1);
    }

    #[test]
    fn add_category_preserves_existing_links() {
        let svc = service();
        let p = svc.create("Keyboard", 4999).unwrap();
        let first = category(1, "Peripherals");
        let second = category(2, "Sale");

        svc.add_category(&p, &first).unwrap();
        // The caller still holds the stale `p` without the first link.
        let updated = svc.add_category(&p, &second).unwrap();
        assert!(updated.categories.contains(&first.id));
        assert!(updated.categories.contains(&second.id));
    }

    #[test]
    fn add_category_fails_for_deleted_product() {
        let svc = service();
        let p = svc.create("Keyboard", 4999).unwrap();
        let c = category(1, "Peripherals");

        svc.delete_product(&p).unwrap();
        let err = svc.add_category(&p, &c).unwrap_err();
        match err {
            DomainError::NotFound(_) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn delete_product_removes_it_from_lookups() {
        let svc = service();
        let p = svc.create("Keyboard", 4999).unwrap();

        svc.delete_product(&p).unwrap();
        assert!(svc.get_product_by_id(p.id).is_none());
        assert!(svc.all_products().is_empty());
    }

    #[test]
    fn delete_product_twice_is_not_found() {
        let svc = service();
        let p = svc.create("Keyboard", 4999).unwrap();

        svc.delete_product(&p).unwrap();
        let err = svc.delete_product(&p).unwrap_err();
        match err {
            DomainError::NotFound(_) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn all_products_is_sorted_by_id() {
        let svc = service();
        svc.create("A", 1).unwrap();
        svc.create("B", 2).unwrap();
        svc.create("C", 3).unwrap();

        let ids: Vec<i64> = svc.all_products().iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: linking never drops previously linked categories.
            #[test]
            fn links_accumulate(category_ids in proptest::collection::vec(1i64..1000, 1..20)) {
                let svc = service();
                let p = svc.create("Widget", 100).unwrap();

                let mut expected = BTreeSet::new();
                for id in &category_ids {
                    let c = category(*id, "c");
                    svc.add_category(&p, &c).unwrap();
                    expected.insert(CategoryId::new(*id));
                }

                let stored = svc.get_product_by_id(p.id).unwrap();
                prop_assert_eq!(stored.categories, expected);
            }

            /// Property: has_category agrees with the stored link set.
            #[test]
            fn has_category_matches_links(
                linked in proptest::collection::btree_set(1i64..50, 0..10),
                probe in 1i64..50,
            ) {
                let svc = service();
                let p = svc.create("Widget", 100).unwrap();

                for id in &linked {
                    svc.add_category(&p, &category(*id, "c")).unwrap();
                }

                let p = svc.get_product_by_id(p.id).unwrap();
                let result = svc.has_category(&p, &category(probe, "probe"));
                prop_assert_eq!(result, linked.contains(&probe));
            }
        }
    }
}
