use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use estore_core::{CategoryId, DomainError, DomainResult};

use crate::store::EntityStore;

/// Catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Lookup and lifecycle operations for categories.
pub struct CategoryService<S> {
    store: S,
    next_id: AtomicI64,
}

impl<S> CategoryService<S>
where
    S: EntityStore<CategoryId, Category>,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            next_id: AtomicI64::new(1),
        }
    }

    pub fn create(&self, name: &str) -> DomainResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }

        let id = CategoryId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let category = Category {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.store.upsert(id, category.clone());

        tracing::debug!(category_id = %id, "category created");
        Ok(category)
    }

    pub fn get_category_by_id(&self, id: CategoryId) -> Option<Category> {
        self.store.get(&id)
    }

    pub fn all_categories(&self) -> Vec<Category> {
        let mut categories = self.store.list();
        categories.sort_by_key(|c| c.id);
        categories
    }
}
