use std::sync::Arc;

use estore_catalog::{Category, CategoryService, InMemoryEntityStore, Product, ProductService};
use estore_core::{CategoryId, ProductId};

type CategoryStore = Arc<InMemoryEntityStore<CategoryId, Category>>;
type ProductStore = Arc<InMemoryEntityStore<ProductId, Product>>;

/// Service collaborators shared with the handlers.
pub struct AppServices {
    pub categories: CategoryService<CategoryStore>,
    pub products: ProductService<ProductStore>,
}

pub fn build_services() -> AppServices {
    // In-memory store wiring (dev/test); a persistent store would slot in
    // behind the same EntityStore trait.
    let category_store: CategoryStore = Arc::new(InMemoryEntityStore::new());
    let product_store: ProductStore = Arc::new(InMemoryEntityStore::new());

    AppServices {
        categories: CategoryService::new(category_store),
        products: ProductService::new(product_store),
    }
}
