//! Catalog domain module: categories, products, and their association.
//!
//! This crate contains the entities and service collaborators for the store
//! catalog, implemented purely as in-process logic (no HTTP concerns).

pub mod category;
pub mod product;
pub mod store;

pub use category::{Category, CategoryService};
pub use product::{Product, ProductService};
pub use store::{EntityStore, InMemoryEntityStore};
