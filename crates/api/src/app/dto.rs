use serde::Deserialize;

use estore_catalog::{Category, Product};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub unit_price: u64,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn category_to_json(category: Category) -> serde_json::Value {
    serde_json::json!({
        "id": category.id.as_i64(),
        "name": category.name,
        "created_at": category.created_at.to_rfc3339(),
    })
}

pub fn product_to_json(product: Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id.as_i64(),
        "name": product.name,
        "unit_price": product.unit_price,
        "categories": product.categories.iter().map(|c| c.as_i64()).collect::<Vec<_>>(),
        "created_at": product.created_at.to_rfc3339(),
    })
}
