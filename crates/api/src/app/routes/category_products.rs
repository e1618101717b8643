//! Category-products association resource.
//!
//! To see the current products for a given category, do a GET on
//! `/api/categories/{categoryid}/products`.
//!
//! To link / unlink a product, POST or DELETE
//! `/api/categories/{categoryid}/products/{productid}`.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use estore_catalog::{Category, Product};
use estore_core::{CategoryId, ProductId};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/:productid", post(add_product).delete(remove_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Path(categoryid): Path<String>,
) -> axum::response::Response {
    // The category id is accepted but not used: the listing is global.
    let _ = categoryid;

    let products = services.products.all_products();
    if products.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    let items = products.into_iter().map(dto::product_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn add_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path((categoryid, productid)): Path<(String, String)>,
) -> axum::response::Response {
    let (category, product) = match resolve(&services, &categoryid, &productid) {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    if services.products.has_category(&product, &category) {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_association",
            format!("product {} already contains category {}", product.id, category.id),
        );
    }

    let linked = match services.products.add_category(&product, &category) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (StatusCode::CREATED, Json(dto::product_to_json(linked))).into_response()
}

pub async fn remove_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path((categoryid, productid)): Path<(String, String)>,
) -> axum::response::Response {
    let (category, product) = match resolve(&services, &categoryid, &productid) {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    // Same pre-check as linking: the association must be absent.
    if services.products.has_category(&product, &category) {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_association",
            format!("product {} already contains category {}", product.id, category.id),
        );
    }

    // Removes the whole product, not just the link.
    if let Err(e) = services.products.delete_product(&product) {
        return errors::domain_error_to_response(e);
    }

    StatusCode::NO_CONTENT.into_response()
}

/// Resolve both path ids to their entities, or produce the error response.
fn resolve(
    services: &AppServices,
    categoryid: &str,
    productid: &str,
) -> Result<(Category, Product), axum::response::Response> {
    let category_id: CategoryId = categoryid
        .parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id"))?;
    let product_id: ProductId = productid
        .parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"))?;

    let category = services.categories.get_category_by_id(category_id).ok_or_else(|| {
        errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("category {category_id} not found"),
        )
    })?;

    let product = services.products.get_product_by_id(product_id).ok_or_else(|| {
        errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("product {product_id} not found"),
        )
    })?;

    Ok((category, product))
}
