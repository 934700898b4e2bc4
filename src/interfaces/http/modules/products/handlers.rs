//! Product REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use super::dto::{
    CreateProductRequest, ExpiringParams, ListProductsParams, LowStockParams, ProductDto,
    RecentParams, SearchParams, UpdateProductRequest,
};
use crate::application::services::{render_csv, InventoryService};
use crate::domain::product::{
    ProductDraft, ProductFilter, ProductPatch, ProductStatus, SortField, SortOrder,
};
use crate::domain::product::query::{paginate, sort_products};
use crate::domain::DomainError;
use crate::interfaces::http::common::{
    ApiResponse, PaginatedResponse, ValidatedJson,
};

/// Source label stored with operation-log entries from these handlers.
const SOURCE: &str = "inventory";

#[derive(Clone)]
pub struct ProductsState {
    pub inventory: Arc<InventoryService>,
}

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

fn internal(e: impl std::fmt::Display, what: &str) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(format!("Failed to {}: {}", what, e))),
    )
}

fn filter_from(params: &ListProductsParams) -> Result<ProductFilter, HandlerError> {
    let status = match params.status.as_deref() {
        None => None,
        Some(s) => Some(ProductStatus::parse(s).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown status: {}", s))),
            )
        })?),
    };
    Ok(ProductFilter {
        search: params.q.clone(),
        category: params.category.clone(),
        status,
        min_quantity: params.min_quantity,
        max_quantity: params.max_quantity,
        expires_from: params.expires_from,
        expires_to: params.expires_to,
    })
}

fn sort_from(params: &ListProductsParams) -> Result<(SortField, SortOrder), HandlerError> {
    let field = match params.sort_by.as_deref() {
        None => SortField::default(),
        Some(s) => SortField::parse(s).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown sort column: {}", s))),
            )
        })?,
    };
    let order = match params.order.as_deref() {
        None => SortOrder::default(),
        Some(s) => SortOrder::parse(s).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown sort order: {}", s))),
            )
        })?,
    };
    Ok((field, order))
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "Filtered, sorted, paginated product list", body = ApiResponse<PaginatedResponse<ProductDto>>),
        (status = 400, description = "Invalid filter or sort parameter")
    )
)]
pub async fn list_products(
    State(state): State<ProductsState>,
    Query(params): Query<ListProductsParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<ProductDto>>>, HandlerError> {
    let filter = filter_from(&params)?;
    let (sort_field, sort_order) = sort_from(&params)?;
    let limit = params.limit.clamp(1, 100);

    let products = state
        .inventory
        .list()
        .await
        .map_err(|e| internal(e, "list products"))?;

    let mut filtered = filter.apply(products);
    sort_products(&mut filtered, sort_field, sort_order);
    let (page_items, total) = paginate(filtered, params.page, limit);

    let items: Vec<ProductDto> = page_items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items,
        total,
        params.page.max(1),
        limit,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<ProductDto>),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn create_product(
    State(state): State<ProductsState>,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductDto>>), HandlerError> {
    let draft = ProductDraft {
        name: req.name,
        category: req.category,
        quantity: req.quantity,
        expiry_date: req.expiry_date,
        supplier: req.supplier,
        price: req.price,
    };

    let saved = state
        .inventory
        .add(draft, Some(SOURCE.to_string()))
        .await
        .map_err(|e| internal(e, "create product"))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_product(
    State(state): State<ProductsState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductDto>>, HandlerError> {
    match state.inventory.get(&id).await {
        Ok(Some(product)) => Ok(Json(ApiResponse::success(product.into()))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Product {} not found", id))),
        )),
        Err(e) => Err(internal(e, "get product")),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<ProductDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_product(
    State(state): State<ProductsState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<ApiResponse<ProductDto>>, HandlerError> {
    let patch = ProductPatch {
        name: req.name,
        category: req.category,
        quantity: req.quantity,
        expiry_date: req.expiry_date,
        supplier: req.supplier,
        price: req.price,
    };

    match state
        .inventory
        .update(&id, patch, Some(SOURCE.to_string()))
        .await
    {
        Ok(Some(updated)) => Ok(Json(ApiResponse::success(updated.into()))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Product {} not found", id))),
        )),
        Err(e) => Err(internal(e, "update product")),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted, or reported absent (idempotent)", body = ApiResponse<String>)
    )
)]
pub async fn delete_product(
    State(state): State<ProductsState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, HandlerError> {
    // Deleting an absent id leaves the collection unchanged and still
    // succeeds; the message reports what happened.
    match state
        .inventory
        .remove(&id, Some(SOURCE.to_string()))
        .await
    {
        Ok(true) => Ok(Json(ApiResponse::success("Product deleted".to_string()))),
        Ok(false) => Ok(Json(ApiResponse::success(format!(
            "Product {} was not present",
            id
        )))),
        Err(e) => Err(internal(e, "delete product")),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/products/search",
    tag = "Products",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching products", body = ApiResponse<Vec<ProductDto>>)
    )
)]
pub async fn search_products(
    State(state): State<ProductsState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<ProductDto>>>, HandlerError> {
    let hits = state
        .inventory
        .search(&params.q)
        .await
        .map_err(|e| internal(e, "search products"))?;
    Ok(Json(ApiResponse::success(
        hits.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/expiring",
    tag = "Products",
    params(ExpiringParams),
    responses(
        (status = 200, description = "Products expiring within the window, soonest first", body = ApiResponse<Vec<ProductDto>>)
    )
)]
pub async fn get_expiring(
    State(state): State<ProductsState>,
    Query(params): Query<ExpiringParams>,
) -> Result<Json<ApiResponse<Vec<ProductDto>>>, HandlerError> {
    let products = state
        .inventory
        .expiring_within(params.days)
        .await
        .map_err(|e| internal(e, "list expiring products"))?;
    Ok(Json(ApiResponse::success(
        products.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/low-stock",
    tag = "Products",
    params(LowStockParams),
    responses(
        (status = 200, description = "Products under the stock threshold, emptiest first", body = ApiResponse<Vec<ProductDto>>)
    )
)]
pub async fn get_low_stock(
    State(state): State<ProductsState>,
    Query(params): Query<LowStockParams>,
) -> Result<Json<ApiResponse<Vec<ProductDto>>>, HandlerError> {
    let products = state
        .inventory
        .low_stock(params.threshold)
        .await
        .map_err(|e| internal(e, "list low-stock products"))?;
    Ok(Json(ApiResponse::success(
        products.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/urgent",
    tag = "Products",
    responses(
        (status = 200, description = "Most urgent product", body = ApiResponse<ProductDto>),
        (status = 404, description = "Inventory is empty")
    )
)]
pub async fn get_urgent(
    State(state): State<ProductsState>,
) -> Result<Json<ApiResponse<ProductDto>>, HandlerError> {
    match state.inventory.most_urgent(Some(SOURCE.to_string())).await {
        Ok(Some(product)) => Ok(Json(ApiResponse::success(product.into()))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Inventory is empty")),
        )),
        Err(e) => Err(internal(e, "find urgent product")),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/products/recent",
    tag = "Products",
    params(RecentParams),
    responses(
        (status = 200, description = "Most recently added products", body = ApiResponse<Vec<ProductDto>>)
    )
)]
pub async fn get_recent(
    State(state): State<ProductsState>,
    Query(params): Query<RecentParams>,
) -> Result<Json<ApiResponse<Vec<ProductDto>>>, HandlerError> {
    let products = state
        .inventory
        .recent_additions(params.limit)
        .await
        .map_err(|e| internal(e, "list recent products"))?;
    Ok(Json(ApiResponse::success(
        products.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/export/csv",
    tag = "Products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "CSV document of the filtered list", content_type = "text/csv"),
        (status = 400, description = "Filtered list is empty, nothing to export")
    )
)]
pub async fn export_csv(
    State(state): State<ProductsState>,
    Query(params): Query<ListProductsParams>,
) -> Result<Response, HandlerError> {
    let filter = filter_from(&params)?;
    let (sort_field, sort_order) = sort_from(&params)?;

    let products = state
        .inventory
        .list()
        .await
        .map_err(|e| internal(e, "export products"))?;
    let mut filtered = filter.apply(products);
    sort_products(&mut filtered, sort_field, sort_order);

    let csv = match render_csv(&filtered) {
        Ok(csv) => csv,
        Err(DomainError::NothingToExport) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("No products to export")),
            ));
        }
        Err(e) => return Err(internal(e, "render CSV")),
    };

    state
        .inventory
        .log_operation(
            "DATA STRUCTURE",
            "EXPORT",
            format!("Exported {} products to CSV", filtered.len()),
            Some(SOURCE.to_string()),
        )
        .await
        .map_err(|e| internal(e, "log export"))?;

    let filename = format!("inventory_{}.csv", Utc::now().date_naive());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
        .into_response())
}
