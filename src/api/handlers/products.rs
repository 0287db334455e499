//! Product request handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::PRODUCT_TAG;
use crate::api::dto::{
    CreateProductRequest, ErrorResponse, PagedResponse, PaginationParams, ProductDetailResponse,
    ProductResponse, UpdateProductRequest,
};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::{PathParam, ValidatedJson, ValidatedQuery};

pub fn product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_products, create_product))
        .routes(routes!(get_product, update_product, delete_product))
}

/// GET /api/products - Paginated list ordered by slug
#[utoipa::path(
    get,
    path = "/",
    tag = PRODUCT_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of products", body = PagedResponse<ProductResponse>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse)
    )
)]
async fn list_products(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<ProductResponse>>> {
    let pagination = params.resolve(state.pagination)?;
    let page = state.services.products.find_all(pagination).await?;
    Ok(Json(page.into()))
}

/// POST /api/products - Create a product in an existing category
#[utoipa::path(
    post,
    path = "/",
    tag = PRODUCT_TAG,
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid request or unknown category", body = ErrorResponse),
        (status = 409, description = "Slug still taken after retries", body = ErrorResponse)
    )
)]
async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let product = state.services.products.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// GET /api/products/{id} - Product with its category inline
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductDetailResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn get_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> AppResult<Json<ProductDetailResponse>> {
    let product = state
        .services
        .products
        .find_one(id)
        .await?
        .ok_or_else(|| AppError::not_found("product", id))?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    )
)]
async fn update_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services.products.update(id, payload.into()).await?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted product", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn delete_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services.products.remove(id).await?;
    Ok(Json(product.into()))
}
