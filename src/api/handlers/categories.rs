//! Category request handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::{
    CategoryDetailResponse, CategoryResponse, CreateCategoryRequest, ErrorResponse,
    PagedResponse, PaginationParams, UpdateCategoryRequest,
};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::{PathParam, ValidatedJson, ValidatedQuery};

/// Routes:
/// - GET /            - Paginated list, name descending, products included
/// - POST /           - Create
/// - GET /{id}        - By id, products sorted by name
/// - GET /slug/{slug} - By slug
/// - PUT /{id}        - Partial update
/// - DELETE /{id}     - Delete, returns the removed row
pub fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_categories, create_category))
        .routes(routes!(get_category, update_category, delete_category))
        .routes(routes!(get_category_by_slug))
}

#[utoipa::path(
    get,
    path = "/",
    tag = CATEGORY_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of categories", body = PagedResponse<CategoryDetailResponse>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse)
    )
)]
async fn list_categories(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<CategoryDetailResponse>>> {
    let pagination = params.resolve(state.pagination)?;
    let page = state.services.categories.find_all(pagination).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Slug still taken after retries", body = ErrorResponse)
    )
)]
async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    let category = state.services.categories.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category with its products", body = CategoryDetailResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn get_category(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> AppResult<Json<CategoryDetailResponse>> {
    let category = state
        .services
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("category", id))?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = CATEGORY_TAG,
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 200, description = "Category with its products", body = CategoryDetailResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn get_category_by_slug(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> AppResult<Json<CategoryDetailResponse>> {
    let category = state
        .services
        .categories
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound {
            entity: "category".to_string(),
            field: "slug".to_string(),
            value: slug.clone(),
        })?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    )
)]
async fn update_category(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCategoryRequest>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.services.categories.update(id, payload.into()).await?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Deleted category", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn delete_category(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.services.categories.remove(id).await?;
    Ok(Json(category.into()))
}
