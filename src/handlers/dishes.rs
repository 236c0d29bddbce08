use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::application::AppState;
use crate::domain::dish::Dish;
use crate::errors::AppError;

use super::RequestEnvelope;

/// GET /dishes
#[utoipa::path(
    get,
    path = "/dishes",
    responses(
        (status = 200, description = "Every dish, in creation order, under `data`", body = [Dish]),
    ),
    tag = "dishes"
)]
pub async fn list_dishes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let dishes = state.dishes.list_dishes()?;
    Ok(HttpResponse::Ok().json(json!({ "data": dishes })))
}

/// POST /dishes
#[utoipa::path(
    post,
    path = "/dishes",
    request_body = RequestEnvelope,
    responses(
        (status = 201, description = "Dish created, returned under `data`", body = Dish),
        (status = 400, description = "A field is missing or invalid"),
    ),
    tag = "dishes"
)]
pub async fn create_dish(
    state: web::Data<AppState>,
    body: web::Json<RequestEnvelope>,
) -> Result<HttpResponse, AppError> {
    let dish = state.dishes.create_dish(&body.into_inner().into_payload())?;
    Ok(HttpResponse::Created().json(json!({ "data": dish })))
}

/// GET /dishes/{dishId}
#[utoipa::path(
    get,
    path = "/dishes/{dishId}",
    params(
        ("dishId" = String, Path, description = "Dish id"),
    ),
    responses(
        (status = 200, description = "Dish found", body = Dish),
        (status = 404, description = "Dish not found"),
    ),
    tag = "dishes"
)]
pub async fn get_dish(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let dish = state.dishes.get_dish(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(json!({ "data": dish })))
}

/// PUT /dishes/{dishId}
///
/// Replaces every field of the dish. A body `id`, if given, must match the route.
#[utoipa::path(
    put,
    path = "/dishes/{dishId}",
    params(
        ("dishId" = String, Path, description = "Dish id"),
    ),
    request_body = RequestEnvelope,
    responses(
        (status = 200, description = "Dish updated", body = Dish),
        (status = 400, description = "A field is invalid or the ids disagree"),
        (status = 404, description = "Dish not found"),
    ),
    tag = "dishes"
)]
pub async fn update_dish(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<RequestEnvelope>,
) -> Result<HttpResponse, AppError> {
    let dish = state
        .dishes
        .update_dish(&path.into_inner(), &body.into_inner().into_payload())?;
    Ok(HttpResponse::Ok().json(json!({ "data": dish })))
}
