use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use serde_json::json;

use crate::application::AppState;
use crate::domain::order::Order;
use crate::errors::AppError;

use super::{optional_payload, RequestEnvelope};

/// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Every order, in creation order, under `data`", body = [Order]),
    ),
    tag = "orders"
)]
pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let orders = state.orders.list_orders()?;
    Ok(HttpResponse::Ok().json(json!({ "data": orders })))
}

/// POST /orders
///
/// The submitted `status` is stored as given.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = RequestEnvelope,
    responses(
        (status = 201, description = "Order created, returned under `data`", body = Order),
        (status = 400, description = "A field is missing or a dish line is invalid"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<RequestEnvelope>,
) -> Result<HttpResponse, AppError> {
    let order = state.orders.create_order(&body.into_inner().into_payload())?;
    Ok(HttpResponse::Created().json(json!({ "data": order })))
}

/// GET /orders/{orderId}
#[utoipa::path(
    get,
    path = "/orders/{orderId}",
    params(
        ("orderId" = String, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = state.orders.get_order(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(json!({ "data": order })))
}

/// PUT /orders/{orderId}
///
/// Requires a canonical status and is refused once the order is delivered.
#[utoipa::path(
    put,
    path = "/orders/{orderId}",
    params(
        ("orderId" = String, Path, description = "Order id"),
    ),
    request_body = RequestEnvelope,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, description = "A field is invalid, the ids disagree or the order is delivered"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn update_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<RequestEnvelope>,
) -> Result<HttpResponse, AppError> {
    let order = state
        .orders
        .update_order(&path.into_inner(), &body.into_inner().into_payload())?;
    Ok(HttpResponse::Ok().json(json!({ "data": order })))
}

/// DELETE /orders/{orderId}
///
/// Only pending orders can be deleted. The body is optional.
#[utoipa::path(
    delete,
    path = "/orders/{orderId}",
    params(
        ("orderId" = String, Path, description = "Order id"),
    ),
    request_body = Option<RequestEnvelope>,
    responses(
        (status = 204, description = "Order deleted"),
        (status = 400, description = "Order is not pending"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let payload = optional_payload(req.content_type(), &body)?;
    state.orders.delete_order(&path.into_inner(), &payload)?;
    Ok(HttpResponse::NoContent().finish())
}
