pub mod dishes;
pub mod fallback;
pub mod orders;

use actix_web::web;
use serde::Deserialize;
use serde_json::Value;
use utoipa::{OpenApi, ToSchema};

use crate::domain::dish::Dish;
use crate::domain::order::{Order, OrderStatus};
use crate::errors::AppError;
use crate::validation::Payload;

// ── Request envelope ─────────────────────────────────────────────────────────

/// Every request body wraps the resource fields in `data`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RequestEnvelope {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub data: Value,
}

impl RequestEnvelope {
    pub fn into_payload(self) -> Payload {
        Payload::from_data(self.data)
    }
}

/// Parses an optional body. Empty bodies, and bodies sent with a non-JSON
/// content type, are an empty payload.
pub fn optional_payload(content_type: &str, body: &[u8]) -> Result<Payload, AppError> {
    let declared_other = !content_type.is_empty() && !content_type.contains("json");
    if declared_other || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::default());
    }
    serde_json::from_slice::<RequestEnvelope>(body)
        .map(RequestEnvelope::into_payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}

/// Malformed JSON bodies are reported in the same `{ "error": ... }` shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

// ── OpenAPI ──────────────────────────────────────────────────────────────────

#[derive(OpenApi)]
#[openapi(
    paths(
        dishes::list_dishes,
        dishes::create_dish,
        dishes::get_dish,
        dishes::update_dish,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::update_order,
        orders::delete_order,
    ),
    components(schemas(Dish, Order, OrderStatus, RequestEnvelope)),
    tags(
        (name = "dishes", description = "Menu dishes"),
        (name = "orders", description = "Customer orders")
    )
)]
pub struct ApiDoc;
