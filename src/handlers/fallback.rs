use actix_web::{HttpRequest, HttpResponse};

use crate::errors::AppError;

/// Any method a route does not define.
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed {
        method: req.method().to_string(),
        path: req.uri().to_string(),
    })
}

/// Any path no route matches.
pub async fn path_not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(format!("Path not found: {}", req.uri())))
}
