pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod validation;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::AppState;
pub use config::{ConfigError, Settings};

use handlers::{dishes, fallback, orders, ApiDoc};

/// Registers every route, the JSON error handler and the API docs.
///
/// Each resource also answers with a trailing slash.
///
/// `AppState` must be provided separately as `web::Data`.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config())
        .service(
            web::resource(["/dishes", "/dishes/"])
                .route(web::get().to(dishes::list_dishes))
                .route(web::post().to(dishes::create_dish))
                .default_service(web::to(fallback::method_not_allowed)),
        )
        .service(
            web::resource(["/dishes/{dishId}", "/dishes/{dishId}/"])
                .route(web::get().to(dishes::get_dish))
                .route(web::put().to(dishes::update_dish))
                .default_service(web::to(fallback::method_not_allowed)),
        )
        .service(
            web::resource(["/orders", "/orders/"])
                .route(web::get().to(orders::list_orders))
                .route(web::post().to(orders::create_order))
                .default_service(web::to(fallback::method_not_allowed)),
        )
        .service(
            web::resource(["/orders/{orderId}", "/orders/{orderId}/"])
                .route(web::get().to(orders::get_order))
                .route(web::put().to(orders::update_order))
                .route(web::delete().to(orders::delete_order))
                .default_service(web::to(fallback::method_not_allowed)),
        )
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .default_service(web::to(fallback::path_not_found));
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or spawning) the returned
/// server.
pub fn build_server(
    state: web::Data<AppState>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure_app)
    })
    .bind((host.to_string(), port))?
    .run())
}
