use std::io;
use std::sync::Arc;

use actix_web::web;
use dotenvy::dotenv;
use restaurant_service::infrastructure::id_gen::UuidIdGenerator;
use restaurant_service::{build_server, AppState, Settings};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings =
        Settings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let seed = settings
        .load_seed()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    log::info!(
        "Loaded {} dish(es) and {} order(s) from seed data",
        seed.dishes.len(),
        seed.orders.len()
    );

    let state = web::Data::new(AppState::new(
        seed,
        Arc::new(UuidIdGenerator),
        settings.order_id_match,
    ));

    log::info!("Starting server at http://{}:{}", settings.host, settings.port);

    build_server(state, &settings.host, settings.port)?.await
}
