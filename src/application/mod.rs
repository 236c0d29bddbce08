pub mod dish_service;
pub mod order_service;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::dish::Dish;
use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::ports::IdGenerator;
use crate::infrastructure::memory_store::MemoryStore;
use crate::infrastructure::seed::SeedData;
use crate::validation::IdMatchPolicy;

pub use dish_service::DishService;
pub use order_service::OrderService;

/// Everything the HTTP handlers share.
pub struct AppState {
    pub dishes: DishService<MemoryStore<Dish>>,
    pub orders: OrderService<MemoryStore<Order>>,
}

impl AppState {
    pub fn new(seed: SeedData, ids: Arc<dyn IdGenerator>, order_id_match: IdMatchPolicy) -> Self {
        AppState {
            dishes: DishService::new(MemoryStore::with_records(seed.dishes), ids.clone()),
            orders: OrderService::new(
                MemoryStore::with_records(seed.orders),
                ids,
                order_id_match,
            ),
        }
    }
}

/// Every pipeline and its handler run under one lock per collection.
fn lock<S>(store: &Mutex<S>) -> Result<MutexGuard<'_, S>, DomainError> {
    store
        .lock()
        .map_err(|e| DomainError::internal(format!("Failed to acquire store lock: {}", e)))
}
