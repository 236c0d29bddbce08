use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::DomainError;
use super::ports::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Always an integer greater than zero.
    pub price: u64,
    pub image_url: String,
}

impl Record for Dish {
    const KIND: &'static str = "Dish";

    fn id(&self) -> &str {
        &self.id
    }

    fn not_found(id: &str) -> DomainError {
        DomainError::not_found(format!("Dish does not exist: {}", id))
    }
}
