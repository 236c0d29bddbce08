use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::domain::dish::Dish;
use crate::domain::order::Order;
use crate::domain::ports::Record;
use crate::infrastructure::memory_store::MemoryStore;
use crate::validation::dish::DishPipelines;
use crate::validation::order::OrderPipelines;
use crate::validation::{Context, IdMatchPolicy, Payload, Pipeline};

/// Fixture records loaded into the stores at startup.
///
/// The file is a JSON object with optional `dishes` and `orders` arrays.
/// Every record must pass the same rules as a create request.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl SeedData {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
        let seed = Self::from_json(&contents).map_err(|source| ConfigError::SeedParse {
            path: path.to_path_buf(),
            source,
        })?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Runs each record through its collection's create pipeline and rejects
    /// empty or repeated ids.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_collection(&self.dishes, &DishPipelines::new().create)?;
        check_collection(
            &self.orders,
            &OrderPipelines::new(IdMatchPolicy::Enforce).create,
        )?;
        log::debug!(
            "Seed data holds {} dish(es) and {} order(s)",
            self.dishes.len(),
            self.orders.len()
        );
        Ok(())
    }
}

fn check_collection<T, D>(records: &[T], create: &Pipeline<T, D>) -> Result<(), ConfigError>
where
    T: Record + Serialize,
    D: Default,
{
    let empty = MemoryStore::<T>::new();
    let mut seen = HashSet::new();
    for record in records {
        let invalid = |message: String| ConfigError::SeedInvalid {
            kind: T::KIND,
            id: record.id().to_string(),
            message,
        };
        if record.id().is_empty() {
            return Err(invalid("id must not be empty".to_string()));
        }
        if !seen.insert(record.id()) {
            return Err(invalid("id is used more than once".to_string()));
        }
        let data = serde_json::to_value(record).map_err(|e| invalid(e.to_string()))?;
        let payload = Payload::from_data(data);
        create
            .run(&Context::new(&payload, None, &empty))
            .map_err(|e| invalid(e.to_string()))?;
    }
    Ok(())
}
