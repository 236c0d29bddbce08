use std::sync::{Arc, Mutex};

use crate::domain::dish::Dish;
use crate::domain::errors::DomainError;
use crate::domain::ports::{IdGenerator, Record, Store};
use crate::validation::dish::DishPipelines;
use crate::validation::{Context, Payload};

use super::lock;

pub struct DishService<S> {
    store: Mutex<S>,
    ids: Arc<dyn IdGenerator>,
    pipelines: DishPipelines,
}

impl<S: Store<Dish>> DishService<S> {
    pub fn new(store: S, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store: Mutex::new(store),
            ids,
            pipelines: DishPipelines::new(),
        }
    }

    pub fn create_dish(&self, payload: &Payload) -> Result<Dish, DomainError> {
        let mut store = lock(&self.store)?;
        let derived = self
            .pipelines
            .create
            .run(&Context::new(payload, None, &*store))?;

        let dish = derived.draft.into_dish(self.ids.next_id())?;
        store.append(dish.clone());
        log::info!("Created dish {}", dish.id);
        Ok(dish)
    }

    pub fn get_dish(&self, id: &str) -> Result<Dish, DomainError> {
        let store = lock(&self.store)?;
        let payload = Payload::default();
        let ctx = Context::new(&payload, Some(id), &*store);
        let derived = self.pipelines.read.run(&ctx)?;
        let dish = ctx.located(&derived)?.clone();
        Ok(dish)
    }

    /// Overwrites the stored dish in place; its id never changes.
    pub fn update_dish(&self, id: &str, payload: &Payload) -> Result<Dish, DomainError> {
        let mut store = lock(&self.store)?;
        let derived = self
            .pipelines
            .update
            .run(&Context::new(payload, Some(id), &*store))?;

        let position = derived
            .position
            .ok_or_else(|| DomainError::internal("update dish did not locate a record"))?;
        let dish = store.get_mut(position).ok_or_else(|| Dish::not_found(id))?;
        *dish = derived.draft.into_dish(dish.id.clone())?;
        log::info!("Updated dish {}", dish.id);
        Ok(dish.clone())
    }

    pub fn list_dishes(&self) -> Result<Vec<Dish>, DomainError> {
        Ok(lock(&self.store)?.all().to_vec())
    }
}
