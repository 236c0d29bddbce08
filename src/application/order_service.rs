use std::sync::{Arc, Mutex};

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::ports::{IdGenerator, Record, Store};
use crate::validation::order::OrderPipelines;
use crate::validation::{Context, IdMatchPolicy, Payload};

use super::lock;

pub struct OrderService<S> {
    store: Mutex<S>,
    ids: Arc<dyn IdGenerator>,
    pipelines: OrderPipelines,
}

impl<S: Store<Order>> OrderService<S> {
    pub fn new(store: S, ids: Arc<dyn IdGenerator>, id_match: IdMatchPolicy) -> Self {
        Self {
            store: Mutex::new(store),
            ids,
            pipelines: OrderPipelines::new(id_match),
        }
    }

    pub fn create_order(&self, payload: &Payload) -> Result<Order, DomainError> {
        let mut store = lock(&self.store)?;
        let derived = self
            .pipelines
            .create
            .run(&Context::new(payload, None, &*store))?;

        let order = derived.draft.into_order(self.ids.next_id())?;
        store.append(order.clone());
        log::info!("Created order {} with {} dish line(s)", order.id, order.dishes.len());
        Ok(order)
    }

    pub fn get_order(&self, id: &str) -> Result<Order, DomainError> {
        let store = lock(&self.store)?;
        let payload = Payload::default();
        let ctx = Context::new(&payload, Some(id), &*store);
        let derived = self.pipelines.read.run(&ctx)?;
        let order = ctx.located(&derived)?.clone();
        Ok(order)
    }

    /// Overwrites the stored order in place. Delivered orders are never touched.
    pub fn update_order(&self, id: &str, payload: &Payload) -> Result<Order, DomainError> {
        let mut store = lock(&self.store)?;
        let derived = self
            .pipelines
            .update
            .run(&Context::new(payload, Some(id), &*store))?;

        let position = derived
            .position
            .ok_or_else(|| DomainError::internal("update order did not locate a record"))?;
        let order = store.get_mut(position).ok_or_else(|| Order::not_found(id))?;
        *order = derived.draft.into_order(order.id.clone())?;
        log::info!(
            "Updated order {} (status {})",
            order.id,
            order.current_status().map_or("none", OrderStatus::as_str)
        );
        Ok(order.clone())
    }

    /// Removes a pending order.
    pub fn delete_order(&self, id: &str, payload: &Payload) -> Result<(), DomainError> {
        let mut store = lock(&self.store)?;
        let derived = self
            .pipelines
            .delete
            .run(&Context::new(payload, Some(id), &*store))?;

        let position = derived
            .position
            .ok_or_else(|| DomainError::internal("delete order did not locate a record"))?;
        let removed = store
            .remove_at(position)
            .ok_or_else(|| Order::not_found(id))?;
        log::info!("Deleted order {}", removed.id);
        Ok(())
    }

    pub fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        Ok(lock(&self.store)?.all().to_vec())
    }
}
