use serde_json::Value;

use super::{
    derived_field, match_id, match_id_lenient, positive_integer, resource_exists, Context,
    Derived, IdMatchPolicy, Pipeline, Step,
};
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderLine, OrderStatus};

#[derive(Debug, Default)]
pub struct OrderDraft {
    deliver_to: Option<String>,
    mobile_number: Option<String>,
    dishes: Option<Vec<OrderLine>>,
    status: Option<Value>,
}

impl OrderDraft {
    pub fn into_order(self, id: String) -> Result<Order, DomainError> {
        Ok(Order {
            id,
            deliver_to: derived_field(self.deliver_to, "deliverTo")?,
            mobile_number: derived_field(self.mobile_number, "mobileNumber")?,
            status: self.status,
            dishes: derived_field(self.dishes, "dishes")?,
        })
    }
}

type OrderDerived = Derived<OrderDraft>;

pub fn has_deliver_to(
    ctx: &Context<'_, Order>,
    mut d: OrderDerived,
) -> Result<OrderDerived, DomainError> {
    let deliver_to = ctx
        .payload
        .present_str("deliverTo")
        .ok_or_else(|| DomainError::bad_request("Order must include a deliverTo"))?;
    d.draft.deliver_to = Some(deliver_to.to_string());
    Ok(d)
}

pub fn has_mobile_number(
    ctx: &Context<'_, Order>,
    mut d: OrderDerived,
) -> Result<OrderDerived, DomainError> {
    let mobile_number = ctx
        .payload
        .present_str("mobileNumber")
        .ok_or_else(|| DomainError::bad_request("Order must include a mobileNumber"))?;
    d.draft.mobile_number = Some(mobile_number.to_string());
    Ok(d)
}

pub fn includes_dish(
    ctx: &Context<'_, Order>,
    d: OrderDerived,
) -> Result<OrderDerived, DomainError> {
    match ctx.payload.present("dishes") {
        Some(_) => Ok(d),
        None => Err(DomainError::bad_request("Order must include a dish")),
    }
}

pub fn has_dishes(
    ctx: &Context<'_, Order>,
    d: OrderDerived,
) -> Result<OrderDerived, DomainError> {
    match ctx.payload.get("dishes") {
        Some(Value::Array(lines)) if !lines.is_empty() => Ok(d),
        _ => Err(DomainError::bad_request("Order must include at least one dish")),
    }
}

fn order_line(line: &Value) -> Option<OrderLine> {
    let fields = line.as_object()?;
    let quantity = match fields.get("quantity") {
        Some(Value::Number(n)) => positive_integer(n)?,
        _ => return None,
    };
    let mut details = fields.clone();
    details.remove("quantity");
    Some(OrderLine { quantity, details })
}

/// Every line needs a whole, positive `quantity`; the first offender is
/// reported by its zero-based index.
pub fn has_quantity(
    ctx: &Context<'_, Order>,
    mut d: OrderDerived,
) -> Result<OrderDerived, DomainError> {
    let lines = match ctx.payload.get("dishes") {
        Some(Value::Array(lines)) => lines,
        _ => return Err(DomainError::bad_request("Order must include at least one dish")),
    };
    let mut dishes = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let line = order_line(line).ok_or_else(|| {
            DomainError::bad_request(format!(
                "Dish {} must have a quantity that is an integer greater than 0",
                index
            ))
        })?;
        dishes.push(line);
    }
    d.draft.dishes = Some(dishes);
    Ok(d)
}

/// Create keeps whatever status was submitted, including none at all.
pub fn accept_status(
    ctx: &Context<'_, Order>,
    mut d: OrderDerived,
) -> Result<OrderDerived, DomainError> {
    d.draft.status = ctx.payload.get("status").cloned();
    Ok(d)
}

pub fn has_status(
    ctx: &Context<'_, Order>,
    mut d: OrderDerived,
) -> Result<OrderDerived, DomainError> {
    let status = ctx
        .payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(OrderStatus::parse)
        .ok_or_else(|| {
            DomainError::bad_request(
                "Order must have a status of pending, preparing, out-for-delivery, delivered",
            )
        })?;
    d.draft.status = Some(Value::String(status.as_str().to_string()));
    Ok(d)
}

/// Rejects any update to an order whose stored status is terminal.
pub fn not_delivered(
    ctx: &Context<'_, Order>,
    d: OrderDerived,
) -> Result<OrderDerived, DomainError> {
    let order = ctx.located(&d)?;
    match order.current_status() {
        Some(status) if status.is_terminal() => {
            Err(DomainError::bad_request("A delivered order cannot be changed"))
        }
        _ => Ok(d),
    }
}

pub fn is_pending(
    ctx: &Context<'_, Order>,
    d: OrderDerived,
) -> Result<OrderDerived, DomainError> {
    let order = ctx.located(&d)?;
    match order.current_status() {
        Some(status) if status.allows_delete() => Ok(d),
        _ => Err(DomainError::bad_request(
            "An order cannot be deleted unless it is pending.",
        )),
    }
}

/// The validation chains for every order operation.
pub struct OrderPipelines {
    pub create: Pipeline<Order, OrderDraft>,
    pub read: Pipeline<Order, OrderDraft>,
    pub update: Pipeline<Order, OrderDraft>,
    pub delete: Pipeline<Order, OrderDraft>,
}

impl OrderPipelines {
    pub fn new(id_match: IdMatchPolicy) -> Self {
        let match_id_step: Step<Order, OrderDraft> = match id_match {
            IdMatchPolicy::Enforce => match_id,
            IdMatchPolicy::Lenient => match_id_lenient,
        };

        OrderPipelines {
            create: Pipeline::new("create order")
                .step("has_deliver_to", has_deliver_to)
                .step("has_mobile_number", has_mobile_number)
                .step("includes_dish", includes_dish)
                .step("has_dishes", has_dishes)
                .step("has_quantity", has_quantity)
                .step("accept_status", accept_status),
            read: Pipeline::new("read order").step("order_exists", resource_exists),
            update: Pipeline::new("update order")
                .step("order_exists", resource_exists)
                .step("match_id", match_id_step)
                .step("has_deliver_to", has_deliver_to)
                .step("has_mobile_number", has_mobile_number)
                .step("includes_dish", includes_dish)
                .step("has_dishes", has_dishes)
                .step("has_quantity", has_quantity)
                .step("has_status", has_status)
                .step("not_delivered", not_delivered),
            delete: Pipeline::new("delete order")
                .step("order_exists", resource_exists)
                .step("match_id", match_id_step)
                .step("is_pending", is_pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_store::MemoryStore;
    use crate::validation::Payload;
    use serde_json::json;

    fn order_data(status: &str) -> Value {
        json!({
            "deliverTo": "308 Negra Arroyo Lane",
            "mobileNumber": "(505) 143-3369",
            "status": status,
            "dishes": [{ "dishId": "d1", "name": "Taco", "quantity": 2 }]
        })
    }

    fn stored(id: &str, status: &str) -> Order {
        let payload = Payload::from_data(order_data(status));
        let derived = OrderPipelines::new(IdMatchPolicy::Enforce)
            .create
            .run(&Context::new(&payload, None, &MemoryStore::<Order>::new()))
            .unwrap();
        derived.draft.into_order(id.to_string()).unwrap()
    }

    fn run(
        pipeline: &Pipeline<Order, OrderDraft>,
        records: &[Order],
        route_id: Option<&str>,
        data: Value,
    ) -> Result<OrderDerived, DomainError> {
        let payload = Payload::from_data(data);
        let store = MemoryStore::with_records(records.to_vec());
        pipeline.run(&Context::new(&payload, route_id, &store))
    }

    fn create(data: Value) -> Result<Order, DomainError> {
        let pipelines = OrderPipelines::new(IdMatchPolicy::Enforce);
        run(&pipelines.create, &[], None, data)?
            .draft
            .into_order("new".to_string())
    }

    #[test]
    fn create_keeps_lines_and_extra_fields() {
        let order = create(order_data("pending")).unwrap();
        assert_eq!(order.deliver_to, "308 Negra Arroyo Lane");
        assert_eq!(order.dishes.len(), 1);
        assert_eq!(order.dishes[0].quantity, 2);
        assert_eq!(order.dishes[0].details["name"], "Taco");
        assert_eq!(order.current_status(), Some(OrderStatus::Pending));
    }

    #[test]
    fn create_accepts_any_status_verbatim() {
        let order = create(order_data("lost-in-space")).unwrap();
        assert_eq!(order.status, Some(json!("lost-in-space")));

        let mut data = order_data("pending");
        data.as_object_mut().unwrap().remove("status");
        assert_eq!(create(data).unwrap().status, None);
    }

    #[test]
    fn create_names_missing_fields_in_order() {
        let cases = [
            ("deliverTo", "Order must include a deliverTo"),
            ("mobileNumber", "Order must include a mobileNumber"),
            ("dishes", "Order must include a dish"),
        ];
        for (field, message) in cases {
            let mut data = order_data("pending");
            data.as_object_mut().unwrap().remove(field);
            assert_eq!(create(data).unwrap_err(), DomainError::bad_request(message));
        }
    }

    #[test]
    fn dishes_must_be_a_non_empty_array() {
        for dishes in [json!([]), json!("taco"), json!({ "quantity": 1 })] {
            let mut data = order_data("pending");
            data["dishes"] = dishes;
            assert_eq!(
                create(data).unwrap_err(),
                DomainError::bad_request("Order must include at least one dish")
            );
        }
    }

    #[test]
    fn bad_quantity_names_offending_index() {
        for quantity in [json!(null), json!(0), json!(-1), json!(1.5), json!("2")] {
            let mut data = order_data("pending");
            data["dishes"] = json!([
                { "dishId": "d1", "quantity": 1 },
                { "dishId": "d2", "quantity": quantity.clone() }
            ]);
            assert_eq!(
                create(data).unwrap_err(),
                DomainError::bad_request("Dish 1 must have a quantity that is an integer greater than 0"),
                "quantity {}",
                quantity
            );
        }
    }

    #[test]
    fn update_names_offending_quantity_index() {
        let pipelines = OrderPipelines::new(IdMatchPolicy::Enforce);
        let records = vec![stored("o1", "pending")];
        let mut data = order_data("preparing");
        data["dishes"] = json!([
            { "dishId": "d1", "quantity": 1 },
            { "dishId": "d2", "quantity": 0 }
        ]);
        assert_eq!(
            run(&pipelines.update, &records, Some("o1"), data).unwrap_err(),
            DomainError::bad_request("Dish 1 must have a quantity that is an integer greater than 0")
        );
    }

    #[test]
    fn non_object_line_is_rejected() {
        let mut data = order_data("pending");
        data["dishes"] = json!(["d1"]);
        assert_eq!(
            create(data).unwrap_err(),
            DomainError::bad_request("Dish 0 must have a quantity that is an integer greater than 0")
        );
    }

    #[test]
    fn update_rejects_unknown_status() {
        let pipelines = OrderPipelines::new(IdMatchPolicy::Enforce);
        let records = vec![stored("o1", "pending")];
        let err = run(&pipelines.update, &records, Some("o1"), order_data("cancelled")).unwrap_err();
        assert_eq!(
            err,
            DomainError::bad_request(
                "Order must have a status of pending, preparing, out-for-delivery, delivered"
            )
        );
    }

    #[test]
    fn update_allows_any_move_between_open_states() {
        let pipelines = OrderPipelines::new(IdMatchPolicy::Enforce);
        for from in ["pending", "preparing", "out-for-delivery"] {
            for to in ["pending", "preparing", "out-for-delivery", "delivered"] {
                let records = vec![stored("o1", from)];
                let derived = run(&pipelines.update, &records, Some("o1"), order_data(to))
                    .unwrap_or_else(|e| panic!("{} -> {} rejected: {}", from, to, e));
                let order = derived.draft.into_order("o1".to_string()).unwrap();
                assert_eq!(order.status, Some(json!(to)));
            }
        }
    }

    #[test]
    fn delivered_order_rejects_every_update() {
        let pipelines = OrderPipelines::new(IdMatchPolicy::Enforce);
        let records = vec![stored("o1", "delivered")];
        for to in ["pending", "delivered"] {
            let err = run(&pipelines.update, &records, Some("o1"), order_data(to)).unwrap_err();
            assert_eq!(err, DomainError::bad_request("A delivered order cannot be changed"));
        }
    }

    #[test]
    fn update_enforces_id_match_by_default() {
        let pipelines = OrderPipelines::new(IdMatchPolicy::Enforce);
        let records = vec![stored("o1", "pending")];
        let mut data = order_data("preparing");
        data["id"] = json!("o2");
        let err = run(&pipelines.update, &records, Some("o1"), data).unwrap_err();
        assert_eq!(
            err,
            DomainError::bad_request("Order id does not match route id. Order: o2, Route: o1")
        );
    }

    #[test]
    fn lenient_policy_lets_mismatched_update_through() {
        let pipelines = OrderPipelines::new(IdMatchPolicy::Lenient);
        let records = vec![stored("o1", "pending")];
        let mut data = order_data("preparing");
        data["id"] = json!("o2");
        assert!(run(&pipelines.update, &records, Some("o1"), data).is_ok());
    }

    #[test]
    fn update_of_missing_order_is_not_found() {
        let pipelines = OrderPipelines::new(IdMatchPolicy::Enforce);
        let err = run(&pipelines.update, &[], Some("o9"), order_data("pending")).unwrap_err();
        assert_eq!(err, DomainError::not_found("Order o9 not found"));
    }

    #[test]
    fn delete_only_from_pending() {
        let pipelines = OrderPipelines::new(IdMatchPolicy::Enforce);
        for status in OrderStatus::ALL {
            let records = vec![stored("o1", status.as_str())];
            let result = run(&pipelines.delete, &records, Some("o1"), json!(null));
            if status == OrderStatus::Pending {
                assert_eq!(result.unwrap().position, Some(0));
            } else {
                assert_eq!(
                    result.unwrap_err(),
                    DomainError::bad_request("An order cannot be deleted unless it is pending.")
                );
            }
        }
    }

    #[test]
    fn delete_rejects_order_with_non_canonical_status() {
        let pipelines = OrderPipelines::new(IdMatchPolicy::Enforce);
        let records = vec![stored("o1", "lost")];
        assert!(run(&pipelines.delete, &records, Some("o1"), json!({})).is_err());
    }

    #[test]
    fn update_checks_identity_before_fields() {
        let names = OrderPipelines::new(IdMatchPolicy::Enforce).update.step_names();
        assert_eq!(&names[..2], &["order_exists", "match_id"]);
        assert_eq!(&names[names.len() - 2..], &["has_status", "not_delivered"]);
    }
}
