use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::errors::DomainError;
use super::ports::Record;

/// Lifecycle of an order.
///
/// Any status may be replaced by any other through an update, except
/// `Delivered`, which is absorbing. Only `Pending` orders may be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }

    /// No update may touch an order in a terminal state.
    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Delivered
    }

    pub fn allows_delete(self) -> bool {
        self == OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dish line of an order. Fields other than `quantity` (usually `dishId`
/// plus whatever the client attached) are kept as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub quantity: u64,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    /// Stored as submitted on create; one of the canonical statuses after any
    /// update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub status: Option<Value>,
    #[schema(value_type = Vec<Object>)]
    pub dishes: Vec<OrderLine>,
}

impl Order {
    /// The stored status, if it is one of the canonical values.
    pub fn current_status(&self) -> Option<OrderStatus> {
        self.status
            .as_ref()
            .and_then(Value::as_str)
            .and_then(OrderStatus::parse)
    }
}

impl Record for Order {
    const KIND: &'static str = "Order";

    fn id(&self) -> &str {
        &self.id
    }

    fn not_found(id: &str) -> DomainError {
        DomainError::not_found(format!("Order {} not found", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_parses_only_canonical_values() {
        assert_eq!(OrderStatus::parse("out-for-delivery"), Some(OrderStatus::OutForDelivery));
        assert_eq!(OrderStatus::parse("Pending"), None);
        assert_eq!(OrderStatus::parse("cancelled"), None);
    }

    #[test]
    fn status_serializes_in_kebab_case() {
        assert_eq!(
            serde_json::to_value(OrderStatus::OutForDelivery).unwrap(),
            json!("out-for-delivery")
        );
    }

    #[test]
    fn only_delivered_is_terminal() {
        let terminal: Vec<_> = OrderStatus::ALL.into_iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal, vec![OrderStatus::Delivered]);
    }

    #[test]
    fn only_pending_allows_delete() {
        let deletable: Vec<_> = OrderStatus::ALL.into_iter().filter(|s| s.allows_delete()).collect();
        assert_eq!(deletable, vec![OrderStatus::Pending]);
    }

    #[test]
    fn order_uses_wire_field_names() {
        let order: Order = serde_json::from_value(json!({
            "id": "o1",
            "deliverTo": "308 Negra Arroyo Lane",
            "mobileNumber": "(505) 143-3369",
            "status": "pending",
            "dishes": [{ "dishId": "d1", "name": "Taco", "quantity": 2 }]
        }))
        .unwrap();

        assert_eq!(order.current_status(), Some(OrderStatus::Pending));
        assert_eq!(order.dishes[0].details["dishId"], "d1");
        assert_eq!(order.dishes[0].quantity, 2);

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["deliverTo"], "308 Negra Arroyo Lane");
        assert_eq!(value["dishes"][0]["name"], "Taco");
    }

    #[test]
    fn absent_status_is_omitted() {
        let order = Order {
            id: "o1".to_string(),
            deliver_to: "here".to_string(),
            mobile_number: "555".to_string(),
            status: None,
            dishes: vec![],
        };
        let value = serde_json::to_value(&order).unwrap();
        assert!(value.get("status").is_none());
        assert_eq!(order.current_status(), None);
    }

    #[test]
    fn non_canonical_status_has_no_current_status() {
        let order = Order {
            id: "o1".to_string(),
            deliver_to: "here".to_string(),
            mobile_number: "555".to_string(),
            status: Some(json!("lost")),
            dishes: vec![],
        };
        assert_eq!(order.current_status(), None);
    }
}
