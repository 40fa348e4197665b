use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{OrderAmount, OrderDescription, OrderId, OrderValue};

/// Order as returned by the remote order service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub description: OrderDescription,
    /// Ordered quantity.
    pub amount: OrderAmount,
    pub value: OrderValue,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload used to create (`id` absent) or update (`id` present) an order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SaveOrder {
    pub id: Option<OrderId>,
    pub description: OrderDescription,
    pub amount: OrderAmount,
    pub value: OrderValue,
}

impl SaveOrder {
    #[must_use]
    pub fn new(
        id: Option<OrderId>,
        description: OrderDescription,
        amount: OrderAmount,
        value: OrderValue,
    ) -> Self {
        Self {
            id,
            description,
            amount,
            value,
        }
    }

    /// Returns `true` when the payload updates an existing order.
    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }
}

impl From<&Order> for SaveOrder {
    fn from(order: &Order) -> Self {
        Self {
            id: Some(order.id),
            description: order.description.clone(),
            amount: order.amount,
            value: order.value.clone(),
        }
    }
}
