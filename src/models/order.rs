//! Wire representation of orders exchanged with the remote order service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::order::{Order as DomainOrder, SaveOrder as DomainSaveOrder};
use crate::domain::query::PageResult;
use crate::domain::types::{
    OrderAmount, OrderDescription, OrderId, OrderValue, TypeConstraintError,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// JSON model of [`crate::domain::order::Order`].
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub description: String,
    pub amount: i64,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// JSON body of the listing endpoint.
pub struct OrderPage {
    pub total: usize,
    pub results: Vec<Order>,
}

impl TryFrom<Order> for DomainOrder {
    type Error = TypeConstraintError;

    fn try_from(order: Order) -> Result<Self, Self::Error> {
        let id = order.id.ok_or(TypeConstraintError::NonPositiveId)?;

        Ok(Self {
            id: OrderId::new(id)?,
            description: OrderDescription::new(order.description)?,
            amount: OrderAmount::new(order.amount)?,
            value: OrderValue::new(order.value)?,
            created_at: order.created_date,
            updated_at: order.updated_date,
        })
    }
}

impl TryFrom<OrderPage> for PageResult<DomainOrder> {
    type Error = TypeConstraintError;

    fn try_from(page: OrderPage) -> Result<Self, Self::Error> {
        let results = page
            .results
            .into_iter()
            .map(DomainOrder::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageResult::new(page.total, results))
    }
}

impl From<&DomainSaveOrder> for Order {
    fn from(order: &DomainSaveOrder) -> Self {
        Self {
            id: order.id.map(OrderId::get),
            description: order.description.as_str().to_string(),
            amount: order.amount.get(),
            value: order.value.as_str().to_string(),
            created_date: None,
            updated_date: None,
        }
    }
}
