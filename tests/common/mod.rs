//! In-memory order service used by the integration tests.
#![allow(dead_code)]

use std::cmp::Ordering as CmpOrdering;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};

use async_trait::async_trait;
use pushkind_orders::domain::order::{Order, SaveOrder};
use pushkind_orders::domain::query::{OrderDirection, PageResult, QueryParams};
use pushkind_orders::domain::types::{OrderAmount, OrderDescription, OrderId, OrderValue};
use pushkind_orders::repository::errors::{RepositoryError, RepositoryResult};
use pushkind_orders::repository::{OrderReader, OrderWriter};

pub fn order(id: i32, description: &str, amount: i64, value: &str) -> Order {
    Order {
        id: OrderId::new(id).unwrap(),
        description: OrderDescription::new(description).unwrap(),
        amount: OrderAmount::new(amount).unwrap(),
        value: OrderValue::new(value).unwrap(),
        created_at: None,
        updated_at: None,
    }
}

/// Order service keeping its records in memory and answering listing queries
/// the same way the remote service does.
#[derive(Default)]
pub struct InMemoryOrders {
    orders: Mutex<Vec<Order>>,
    next_id: AtomicI32,
    failing: AtomicBool,
    pub list_calls: AtomicUsize,
}

impl InMemoryOrders {
    pub fn new(orders: Vec<Order>) -> Self {
        let next_id = orders.iter().map(|o| o.id.get()).max().unwrap_or(0) + 1;
        Self {
            orders: Mutex::new(orders),
            next_id: AtomicI32::new(next_id),
            failing: AtomicBool::new(false),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Seeds `count` orders named `Order 001`, `Order 002`, ...
    pub fn seeded(count: i32) -> Self {
        Self::new(
            (1..=count)
                .map(|id| order(id, &format!("Order {id:03}"), i64::from(id), "10.00"))
                .collect(),
        )
    }

    /// Makes listing requests fail until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }
}

fn compare(a: &Order, b: &Order, column: &str) -> CmpOrdering {
    match column {
        "amount" => a.amount.get().cmp(&b.amount.get()),
        "value" => a
            .value
            .as_f64()
            .partial_cmp(&b.value.as_f64())
            .unwrap_or(CmpOrdering::Equal),
        _ => a.description.as_str().cmp(b.description.as_str()),
    }
}

#[async_trait]
impl OrderReader for InMemoryOrders {
    async fn list_orders(&self, params: &QueryParams) -> RepositoryResult<PageResult<Order>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Transport("service unavailable".to_string()));
        }

        let mut matching = self
            .all()
            .into_iter()
            .filter(|order| match &params.search {
                Some(term) => order
                    .description
                    .as_str()
                    .to_lowercase()
                    .contains(&term.to_lowercase()),
                None => true,
            })
            .collect::<Vec<_>>();

        matching.sort_by(|a, b| {
            let ordering = compare(a, b, &params.order_by);
            match params.order_direction {
                OrderDirection::Asc => ordering,
                OrderDirection::Desc => ordering.reverse(),
            }
        });

        let total = matching.len();
        let results = matching
            .into_iter()
            .skip(params.offset())
            .take(params.page_size.get())
            .collect();

        Ok(PageResult::new(total, results))
    }
}

#[async_trait]
impl OrderWriter for InMemoryOrders {
    async fn save_order(&self, order: &SaveOrder) -> RepositoryResult<Order> {
        let mut orders = self.orders.lock().unwrap();

        match order.id {
            Some(id) => {
                let existing = orders
                    .iter_mut()
                    .find(|existing| existing.id == id)
                    .ok_or(RepositoryError::NotFound)?;
                existing.description = order.description.clone();
                existing.amount = order.amount;
                existing.value = order.value.clone();
                Ok(existing.clone())
            }
            None => {
                let id = OrderId::new(self.next_id.fetch_add(1, Ordering::SeqCst))?;
                let created = Order {
                    id,
                    description: order.description.clone(),
                    amount: order.amount,
                    value: order.value.clone(),
                    created_at: None,
                    updated_at: None,
                };
                orders.push(created.clone());
                Ok(created)
            }
        }
    }

    async fn delete_order(&self, id: OrderId) -> RepositoryResult<()> {
        let mut orders = self.orders.lock().unwrap();
        let before = orders.len();
        orders.retain(|order| order.id != id);

        if orders.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }
}
