//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::order::{Order, SaveOrder};
use crate::domain::query::{PageResult, QueryParams};
use crate::domain::types::OrderId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{OrderReader, OrderWriter};

mock! {
    pub OrderStore {}

    #[async_trait]
    impl OrderReader for OrderStore {
        async fn list_orders(&self, params: &QueryParams) -> RepositoryResult<PageResult<Order>>;
    }

    #[async_trait]
    impl OrderWriter for OrderStore {
        async fn save_order(&self, order: &SaveOrder) -> RepositoryResult<Order>;
        async fn delete_order(&self, id: OrderId) -> RepositoryResult<()>;
    }
}
