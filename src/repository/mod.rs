//! Collaborators the orders page obtains data from and writes data through.
//!
//! The listing controller only ever talks to a [`RemoteDataSource`]; order
//! mutations go through [`OrderWriter`]. [`HttpOrderRepository`] implements
//! both against the remote order service.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::order::{Order, SaveOrder};
use crate::domain::query::{PageResult, QueryParams};
use crate::domain::types::OrderId;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use http::HttpOrderRepository;

/// Asynchronous source of paginated records.
///
/// Implementations must not hold on to or alter the params and must return an
/// error, never a default page, when the transport or the server fails.
#[async_trait]
pub trait RemoteDataSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    async fn fetch(&self, params: &QueryParams) -> RepositoryResult<PageResult<Self::Item>>;
}

/// [`RemoteDataSource`] backed by a plain async closure.
pub struct FnDataSource<F> {
    fetch: F,
}

impl<F> FnDataSource<F> {
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

#[async_trait]
impl<F, Fut, T> RemoteDataSource for FnDataSource<F>
where
    F: Fn(QueryParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RepositoryResult<PageResult<T>>> + Send,
    T: Clone + Send + Sync + 'static,
{
    type Item = T;

    async fn fetch(&self, params: &QueryParams) -> RepositoryResult<PageResult<T>> {
        (self.fetch)(params.clone()).await
    }
}

#[async_trait]
pub trait OrderReader: Send + Sync {
    async fn list_orders(&self, params: &QueryParams) -> RepositoryResult<PageResult<Order>>;
}

#[async_trait]
pub trait OrderWriter: Send + Sync {
    /// Creates the order when `order.id` is absent, updates it otherwise.
    async fn save_order(&self, order: &SaveOrder) -> RepositoryResult<Order>;
    async fn delete_order(&self, id: OrderId) -> RepositoryResult<()>;
}

/// Convenience trait for a store that both lists and mutates orders.
pub trait OrderRepository: OrderReader + OrderWriter {}

impl<T> OrderRepository for T where T: OrderReader + OrderWriter + ?Sized {}

/// Exposes an order store as the data source of the orders listing.
pub struct OrderSource<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> OrderSource<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> RemoteDataSource for OrderSource<R>
where
    R: OrderReader + ?Sized + 'static,
{
    type Item = Order;

    async fn fetch(&self, params: &QueryParams) -> RepositoryResult<PageResult<Order>> {
        self.repo.list_orders(params).await
    }
}
