//! Order store backed by the remote order REST service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::order::{Order, SaveOrder};
use crate::domain::query::{PageResult, QueryParams};
use crate::domain::types::OrderId;
use crate::models::order::{Order as OrderModel, OrderPage};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{OrderReader, OrderWriter};

/// HTTP client for `{base_url}/order`.
#[derive(Clone, Debug)]
pub struct HttpOrderRepository {
    client: Client,
    base_url: String,
}

impl HttpOrderRepository {
    /// Builds a client whose requests fail after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RepositoryResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Query string of the listing endpoint. The search text travels as `term`.
pub(crate) fn query_pairs(params: &QueryParams) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("page".to_string(), params.page.to_string()),
        ("pageSize".to_string(), params.page_size.to_string()),
        ("orderBy".to_string(), params.order_by.clone()),
        (
            "orderDirection".to_string(),
            params.order_direction.to_string(),
        ),
    ];

    if let Some(term) = &params.search {
        pairs.push(("term".to_string(), term.clone()));
    }

    pairs.extend(
        params
            .filters
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );

    pairs
}

/// Maps non-success statuses to errors before the body is touched.
async fn check_status(response: Response) -> RepositoryResult<Response> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(RepositoryError::NotFound);
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(RepositoryError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
    let response = check_status(response).await?;
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(RepositoryError::from)
}

#[async_trait]
impl OrderReader for HttpOrderRepository {
    async fn list_orders(&self, params: &QueryParams) -> RepositoryResult<PageResult<Order>> {
        log::debug!(
            "Listing orders page {} by {} {}",
            params.page,
            params.order_by,
            params.order_direction
        );

        let response = self
            .client
            .get(self.url("order"))
            .query(&query_pairs(params))
            .send()
            .await?;

        let page: OrderPage = decode(response).await?;
        let page = PageResult::try_from(page)?;

        if page.results.len() > params.page_size.get() {
            log::warn!(
                "Order service returned {} rows for a page of {}",
                page.results.len(),
                params.page_size
            );
        }

        Ok(page)
    }
}

#[async_trait]
impl OrderWriter for HttpOrderRepository {
    async fn save_order(&self, order: &SaveOrder) -> RepositoryResult<Order> {
        let response = self
            .client
            .post(self.url("order"))
            .json(&OrderModel::from(order))
            .send()
            .await?;

        let saved: OrderModel = decode(response).await?;
        let saved = Order::try_from(saved)?;

        log::info!("Saved order {}", saved.id);
        Ok(saved)
    }

    async fn delete_order(&self, id: OrderId) -> RepositoryResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("order/{id}")))
            .send()
            .await?;

        check_status(response).await?;

        log::info!("Deleted order {id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::OrderDirection;
    use crate::domain::types::PageSize;

    #[test]
    fn test_query_pairs_use_service_names() {
        let params = QueryParams::new("amount", OrderDirection::Desc)
            .page_size(PageSize::new(25).unwrap())
            .search("pens")
            .filter("status", "open");

        let pairs = query_pairs(&params);

        let expected: Vec<(String, String)> = [
            ("page", "0"),
            ("pageSize", "25"),
            ("orderBy", "amount"),
            ("orderDirection", "desc"),
            ("term", "pens"),
            ("status", "open"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_query_pairs_omit_empty_search() {
        let params = QueryParams::new("description", OrderDirection::Asc);

        let pairs = query_pairs(&params);

        assert!(pairs.iter().all(|(key, _)| key != "term"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_ignored() {
        let repo = HttpOrderRepository::with_client(Client::new(), "http://orders.local/api/");

        assert_eq!(repo.url("order"), "http://orders.local/api/order");
    }
}
