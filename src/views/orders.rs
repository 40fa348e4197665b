//! Orders list page: table, sorting, search, paging and the create/edit dialog.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::controller::{Dispatch, PaginationController};
use crate::domain::order::Order;
use crate::domain::query::{QueryParams, QueryPatch, SortSwitchPolicy};
use crate::domain::types::{OrderId, PageSize};
use crate::dto::orders::{FormDialogData, OrderListPageData};
use crate::forms::order::SaveOrderForm;
use crate::pagination::PageControls;
use crate::repository::{OrderRepository, OrderSource};
use crate::services::orders as order_service;
use crate::services::{ServiceError, ServiceResult};
use crate::views::{sort_headers, sort_patch, table_notice};

/// Sortable columns of the orders table as `(key, title)` pairs.
pub const ORDER_COLUMNS: &[(&str, &str)] = &[
    ("description", "Description"),
    ("amount", "Amount"),
    ("value", "Value"),
];

pub type OrderController = PaginationController<OrderSource<dyn OrderRepository>>;

/// Create/edit dialog state of one browser session.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FormDialog {
    opened: bool,
    /// Order being edited, `None` when creating.
    current: Option<Order>,
    draft: SaveOrderForm,
    errors: Vec<String>,
}

impl FormDialog {
    pub fn is_open(&self) -> bool {
        self.opened
    }
}

/// Orders list page bound to one pagination controller.
///
/// The listing is shared by every request. Dialog state belongs to the caller
/// and is passed in as a [`FormDialog`].
pub struct OrderListView {
    repo: Arc<dyn OrderRepository>,
    controller: OrderController,
    sort_policy: SortSwitchPolicy,
}

impl OrderListView {
    /// Creates the page and starts loading the first page with `defaults`.
    pub fn mount(
        repo: Arc<dyn OrderRepository>,
        defaults: QueryParams,
        sort_policy: SortSwitchPolicy,
    ) -> Self {
        let controller =
            PaginationController::mount(OrderSource::new(Arc::clone(&repo)), defaults, &());

        Self {
            repo,
            controller,
            sort_policy,
        }
    }

    pub fn controller(&self) -> &OrderController {
        &self.controller
    }

    /// Handles a click on a column header. Ignored while a fetch is
    /// outstanding or when the column is not sortable.
    pub fn sort_by(&self, column: &str) -> Option<Dispatch> {
        if !ORDER_COLUMNS.iter().any(|(key, _)| *key == column) {
            log::warn!("Ignoring sort by unknown column {column}");
            return None;
        }

        if self.controller.loading() {
            log::debug!("Ignoring sort by {column} while loading");
            return None;
        }

        let patch = sort_patch(&self.controller.params(), column, self.sort_policy);
        Some(self.controller.merge_params(patch))
    }

    /// Applies the search box contents. Returns `None` when the normalized
    /// search did not change.
    pub fn search(&self, term: &str) -> Option<Dispatch> {
        let patch = QueryPatch::new().search(term);
        let current = self.controller.params();

        if current.merged(&patch).search == current.search {
            return None;
        }

        Some(self.controller.merge_params(patch))
    }

    /// Moves to a zero-based page. Ignored while loading, for the current page
    /// and for pages past the known total.
    pub fn go_to_page(&self, page: usize) -> Option<Dispatch> {
        if self.controller.loading() {
            return None;
        }

        let params = self.controller.params();
        let total = self.controller.data().map_or(0, |data| data.total);
        let controls = PageControls::new(params.page, params.page_size.get(), total);

        if page == params.page {
            return None;
        }

        if !controls.contains(page) {
            log::warn!("Ignoring navigation to page {page} of {}", controls.total_pages);
            return None;
        }

        Some(self.controller.merge_params(QueryPatch::new().page(page)))
    }

    pub fn set_page_size(&self, page_size: PageSize) -> Option<Dispatch> {
        if self.controller.loading() || self.controller.params().page_size == page_size {
            return None;
        }

        Some(
            self.controller
                .merge_params(QueryPatch::new().page_size(page_size)),
        )
    }

    pub fn refresh(&self) -> Dispatch {
        self.controller.refresh()
    }

    pub fn open_create(&self, dialog: &mut FormDialog) {
        *dialog = FormDialog {
            opened: true,
            ..FormDialog::default()
        };
    }

    /// Opens the dialog for an order on the current page. Returns `false` when
    /// the order is not displayed.
    pub fn open_edit(&self, dialog: &mut FormDialog, id: OrderId) -> bool {
        let order = self
            .controller
            .data()
            .and_then(|page| page.results.iter().find(|order| order.id == id).cloned());

        match order {
            Some(order) => {
                *dialog = FormDialog {
                    opened: true,
                    draft: SaveOrderForm::from(&order),
                    current: Some(order),
                    errors: Vec::new(),
                };
                true
            }
            None => {
                log::warn!("Order {id} is not on the current page");
                false
            }
        }
    }

    pub fn cancel_form(&self, dialog: &mut FormDialog) {
        *dialog = FormDialog::default();
    }

    /// Saves the dialog. On success the dialog closes and the listing reloads.
    /// On failure the dialog stays open with the submitted values and errors.
    pub async fn submit_form(
        &self,
        dialog: &mut FormDialog,
        form: SaveOrderForm,
    ) -> ServiceResult<Order> {
        match order_service::save_order(self.repo.as_ref(), form.clone()).await {
            Ok(order) => {
                self.cancel_form(dialog);
                self.refresh().settled().await;
                Ok(order)
            }
            Err(err) => {
                let message = match &err {
                    ServiceError::Form(message) => message.clone(),
                    other => other.to_string(),
                };
                dialog.opened = true;
                dialog.draft = form;
                dialog.errors = vec![message];
                Err(err)
            }
        }
    }

    /// Deletes an order and reloads the listing.
    pub async fn delete(&self, id: OrderId) -> ServiceResult<()> {
        order_service::delete_order(self.repo.as_ref(), id).await?;
        self.refresh().settled().await;
        Ok(())
    }

    /// Serializable snapshot of everything the page renders.
    pub fn page_data(&self, dialog: &FormDialog) -> OrderListPageData {
        let state = self.controller.snapshot();
        let loading = state.loading();

        let (orders, total) = match &state.data {
            Some(page) => (page.results.clone(), page.total),
            None => (Vec::new(), 0),
        };

        let controls = PageControls::new(state.params.page, state.params.page_size.get(), total);
        let headers = sort_headers(&state.params, ORDER_COLUMNS, loading);
        let notice = table_notice(state.error.as_ref(), loading, !orders.is_empty());

        let dialog = dialog.opened.then(|| {
            let is_edit = dialog.current.is_some();
            FormDialogData {
                title: if is_edit { "Edit order" } else { "New order" }.to_string(),
                is_edit,
                form: dialog.draft.clone(),
                errors: dialog.errors.clone(),
            }
        });

        OrderListPageData {
            orders,
            headers,
            search_query: state.params.search.clone(),
            controls,
            loading,
            notice,
            dialog,
        }
    }
}
