use serde::Serialize;

use crate::domain::order::Order;
use crate::domain::query::OrderDirection;
use crate::forms::order::SaveOrderForm;
use crate::pagination::PageControls;

/// Header cell of a sortable column.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SortHeader {
    /// Column key sent back when the header is clicked.
    pub column: String,
    pub title: String,
    /// Whether the listing is currently sorted by this column.
    pub active: bool,
    /// Direction shown on the active column.
    pub direction: Option<OrderDirection>,
    /// Headers are not clickable while a fetch is outstanding.
    pub disabled: bool,
}

/// Message row shown in place of table rows.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableNotice {
    /// The last fetch failed; the page offers a retry.
    Error { message: String },
    /// The listing loaded and has no rows.
    Empty,
}

/// State of the create/edit dialog.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FormDialogData {
    pub title: String,
    pub is_edit: bool,
    /// Values shown in the form fields.
    pub form: SaveOrderForm,
    pub errors: Vec<String>,
}

/// Data required to render the orders list template.
#[derive(Clone, Debug, Serialize)]
pub struct OrderListPageData {
    pub orders: Vec<Order>,
    pub headers: Vec<SortHeader>,
    /// Search query echoed back to the search box.
    pub search_query: Option<String>,
    pub controls: PageControls,
    pub loading: bool,
    pub notice: Option<TableNotice>,
    /// Present while the dialog is open.
    pub dialog: Option<FormDialogData>,
}
