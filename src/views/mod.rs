//! Presentation adapters driving a [`crate::controller::PaginationController`]
//! from table interactions.

use crate::domain::query::{OrderDirection, QueryParams, QueryPatch, SortSwitchPolicy};
use crate::dto::orders::{SortHeader, TableNotice};
use crate::repository::errors::RepositoryError;

pub mod orders;

/// Patch produced by a click on the header of `column`.
///
/// Clicking the active column toggles the direction. Clicking another column
/// switches to it and applies `policy` to the direction.
pub fn sort_patch(params: &QueryParams, column: &str, policy: SortSwitchPolicy) -> QueryPatch {
    if params.order_by == column {
        return QueryPatch::new().order_direction(params.order_direction.toggled());
    }

    let patch = QueryPatch::new().order_by(column);
    match policy {
        SortSwitchPolicy::ResetAscending => patch.order_direction(OrderDirection::Asc),
        SortSwitchPolicy::KeepDirection => patch,
    }
}

/// Header cells for `columns`, given as `(key, title)` pairs.
pub fn sort_headers(
    params: &QueryParams,
    columns: &[(&str, &str)],
    loading: bool,
) -> Vec<SortHeader> {
    columns
        .iter()
        .map(|(column, title)| {
            let active = params.order_by == *column;
            SortHeader {
                column: (*column).to_string(),
                title: (*title).to_string(),
                active,
                direction: active.then_some(params.order_direction),
                disabled: loading,
            }
        })
        .collect()
}

/// Message row shown instead of (or above) the table rows.
///
/// Errors win over everything else. The empty notice is only shown once a
/// load finished without rows.
pub fn table_notice(
    error: Option<&RepositoryError>,
    loading: bool,
    has_data: bool,
) -> Option<TableNotice> {
    if let Some(error) = error {
        return Some(TableNotice::Error {
            message: error.to_string(),
        });
    }

    if !loading && !has_data {
        return Some(TableNotice::Empty);
    }

    None
}
