//! Pagination, sorting and filtering inputs of a remote listing.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::PageSize;

/// Sort direction of the active column.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            OrderDirection::Asc => OrderDirection::Desc,
            OrderDirection::Desc => OrderDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

impl Display for OrderDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens to the direction when the user sorts by a different column.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortSwitchPolicy {
    /// Switching columns always sorts ascending.
    #[default]
    ResetAscending,
    /// Switching columns keeps the current direction.
    KeepDirection,
}

/// Full set of inputs driving one fetch. Replaced wholesale on every change.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct QueryParams {
    /// Zero-based page index.
    pub page: usize,
    pub page_size: PageSize,
    pub order_by: String,
    pub order_direction: OrderDirection,
    pub search: Option<String>,
    /// Extra filter fields understood by the remote service.
    pub filters: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new(order_by: impl Into<String>, order_direction: OrderDirection) -> Self {
        Self {
            page: 0,
            page_size: PageSize::default(),
            order_by: order_by.into(),
            order_direction,
            search: None,
            filters: BTreeMap::new(),
        }
    }

    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = normalize_search(search.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Returns the params produced by merging `patch` into `self`.
    ///
    /// An explicit `page` is taken verbatim. Otherwise touching any other
    /// field moves back to the first page.
    #[must_use]
    pub fn merged(&self, patch: &QueryPatch) -> Self {
        let mut next = self.clone();

        if let Some(page_size) = patch.page_size {
            next.page_size = page_size;
        }
        if let Some(order_by) = &patch.order_by {
            next.order_by = order_by.clone();
        }
        if let Some(direction) = patch.order_direction {
            next.order_direction = direction;
        }
        if let Some(search) = &patch.search {
            next.search = normalize_search(search.clone());
        }
        for (key, value) in &patch.filters {
            let value = value.trim();
            if value.is_empty() {
                next.filters.remove(key);
            } else {
                next.filters.insert(key.clone(), value.to_string());
            }
        }

        next.page = match patch.page {
            Some(page) => page,
            None if patch.resets_page() => 0,
            None => self.page,
        };

        next
    }

    /// Index of the first record on the current page.
    pub fn offset(&self) -> usize {
        self.page * self.page_size.get()
    }
}

fn normalize_search(search: String) -> Option<String> {
    let trimmed = search.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Partial update of [`QueryParams`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryPatch {
    pub page: Option<usize>,
    pub page_size: Option<PageSize>,
    pub order_by: Option<String>,
    pub order_direction: Option<OrderDirection>,
    /// `Some("")` clears the current search.
    pub search: Option<String>,
    /// An empty value removes the filter.
    pub filters: BTreeMap<String, String>,
}

impl QueryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some(column.into());
        self
    }

    pub fn order_direction(mut self, direction: OrderDirection) -> Self {
        self.order_direction = Some(direction);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.page.is_none() && !self.resets_page()
    }

    /// Whether the patch touches any field other than `page`.
    fn resets_page(&self) -> bool {
        self.page_size.is_some()
            || self.order_by.is_some()
            || self.order_direction.is_some()
            || self.search.is_some()
            || !self.filters.is_empty()
    }
}

/// One page of a remote listing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PageResult<T> {
    /// Number of matching records on the server, regardless of page size.
    pub total: usize,
    pub results: Vec<T>,
}

impl<T> PageResult<T> {
    pub fn new(total: usize, results: Vec<T>) -> Self {
        Self { total, results }
    }

    pub fn empty() -> Self {
        Self {
            total: 0,
            results: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> QueryParams {
        QueryParams {
            page: 3,
            ..QueryParams::new("description", OrderDirection::Asc)
        }
    }

    #[test]
    fn merging_sort_resets_page() {
        let merged = base().merged(&QueryPatch::new().order_by("amount"));
        assert_eq!(merged.page, 0);
        assert_eq!(merged.order_by, "amount");
        assert_eq!(merged.order_direction, OrderDirection::Asc);
    }

    #[test]
    fn merging_page_only_keeps_everything_else() {
        let params = base().search("pens").filter("status", "open");
        let merged = params.merged(&QueryPatch::new().page(5));
        assert_eq!(merged.page, 5);
        assert_eq!(
            QueryParams {
                page: params.page,
                ..merged
            },
            params
        );
    }

    #[test]
    fn explicit_page_wins_over_reset() {
        let merged = base().merged(&QueryPatch::new().search("pens").page(2));
        assert_eq!(merged.page, 2);
        assert_eq!(merged.search.as_deref(), Some("pens"));
    }

    #[test]
    fn search_is_trimmed_and_cleared_when_blank() {
        let merged = base().merged(&QueryPatch::new().search("  ink "));
        assert_eq!(merged.search.as_deref(), Some("ink"));

        let cleared = merged.merged(&QueryPatch::new().search("   "));
        assert_eq!(cleared.search, None);
        assert_eq!(cleared.page, 0);
    }

    #[test]
    fn blank_filter_value_removes_filter() {
        let params = base().filter("status", "open");
        let merged = params.merged(&QueryPatch::new().filter("status", ""));
        assert!(merged.filters.is_empty());
        assert_eq!(merged.page, 0);
    }

    #[test]
    fn page_size_change_resets_page() {
        let merged = base().merged(&QueryPatch::new().page_size(PageSize::new(25).unwrap()));
        assert_eq!(merged.page, 0);
        assert_eq!(merged.page_size.get(), 25);
    }

    #[test]
    fn empty_patch_is_identity() {
        assert!(QueryPatch::new().is_empty());
        assert_eq!(base().merged(&QueryPatch::new()), base());
    }

    #[test]
    fn offset_uses_page_size() {
        let params = base().page_size(PageSize::new(20).unwrap());
        assert_eq!(params.offset(), 60);
    }

    #[test]
    fn direction_toggles() {
        assert_eq!(OrderDirection::Asc.toggled(), OrderDirection::Desc);
        assert_eq!(OrderDirection::Desc.toggled(), OrderDirection::Asc);
    }
}
