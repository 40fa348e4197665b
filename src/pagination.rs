//! Page controls derived from the server-side total of a listing.

use serde::Serialize;

/// Number of page links always shown at each edge.
const EDGE_LINKS: usize = 2;
/// Number of page links shown before the current page.
const LINKS_BEFORE_CURRENT: usize = 2;
/// Number of page links shown after the current page.
const LINKS_AFTER_CURRENT: usize = 4;

/// Compact list of one-based page numbers with `None` marking a gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// State of the page-size/page control bound to a listing total.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageControls {
    /// Zero-based current page.
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    /// One-based number of the first record shown, `0` when empty.
    pub first_item: usize,
    /// One-based number of the last record shown.
    pub last_item: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// Zero-based page indexes to link to, `None` marking a gap.
    pub links: Vec<Option<usize>>,
}

impl PageControls {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size);

        let links = get_pages(
            total_pages,
            page + 1,
            EDGE_LINKS,
            LINKS_BEFORE_CURRENT,
            LINKS_AFTER_CURRENT,
            EDGE_LINKS,
        )
        .into_iter()
        .map(|link| link.map(|number| number - 1))
        .collect();

        let first_item = if total == 0 {
            0
        } else {
            (page * page_size + 1).min(total)
        };
        let last_item = ((page + 1) * page_size).min(total);

        Self {
            page,
            page_size,
            total,
            total_pages,
            first_item,
            last_item,
            has_previous: page > 0,
            has_next: page + 1 < total_pages,
            links,
        }
    }

    /// Whether `page` points at an existing page. The first page always exists.
    pub fn contains(&self, page: usize) -> bool {
        page == 0 || page < self.total_pages
    }
}
