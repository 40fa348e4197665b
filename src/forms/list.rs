//! Forms posted by the list page controls.

use serde::Deserialize;

use crate::domain::types::PageSize;
use crate::forms::FormError;

/// Search box submission.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search: String,
}

/// Click on a sortable column header.
#[derive(Debug, Deserialize)]
pub struct SortForm {
    pub column: String,
}

/// Page navigation or page size change.
#[derive(Debug, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl PageForm {
    /// Parses the optional page size into its constrained form.
    pub fn page_size(&self) -> Result<Option<PageSize>, FormError> {
        self.page_size
            .map(PageSize::new)
            .transpose()
            .map_err(|_| FormError::InvalidPageSize)
    }
}
