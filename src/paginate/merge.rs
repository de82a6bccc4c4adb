//! Page merge strategies
//!
//! A [`PageMerger`] combines successive [`PageResult`]s into one logical
//! [`MergedResult`]. The strategy is injected into the paginator, selected
//! per API generation by the caller; most callers want [`AppendMerger`].

use super::types::{MergedResult, PageResult};

/// Strategy for folding one page into the running result set
pub trait PageMerger: Send + Sync {
    /// Fold `page` into `merged`
    ///
    /// Called once per page, in fetch order. Implementations decide what
    /// "combine" means; the paginator only guarantees in-order delivery.
    fn merge(&self, merged: &mut MergedResult, page: PageResult);
}

/// Default merger: append records in arrival order
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendMerger;

impl PageMerger for AppendMerger {
    fn merge(&self, merged: &mut MergedResult, page: PageResult) {
        merged.append(page.records);
    }
}
