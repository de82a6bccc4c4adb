//! Auto-pagination
//!
//! Drives a [`QueryBuilder`](crate::query::QueryBuilder) across successive
//! pages through a [`PageExecutor`], folding each page into one logical
//! result set via a pluggable [`PageMerger`].
//!
//! # Overview
//!
//! Pages are fetched strictly sequentially: page N+1 is never requested
//! before page N has been merged, because the stopping rule depends on
//! accumulated state and record order must be preserved across pages.
//! Failure on any page discards the partial merge and propagates; from the
//! caller's point of view a paginated fetch is all-or-nothing.

mod merge;
mod types;

pub use merge::{AppendMerger, PageMerger};
pub use types::{MergedResult, PageResult};

use crate::error::{Error, Result};
use crate::query::{QueryBuilder, QuerySpec};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;


/// Executes one page request against the remote service
///
/// The transport collaborator. May be blocking or asynchronous underneath;
/// the paginator only requires that one page's result can be awaited before
/// the next is issued.
#[async_trait]
pub trait PageExecutor: Send + Sync {
    /// Execute the request described by `spec`, returning one page
    async fn execute(&self, spec: &QuerySpec) -> Result<PageResult>;
}

/// Cooperative cancellation signal for a paginated fetch
///
/// Cloneable flag: raise it from anywhere and the paginator aborts at its
/// next stopping-rule checkpoint, without merging a page already in flight.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create an unraised token
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether the signal has been raised
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Drives repeated execution of a query across successive pages
pub struct Paginator {
    merger: Box<dyn PageMerger>,
    cancel: Option<CancelToken>,
}

impl Paginator {
    /// Create a paginator with the default [`AppendMerger`]
    pub fn new() -> Self {
        Self {
            merger: Box::new(AppendMerger),
            cancel: None,
        }
    }

    /// Replace the merge strategy
    #[must_use]
    pub fn with_merger(mut self, merger: Box<dyn PageMerger>) -> Self {
        self.merger = merger;
        self
    }

    /// Attach a cancellation token
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Fetch the full logical result set of a query
    ///
    /// When the builder carries an explicit page and auto-pagination is off,
    /// exactly one page is fetched and returned as the whole result (the
    /// manual-pagination escape hatch). Otherwise pages are fetched from the
    /// starting page until a stopping signal: a page shorter than the
    /// requested size, or the accumulated record count reaching a
    /// server-reported total. A page with zero records always stops.
    ///
    /// Any executor failure aborts the fetch and propagates; the partial
    /// merge is discarded.
    pub async fn fetch_all(
        &self,
        builder: &QueryBuilder,
        executor: &dyn PageExecutor,
    ) -> Result<MergedResult> {
        let spec = builder.build_request();

        if !spec.auto_paginate {
            return self.fetch_single(&spec, executor).await;
        }

        let per_page = spec
            .per_page
            .unwrap_or(builder.limits().default_per_page) as usize;
        // An explicit page that had auto-pagination re-enabled afterward
        // pins the starting page.
        let mut page_number = spec.page.unwrap_or(1);
        let mut merged = MergedResult::new();
        let mut fetched_total: u64 = 0;

        loop {
            self.check_cancelled()?;

            let mut page_spec = spec.clone();
            page_spec.page = Some(page_number);

            debug!(module = %spec.module, page = page_number, "fetching page");
            let page = executor.execute(&page_spec).await?;

            let page_len = page.len();
            let total_count = page.total_count;
            fetched_total += page_len as u64;

            self.merger.merge(&mut merged, page);
            merged.note_page();

            if page_len < per_page {
                debug!(
                    module = %spec.module,
                    page = page_number,
                    records = page_len,
                    "short page, stopping"
                );
                break;
            }
            if let Some(total) = total_count {
                if fetched_total >= total {
                    debug!(module = %spec.module, total, "reached reported total, stopping");
                    break;
                }
            }

            page_number += 1;
        }

        Ok(merged)
    }

    async fn fetch_single(
        &self,
        spec: &QuerySpec,
        executor: &dyn PageExecutor,
    ) -> Result<MergedResult> {
        debug!(module = %spec.module, page = ?spec.page, "fetching single page");
        let page = executor.execute(spec).await?;

        let mut merged = MergedResult::new();
        self.merger.merge(&mut merged, page);
        merged.note_page();
        Ok(merged)
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Paginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("has_cancel_token", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}
