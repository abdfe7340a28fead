//! Driving port for completion history reads.

use async_trait::async_trait;

use crate::domain::{Completion, CompletionDate, Error, UserId};

/// Request for the caller's completions between two dates.
///
/// Missing bounds fall back to the trailing history window: `end` defaults
/// to today and `start` to the first day of the window ending on `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionHistoryRequest {
    pub caller: Option<UserId>,
    pub start: Option<CompletionDate>,
    pub end: Option<CompletionDate>,
}

/// Completion read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionQuery: Send + Sync {
    /// Completions across all of the caller's habits within the inclusive
    /// range. Anonymous callers and inverted ranges yield an empty list.
    async fn history(&self, request: CompletionHistoryRequest) -> Result<Vec<Completion>, Error>;
}

/// Query double that always returns an empty history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCompletionQuery;

#[async_trait]
impl CompletionQuery for FixtureCompletionQuery {
    async fn history(&self, _request: CompletionHistoryRequest) -> Result<Vec<Completion>, Error> {
        Ok(Vec::new())
    }
}
