//! An in-memory [`BetSource`] that behaves like a subgraph: it filters by
//! window, pages with `first`/`skip`, and can be told to fail.

use crate::error::ApiError;
use crate::query::BetsQuery;
use crate::BetSource;
use async_trait::async_trait;
use core_types::{BetCategory, BetRecord, TimeWindow};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy)]
enum Failure {
    Window(BetCategory, TimeWindow),
    FromSkip(BetCategory, u32),
}

#[derive(Debug, Default)]
pub struct InMemoryBetSource {
    records: HashMap<BetCategory, Vec<(i64, BetRecord)>>,
    failures: Vec<Failure>,
    served: Mutex<Vec<BetsQuery>>,
}

impl InMemoryBetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bet resolved at `resolved_at` to the given stream.
    pub fn push(&mut self, category: BetCategory, resolved_at: i64, record: BetRecord) {
        self.records.entry(category).or_default().push((resolved_at, record));
    }

    /// Every request for exactly this stream and window fails.
    pub fn fail_window(&mut self, category: BetCategory, window: TimeWindow) {
        self.failures.push(Failure::Window(category, window));
    }

    /// Every request on this stream with an offset of at least `skip` fails.
    pub fn fail_from_skip(&mut self, category: BetCategory, skip: u32) {
        self.failures.push(Failure::FromSkip(category, skip));
    }

    /// The queries received so far, in arrival order.
    pub fn served(&self) -> Vec<BetsQuery> {
        self.served
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn should_fail(&self, query: &BetsQuery) -> bool {
        self.failures.iter().any(|failure| match *failure {
            Failure::Window(category, window) => {
                category == query.category && window == query.window
            }
            Failure::FromSkip(category, skip) => category == query.category && query.skip >= skip,
        })
    }
}

#[async_trait]
impl BetSource for InMemoryBetSource {
    async fn fetch_page(&self, query: &BetsQuery) -> Result<Vec<BetRecord>, ApiError> {
        self.served
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(*query);

        if self.should_fail(query) {
            return Err(ApiError::InvalidData(format!(
                "simulated failure for {} bets in {} at skip {}",
                query.category, query.window, query.skip
            )));
        }

        let page = self
            .records
            .get(&query.category)
            .map(|records| {
                records
                    .iter()
                    .filter(|(resolved_at, _)| query.window.contains(*resolved_at))
                    .skip(query.skip as usize)
                    .take(query.first as usize)
                    .map(|(_, record)| record.clone())
                    .collect()
            })
            .unwrap_or_default();
        Ok(page)
    }
}
