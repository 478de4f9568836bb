//! Filter keyword registry
//!
//! Keywords handed to the remote sink so stored logs can be searched by
//! content. The aggregate size limit is a soft contract: crossing it is
//! logged, never truncated.

use crate::constants::FILTER_KEYWORDS_MAX_BYTES;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::warn;

/// Registered filter keywords
#[derive(Debug)]
pub struct FilterRegistry {
    keywords: Mutex<Vec<String>>,
    max_bytes: AtomicUsize,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new(FILTER_KEYWORDS_MAX_BYTES)
    }
}

impl FilterRegistry {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            keywords: Mutex::new(Vec::new()),
            max_bytes: AtomicUsize::new(max_bytes),
        }
    }

    /// Process-wide registry
    pub fn global() -> Arc<FilterRegistry> {
        static GLOBAL: OnceLock<Arc<FilterRegistry>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Arc::new(FilterRegistry::default()))
            .clone()
    }

    /// Replace all keywords with a single one
    pub fn set(&self, keyword: &str) {
        let mut keywords = self.keywords.lock();
        keywords.clear();
        keywords.push(keyword.to_string());
        self.check_budget(&keywords);
    }

    /// Append a keyword (duplicates allowed)
    pub fn add(&self, keyword: &str) {
        let mut keywords = self.keywords.lock();
        keywords.push(keyword.to_string());
        self.check_budget(&keywords);
    }

    pub fn keywords(&self) -> Vec<String> {
        self.keywords.lock().clone()
    }

    /// Aggregate keyword size in bytes
    pub fn total_bytes(&self) -> usize {
        Self::size_of(&self.keywords.lock())
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes.load(Ordering::Relaxed)
    }

    /// Change the size at which a warning is logged; keywords are kept
    pub fn set_max_bytes(&self, max_bytes: usize) {
        self.max_bytes.store(max_bytes, Ordering::Relaxed);
        self.check_budget(&self.keywords.lock());
    }

    pub fn is_over_budget(&self) -> bool {
        self.total_bytes() > self.max_bytes()
    }

    fn size_of(keywords: &[String]) -> usize {
        keywords.iter().map(String::len).sum()
    }

    fn check_budget(&self, keywords: &[String]) {
        let total = Self::size_of(keywords);
        let max_bytes = self.max_bytes();
        if total > max_bytes {
            warn!(
                "Filter keywords use {} bytes, over the {} byte limit",
                total, max_bytes
            );
        }
    }
}
