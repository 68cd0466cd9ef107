//! Extensibility hook for collected links
//!
//! External code registers [`LinkFilter`]s that see the collected trail and
//! the page's type tags, and return the trail to use instead.

use crate::models::{Link, PageType};
use std::fmt;

/// Name of the filter applied to every collected trail
pub const LINKS_HOOK: &str = "crumbtrail_links";

/// Post-processes a collected trail
pub trait LinkFilter {
    fn filter(&self, links: Vec<Link>, page_types: &[PageType]) -> Vec<Link>;
}

impl<F> LinkFilter for F
where
    F: Fn(Vec<Link>, &[PageType]) -> Vec<Link>,
{
    fn filter(&self, links: Vec<Link>, page_types: &[PageType]) -> Vec<Link> {
        self(links, page_types)
    }
}

/// Ordered set of registered link filters
#[derive(Default)]
pub struct Hooks {
    filters: Vec<Box<dyn LinkFilter>>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("hook", &LINKS_HOOK)
            .field("filters", &self.filters.len())
            .finish()
    }
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter; filters run in registration order
    pub fn add_filter(&mut self, filter: impl LinkFilter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter, each one receiving the previous result
    pub fn apply(&self, links: Vec<Link>, page_types: &[PageType]) -> Vec<Link> {
        self.filters.iter().fold(links, |links, filter| {
            let filtered = filter.filter(links, page_types);
            tracing::debug!(hook = LINKS_HOOK, links = filtered.len(), "applied link filter");
            filtered
        })
    }
}
