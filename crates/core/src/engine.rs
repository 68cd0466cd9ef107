//! Breadcrumbs engine
//!
//! [`Breadcrumbs`] ties the pieces together: it collects the trail once at
//! construction and renders it on demand.

use crate::collector::TrailCollector;
use crate::config::BreadcrumbsConfig;
use crate::hooks::Hooks;
use crate::models::{Link, PageType};
use crate::output::format_html;
use crate::page::{PageClassifier, RequestContext};
use crate::source::ContentSource;

/// Breadcrumb trail for one request
#[derive(Debug, Clone)]
pub struct Breadcrumbs {
    config: BreadcrumbsConfig,
    page_types: Vec<PageType>,
    links: Vec<Link>,
}

impl Breadcrumbs {
    /// Collect the trail for a request
    pub fn new<P, S>(
        request: &RequestContext<P>,
        source: &S,
        config: BreadcrumbsConfig,
        hooks: &Hooks,
    ) -> Self
    where
        P: PageClassifier,
        S: ContentSource,
    {
        let links = TrailCollector::new(request, source, &config).collect(hooks);
        tracing::debug!(links = links.len(), "collected breadcrumbs");

        Self {
            config,
            page_types: request.page.types().to_vec(),
            links,
        }
    }

    /// Collect the trail with no hooks registered
    pub fn without_hooks<P, S>(request: &RequestContext<P>, source: &S, config: BreadcrumbsConfig) -> Self
    where
        P: PageClassifier,
        S: ContentSource,
    {
        Self::new(request, source, config, &Hooks::new())
    }

    /// Collected links, root first
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn page_types(&self) -> &[PageType] {
        &self.page_types
    }

    pub fn config(&self) -> &BreadcrumbsConfig {
        &self.config
    }

    /// Render the trail as an HTML fragment
    pub fn render(&self) -> String {
        format_html(&self.links, &self.config)
    }

    /// Labels joined by ` > `
    pub fn path(&self) -> String {
        self.links
            .iter()
            .map(|l| l.label.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

#[cfg(test)]
mod tests;
