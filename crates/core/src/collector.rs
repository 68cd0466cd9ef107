//! Trail collection
//!
//! [`TrailCollector`] walks the page's type tags, runs the first handler that
//! matches, appends the page number crumb for paginated listings and finally
//! hands the list to the registered hooks.

use crate::config::BreadcrumbsConfig;
use crate::escape::sanitize_text_field;
use crate::hooks::Hooks;
use crate::models::{Link, PageType, Post, Term, DEFAULT_POST_TYPE};
use crate::page::{PageClassifier, RequestContext};
use crate::source::ContentSource;
use chrono::{Datelike, Local, NaiveDate};
use std::collections::HashSet;

type Handler<C> = fn(&mut C);

/// Collects the crumbs for one request
pub struct TrailCollector<'a, P, S> {
    request: &'a RequestContext<P>,
    source: &'a S,
    config: &'a BreadcrumbsConfig,
    links: Vec<Link>,
}

impl<'a, P: PageClassifier, S: ContentSource> TrailCollector<'a, P, S> {
    pub fn new(request: &'a RequestContext<P>, source: &'a S, config: &'a BreadcrumbsConfig) -> Self {
        Self {
            request,
            source,
            config,
            links: Vec::new(),
        }
    }

    /// Handler for a page type, if it has one
    fn handler(page_type: &PageType) -> Option<Handler<Self>> {
        let handler: Handler<Self> = match page_type {
            PageType::FrontPage => Self::add_front_page_links,
            PageType::Home => Self::add_home_links,
            PageType::Category => Self::add_category_links,
            PageType::Tag => Self::add_tag_links,
            PageType::Tax => Self::add_tax_links,
            PageType::Date | PageType::Year | PageType::Month | PageType::Day => {
                Self::add_date_links
            }
            PageType::Search => Self::add_search_links,
            PageType::Author => Self::add_author_links,
            PageType::PostTypeArchive => Self::add_post_type_archive_links,
            PageType::NotFound => Self::add_not_found_links,
            PageType::Singular => Self::add_singular_links,
            _ => return None,
        };
        Some(handler)
    }

    /// Build the trail and run it through the hooks
    pub fn collect(mut self, hooks: &Hooks) -> Vec<Link> {
        let request = self.request;
        let page = &request.page;

        if !page.is(&PageType::FrontPage) {
            self.add_home_link();
        }

        let matched = page
            .types()
            .iter()
            .find_map(|t| Self::handler(t).map(|handler| (t, handler)));

        match matched {
            Some((page_type, handler)) => {
                tracing::debug!(%page_type, "collecting crumbs");
                handler(&mut self);
            }
            None => tracing::debug!(types = ?page.types(), "no crumb handler for page"),
        }

        if page.is(&PageType::Paged) && !page.is(&PageType::NotFound) {
            self.add_page_number_link();
        }

        hooks.apply(self.links, page.types())
    }

    fn add_home_link(&mut self) {
        let link = make_link(self.config.home_label(), self.source.home_url("/"));
        self.links.push(link);
    }

    fn add_page_number_link(&mut self) {
        let label = self.config.labels().page(self.request.page.number());
        self.links.push(Link::label_only(label));
    }

    /// Crumb for the resource being viewed
    ///
    /// Only linked on paginated pages, where the page number crumb comes last.
    fn current_link(&self, title: &str, url: Option<String>) -> Link {
        if self.request.is_paged() {
            make_link(title, url.unwrap_or_default())
        } else {
            Link::label_only(sanitize_text_field(title))
        }
    }

    fn add_front_page_links(&mut self) {
        let link = self.current_link(self.config.home_label(), Some(self.source.home_url("/")));
        self.links.push(link);
    }

    fn add_home_links(&mut self) {
        if self.request.page.is(&PageType::FrontPage) {
            self.add_front_page_links();
            return;
        }

        let Some(id) = self.source.posts_page() else {
            tracing::debug!("no posts page configured");
            return;
        };

        let title = self.source.post(id).map(|p| p.title).unwrap_or_default();
        let link = self.current_link(&title, self.source.permalink(id));
        self.links.push(link);
    }

    fn add_category_links(&mut self) {
        let Some(id) = self.request.query.cat else {
            return;
        };
        let Some(category) = self.source.category(id) else {
            tracing::debug!(id, "category not found");
            return;
        };

        let ancestors = self.ancestors(category.parent, |id| self.source.category(id));
        for parent in ancestors {
            let link = make_link(&parent.name, self.source.category_link(parent.id).unwrap_or_default());
            self.links.push(link);
        }

        let link = self.current_link(&category.name, self.source.category_link(id));
        self.links.push(link);
    }

    fn add_tag_links(&mut self) {
        let Some(id) = self.request.query.tag_id else {
            return;
        };
        let label = self.source.tag(id).map(|t| t.name).unwrap_or_default();
        let link = self.current_link(&label, self.source.tag_link(id));
        self.links.push(link);
    }

    fn add_tax_links(&mut self) {
        let query = &self.request.query;
        let (Some(taxonomy), Some(slug)) = (query.taxonomy.as_deref(), query.term.as_deref()) else {
            return;
        };
        let Some(term) = self.source.term_by_slug(taxonomy, slug) else {
            tracing::debug!(taxonomy, slug, "term not found");
            return;
        };

        let ancestors = self.ancestors(term.parent, |id| self.source.term_by_id(&term.taxonomy, id));
        for parent in ancestors {
            let link = make_link(&parent.name, self.term_link(parent.id, &term.taxonomy));
            self.links.push(link);
        }

        let url = self.term_link(term.id, taxonomy);
        let link = self.current_link(&term.name, Some(url));
        self.links.push(link);
    }

    fn add_date_links(&mut self) {
        let page = &self.request.page;
        let query = &self.request.query;

        let year = query.year.unwrap_or_else(|| Local::now().year());
        let month = query.monthnum.unwrap_or(1);
        let day = query.day.unwrap_or(1);
        let date = NaiveDate::from_ymd_opt(year, month, day);

        let year_label = year.to_string();
        let year_url = self.source.year_link(year);
        let month_label = match date {
            Some(date) => date.format("%b %Y").to_string(),
            None => format!("{}-{:02}", year, month),
        };
        let month_url = self.source.month_link(year, month);

        if page.is(&PageType::Year) {
            let link = self.current_link(&year_label, Some(year_url));
            self.links.push(link);
        } else {
            self.links.push(make_link(&year_label, year_url));
        }

        if page.is(&PageType::Month) {
            let link = self.current_link(&month_label, Some(month_url));
            self.links.push(link);
        } else if page.is(&PageType::Day) {
            self.links.push(make_link(&month_label, month_url));

            let day_label = match date {
                Some(date) => date.format("%d %b %Y").to_string(),
                None => format!("{}-{:02}-{:02}", year, month, day),
            };
            let link = self.current_link(&day_label, Some(self.source.day_link(year, month, day)));
            self.links.push(link);
        }
    }

    fn add_search_links(&mut self) {
        let query = self.request.query.search.clone().unwrap_or_default();
        let label = self.config.labels().quoted(&query);
        let link = self.current_link(&label, Some(self.source.search_link(&query)));
        self.links.push(link);
    }

    fn add_author_links(&mut self) {
        let Some(id) = self.request.query.author else {
            return;
        };
        let name = self
            .source
            .author(id)
            .map(|a| a.display_name)
            .unwrap_or_default();
        let link = self.current_link(&name, self.source.author_posts_url(id));
        self.links.push(link);
    }

    fn add_post_type_archive_links(&mut self) {
        let Some(name) = self.request.query.post_type.as_deref() else {
            return;
        };
        let label = self
            .source
            .post_type(name)
            .map(|t| t.label)
            .unwrap_or_else(|| name.to_string());
        let link = self.current_link(&label, self.source.post_type_archive_link(name));
        self.links.push(link);
    }

    fn add_not_found_links(&mut self) {
        let link = self.current_link(&self.config.labels().not_found, None);
        self.links.push(link);
    }

    fn add_singular_links(&mut self) {
        let post = match &self.request.post {
            Some(post) => Some(post.clone()),
            None => self.request.query.p.and_then(|id| self.source.post(id)),
        };
        let Some(post) = post else {
            tracing::debug!("singular page without a post");
            return;
        };

        let parent = post.parent.filter(|id| *id != 0);
        if parent.is_some() {
            let ancestors = self.ancestors(parent, |id| self.source.post(id));
            for parent in ancestors {
                let link = make_link(&parent.title, self.source.permalink(parent.id).unwrap_or_default());
                self.links.push(link);
            }
        } else if !self.source.is_post_type_hierarchical(&post.post_type) {
            if let Some(term) = self.first_term(&post) {
                let chain = self.ancestors(Some(term.id), |id| self.source.term_by_id(&term.taxonomy, id));
                for term in chain {
                    let link = make_link(&term.name, self.term_link(term.id, &term.taxonomy));
                    self.links.push(link);
                }
            } else {
                self.add_post_type_archive_crumb(&post);
            }
        }

        let link = self.current_link(&post.title, self.source.permalink(post.id));
        self.links.push(link);
    }

    /// Archive crumb for a post that has neither parents nor terms
    ///
    /// The default post type's archive is the front page unless a posts page
    /// is configured, so it only gets a crumb in that case.
    fn add_post_type_archive_crumb(&mut self, post: &Post) {
        let posts_page = self.source.posts_page();
        let is_default_type = post.post_type == DEFAULT_POST_TYPE;

        if is_default_type && posts_page.is_none() {
            return;
        }

        let label = match posts_page {
            Some(id) if is_default_type => self.source.post(id).map(|p| p.title).unwrap_or_default(),
            _ => self
                .source
                .post_type(&post.post_type)
                .map(|t| t.label)
                .unwrap_or_else(|| post.post_type.clone()),
        };

        if let Some(url) = self.source.post_type_archive_link(&post.post_type) {
            self.links.push(make_link(&label, url));
        }
    }

    /// First term of the post in one of its hierarchical taxonomies
    fn first_term(&self, post: &Post) -> Option<Term> {
        self.source
            .object_taxonomies(&post.post_type)
            .into_iter()
            .filter(|t| t.hierarchical)
            .find_map(|taxonomy| match self.source.post_terms(post, &taxonomy.slug) {
                Ok(terms) => terms.into_iter().next(),
                Err(err) => {
                    tracing::debug!(taxonomy = %taxonomy.slug, %err, "skipping taxonomy");
                    None
                }
            })
    }

    fn term_link(&self, id: u64, taxonomy: &str) -> String {
        self.source.term_link(id, taxonomy).unwrap_or_else(|err| {
            tracing::debug!(%err, "term link unavailable");
            String::new()
        })
    }

    /// Walk a parent chain, returning the oldest ancestor first
    ///
    /// Stops at a missing record or at an id that was already visited.
    fn ancestors<T, F>(&self, start: Option<u64>, lookup: F) -> Vec<T>
    where
        T: HasParent,
        F: Fn(u64) -> Option<T>,
    {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut next = start.filter(|id| *id != 0);

        while let Some(id) = next {
            if !seen.insert(id) {
                tracing::debug!(id, "cycle in parent chain");
                break;
            }
            let Some(item) = lookup(id) else {
                tracing::debug!(id, "missing ancestor");
                break;
            };
            next = item.parent().filter(|id| *id != 0);
            chain.push(item);
        }

        chain.reverse();
        chain
    }
}

/// Records that point at a parent record
trait HasParent {
    fn parent(&self) -> Option<u64>;
}

impl HasParent for Term {
    fn parent(&self) -> Option<u64> {
        self.parent
    }
}

impl HasParent for Post {
    fn parent(&self) -> Option<u64> {
        self.parent
    }
}

fn make_link(title: &str, url: impl Into<String>) -> Link {
    Link::new(sanitize_text_field(title), url)
}
