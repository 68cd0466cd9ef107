//! crumbtrail_core - Core library for breadcrumb trails
//!
//! This crate builds the breadcrumb trail for a page of a content-managed
//! site and renders it as an HTML fragment.
//!
//! # Features
//!
//! - **Page Type Dispatch**: Each page classification (category archive,
//!   single post, search, 404, ...) maps to one crumb handler.
//! - **Ancestor Walking**: Parent pages and parent terms appear oldest-first.
//! - **Pagination**: Later pages of a listing end in a `Page N` crumb.
//! - **Hooks**: External filters may rewrite the collected trail.
//! - **Direction Support**: Right-to-left trails are rendered reversed.
//! - **Site Snapshots**: An in-memory content source loaded from YAML/JSON.
//!
//! # Example
//!
//! ```rust
//! use crumbtrail_core::{
//!     Breadcrumbs, BreadcrumbsOptions, Page, QueryVars, RequestContext, SiteSnapshot, Term,
//! };
//!
//! let site = SiteSnapshot::new("http://my.site/").with_term(Term {
//!     id: 3,
//!     name: "News".to_string(),
//!     slug: "news".to_string(),
//!     parent: None,
//!     taxonomy: "category".to_string(),
//! });
//!
//! let request = RequestContext::new(Page::new(["category", "archive"])).with_query(QueryVars {
//!     cat: Some(3),
//!     ..Default::default()
//! });
//!
//! let breadcrumbs = Breadcrumbs::without_hooks(&request, &site, BreadcrumbsOptions::new().build());
//! assert_eq!(breadcrumbs.path(), "Home > News");
//! println!("{}", breadcrumbs.render());
//! ```

pub mod collector;
pub mod config;
pub mod engine;
pub mod escape;
pub mod hooks;
pub mod loader;
pub mod models;
pub mod output;
pub mod page;
pub mod site;
pub mod source;

// Re-exports for convenience
pub use collector::TrailCollector;
pub use config::{BreadcrumbsConfig, BreadcrumbsOptions, ConfigError, Labels};
pub use engine::Breadcrumbs;
pub use hooks::{Hooks, LinkFilter, LINKS_HOOK};
pub use loader::{load_document, DocumentFormat, LoadError};
pub use models::{Author, Direction, Link, PageType, Post, PostTypeInfo, Taxonomy, Term};
pub use output::{format_html, format_output, FormatError, OutputFormat, TrailReport};
pub use page::{Page, PageClassifier, QueryVars, RequestContext};
pub use site::{PostRecord, SiteSnapshot, TaxonomyRecord};
pub use source::{ContentSource, LookupError};
