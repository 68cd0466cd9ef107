//! Content source trait
//!
//! The host content system owns posts, terms, authors and permalinks. The
//! collector only reads from it through [`ContentSource`].

use crate::escape::encode_query_value;
use crate::models::{Author, Post, PostTypeInfo, Taxonomy, Term};
use thiserror::Error;

/// Lookup errors reported by a content source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),

    #[error("Term {id} not found in taxonomy '{taxonomy}'")]
    TermNotFound { id: u64, taxonomy: String },
}

/// Read-only queries against the host content system
///
/// Missing records come back as `None`; the collector turns them into
/// label-only crumbs instead of failing.
pub trait ContentSource {
    /// Site URL with `path` appended
    fn home_url(&self, path: &str) -> String;

    /// Page configured to list blog posts, if any
    fn posts_page(&self) -> Option<u64>;

    fn post(&self, id: u64) -> Option<Post>;

    fn permalink(&self, id: u64) -> Option<String>;

    fn category(&self, id: u64) -> Option<Term>;

    fn category_link(&self, id: u64) -> Option<String>;

    fn tag(&self, id: u64) -> Option<Term>;

    fn tag_link(&self, id: u64) -> Option<String>;

    fn term_by_slug(&self, taxonomy: &str, slug: &str) -> Option<Term>;

    fn term_by_id(&self, taxonomy: &str, id: u64) -> Option<Term>;

    fn term_link(&self, id: u64, taxonomy: &str) -> Result<String, LookupError>;

    fn author(&self, id: u64) -> Option<Author>;

    fn author_posts_url(&self, id: u64) -> Option<String>;

    fn post_type(&self, name: &str) -> Option<PostTypeInfo>;

    fn post_type_archive_link(&self, name: &str) -> Option<String>;

    /// Taxonomies registered for a post type, in registration order
    fn object_taxonomies(&self, post_type: &str) -> Vec<Taxonomy>;

    /// Terms of a post in one taxonomy
    fn post_terms(&self, post: &Post, taxonomy: &str) -> Result<Vec<Term>, LookupError>;

    fn year_link(&self, year: i32) -> String {
        self.home_url(&format!("{}/", year))
    }

    fn month_link(&self, year: i32, month: u32) -> String {
        self.home_url(&format!("{}/{:02}/", year, month))
    }

    fn day_link(&self, year: i32, month: u32, day: u32) -> String {
        self.home_url(&format!("{}/{:02}/{:02}/", year, month, day))
    }

    fn search_link(&self, query: &str) -> String {
        self.home_url(&format!("?s={}", encode_query_value(query)))
    }

    fn is_post_type_hierarchical(&self, name: &str) -> bool {
        self.post_type(name).map(|t| t.hierarchical).unwrap_or(false)
    }
}
