//! Request state: page classification and query variables
//!
//! The host site decides what kind of page is being served. That decision is
//! handed to the collector as a [`RequestContext`] instead of being read from
//! process-wide state.

use crate::models::{PageType, Post};
use serde::{Deserialize, Serialize};

/// Reports the classification of the current page
pub trait PageClassifier {
    /// All type tags for the page, most specific first
    fn types(&self) -> &[PageType];

    /// Current page number of a paginated listing (1-indexed)
    fn number(&self) -> u32;

    /// Check whether the page carries a tag
    fn is(&self, page_type: &PageType) -> bool {
        self.types().contains(page_type)
    }
}

/// Plain page classification as reported by the host site
///
/// Deserialized pages go through [`Page::with_number`], so a page past the
/// first always carries the `paged` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPage")]
pub struct Page {
    types: Vec<PageType>,
    number: u32,
}

/// Page as written in a request file
#[derive(Deserialize)]
struct RawPage {
    #[serde(default)]
    types: Vec<PageType>,

    #[serde(default = "first_page")]
    number: u32,
}

impl From<RawPage> for Page {
    fn from(raw: RawPage) -> Self {
        Page::new(raw.types).with_number(raw.number)
    }
}

fn first_page() -> u32 {
    1
}

impl Default for Page {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            number: first_page(),
        }
    }
}

impl Page {
    /// Create a page with the given type tags
    pub fn new<I, T>(types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PageType>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            number: 1,
        }
    }

    /// Set the page number (builder pattern)
    ///
    /// The `paged` tag is added for any page past the first.
    pub fn with_number(mut self, number: u32) -> Self {
        self.number = number.max(1);
        if self.number > 1 && !self.types.contains(&PageType::Paged) {
            self.types.push(PageType::Paged);
        }
        self
    }
}

impl PageClassifier for Page {
    fn types(&self) -> &[PageType] {
        &self.types
    }

    fn number(&self) -> u32 {
        self.number
    }
}

/// Query variables of the current request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryVars {
    /// Category id
    pub cat: Option<u64>,

    /// Tag id
    pub tag_id: Option<u64>,

    /// Taxonomy slug of a term archive
    pub taxonomy: Option<String>,

    /// Term slug of a term archive
    pub term: Option<String>,

    pub year: Option<i32>,
    pub monthnum: Option<u32>,
    pub day: Option<u32>,

    /// Search query
    #[serde(rename = "s", alias = "search")]
    pub search: Option<String>,

    /// Author id
    pub author: Option<u64>,

    /// Post type of a post type archive
    pub post_type: Option<String>,

    /// Id of the post being viewed, when the post itself is not supplied
    pub p: Option<u64>,
}

/// Everything the collector needs to know about the current request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext<P = Page> {
    /// Page classification
    pub page: P,

    /// Query variables
    #[serde(default)]
    pub query: QueryVars,

    /// Post being viewed on singular pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
}

impl<P: PageClassifier> RequestContext<P> {
    /// Create a context for a page with no query variables
    pub fn new(page: P) -> Self {
        Self {
            page,
            query: QueryVars::default(),
            post: None,
        }
    }

    /// Set query variables (builder pattern)
    pub fn with_query(mut self, query: QueryVars) -> Self {
        self.query = query;
        self
    }

    /// Set the post being viewed (builder pattern)
    pub fn with_post(mut self, post: Post) -> Self {
        self.post = Some(post);
        self
    }

    /// True when the current page is a later page of a listing
    pub fn is_paged(&self) -> bool {
        self.page.is(&PageType::Paged)
    }
}
