//! Data models for breadcrumb trails
//!
//! This module defines the core data structures used throughout the crate,
//! including page type tags, crumb links and the content records the host
//! site hands back from its lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification tags for the current request
///
/// A request usually carries several tags at once (`category` + `archive` +
/// `paged`). Only some of them have a crumb handler; the others are kept so
/// that hooks and `is()` checks still see them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PageType {
    // Handlers
    FrontPage,
    Home,
    Category,
    Tag,
    Tax,
    Date,
    Year,
    Month,
    Day,
    Search,
    Author,
    PostTypeArchive,
    NotFound,
    Singular,

    // Informational
    Archive,
    Page,
    Single,
    Attachment,
    Paged,

    /// Any tag this crate has no name for
    Other(String),
}

impl PageType {
    /// Parse a tag as reported by the host site
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "front_page" => PageType::FrontPage,
            "home" => PageType::Home,
            "category" => PageType::Category,
            "tag" => PageType::Tag,
            "tax" => PageType::Tax,
            "date" => PageType::Date,
            "year" => PageType::Year,
            "month" => PageType::Month,
            "day" => PageType::Day,
            "search" => PageType::Search,
            "author" => PageType::Author,
            "post_type_archive" => PageType::PostTypeArchive,
            "404" => PageType::NotFound,
            "singular" => PageType::Singular,
            "archive" => PageType::Archive,
            "page" => PageType::Page,
            "single" => PageType::Single,
            "attachment" => PageType::Attachment,
            "paged" => PageType::Paged,
            other => PageType::Other(other.to_string()),
        }
    }

    /// The tag string for this page type
    pub fn tag(&self) -> &str {
        match self {
            PageType::FrontPage => "front_page",
            PageType::Home => "home",
            PageType::Category => "category",
            PageType::Tag => "tag",
            PageType::Tax => "tax",
            PageType::Date => "date",
            PageType::Year => "year",
            PageType::Month => "month",
            PageType::Day => "day",
            PageType::Search => "search",
            PageType::Author => "author",
            PageType::PostTypeArchive => "post_type_archive",
            PageType::NotFound => "404",
            PageType::Singular => "singular",
            PageType::Archive => "archive",
            PageType::Page => "page",
            PageType::Single => "single",
            PageType::Attachment => "attachment",
            PageType::Paged => "paged",
            PageType::Other(tag) => tag,
        }
    }
}

impl From<&str> for PageType {
    fn from(tag: &str) -> Self {
        PageType::from_tag(tag)
    }
}

impl From<String> for PageType {
    fn from(tag: String) -> Self {
        PageType::from_tag(&tag)
    }
}

impl From<PageType> for String {
    fn from(page_type: PageType) -> Self {
        page_type.tag().to_string()
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Text direction of the site language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// Delimiter used when none is configured
    pub fn default_delimiter(&self) -> &'static str {
        match self {
            Direction::Ltr => "\\",
            Direction::Rtl => "/",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Direction::Rtl)
    }
}

/// A single crumb in the trail
///
/// A link without a URL is rendered as a bare label and marks the crumb for
/// the resource being viewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Text shown for the crumb
    pub label: String,

    /// Target of the crumb, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Link {
    /// Create a linked crumb. An empty URL yields a label-only crumb.
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            label: label.into(),
            url: if url.trim().is_empty() { None } else { Some(url) },
        }
    }

    /// Create a crumb without a target
    pub fn label_only(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: None,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.url.is_some()
    }
}

/// A post, page or any other content entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,

    /// Post type name (`post`, `page`, `tutorial`, ...)
    #[serde(default = "default_post_type")]
    pub post_type: String,

    /// Parent entry, for hierarchical post types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,

    #[serde(default)]
    pub title: String,
}

fn default_post_type() -> String {
    DEFAULT_POST_TYPE.to_string()
}

/// Name of the built-in blog post type
pub const DEFAULT_POST_TYPE: &str = "post";

/// A taxonomy term (category, tag, custom term)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    pub taxonomy: String,
}

/// A taxonomy registered for one or more post types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub slug: String,
    #[serde(default)]
    pub hierarchical: bool,
}

/// A registered post type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTypeInfo {
    pub name: String,

    /// Plural label, also used as the archive title
    pub label: String,

    #[serde(default)]
    pub hierarchical: bool,

    #[serde(default)]
    pub has_archive: bool,
}

/// A content author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: u64,
    pub display_name: String,
}
