//! In-memory content source
//!
//! A [`SiteSnapshot`] describes a site's posts, terms, post types and
//! authors. It can be written by hand as YAML/JSON and answers every
//! [`ContentSource`] query, building permalinks from `home_url`.

use crate::loader::{load_document, LoadError};
use crate::models::{Author, Post, PostTypeInfo, Taxonomy, Term, DEFAULT_POST_TYPE};
use crate::source::{ContentSource, LookupError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A post together with its explicit permalink and term assignments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(flatten)]
    pub post: Post,

    /// Overrides the generated `?p=` permalink
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,

    /// Term ids keyed by taxonomy slug
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub terms: BTreeMap<String, Vec<u64>>,
}

/// A taxonomy and the post types it is registered for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRecord {
    #[serde(flatten)]
    pub taxonomy: Taxonomy,

    #[serde(default)]
    pub object_types: Vec<String>,
}

/// Snapshot of a site's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSnapshot {
    /// Site root, always ending in `/`
    pub home_url: String,

    /// Page that lists blog posts
    pub posts_page: Option<u64>,

    pub posts: Vec<PostRecord>,
    pub terms: Vec<Term>,
    pub taxonomies: Vec<TaxonomyRecord>,
    pub post_types: Vec<PostTypeInfo>,
    pub authors: Vec<Author>,
}

impl Default for SiteSnapshot {
    fn default() -> Self {
        Self {
            home_url: "http://localhost/".to_string(),
            posts_page: None,
            posts: Vec::new(),
            terms: Vec::new(),
            taxonomies: vec![
                TaxonomyRecord {
                    taxonomy: Taxonomy {
                        slug: "category".to_string(),
                        hierarchical: true,
                    },
                    object_types: vec![DEFAULT_POST_TYPE.to_string()],
                },
                TaxonomyRecord {
                    taxonomy: Taxonomy {
                        slug: "post_tag".to_string(),
                        hierarchical: false,
                    },
                    object_types: vec![DEFAULT_POST_TYPE.to_string()],
                },
            ],
            post_types: vec![
                PostTypeInfo {
                    name: DEFAULT_POST_TYPE.to_string(),
                    label: "Posts".to_string(),
                    hierarchical: false,
                    has_archive: false,
                },
                PostTypeInfo {
                    name: "page".to_string(),
                    label: "Pages".to_string(),
                    hierarchical: true,
                    has_archive: false,
                },
            ],
            authors: Vec::new(),
        }
    }
}

impl SiteSnapshot {
    /// Create an empty snapshot rooted at `home_url`
    pub fn new(home_url: impl Into<String>) -> Self {
        let mut home_url = home_url.into();
        if !home_url.ends_with('/') {
            home_url.push('/');
        }
        Self {
            home_url,
            ..Default::default()
        }
    }

    /// Load a snapshot from a YAML or JSON file
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let mut snapshot: SiteSnapshot = load_document(path)?;
        if !snapshot.home_url.ends_with('/') {
            snapshot.home_url.push('/');
        }
        Ok(snapshot)
    }

    /// Set the posts page (builder pattern)
    pub fn with_posts_page(mut self, id: u64) -> Self {
        self.posts_page = Some(id);
        self
    }

    /// Add a post (builder pattern)
    pub fn with_post(mut self, post: Post) -> Self {
        self.posts.push(PostRecord {
            post,
            permalink: None,
            terms: BTreeMap::new(),
        });
        self
    }

    /// Add a post assigned to terms of one taxonomy (builder pattern)
    pub fn with_post_in_terms(mut self, post: Post, taxonomy: &str, term_ids: Vec<u64>) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(taxonomy.to_string(), term_ids);
        self.posts.push(PostRecord {
            post,
            permalink: None,
            terms,
        });
        self
    }

    /// Add a term (builder pattern)
    pub fn with_term(mut self, term: Term) -> Self {
        self.terms.push(term);
        self
    }

    /// Register a taxonomy for post types (builder pattern)
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy, object_types: Vec<String>) -> Self {
        self.taxonomies.retain(|t| t.taxonomy.slug != taxonomy.slug);
        self.taxonomies.push(TaxonomyRecord {
            taxonomy,
            object_types,
        });
        self
    }

    /// Register a post type (builder pattern)
    pub fn with_post_type(mut self, post_type: PostTypeInfo) -> Self {
        self.post_types.retain(|t| t.name != post_type.name);
        self.post_types.push(post_type);
        self
    }

    /// Add an author (builder pattern)
    pub fn with_author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    fn record(&self, id: u64) -> Option<&PostRecord> {
        self.posts.iter().find(|r| r.post.id == id)
    }

    fn find_term(&self, taxonomy: &str, predicate: impl Fn(&Term) -> bool) -> Option<Term> {
        self.terms
            .iter()
            .find(|t| t.taxonomy == taxonomy && predicate(t))
            .cloned()
    }

    fn has_taxonomy(&self, taxonomy: &str) -> bool {
        self.taxonomies.iter().any(|t| t.taxonomy.slug == taxonomy)
    }
}

impl ContentSource for SiteSnapshot {
    fn home_url(&self, path: &str) -> String {
        format!("{}{}", self.home_url, path.trim_start_matches('/'))
    }

    fn posts_page(&self) -> Option<u64> {
        self.posts_page
    }

    fn post(&self, id: u64) -> Option<Post> {
        self.record(id).map(|r| r.post.clone())
    }

    fn permalink(&self, id: u64) -> Option<String> {
        let record = self.record(id)?;
        match &record.permalink {
            Some(permalink) => Some(permalink.clone()),
            None if record.post.post_type == "page" => Some(self.home_url(&format!("?page_id={}", id))),
            None => Some(self.home_url(&format!("?p={}", id))),
        }
    }

    fn category(&self, id: u64) -> Option<Term> {
        self.term_by_id("category", id)
    }

    fn category_link(&self, id: u64) -> Option<String> {
        self.term_link(id, "category").ok()
    }

    fn tag(&self, id: u64) -> Option<Term> {
        self.term_by_id("post_tag", id)
    }

    fn tag_link(&self, id: u64) -> Option<String> {
        self.term_link(id, "post_tag").ok()
    }

    fn term_by_slug(&self, taxonomy: &str, slug: &str) -> Option<Term> {
        self.find_term(taxonomy, |t| t.slug == slug)
    }

    fn term_by_id(&self, taxonomy: &str, id: u64) -> Option<Term> {
        self.find_term(taxonomy, |t| t.id == id)
    }

    fn term_link(&self, id: u64, taxonomy: &str) -> Result<String, LookupError> {
        if !self.has_taxonomy(taxonomy) {
            return Err(LookupError::InvalidTaxonomy(taxonomy.to_string()));
        }

        let term = self
            .term_by_id(taxonomy, id)
            .ok_or_else(|| LookupError::TermNotFound {
                id,
                taxonomy: taxonomy.to_string(),
            })?;

        let base = match taxonomy {
            "post_tag" => "tag",
            other => other,
        };

        Ok(self.home_url(&format!("{}/{}/", base, term.slug)))
    }

    fn author(&self, id: u64) -> Option<Author> {
        self.authors.iter().find(|a| a.id == id).cloned()
    }

    fn author_posts_url(&self, id: u64) -> Option<String> {
        self.author(id)
            .map(|a| self.home_url(&format!("author/{}/", a.id)))
    }

    fn post_type(&self, name: &str) -> Option<PostTypeInfo> {
        self.post_types.iter().find(|t| t.name == name).cloned()
    }

    fn post_type_archive_link(&self, name: &str) -> Option<String> {
        if name == DEFAULT_POST_TYPE {
            // Blog posts are listed on the posts page, or on the front page
            return match self.posts_page {
                Some(id) => self.permalink(id),
                None => Some(self.home_url("")),
            };
        }

        let post_type = self.post_type(name)?;
        if !post_type.has_archive {
            return None;
        }
        Some(self.home_url(&format!("{}/", post_type.name)))
    }

    fn object_taxonomies(&self, post_type: &str) -> Vec<Taxonomy> {
        self.taxonomies
            .iter()
            .filter(|t| t.object_types.iter().any(|o| o == post_type))
            .map(|t| t.taxonomy.clone())
            .collect()
    }

    fn post_terms(&self, post: &Post, taxonomy: &str) -> Result<Vec<Term>, LookupError> {
        if !self.has_taxonomy(taxonomy) {
            return Err(LookupError::InvalidTaxonomy(taxonomy.to_string()));
        }

        let Some(record) = self.record(post.id) else {
            return Ok(Vec::new());
        };

        Ok(record
            .terms
            .get(taxonomy)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.term_by_id(taxonomy, *id))
                    .collect()
            })
            .unwrap_or_default())
    }
}
