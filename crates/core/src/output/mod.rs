//! Output formatting module
//!
//! This module provides formatters for HTML, JSON, YAML and plain text
//! output of a collected breadcrumb trail.

mod html;

pub use html::{format_html, format_link};

use crate::engine::Breadcrumbs;
use crate::models::{Link, PageType};
use serde::Serialize;
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Available output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// HTML fragment
    #[default]
    Html,
    /// JSON report
    Json,
    /// YAML report
    Yaml,
    /// Plain text path
    Summary,
}

/// Serializable view of a trail
#[derive(Debug, Clone, Serialize)]
pub struct TrailReport<'a> {
    pub page_types: &'a [PageType],
    pub links: &'a [Link],
    pub html: String,
}

impl<'a> From<&'a Breadcrumbs> for TrailReport<'a> {
    fn from(breadcrumbs: &'a Breadcrumbs) -> Self {
        Self {
            page_types: breadcrumbs.page_types(),
            links: breadcrumbs.links(),
            html: breadcrumbs.render(),
        }
    }
}

/// Format a trail in the specified format
pub fn format_output(breadcrumbs: &Breadcrumbs, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Html => Ok(breadcrumbs.render()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&TrailReport::from(breadcrumbs))?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&TrailReport::from(breadcrumbs))?),
        OutputFormat::Summary => Ok(format_summary(breadcrumbs)),
    }
}

/// Format as plain text summary
fn format_summary(breadcrumbs: &Breadcrumbs) -> String {
    let mut output = String::new();

    let types: Vec<&str> = breadcrumbs.page_types().iter().map(|t| t.tag()).collect();
    output.push_str(&format!("Page: {}\n", types.join(", ")));
    output.push_str(&format!("Crumbs: {}\n", breadcrumbs.links().len()));
    output.push_str(&format!("Trail: {}\n", breadcrumbs.path()));

    output
}
