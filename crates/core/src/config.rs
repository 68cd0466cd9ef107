//! Configuration module for breadcrumb rendering
//!
//! [`BreadcrumbsOptions`] holds raw settings as supplied by the caller.
//! [`BreadcrumbsConfig`] is the sanitized, immutable form the collector and
//! renderer work from.

use crate::escape::{esc_attr, sanitize_text_field};
use crate::models::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid direction: {0} (expected 'ltr' or 'rtl')")]
    InvalidDirection(String),
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ltr" => Ok(Direction::Ltr),
            "rtl" => Ok(Direction::Rtl),
            other => Err(ConfigError::InvalidDirection(other.to_string())),
        }
    }
}

/// Localizable fixed strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Default label for the home crumb
    pub home: String,

    /// Label for the crumb on error pages
    pub not_found: String,

    /// Page number crumb; `%d` is replaced by the number
    pub page_number: String,

    /// Quote marks around the search query
    pub open_quote: String,
    pub close_quote: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            home: "Home".to_string(),
            not_found: "Error 404".to_string(),
            page_number: "Page %d".to_string(),
            open_quote: "\u{201c}".to_string(),
            close_quote: "\u{201d}".to_string(),
        }
    }
}

impl Labels {
    /// Label for the given page number
    pub fn page(&self, number: u32) -> String {
        self.page_number.replace("%d", &number.to_string())
    }

    /// Search query wrapped in quote marks
    pub fn quoted(&self, text: &str) -> String {
        format!("{}{}{}", self.open_quote, text, self.close_quote)
    }
}

/// Raw breadcrumb settings
///
/// Unknown keys are ignored and missing keys fall back to defaults when the
/// options are turned into a [`BreadcrumbsConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadcrumbsOptions {
    #[serde(alias = "homeLabel")]
    pub home_label: Option<String>,

    pub delimiter: Option<String>,

    /// Text to prepend to the trail
    pub before: Option<String>,

    /// Text to append to the trail
    pub after: Option<String>,

    pub direction: Direction,

    pub labels: Labels,
}

impl BreadcrumbsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from a string map
    ///
    /// Recognized keys: `home_label` (or `homeLabel`), `delimiter`, `before`,
    /// `after` and `direction`.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut options = Self::default();

        for (key, value) in map {
            match key.as_str() {
                "home_label" | "homeLabel" => options.home_label = Some(value.clone()),
                "delimiter" => options.delimiter = Some(value.clone()),
                "before" => options.before = Some(value.clone()),
                "after" => options.after = Some(value.clone()),
                "direction" => options.direction = value.parse()?,
                _ => {}
            }
        }

        Ok(options)
    }

    /// Set home label (builder pattern)
    pub fn with_home_label(mut self, label: impl Into<String>) -> Self {
        self.home_label = Some(label.into());
        self
    }

    /// Set delimiter (builder pattern)
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Set text before the trail (builder pattern)
    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    /// Set text after the trail (builder pattern)
    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    /// Set text direction (builder pattern)
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set localized labels (builder pattern)
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Sanitize and apply defaults
    pub fn build(self) -> BreadcrumbsConfig {
        BreadcrumbsConfig::from(self)
    }
}

/// Sanitized breadcrumb settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbsConfig {
    home_label: String,
    delimiter: String,
    before: String,
    after: String,
    direction: Direction,
    labels: Labels,
}

impl Default for BreadcrumbsConfig {
    fn default() -> Self {
        BreadcrumbsOptions::default().build()
    }
}

impl From<BreadcrumbsOptions> for BreadcrumbsConfig {
    fn from(options: BreadcrumbsOptions) -> Self {
        let home_label = non_empty(options.home_label.as_deref())
            .map(sanitize_text_field)
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| options.labels.home.clone());

        let delimiter = non_empty(options.delimiter.as_deref())
            .map(esc_attr)
            .unwrap_or_else(|| options.direction.default_delimiter().to_string());

        Self {
            home_label,
            delimiter,
            before: sanitize_text_field(options.before.as_deref().unwrap_or_default()),
            after: sanitize_text_field(options.after.as_deref().unwrap_or_default()),
            direction: options.direction,
            labels: options.labels,
        }
    }
}

impl BreadcrumbsConfig {
    pub fn home_label(&self) -> &str {
        &self.home_label
    }

    /// Delimiter, already escaped for HTML output
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn before(&self) -> &str {
        &self.before
    }

    pub fn after(&self) -> &str {
        &self.after
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
