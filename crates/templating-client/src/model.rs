//! Resource types returned by the templating API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::hal::{HalResource, Links};

/// A template resource.
///
/// Fields the client does not model are kept in `extra` so that a fetched
/// resource can be sent back unchanged on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Server-assigned identifier; absent before creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Caller-chosen template key.
    #[serde(default)]
    pub template_id: String,
    /// Template body.
    #[serde(default)]
    pub content: String,
    /// Hypermedia links.
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    /// Any other properties returned by the server.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Template {
    /// Creates a new, unsaved template.
    pub fn new(template_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            content: content.into(),
            ..Self::default()
        }
    }
}

impl HalResource for Template {
    fn links(&self) -> &Links {
        &self.links
    }
}

/// A page of resources returned by a find request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection<T> {
    /// Resources on this page.
    #[serde(default = "Vec::new")]
    pub item: Vec<T>,
    /// One-based page number.
    #[serde(default)]
    pub page: u32,
    /// Page size used by the server.
    #[serde(default)]
    pub records_per_page: u32,
    /// Number of matching resources across all pages.
    #[serde(default)]
    pub total_records: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    /// Hypermedia links, typically paging relations.
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl<T> Collection<T> {
    /// Returns the number of resources on this page.
    pub fn len(&self) -> usize {
        self.item.len()
    }

    /// Returns `true` if this page holds no resources.
    pub fn is_empty(&self) -> bool {
        self.item.is_empty()
    }

    /// Returns the number of pages, or zero when the page size is unknown.
    pub fn total_pages(&self) -> u64 {
        match u64::from(self.records_per_page) {
            0 => 0,
            rpp => self.total_records.div_ceil(rpp),
        }
    }

    /// Returns `true` if a later page exists.
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    /// Iterates over the resources on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.item.iter()
    }
}

impl<T> HalResource for Collection<T> {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl<T> IntoIterator for Collection<T> {
    type IntoIter = std::vec::IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.item.into_iter()
    }
}
