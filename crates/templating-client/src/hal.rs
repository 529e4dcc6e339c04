//! HAL link resolution.
//!
//! Resources returned by the API describe their own follow-up actions under
//! `_links`, keyed by relation name:
//!
//! ```json
//! {
//!   "id": "welcome",
//!   "_links": {
//!     "put": { "href": "https://api.example.com/v1/app/templates/welcome" },
//!     "delete": { "href": "https://api.example.com/v1/app/templates/welcome" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

use serde::{Deserialize, Serialize};
use templating_uri::{Params, UriTemplate};

use crate::{Error, Result};

/// Well-known link relation names.
pub mod rel {
    /// Relation used to update a resource.
    pub const PUT: &str = "put";
    /// Relation used to remove a resource.
    pub const DELETE: &str = "delete";
    /// Canonical location of a resource.
    pub const SELF: &str = "self";
}

/// A single hypermedia link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL, absolute or relative to the API base URL.
    pub href: String,
    /// Whether `href` is itself a URI template.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub templated: bool,
}

impl Link {
    /// Creates a plain link.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            templated: false,
        }
    }

    /// Returns the target, expanding it first when the link is templated.
    pub fn target(&self, params: &Params) -> Result<String> {
        if self.templated {
            Ok(UriTemplate::parse(&self.href)?.expand(params))
        } else {
            Ok(self.href.clone())
        }
    }
}

/// Links of a resource keyed by relation name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, Link>);

impl Links {
    /// Creates an empty link set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a link and returns the set.
    #[must_use]
    pub fn with(mut self, relation: impl Into<String>, link: Link) -> Self {
        self.insert(relation, link);
        self
    }

    /// Inserts a link, replacing any previous link for the relation.
    pub fn insert(&mut self, relation: impl Into<String>, link: Link) -> Option<Link> {
        self.0.insert(relation.into(), link)
    }

    /// Looks up a link by relation name.
    pub fn get(&self, relation: &str) -> Option<&Link> {
        self.0.get(relation)
    }

    /// Returns `true` if there are no links.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(relation, link)` pairs.
    pub fn iter(&self) -> Iter<'_, String, Link> {
        self.0.iter()
    }
}

/// A resource that carries HAL links.
pub trait HalResource {
    /// Returns the links embedded in the resource.
    fn links(&self) -> &Links;
}

impl<T: HalResource + ?Sized> HalResource for &T {
    fn links(&self) -> &Links {
        (**self).links()
    }
}

impl HalResource for Links {
    fn links(&self) -> &Links {
        self
    }
}

/// Resolves the link with the given relation name.
///
/// Fails with [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) when the
/// relation is missing or its `href` is blank.
pub fn link<'a, R>(resource: &'a R, relation: &str) -> Result<&'a Link>
where
    R: HalResource + ?Sized,
{
    resource
        .links()
        .get(relation)
        .filter(|link| !link.href.trim().is_empty())
        .ok_or_else(|| {
            Error::not_found().with_message(format!("resource has no usable '{relation}' link"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn links() -> Links {
        Links::new()
            .with(rel::PUT, Link::new("templates/welcome"))
            .with(rel::DELETE, Link::new(""))
    }

    #[test]
    fn test_link_found() {
        let links = links();
        let link = link(&links, rel::PUT).unwrap();
        assert_eq!(link.href, "templates/welcome");
    }

    #[test]
    fn test_link_missing_relation() {
        let error = link(&links(), rel::SELF).unwrap_err();
        assert_eq!(error.kind, ErrorKind::NotFound);
        assert!(error.to_string().contains("'self'"));
    }

    #[test]
    fn test_link_blank_href() {
        let error = link(&links(), rel::DELETE).unwrap_err();
        assert_eq!(error.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_templated_target() {
        let link = Link {
            href: "templates/welcome/{?embed}".into(),
            templated: true,
        };

        assert_eq!(link.target(&Params::new()).unwrap(), "templates/welcome/");
        assert_eq!(
            link.target(&Params::new().with("embed", "owner")).unwrap(),
            "templates/welcome/?embed=owner"
        );
        assert_eq!(
            Link::new("templates/{id}").target(&Params::new()).unwrap(),
            "templates/{id}"
        );
    }

    #[test]
    fn test_links_serde() {
        let json = r#"{"put":{"href":"a"},"self":{"href":"b/{?x}","templated":true}}"#;
        let links: Links = serde_json::from_str(json).unwrap();

        assert_eq!(links.get(rel::PUT), Some(&Link::new("a")));
        assert!(links.get(rel::SELF).unwrap().templated);
        assert_eq!(serde_json::to_string(&links).unwrap(), json);
    }
}
