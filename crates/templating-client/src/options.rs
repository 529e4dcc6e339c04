//! Query options for find and get requests.

use strum::{AsRefStr, Display, EnumString};
use templating_uri::{Params, Value};

/// Query parameter names understood by the find and get routes.
pub(crate) mod keys {
    pub const SEARCH_QUERY: &str = "searchQuery";
    pub const PAGE: &str = "page";
    pub const RPP: &str = "rpp";
    pub const SORT: &str = "sort";
    pub const EMBED: &str = "embed";
    pub const FIELDS: &str = "fields";
    pub const ID: &str = "id";
}

/// Sort direction appended to the `sort` query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Options for [`TemplatingClient::find`](crate::TemplatingClient::find).
///
/// Caller-friendly names are normalized into the API query keys:
///
/// | option | query key |
/// |---|---|
/// | `search` | `searchQuery` |
/// | `page_number` | `page` |
/// | `page_size` | `rpp` |
/// | `order_by` + `order_direction` | `sort` (`"<field>\|<direction>"`) |
/// | `embed` | `embed` |
/// | `fields` | `fields` |
///
/// Raw query keys added with [`FindOptions::with_param`] are passed through
/// as-is; a typed option that is set replaces a raw key of the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub search: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub order_by: Option<String>,
    pub order_direction: Option<SortDirection>,
    pub embed: Option<String>,
    pub fields: Option<String>,
    pub params: Params,
}

impl FindOptions {
    /// Creates empty options; the server applies its defaults.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sorts by `field` in the given direction.
    #[must_use]
    pub fn with_order(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some(field.into());
        self.order_direction = Some(direction);
        self
    }

    #[must_use]
    pub fn with_embed(mut self, embed: impl Into<String>) -> Self {
        self.embed = Some(embed.into());
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Sets a raw query parameter by its API name.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Returns the `sort` query value, if ordering was requested.
    pub fn sort(&self) -> Option<String> {
        let field = self.order_by.as_deref().filter(|f| !f.is_empty())?;
        Some(match self.order_direction {
            Some(direction) => format!("{field}|{direction}"),
            None => field.to_owned(),
        })
    }

    /// Normalizes the options into find route parameters.
    pub fn to_params(&self) -> Params {
        let mut params = self.params.clone();
        params.insert_opt(keys::SEARCH_QUERY, self.search.as_deref());
        params.insert_opt(keys::PAGE, self.page_number);
        params.insert_opt(keys::RPP, self.page_size);
        params.insert_opt(keys::SORT, self.sort());
        params.insert_opt(keys::EMBED, self.embed.as_deref());
        params.insert_opt(keys::FIELDS, self.fields.as_deref());
        params
    }
}

impl From<&str> for FindOptions {
    fn from(search: &str) -> Self {
        Self::new().with_search(search)
    }
}

impl From<String> for FindOptions {
    fn from(search: String) -> Self {
        Self::new().with_search(search)
    }
}

/// Options for [`TemplatingClient::get`](crate::TemplatingClient::get).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOptions {
    pub embed: Option<String>,
    pub fields: Option<String>,
}

impl GetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_embed(mut self, embed: impl Into<String>) -> Self {
        self.embed = Some(embed.into());
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Normalizes the options into get route parameters, excluding the id.
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert_opt(keys::EMBED, self.embed.as_deref());
        params.insert_opt(keys::FIELDS, self.fields.as_deref());
        params
    }
}
