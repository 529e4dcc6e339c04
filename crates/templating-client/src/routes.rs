//! Route templates of the templating API.

use templating_uri::{Params, UriTemplate};

use crate::options::keys;
use crate::{Error, Result};

const FIND: &str = "templates/{?searchQuery,page,rpp,sort,embed,fields}";
const GET: &str = "templates/{id}/{?embed,fields}";
const CREATE: &str = "templates";
const BATCH: &str = "templates/batch";

/// Route templates for batch operations.
///
/// All three expand to the same URL; the client tells them apart by HTTP
/// method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRoutes {
    create: UriTemplate,
    update: UriTemplate,
    remove: UriTemplate,
}

impl BatchRoutes {
    fn try_new() -> Result<Self> {
        Ok(Self {
            create: UriTemplate::parse(BATCH)?,
            update: UriTemplate::parse(BATCH)?,
            remove: UriTemplate::parse(BATCH)?,
        })
    }

    /// Expands the batch create route.
    pub fn create(&self) -> String {
        self.create.expand(&Params::new())
    }

    /// Expands the batch update route.
    pub fn update(&self) -> String {
        self.update.expand(&Params::new())
    }

    /// Expands the batch remove route.
    pub fn remove(&self) -> String {
        self.remove.expand(&Params::new())
    }

    /// Returns the compiled batch create template.
    pub fn create_template(&self) -> &UriTemplate {
        &self.create
    }

    /// Returns the compiled batch update template.
    pub fn update_template(&self) -> &UriTemplate {
        &self.update
    }

    /// Returns the compiled batch remove template.
    pub fn remove_template(&self) -> &UriTemplate {
        &self.remove
    }
}

/// Builds endpoint URLs, relative to the API base URL, for template resources.
///
/// Update and remove have no entries here: those operations follow the links
/// embedded in the resource itself.
///
/// ```rust
/// use templating_client::{Params, TemplatingRoutes};
///
/// let routes = TemplatingRoutes::new();
/// assert_eq!(routes.find(&Params::new().with("page", 2u32)), "templates/?page=2");
/// assert_eq!(routes.get("welcome", &Params::new())?, "templates/welcome/");
/// assert_eq!(routes.batch().remove(), "templates/batch");
/// # Ok::<(), templating_client::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatingRoutes {
    find: UriTemplate,
    get: UriTemplate,
    create: UriTemplate,
    batch: BatchRoutes,
}

impl TemplatingRoutes {
    /// Compiles the route table.
    ///
    /// # Panics
    ///
    /// Panics if a built-in route pattern fails to compile, which
    /// [`TemplatingRoutes::try_new`] reports as an error instead.
    pub fn new() -> Self {
        Self::try_new().expect("built-in route patterns are valid")
    }

    /// Compiles the route table, returning an error if any pattern is invalid.
    pub fn try_new() -> Result<Self> {
        Ok(Self {
            find: UriTemplate::parse(FIND)?,
            get: UriTemplate::parse(GET)?,
            create: UriTemplate::parse(CREATE)?,
            batch: BatchRoutes::try_new()?,
        })
    }

    /// Expands the find route with `searchQuery`, `page`, `rpp`, `sort`,
    /// `embed` and `fields`; other keys are ignored.
    pub fn find(&self, params: &Params) -> String {
        self.find.expand(params)
    }

    /// Expands the get route for the resource `id`.
    ///
    /// Fails with [`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput)
    /// when `id` is blank.
    pub fn get(&self, id: &str, params: &Params) -> Result<String> {
        if id.trim().is_empty() {
            return Err(Error::invalid_input().with_message("template id must not be empty"));
        }

        let mut params = params.clone();
        params.insert(keys::ID, id);
        Ok(self.get.expand(&params))
    }

    /// Expands the create route.
    pub fn create(&self) -> String {
        self.create.expand(&Params::new())
    }

    /// Returns the batch route templates.
    pub fn batch(&self) -> &BatchRoutes {
        &self.batch
    }

    /// Compiles an arbitrary RFC 6570 pattern for endpoints outside the
    /// predefined set.
    pub fn parse(&self, pattern: &str) -> Result<UriTemplate> {
        Ok(UriTemplate::parse(pattern)?)
    }

    /// Returns the compiled find template.
    pub fn find_template(&self) -> &UriTemplate {
        &self.find
    }

    /// Returns the compiled get template.
    pub fn get_template(&self) -> &UriTemplate {
        &self.get
    }

    /// Returns the compiled create template.
    pub fn create_template(&self) -> &UriTemplate {
        &self.create
    }
}

impl Default for TemplatingRoutes {
    fn default() -> Self {
        Self::new()
    }
}
