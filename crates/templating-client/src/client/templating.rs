//! Template resource client.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use templating_uri::Params;
use url::Url;

use super::BatchClient;
use crate::config::with_trailing_slash;
use crate::hal::{self, HalResource, rel};
use crate::transport::{ApiRequest, ApiResponse, ApiTransport, Method};
use crate::{
    Collection, FindOptions, GetOptions, Result, TRACING_TARGET_CLIENT, Template, TemplatingRoutes,
};

/// Inner client state shared between clones.
struct TemplatingClientInner {
    transport: Arc<dyn ApiTransport>,
    routes: TemplatingRoutes,
    base_url: Url,
}

/// Client for template resources of the templating API.
///
/// Every call builds and sends its own request; clones share the transport
/// and route table and can be used concurrently.
///
/// # Examples
///
/// ```rust,ignore
/// use templating_client::{ClientConfig, FindOptions, TemplatingClient};
///
/// let config = ClientConfig::new("https://api.example.com/v1/my-app/".parse()?);
/// let client = TemplatingClient::from_config(config)?;
///
/// let page = client.find(&FindOptions::from("welcome").with_page_size(10)).await?;
/// for mut template in page {
///     template.content.push_str("\n-- footer");
///     client.update(&template).await?;
/// }
/// ```
#[derive(Clone)]
pub struct TemplatingClient {
    inner: Arc<TemplatingClientInner>,
}

impl std::fmt::Debug for TemplatingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplatingClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl TemplatingClient {
    /// Creates a client that sends requests through `transport`.
    ///
    /// Routes and links are resolved against `base_url`.
    pub fn new<T>(transport: T, base_url: Url) -> Self
    where
        T: ApiTransport + 'static,
    {
        Self::with_routes(transport, base_url, TemplatingRoutes::new())
    }

    /// Creates a client with a custom route table.
    pub fn with_routes<T>(transport: T, base_url: Url, routes: TemplatingRoutes) -> Self
    where
        T: ApiTransport + 'static,
    {
        let inner = TemplatingClientInner {
            transport: Arc::new(transport),
            routes,
            base_url: with_trailing_slash(base_url),
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Creates a client backed by a [`ReqwestTransport`](crate::ReqwestTransport).
    #[cfg(feature = "reqwest")]
    #[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
    pub fn from_config(config: crate::ClientConfig) -> Result<Self> {
        let base_url = config.base_url();
        let transport = crate::ReqwestTransport::new(config)?;
        Ok(Self::new(transport, base_url))
    }

    /// Returns the route table used by this client.
    pub fn routes(&self) -> &TemplatingRoutes {
        &self.inner.routes
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the batch operations.
    pub fn batch(&self) -> BatchClient<'_> {
        BatchClient::new(self)
    }

    /// Finds template resources matching `options`.
    pub async fn find(&self, options: &FindOptions) -> Result<Collection<Template>> {
        let path = self.routes().find(&options.to_params());
        self.send(Method::Get, &path, None).await?.parse()
    }

    /// Fetches the template resource `id`.
    ///
    /// A blank `id` fails before any request is sent.
    pub async fn get(&self, id: &str, options: &GetOptions) -> Result<Template> {
        let path = self.routes().get(id, &options.to_params())?;
        self.send(Method::Get, &path, None).await?.parse()
    }

    /// Creates a template resource.
    pub async fn create<D>(&self, data: &D) -> Result<Template>
    where
        D: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_value(data)?;
        let path = self.routes().create();
        self.send(Method::Post, &path, Some(body)).await?.parse()
    }

    /// Updates a previously fetched resource through its `put` link.
    ///
    /// Returns the response body, or `null` when the server sends none.
    pub async fn update<R>(&self, data: &R) -> Result<Value>
    where
        R: HalResource + Serialize + Sync + ?Sized,
    {
        let path = hal::link(data, rel::PUT)?.target(&Params::new())?;
        let body = serde_json::to_value(data)?;
        self.send(Method::Put, &path, Some(body)).await?.value()
    }

    /// Removes a previously fetched resource through its `delete` link.
    ///
    /// Returns the response body, or `null` when the server sends none.
    pub async fn remove<R>(&self, data: &R) -> Result<Value>
    where
        R: HalResource + Sync + ?Sized,
    {
        let path = hal::link(data, rel::DELETE)?.target(&Params::new())?;
        self.send(Method::Delete, &path, None).await?.value()
    }

    /// Resolves `path` against the base URL and sends the request.
    ///
    /// Absolute paths, as found in HAL links, are used as they are.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse> {
        let url = self.inner.base_url.join(path)?;
        let request = ApiRequest { method, url, body };

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            method = %request.method,
            url = %request.url,
            has_body = request.body.is_some(),
            "Sending request"
        );

        let started_at = Instant::now();
        let result = self.inner.transport.send(request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET_CLIENT,
                    %method,
                    status = response.status,
                    elapsed_ms = elapsed.as_millis(),
                    "Request completed"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_CLIENT,
                    %method,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Request failed"
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::hal::{Link, Links};
    use crate::transport::MockTransport;
    use crate::{Error, ErrorKind, SortDirection};

    const BASE: &str = "https://api.example.com/v1/app/";

    fn client() -> (TemplatingClient, MockTransport) {
        let transport = MockTransport::new();
        let client = TemplatingClient::new(transport.clone(), BASE.parse().unwrap());
        (client, transport)
    }

    fn fetched(id: &str, put: &str, delete: &str) -> Template {
        let mut template = Template::new("welcome-email", "Hello");
        template.id = Some(id.into());
        template.links = Links::new()
            .with(rel::PUT, Link::new(put))
            .with(rel::DELETE, Link::new(delete));
        template
    }

    #[tokio::test]
    async fn test_find_expands_only_present_options() {
        let (client, transport) = client();
        transport.reply_json(json!({
            "item": [{ "id": "1", "templateId": "welcome-email", "content": "Hi" }],
            "page": 2,
            "recordsPerPage": 10,
            "totalRecords": 11
        }));

        let page = client
            .find(&FindOptions::new().with_page_number(2))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url.as_str(), format!("{BASE}templates/?page=2"));
        assert!(request.body.is_none());
        assert_eq!(page.len(), 1);
        assert_eq!(page.total_records, 11);
    }

    #[tokio::test]
    async fn test_find_encodes_options() {
        let (client, transport) = client();
        transport.reply_json(json!({}));

        let options = FindOptions::from("hello world")
            .with_page_size(5)
            .with_order("templateId", SortDirection::Desc);
        client.find(&options).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.url.as_str(),
            format!("{BASE}templates/?searchQuery=hello%20world&rpp=5&sort=templateId%7Cdesc")
        );
    }

    #[tokio::test]
    async fn test_get_fetches_single_resource() {
        let (client, transport) = client();
        transport.reply_json(json!({ "id": "1", "templateId": "welcome-email", "content": "Hi" }));

        let template = client
            .get("1", &GetOptions::new().with_embed("owner"))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url.as_str(), format!("{BASE}templates/1/?embed=owner"));
        assert_eq!(template.id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_get_without_id_sends_nothing() {
        let (client, transport) = client();

        let error = client.get("", &GetOptions::new()).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::InvalidInput);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_not_found_passes_through() {
        let (client, transport) = client();
        transport.fail(Error::from_status(404, "missing"));

        let error = client.get("1", &GetOptions::new()).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::NotFound);
        assert_eq!(error.status, Some(404));
    }

    #[tokio::test]
    async fn test_create_targets_collection_route() {
        let (client, transport) = client();
        transport.reply_json(json!({ "id": "new", "templateId": "welcome-email", "content": "Hi" }));

        // Links and ids in the payload must not influence the target.
        let data = fetched("1", "elsewhere/1", "elsewhere/1");
        let created = client.create(&data).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.as_str(), format!("{BASE}templates"));
        assert_eq!(request.body.unwrap()["templateId"], "welcome-email");
        assert_eq!(created.id.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_update_follows_put_link() {
        let (client, transport) = client();

        let template = fetched(
            "1",
            "https://cdn.example.com/custom/update/1",
            "templates/1",
        );
        let response = client.update(&template).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.url.as_str(), "https://cdn.example.com/custom/update/1");
        assert_eq!(request.body.unwrap(), serde_json::to_value(&template).unwrap());
        assert_eq!(response, Value::Null);
    }

    #[tokio::test]
    async fn test_update_resolves_relative_link() {
        let (client, transport) = client();

        client
            .update(&fetched("1", "templates/1/v2", "templates/1"))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url.as_str(), format!("{BASE}templates/1/v2"));
    }

    #[tokio::test]
    async fn test_update_without_put_link_sends_nothing() {
        let (client, transport) = client();

        let error = client
            .update(&Template::new("welcome-email", "Hi"))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::NotFound);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_remove_follows_delete_link() {
        let (client, transport) = client();
        transport.reply_json(json!(true));

        let response = client
            .remove(&fetched("1", "templates/1", "templates/1?force=true"))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url.as_str(), format!("{BASE}templates/1?force=true"));
        assert!(request.body.is_none());
        assert_eq!(response, json!(true));
    }

    #[tokio::test]
    async fn test_remove_without_delete_link_sends_nothing() {
        let (client, transport) = client();
        let mut template = fetched("1", "templates/1", "templates/1");
        template.links = Links::new().with(rel::PUT, Link::new("templates/1"));

        let error = client.remove(&template).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::NotFound);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_base_url_without_trailing_slash() {
        let transport = MockTransport::new();
        let client = TemplatingClient::new(
            transport.clone(),
            "https://api.example.com/v1/app".parse().unwrap(),
        );

        client.get("1", &GetOptions::new()).await.ok();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url.as_str(), format!("{BASE}templates/1/"));
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let (client, transport) = client();

        let (opts_a, opts_b) = (GetOptions::new(), GetOptions::new());
        let (a, b) = tokio::join!(client.get("a", &opts_a), client.get("b", &opts_b));

        // Both requests were sent even though the empty replies fail to parse.
        assert!(a.is_err() && b.is_err());
        assert_eq!(transport.requests().len(), 2);
    }
}
