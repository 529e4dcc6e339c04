//! Batch operations.

use serde::Serialize;
use serde_json::Value;

use super::TemplatingClient;
use crate::Result;
use crate::transport::Method;

/// Batch operations on template resources.
///
/// Each call issues exactly one request to the batch route carrying the whole
/// sequence; how the server applies it is up to the server.
#[derive(Debug, Clone, Copy)]
pub struct BatchClient<'a> {
    client: &'a TemplatingClient,
}

impl<'a> BatchClient<'a> {
    pub(crate) fn new(client: &'a TemplatingClient) -> Self {
        Self { client }
    }

    /// Creates several resources with one `POST`.
    pub async fn create<D>(&self, items: &[D]) -> Result<Value>
    where
        D: Serialize + Sync,
    {
        let body = serde_json::to_value(items)?;
        let path = self.client.routes().batch().create();
        self.client
            .send(Method::Post, &path, Some(body))
            .await?
            .value()
    }

    /// Updates several resources with one `POST`.
    ///
    /// The API expects `POST` here, unlike the `PUT` used by single updates.
    pub async fn update<D>(&self, items: &[D]) -> Result<Value>
    where
        D: Serialize + Sync,
    {
        let body = serde_json::to_value(items)?;
        let path = self.client.routes().batch().update();
        self.client
            .send(Method::Post, &path, Some(body))
            .await?
            .value()
    }

    /// Removes several resources by id with one `DELETE` whose body is the
    /// id array.
    pub async fn remove<I>(&self, ids: &[I]) -> Result<Value>
    where
        I: Serialize + Sync,
    {
        let body = serde_json::to_value(ids)?;
        let path = self.client.routes().batch().remove();
        self.client
            .send(Method::Delete, &path, Some(body))
            .await?
            .value()
    }
}
