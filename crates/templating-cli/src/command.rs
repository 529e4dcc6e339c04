//! Subcommands and their execution.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use serde_json::Value;
use templating_client::{
    FindOptions, GetOptions, Params, SortDirection, Template, TemplatingClient,
};
use tokio::io::AsyncReadExt;

use crate::TRACING_TARGET_COMMAND;

/// Operations exposed by the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Find templates.
    Find {
        /// Phrase search.
        #[arg(long)]
        search: Option<String>,
        /// One-based page number.
        #[arg(long)]
        page: Option<u32>,
        /// Records per page.
        #[arg(long)]
        rpp: Option<u32>,
        /// Property to sort by.
        #[arg(long)]
        order_by: Option<String>,
        /// Sort direction (`asc` or `desc`).
        #[arg(long, requires = "order_by")]
        order_direction: Option<SortDirection>,
        /// Comma separated list of resources to embed.
        #[arg(long)]
        embed: Option<String>,
        /// Comma separated list of fields to return.
        #[arg(long)]
        fields: Option<String>,
        /// Raw query parameter as `key=value`; repeatable.
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Fetch a single template.
    Get {
        /// Template id.
        id: String,
        #[arg(long)]
        embed: Option<String>,
        #[arg(long)]
        fields: Option<String>,
    },
    /// Create a template from a JSON file.
    Create {
        /// JSON file; `-` or none reads stdin.
        input: Option<PathBuf>,
    },
    /// Update a previously fetched template through its `put` link.
    Update { input: Option<PathBuf> },
    /// Remove a previously fetched template through its `delete` link.
    Remove { input: Option<PathBuf> },
    /// Create templates from a JSON array.
    BatchCreate { input: Option<PathBuf> },
    /// Update templates from a JSON array.
    BatchUpdate { input: Option<PathBuf> },
    /// Remove templates by id.
    BatchRemove {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Print an expanded route without sending anything.
    ///
    /// `route` is one of `find`, `get`, `create`, `batch`, or any URI template.
    Expand {
        route: String,
        /// Template id, required for `get`.
        #[arg(long)]
        id: Option<String>,
        /// Route parameter as `key=value`; repeatable.
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

impl Command {
    /// Returns the subcommand name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Find { .. } => "find",
            Self::Get { .. } => "get",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Remove { .. } => "remove",
            Self::BatchCreate { .. } => "batch-create",
            Self::BatchUpdate { .. } => "batch-update",
            Self::BatchRemove { .. } => "batch-remove",
            Self::Expand { .. } => "expand",
        }
    }

    /// Runs the command and returns what should be printed.
    pub async fn execute(self, client: &TemplatingClient) -> anyhow::Result<Value> {
        tracing::debug!(
            target: TRACING_TARGET_COMMAND,
            command = self.name(),
            "executing command"
        );

        let output = match self {
            Self::Find {
                search,
                page,
                rpp,
                order_by,
                order_direction,
                embed,
                fields,
                params,
            } => {
                let options = FindOptions {
                    search,
                    page_number: page,
                    page_size: rpp,
                    order_by,
                    order_direction,
                    embed,
                    fields,
                    params: params.into_iter().collect(),
                };
                serde_json::to_value(client.find(&options).await?)?
            }
            Self::Get { id, embed, fields } => {
                let options = GetOptions { embed, fields };
                serde_json::to_value(client.get(&id, &options).await?)?
            }
            Self::Create { input } => {
                let template: Value = read_json(input.as_deref()).await?;
                serde_json::to_value(client.create(&template).await?)?
            }
            Self::Update { input } => {
                let template: Template = read_json(input.as_deref()).await?;
                client.update(&template).await?
            }
            Self::Remove { input } => {
                let template: Template = read_json(input.as_deref()).await?;
                client.remove(&template).await?
            }
            Self::BatchCreate { input } => {
                let items: Vec<Value> = read_json(input.as_deref()).await?;
                client.batch().create(items.as_slice()).await?
            }
            Self::BatchUpdate { input } => {
                let items: Vec<Value> = read_json(input.as_deref()).await?;
                client.batch().update(items.as_slice()).await?
            }
            Self::BatchRemove { ids } => client.batch().remove(ids.as_slice()).await?,
            Self::Expand { route, id, params } => {
                let params: Params = params.into_iter().collect();
                Value::String(expand(client, &route, id.as_deref(), &params)?)
            }
        };

        Ok(output)
    }
}

/// Expands a named route, or `route` itself as a URI template.
fn expand(
    client: &TemplatingClient,
    route: &str,
    id: Option<&str>,
    params: &Params,
) -> anyhow::Result<String> {
    let routes = client.routes();
    let expanded = match route {
        "find" => routes.find(params),
        "get" => routes.get(id.context("`get` requires --id")?, params)?,
        "create" => routes.create(),
        "batch" => routes.batch().create(),
        pattern => routes
            .parse(pattern)
            .with_context(|| format!("invalid route template '{pattern}'"))?
            .expand(params),
    };
    Ok(expanded)
}

/// Formats command output: strings as-is, everything else as pretty JSON.
pub fn render(output: &Value) -> anyhow::Result<String> {
    match output {
        Value::String(s) => Ok(s.clone()),
        other => Ok(serde_json::to_string_pretty(other)?),
    }
}

/// Reads JSON from a file, or from stdin when `path` is `None` or `-`.
async fn read_json<T: serde::de::DeserializeOwned>(path: Option<&Path>) -> anyhow::Result<T> {
    let raw = match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("failed to read stdin")?;
            raw
        }
    };

    serde_json::from_str(&raw).context("input is not valid JSON for this command")
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;
    use templating_client::transport::MockTransport;
    use templating_client::Method;

    use super::*;

    const BASE: &str = "https://api.example.com/v1/app/";

    fn client() -> (TemplatingClient, MockTransport) {
        let transport = MockTransport::new();
        let client = TemplatingClient::new(transport.clone(), BASE.parse().unwrap());
        (client, transport)
    }

    fn json_file(value: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        file
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("page=2"),
            Ok(("page".to_owned(), "2".to_owned()))
        );
        assert_eq!(
            parse_param("sort=a=b"),
            Ok(("sort".to_owned(), "a=b".to_owned()))
        );
        assert!(parse_param("page").is_err());
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&json!("templates/")).unwrap(), "templates/");
        assert_eq!(render(&json!({ "a": 1 })).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[tokio::test]
    async fn test_expand_named_and_custom_routes() {
        let (client, transport) = client();

        let command = Command::Expand {
            route: "find".into(),
            id: None,
            params: vec![("page".into(), "2".into())],
        };
        assert_eq!(command.execute(&client).await.unwrap(), json!("templates/?page=2"));

        let command = Command::Expand {
            route: "get".into(),
            id: Some("welcome".into()),
            params: vec![],
        };
        assert_eq!(command.execute(&client).await.unwrap(), json!("templates/welcome/"));

        let command = Command::Expand {
            route: "templates/{id}/history".into(),
            id: None,
            params: vec![("id".into(), "a b".into())],
        };
        assert_eq!(
            command.execute(&client).await.unwrap(),
            json!("templates/a%20b/history")
        );

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_expand_get_requires_id() {
        let (client, _) = client();
        let command = Command::Expand {
            route: "get".into(),
            id: None,
            params: vec![],
        };
        assert!(command.execute(&client).await.is_err());
    }

    #[tokio::test]
    async fn test_find_command() {
        let (client, transport) = client();
        transport.reply_json(json!({ "item": [], "page": 1, "recordsPerPage": 10, "totalRecords": 0 }));

        let command = Command::Find {
            search: Some("welcome".into()),
            page: None,
            rpp: Some(10),
            order_by: None,
            order_direction: None,
            embed: None,
            fields: None,
            params: vec![("sort".into(), "templateId|desc".into())],
        };
        let output = command.execute(&client).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.url.as_str(),
            format!("{BASE}templates/?searchQuery=welcome&rpp=10&sort=templateId%7Cdesc")
        );
        assert_eq!(output["recordsPerPage"], 10);
    }

    #[tokio::test]
    async fn test_update_command_follows_link() {
        let (client, transport) = client();
        let file = json_file(&json!({
            "id": "1",
            "templateId": "welcome-email",
            "content": "Hi",
            "_links": { "put": { "href": "templates/1" } }
        }));

        Command::Update {
            input: Some(file.path().to_path_buf()),
        }
        .execute(&client)
        .await
        .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.url.as_str(), format!("{BASE}templates/1"));
    }

    #[tokio::test]
    async fn test_batch_remove_command() {
        let (client, transport) = client();

        Command::BatchRemove {
            ids: vec!["a".into(), "b".into()],
        }
        .execute(&client)
        .await
        .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Delete);
        assert_eq!(requests[0].body, Some(json!(["a", "b"])));
    }
}
