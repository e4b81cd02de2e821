//! Gitea API client using reqwest

use crate::{Error, Result};
use ferry_core::Config;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

/// Page size used for every paginated listing
pub(crate) const PAGE_LIMIT: u32 = 100;

/// Gitea API client scoped to one repository
pub struct GiteaClient {
    http: reqwest::Client,
    base_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl GiteaClient {
    /// Create a new client for the repository named in `config`
    pub fn new(config: &Config, token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ferry/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        let client = Self {
            http,
            base_url: config.gitea.url.clone(),
            owner: config.gitea.owner.clone(),
            repo: config.gitea.repo.clone(),
            token: token.into(),
        };

        info!(owner = %client.owner, repo = %client.repo, "Created Gitea client");

        Ok(client)
    }

    /// Get the repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Base URL for this repository's API, `{base}/api/v1/repos/{owner}/{repo}`
    pub fn repo_url(&self) -> String {
        format!(
            "{}/api/v1/repos/{}/{}",
            self.base_url, self.owner, self.repo
        )
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/json")
    }

    /// Turn a non-success response into `Error::Api`, capturing the body
    async fn check(res: reqwest::Response) -> Result<reqwest::Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let url = res.url().to_string();
        let message = res.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            url,
            message,
        })
    }

    /// GET a JSON resource
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!(url, "GET");
        let res = self.authorized(self.http.get(url).query(query)).send().await?;
        Ok(Self::check(res).await?.json().await?)
    }

    /// GET a binary resource (attachment content)
    pub(crate) async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "GET (binary)");
        let res = self.authorized(self.http.get(url)).send().await?;
        Ok(Self::check(res).await?.bytes().await?.to_vec())
    }

    /// POST a JSON body and decode the JSON response
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        debug!(url, "POST");
        let res = self.authorized(self.http.post(url).json(body)).send().await?;
        Ok(Self::check(res).await?.json().await?)
    }

    /// Fetch a complete collection from a paginated endpoint
    ///
    /// Requests successive pages with `limit=100` until the server returns an
    /// empty page, concatenating the results in server order. HTTP errors
    /// propagate to the caller.
    pub(crate) async fn get_paginated<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut results = Vec::new();
        let mut page = 1u32;

        loop {
            let mut params: Vec<(&str, String)> = query.to_vec();
            params.push(("page", page.to_string()));
            params.push(("limit", PAGE_LIMIT.to_string()));

            let items: Vec<T> = self.get_json(url, &params).await?;
            if items.is_empty() {
                break;
            }

            results.extend(items);
            page += 1;
        }

        debug!(url, count = results.len(), "Fetched paginated collection");

        Ok(results)
    }

    /// Like [`get_paginated`](Self::get_paginated), but a 404 from the server
    /// means "this sub-resource does not exist here" and yields an empty vec
    pub(crate) async fn get_paginated_or_empty<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        match self.get_paginated(url, query).await {
            Ok(items) => Ok(items),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for GiteaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GiteaClient")
            .field("base_url", &self.base_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::GiteaClient;

    /// Client pointed at a mock server, for tests across this crate
    pub(crate) fn test_client(base_url: &str) -> GiteaClient {
        let config = ferry_core::Config::default().with_cli_overrides(
            Some(base_url.to_string()),
            Some("owner".to_string()),
            Some("repo".to_string()),
        );
        GiteaClient::new(&config, "secret").unwrap()
    }
}
