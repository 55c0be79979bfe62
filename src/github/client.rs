use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::source::PortfolioSource;
use crate::models::{RepositoryRecord, UserProfile};

/// Only the first page of repositories is ever requested.
pub const REPOS_PER_PAGE: u32 = 100;

const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";

pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = config.github_token.as_deref() {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("ghportfolio/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_user(&self, username: &str) -> Result<UserProfile> {
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::debug!("Fetching user: {}", username);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }
        let response = Self::require_success(response, "user", username).await?;

        Ok(response.json().await?)
    }

    /// Malformed entries are dropped one by one rather than failing the list.
    pub async fn get_repositories(&self, username: &str) -> Result<Vec<RepositoryRecord>> {
        let url = format!(
            "{}/users/{}/repos?per_page={}",
            self.base_url, username, REPOS_PER_PAGE
        );
        tracing::debug!("Fetching repositories for: {}", username);

        let response = self.client.get(&url).send().await?;
        let response = Self::require_success(response, "repositories of", username).await?;

        let raw: Vec<serde_json::Value> = response.json().await?;
        let repos = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<RepositoryRecord>(value) {
                Ok(repo) => Some(repo),
                Err(e) => {
                    tracing::warn!("Skipping malformed repository record: {}", e);
                    None
                }
            })
            .collect();

        Ok(repos)
    }

    /// `Ok(None)` when the repository has no readme.
    pub async fn get_readme(&self, owner: &str, repo: &str) -> Result<Option<String>> {
        let url = format!("{}/repos/{}/{}/readme", self.base_url, owner, repo);
        tracing::debug!("Fetching readme: {}/{}", owner, repo);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, RAW_MEDIA_TYPE)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response =
            Self::require_success(response, "readme of", &format!("{}/{}", owner, repo)).await?;

        Ok(Some(response.text().await?))
    }

    async fn require_success(response: Response, what: &str, target: &str) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Error::GitHubApi(format!(
            "Failed to fetch {} {}: {} - {}",
            what, target, status, body
        )))
    }
}

#[async_trait]
impl PortfolioSource for GitHubClient {
    async fn fetch_profile(&self, handle: &str) -> Option<UserProfile> {
        match self.get_user(handle).await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Profile unavailable for {}: {}", handle, e);
                None
            }
        }
    }

    async fn list_repositories(&self, handle: &str) -> Vec<RepositoryRecord> {
        match self.get_repositories(handle).await {
            Ok(repos) => repos,
            Err(e) => {
                tracing::warn!("Repository list unavailable for {}: {}", handle, e);
                Vec::new()
            }
        }
    }

    async fn fetch_readme(&self, owner: &str, repo: &str) -> Option<String> {
        match self.get_readme(owner, repo).await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Readme probe failed for {}/{}: {}", owner, repo, e);
                None
            }
        }
    }
}
