use async_trait::async_trait;
use log::debug;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};

use crate::error::Error;

use super::repo::GitHubRepo;
use super::types::Release;

/// GitHub API response types (internal). Raw payloads never leave this
/// module; everything is normalized into [`Release`] at the fetch boundary.
mod api {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct Release {
        pub tag_name: String,
        pub name: Option<String>,
        pub body: Option<String>,
        pub html_url: String,
        pub published_at: Option<DateTime<Utc>>,
        #[serde(default)]
        pub draft: bool,
    }
}

/// Releases requested per page.
const PER_PAGE: usize = 100;

/// Cap on pages fetched per repository (1000 releases) to prevent an
/// infinite loop against a misbehaving server.
const MAX_PAGES: usize = 10;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchReleases: Send + Sync {
    async fn fetch_releases(&self, repo: &GitHubRepo) -> Result<Vec<Release>, Error>;
}

pub struct GitHub {
    client: Client,
    api_url: String,
}

impl GitHub {
    /// Builds a client for the given API root (defaults to
    /// `https://api.github.com`). When a token is supplied it is attached to
    /// every request as a sensitive bearer header.
    #[tracing::instrument(skip(token, api_url))]
    pub fn new(token: Option<&str>, api_url: Option<String>) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::Parse("token contains invalid characters".to_string()))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using token for authentication");
        }

        let client = Client::builder()
            .user_agent("ghrt-cli")
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {}", e)))?;

        let api_url = api_url.unwrap_or_else(|| "https://api.github.com".to_string());
        Ok(Self { client, api_url })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetches every page of releases for one repository.
    ///
    /// A failure on any page fails the whole fetch; no partial result is
    /// returned. Drafts and records without a publish timestamp are dropped.
    #[tracing::instrument(skip(self, repo))]
    pub async fn fetch_all(&self, repo: &GitHubRepo) -> Result<Vec<Release>, Error> {
        let url = format!("{}/repos/{}/{}/releases", self.api_url, repo.owner, repo.name);
        let per_page = PER_PAGE.to_string();
        let mut releases = Vec::new();
        let mut page = 1;

        while page <= MAX_PAGES {
            debug!("Fetching releases page {} from {}...", page, url);

            let page_number = page.to_string();
            let response = self
                .client
                .get(&url)
                .query(&[("per_page", per_page.as_str()), ("page", page_number.as_str())])
                .send()
                .await
                .map_err(|e| Error::Network(format!("request to {} failed: {}", url, e)))?;

            let response = check_status(response, repo)?;

            let parsed: Vec<api::Release> = response
                .json()
                .await
                .map_err(|e| Error::Decode(format!("invalid releases payload: {}", e)))?;

            let len = parsed.len();
            releases.extend(parsed.into_iter().filter_map(normalize));

            if len < PER_PAGE {
                break;
            }

            page += 1;
        }

        debug!("Fetched {} published releases for {}", releases.len(), repo);
        Ok(releases)
    }
}

#[async_trait]
impl FetchReleases for GitHub {
    async fn fetch_releases(&self, repo: &GitHubRepo) -> Result<Vec<Release>, Error> {
        self.fetch_all(repo).await
    }
}

/// Maps a non-success status to the error taxonomy, inspecting rate-limit
/// headers before the body is consumed.
fn check_status(response: Response, repo: &GitHubRepo) -> Result<Response, Error> {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED => Err(Error::Auth(
            "invalid or expired authentication token".to_string(),
        )),
        StatusCode::FORBIDDEN => {
            if rate_limit_exhausted(&response) {
                Err(Error::RateLimit {
                    message: "API rate limit exceeded".to_string(),
                    retry_after: retry_after_hint(&response),
                })
            } else {
                Err(Error::Auth(format!(
                    "access to {} is forbidden; check token permissions",
                    repo
                )))
            }
        }
        StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimit {
            message: "too many requests".to_string(),
            retry_after: retry_after_hint(&response),
        }),
        StatusCode::NOT_FOUND => Err(Error::NotFound(format!(
            "repository {} does not exist or is not accessible",
            repo
        ))),
        s if s.is_success() => Ok(response),
        s => Err(Error::Network(format!("unexpected HTTP {} from API", s))),
    }
}

fn rate_limit_exhausted(response: &Response) -> bool {
    response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "0")
}

fn retry_after_hint(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Drops drafts and unpublished records, flattens the rest.
fn normalize(release: api::Release) -> Option<Release> {
    if release.draft {
        return None;
    }
    let published_at = release.published_at?;
    let title = release
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| release.tag_name.clone());
    Some(Release {
        tag: release.tag_name,
        title,
        published_at,
        body: release.body.unwrap_or_default(),
        url: release.html_url,
    })
}
