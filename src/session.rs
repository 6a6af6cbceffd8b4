//! Session state and the operations the presentation layer drives.
//!
//! One `Session` lives for one interactive run. It owns the fetcher, the
//! registry, and the current date filter; every mutation goes through a
//! `&mut self` method, so operations are serialized by construction.

use log::info;

use crate::error::Error;
use crate::github::{FetchReleases, GitHubRepo};
use crate::registry::{Registry, Repository};
use crate::timeline::{self, ChartSpec, DateRange, Statistics};

pub struct Session<F: FetchReleases> {
    fetcher: F,
    registry: Registry,
    date_range: Option<DateRange>,
}

impl<F: FetchReleases> Session<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            registry: Registry::new(),
            date_range: None,
        }
    }

    /// Parses a repository URL, fetches its releases, and starts tracking
    /// it. The duplicate check runs before any network call. A repository
    /// with zero published releases is still added.
    #[tracing::instrument(skip(self))]
    pub async fn add_repository(&mut self, url: &str) -> Result<&Repository, Error> {
        let repo = GitHubRepo::parse_spec(url)?;
        self.add_repo(repo).await
    }

    /// Same flow for an already-parsed identifier.
    pub async fn add_repo(&mut self, repo: GitHubRepo) -> Result<&Repository, Error> {
        let identifier = repo.to_string();
        if self.registry.get(&identifier).is_some() {
            return Err(Error::Duplicate(identifier));
        }

        let releases = self.fetcher.fetch_releases(&repo).await?;
        info!("Fetched {} releases for {}", releases.len(), identifier);
        self.registry.add(repo, releases)
    }

    /// Re-fetches a tracked repository, replacing its releases wholesale.
    /// Color and lane are untouched.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_repository(&mut self, identifier: &str) -> Result<&Repository, Error> {
        let repo = self
            .registry
            .get(identifier)
            .map(|r| r.repo.clone())
            .ok_or_else(|| Error::NotFound(format!("{} is not tracked", identifier)))?;

        let releases = self.fetcher.fetch_releases(&repo).await?;
        info!("Refreshed {} with {} releases", identifier, releases.len());
        self.registry.replace_releases(identifier, releases)
    }

    pub fn remove_repository(&mut self, identifier: &str) -> Result<(), Error> {
        self.registry.remove(identifier).map(|_| ())
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.date_range = Some(range);
    }

    pub fn clear_date_range(&mut self) {
        self.date_range = None;
    }

    pub fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    /// Rebuilds the chart from current state. Never cached.
    pub fn chart_spec(&self) -> ChartSpec {
        timeline::build(self.registry.list(), self.date_range.as_ref())
    }

    /// Statistics over the filtered release set, recomputed per call.
    pub fn statistics(&self) -> Statistics {
        self.chart_spec().statistics
    }

    pub fn repositories(&self) -> &[Repository] {
        self.registry.list()
    }

    pub fn color_for(&self, identifier: &str) -> Result<&'static str, Error> {
        self.registry.color_for(identifier)
    }
}
