//! Ordered set of tracked repositories with deterministic color assignment.

pub mod palette;

use log::info;
use serde::Serialize;

use crate::error::Error;
use crate::github::{GitHubRepo, Release};

/// One tracked repository with its fetched releases and display attributes.
///
/// Color and lane are assigned at add-time and never change for the lifetime
/// of the entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repository {
    pub repo: GitHubRepo,
    pub color: &'static str,
    pub lane: usize,
    pub releases: Vec<Release>,
}

impl Repository {
    pub fn identifier(&self) -> String {
        self.repo.to_string()
    }
}

/// Session-scoped repository registry. Insertion order is preserved; the
/// next color is `PALETTE[len() % PALETTE.len()]` computed from the current
/// count, so removals do not recolor survivors but do influence what the
/// next add receives. Lanes come from a counter that never decreases, so a
/// repository keeps its row across unrelated removals.
#[derive(Debug, Default)]
pub struct Registry {
    repositories: Vec<Repository>,
    next_lane: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a repository with its fetched releases. Fails with
    /// [`Error::Duplicate`] when the identifier is already tracked.
    pub fn add(&mut self, repo: GitHubRepo, releases: Vec<Release>) -> Result<&Repository, Error> {
        let identifier = repo.to_string();
        if self.get(&identifier).is_some() {
            return Err(Error::Duplicate(identifier));
        }

        let entry = Repository {
            repo,
            color: palette::color_at(self.repositories.len()),
            lane: self.next_lane,
            releases,
        };
        self.next_lane += 1;

        info!(
            "Tracking {} with {} releases (color {})",
            identifier,
            entry.releases.len(),
            entry.color
        );
        let index = self.repositories.len();
        self.repositories.push(entry);
        Ok(&self.repositories[index])
    }

    /// Removes a repository by identifier, returning the removed entry.
    /// Colors and lanes of the remaining repositories are untouched.
    pub fn remove(&mut self, identifier: &str) -> Result<Repository, Error> {
        let position = self
            .repositories
            .iter()
            .position(|r| r.identifier() == identifier)
            .ok_or_else(|| Error::NotFound(format!("{} is not tracked", identifier)))?;

        let removed = self.repositories.remove(position);
        info!("Stopped tracking {}", identifier);
        Ok(removed)
    }

    /// Replaces a repository's releases wholesale (explicit refresh).
    /// Color and lane are unchanged.
    pub fn replace_releases(
        &mut self,
        identifier: &str,
        releases: Vec<Release>,
    ) -> Result<&Repository, Error> {
        let entry = self
            .repositories
            .iter_mut()
            .find(|r| r.identifier() == identifier)
            .ok_or_else(|| Error::NotFound(format!("{} is not tracked", identifier)))?;

        entry.releases = releases;
        Ok(entry)
    }

    /// Tracked repositories in insertion order.
    pub fn list(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn get(&self, identifier: &str) -> Option<&Repository> {
        self.repositories
            .iter()
            .find(|r| r.identifier() == identifier)
    }

    pub fn color_for(&self, identifier: &str) -> Result<&'static str, Error> {
        self.get(identifier)
            .map(|r| r.color)
            .ok_or_else(|| Error::NotFound(format!("{} is not tracked", identifier)))
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}
