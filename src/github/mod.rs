pub mod client;
pub mod repo;
pub mod types;

pub use client::{FetchReleases, GitHub};
pub use repo::GitHubRepo;
pub use types::Release;

#[cfg(test)]
pub use client::MockFetchReleases;
