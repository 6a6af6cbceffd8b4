//! Chart construction: maps the registry's releases to a declarative
//! timeline description. Pure functions only; same inputs, same output.

pub mod chart;

pub use chart::{ChartPoint, ChartSpec, DateRange, RepositoryStat, Statistics, Tooltip};

use crate::github::Release;
use crate::registry::Repository;

/// Characters of release notes carried into a tooltip.
const SUMMARY_LIMIT: usize = 200;

/// Builds a chart spec from the current repositories, applying the optional
/// inclusive date filter.
///
/// Points are grouped by repository in registry order; within a repository
/// they are sorted by ascending `published_at`, ties broken by ascending tag.
/// Statistics cover exactly the filtered set and are recomputed on every
/// call.
pub fn build(repositories: &[Repository], range: Option<&DateRange>) -> ChartSpec {
    let mut points = Vec::new();
    let mut per_repository = Vec::with_capacity(repositories.len());

    for repository in repositories {
        let mut included: Vec<&Release> = repository
            .releases
            .iter()
            .filter(|r| range.is_none_or(|dr| dr.contains(r.published_at)))
            .collect();
        included.sort_by(|a, b| {
            a.published_at
                .cmp(&b.published_at)
                .then_with(|| a.tag.cmp(&b.tag))
        });

        per_repository.push(RepositoryStat {
            repository: repository.identifier(),
            releases: included.len(),
        });

        for release in included {
            points.push(point_for(repository, release));
        }
    }

    let earliest = points.iter().map(|p| p.timestamp).min();
    let latest = points.iter().map(|p| p.timestamp).max();

    let statistics = Statistics {
        total_releases: points.len(),
        per_repository,
        earliest,
        latest,
    };

    let range = range
        .copied()
        .or_else(|| earliest.zip(latest).map(|(start, end)| DateRange { start, end }));

    ChartSpec {
        points,
        range,
        statistics,
    }
}

fn point_for(repository: &Repository, release: &Release) -> ChartPoint {
    ChartPoint {
        repository: repository.identifier(),
        lane: repository.lane,
        timestamp: release.published_at,
        color: repository.color,
        label: release.tag.clone(),
        tooltip: Tooltip {
            title: release.title.clone(),
            tag: release.tag.clone(),
            published_at: release.published_at,
            summary: summarize(&release.body),
            url: release.url.clone(),
        },
    }
}

/// Truncates release notes for tooltip display, marking elided text.
fn summarize(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= SUMMARY_LIMIT {
        trimmed.to_string()
    } else {
        let mut summary: String = trimmed.chars().take(SUMMARY_LIMIT).collect();
        summary.push_str("...");
        summary
    }
}
