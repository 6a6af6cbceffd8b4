use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Error;

/// Inclusive timestamp filter applied to `published_at`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, Error> {
        if start > end {
            return Err(Error::Parse(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Full metadata attached to a timeline point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub tag: String,
    pub published_at: DateTime<Utc>,
    /// Release notes truncated to 200 characters.
    pub summary: String,
    pub url: String,
}

/// One release on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub repository: String,
    /// Stable per-repository row, assigned at add-time.
    pub lane: usize,
    pub timestamp: DateTime<Utc>,
    pub color: &'static str,
    /// Point label: the release tag.
    pub label: String,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryStat {
    pub repository: String,
    pub releases: usize,
}

/// Aggregates over the filtered release set, recomputed on every build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_releases: usize,
    pub per_repository: Vec<RepositoryStat>,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

/// Declarative chart description, independent of any rendering technology.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub points: Vec<ChartPoint>,
    /// The filter that was applied, or the observed earliest/latest span
    /// when no filter was given. `None` only for an empty chart.
    pub range: Option<DateRange>,
    pub statistics: Statistics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_date_range_rejects_inverted_pair() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(DateRange::new(start, end), Err(Error::Parse(_))));
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let range = DateRange::new(start, end).unwrap();

        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(start - chrono::Duration::seconds(1)));
        assert!(!range.contains(end + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_single_instant_range() {
        let t = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let range = DateRange::new(t, t).unwrap();
        assert!(range.contains(t));
        assert!(!range.contains(t + chrono::Duration::seconds(1)));
    }
}
