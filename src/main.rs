use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::Parser;

use ghrt::github::{GitHub, GitHubRepo, Release};
use ghrt::session::Session;
use ghrt::timeline::{ChartSpec, DateRange};

/// ghrt - GitHub Release Timeline
///
/// Fetch release histories for multiple repositories and render them as one
/// color-coded timeline.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for
/// authentication. This is useful for accessing private repositories or
/// avoiding rate limits.
///
/// Examples:
///   ghrt timeline -r rust-lang/rust -r tokio-rs/tokio --from 2024-01-01
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Personal access token (also via GITHUB_TOKEN)
    #[arg(
        long = "token",
        env = "GITHUB_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Build a unified release timeline across repositories
    Timeline(TimelineArgs),

    /// List the published releases of a single repository
    Releases(ReleasesArgs),
}

#[derive(clap::Args, Debug)]
pub struct TimelineArgs {
    /// Repository to track, as a URL or "owner/name"; repeatable
    #[arg(long = "repo", short = 'r', value_name = "URL", required = true)]
    pub repos: Vec<String>,

    /// Include releases published on or after this date (YYYY-MM-DD)
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Include releases published on or before this date (YYYY-MM-DD)
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Output format
    #[arg(long = "output", value_enum, default_value = "text")]
    pub output: Output,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum Output {
    Text,
    Json,
}

#[derive(clap::Args, Debug)]
pub struct ReleasesArgs {
    /// Repository as a URL or "owner/name"
    #[arg(value_name = "REPO")]
    pub repo: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let github = GitHub::new(cli.token.as_deref(), cli.api_url.clone())?;

    match cli.command {
        Commands::Timeline(args) => timeline(github, args).await?,
        Commands::Releases(args) => releases(github, args).await?,
    }
    Ok(())
}

async fn timeline(github: GitHub, args: TimelineArgs) -> Result<()> {
    let mut session = Session::new(github);

    for spec in &args.repos {
        let added = session.add_repository(spec).await?;
        eprintln!(
            "Added {} ({} releases)",
            added.identifier(),
            added.releases.len()
        );
    }

    if let Some(range) = date_range(args.from, args.to)? {
        session.set_date_range(range);
    }

    let chart = session.chart_spec();
    match args.output {
        Output::Json => println!("{}", serde_json::to_string_pretty(&chart)?),
        Output::Text => print_timeline(&chart),
    }
    Ok(())
}

async fn releases(github: GitHub, args: ReleasesArgs) -> Result<()> {
    let repo = GitHubRepo::parse_spec(&args.repo)?;
    let mut releases = github.fetch_all(&repo).await?;
    releases.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| b.tag.cmp(&a.tag))
    });

    if releases.is_empty() {
        println!("{} has no published releases", repo);
        return Ok(());
    }

    for release in &releases {
        println!("{}", release_line(release));
    }
    Ok(())
}

/// Inclusive range from whole-day bounds; either side may be open.
fn date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Option<DateRange>> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let start = from.map_or(DateTime::<Utc>::MIN_UTC, day_start);
    let end = to.map_or(DateTime::<Utc>::MAX_UTC, day_end);
    Ok(Some(DateRange::new(start, end)?))
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn day_end(date: NaiveDate) -> DateTime<Utc> {
    match date.succ_opt() {
        Some(next) => day_start(next) - Duration::seconds(1),
        None => DateTime::<Utc>::MAX_UTC,
    }
}

fn print_timeline(chart: &ChartSpec) {
    if chart.points.is_empty() {
        println!("No releases found in the selected date range");
        return;
    }

    let stats = &chart.statistics;
    println!(
        "{} releases from {} repositories",
        stats.total_releases,
        stats.per_repository.len()
    );
    if let (Some(earliest), Some(latest)) = (stats.earliest, stats.latest) {
        println!(
            "{} to {}",
            earliest.format("%Y-%m-%d"),
            latest.format("%Y-%m-%d")
        );
    }
    println!();

    // Newest first, like a message thread.
    let mut points: Vec<_> = chart.points.iter().collect();
    points.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.label.cmp(&a.label))
    });

    for point in points {
        let mut line = format!(
            "{}  {:<30} {}",
            point.timestamp.format("%Y-%m-%d %H:%M"),
            point.repository,
            point.label
        );
        if point.tooltip.title != point.label {
            line.push_str(&format!("  ({})", point.tooltip.title));
        }
        println!("{}", line);
    }

    println!();
    println!("Per repository:");
    for stat in &stats.per_repository {
        println!("  {:<30} {}", stat.repository, stat.releases);
    }
}

fn release_line(release: &Release) -> String {
    let mut line = format!(
        "{}  {}",
        release.published_at.format("%Y-%m-%d %H:%M"),
        release.tag
    );
    if release.title != release.tag {
        line.push_str(&format!("  ({})", release.title));
    }
    line
}
