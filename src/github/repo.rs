use std::str::FromStr;

use url::Url;

use crate::error::Error;

/// Repository identifier (owner/name format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitHubRepo {
    pub owner: String,
    pub name: String,
}

impl std::fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl serde::Serialize for GitHubRepo {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for GitHubRepo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(Error::Parse(format!(
                "invalid repository format '{}'; expected 'owner/name'",
                s
            )));
        }
        Ok(GitHubRepo {
            owner: parts[0].to_string(),
            name: strip_git_suffix(parts[1]).to_string(),
        })
    }
}

impl GitHubRepo {
    /// Parses a repository web URL such as `https://github.com/owner/name`.
    ///
    /// Trailing slashes and a `.git` suffix are stripped. Anything that does
    /// not yield a non-empty owner and name fails with [`Error::Parse`]
    /// before any network call is made.
    pub fn from_url(input: &str) -> Result<Self, Error> {
        let url = Url::parse(input.trim())
            .map_err(|e| Error::Parse(format!("invalid repository URL '{}': {}", input, e)))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::Parse(format!(
                    "unsupported URL scheme '{}' in '{}'",
                    other, input
                )));
            }
        }

        if url.host_str().is_none() {
            return Err(Error::Parse(format!("missing host in '{}'", input)));
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        if segments.len() < 2 {
            return Err(Error::Parse(format!(
                "'{}' does not name a repository; expected https://<host>/<owner>/<name>",
                input
            )));
        }

        let owner = segments[0].to_string();
        let name = strip_git_suffix(segments[1]).to_string();

        if name.is_empty() {
            return Err(Error::Parse(format!(
                "'{}' does not name a repository; owner and name must be non-empty",
                input
            )));
        }

        Ok(GitHubRepo { owner, name })
    }

    /// Accepts either a full repository URL or a bare `owner/name` spec.
    pub fn parse_spec(input: &str) -> Result<Self, Error> {
        let trimmed = input.trim();
        if trimmed.contains("://") {
            GitHubRepo::from_url(trimmed)
        } else {
            trimmed.parse()
        }
    }
}

fn strip_git_suffix(name: &str) -> &str {
    name.strip_suffix(".git").unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_valid() {
        let repo = GitHubRepo::from_str("owner/repo").unwrap();
        assert_eq!(
            repo,
            GitHubRepo {
                owner: "owner".to_string(),
                name: "repo".to_string()
            }
        );
    }

    #[test]
    fn test_parse_repo_missing_name_fails() {
        assert!(GitHubRepo::from_str("owner").is_err());
        assert!(GitHubRepo::from_str("owner/").is_err());
        assert!(GitHubRepo::from_str("/repo").is_err());
    }

    #[test]
    fn test_parse_repo_too_many_segments_fails() {
        assert!(GitHubRepo::from_str("a/b/c").is_err());
    }

    #[test]
    fn test_from_url_basic() {
        let repo = GitHubRepo::from_url("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "rust");
    }

    #[test]
    fn test_from_url_strips_git_suffix() {
        let repo = GitHubRepo::from_url("https://github.com/owner/repo.git").unwrap();
        assert_eq!(repo.name, "repo");
    }

    #[test]
    fn test_from_url_strips_trailing_slash() {
        let repo = GitHubRepo::from_url("https://github.com/owner/repo/").unwrap();
        assert_eq!(repo.name, "repo");
    }

    #[test]
    fn test_from_url_extra_path_segments_ok() {
        let repo = GitHubRepo::from_url("https://github.com/owner/repo/releases/tag/v1").unwrap();
        assert_eq!(repo.owner, "owner");
        assert_eq!(repo.name, "repo");
    }

    #[test]
    fn test_from_url_rejects_owner_only() {
        let result = GitHubRepo::from_url("https://github.com/owner");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_from_url_rejects_bad_scheme() {
        let result = GitHubRepo::from_url("ftp://github.com/owner/repo");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_from_url_rejects_garbage() {
        let result = GitHubRepo::from_url("not a url at all");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_from_url_git_suffix_only_name_fails() {
        let result = GitHubRepo::from_url("https://github.com/owner/.git");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_spec_accepts_both_forms() {
        let from_url = GitHubRepo::parse_spec("https://github.com/owner/repo").unwrap();
        let from_pair = GitHubRepo::parse_spec("owner/repo").unwrap();
        assert_eq!(from_url, from_pair);
    }

    #[test]
    fn test_display_round_trip() {
        let repo = GitHubRepo {
            owner: "owner".to_string(),
            name: "repo".to_string(),
        };
        assert_eq!(format!("{}", repo), "owner/repo");
    }
}
