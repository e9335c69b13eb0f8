use crate::Result;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::bail;
use std::sync::Arc;

/// A repository identifier of the form `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_end_matches('/');
        let Some((owner, repo)) = trimmed.split_once('/') else {
            bail!("invalid repository '{s}': expected the form 'owner/name'");
        };

        let repo = repo.trim_end_matches(".git");
        if owner.is_empty() || repo.is_empty() {
            bail!("invalid repository '{s}': empty owner or repo name");
        }

        if repo.contains('/') {
            bail!("invalid repository '{s}': expected the form 'owner/name'");
        }

        if !owner.chars().chain(repo.chars()).all(is_name_char) {
            bail!("invalid repository '{s}': names may only contain letters, digits, '-', '_' and '.'");
        }

        Ok(Self {
            owner: Arc::from(owner),
            repo: Arc::from(repo),
        })
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

impl FromStr for RepoSpec {
    type Err = String;

    // clap needs an error type implementing `std::error::Error`, which `AppError` does not
    fn from_str(s: &str) -> Result<Self, String> {
        Self::parse(s).map_err(|e| e.to_string())
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
