use strum::Display;

/// A paged collection endpoint under `/repos/{owner}/{name}/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    Commits,
    Pulls,
    Issues,
}
