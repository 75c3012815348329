use serde::Serialize;

/// Hosting service of the repository, derived from `remote.origin.url`.
///
/// Only `GitHub` changes behavior: it selects `#<issue>` prefixes, every other
/// value selects `[TICKET-1]` prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum RepositoryProvider {
    #[default]
    Unidentified,
    AzureDevOps,
    Bitbucket,
    GitHub,
    GitLab,
}

impl RepositoryProvider {
    /// 按子串匹配远程地址，顺序与优先级一致
    pub fn from_remote_url(url: &str) -> Self {
        if url.contains("dev.azure.com") {
            RepositoryProvider::AzureDevOps
        } else if url.contains("bitbucket.org") {
            RepositoryProvider::Bitbucket
        } else if url.contains("github.com") {
            RepositoryProvider::GitHub
        } else if url.contains("gitlab.com") {
            RepositoryProvider::GitLab
        } else {
            RepositoryProvider::Unidentified
        }
    }

    pub fn is_github(self) -> bool {
        self == RepositoryProvider::GitHub
    }
}
