use crate::config::AppConfig;
use crate::error::Result;
use crate::git::repository::GitRepository;
use crate::git::{GitOperations, NoRepository};
use crate::message::{CommitMessagePipeline, GenerationRequest};

/// Options of `generate-message`.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub message: String,
    pub branch: Option<String>,
    pub diff: Option<String>,
    pub debug: bool,
}

impl From<GenerateOptions> for GenerationRequest {
    fn from(options: GenerateOptions) -> Self {
        GenerationRequest {
            branch: options.branch,
            message: options.message,
            diff: options.diff,
            debug: options.debug,
        }
    }
}

/// Runs the pipeline against the current repository and prints the result
/// to stdout.
///
/// Outside a repository the pipeline still runs; it only fails when it
/// actually needs git (no `--branch` / `--diff` supplied).
pub async fn run(options: GenerateOptions, config: &AppConfig) -> Result<()> {
    let request = GenerationRequest::from(options);

    let message = match GitRepository::open() {
        Ok(repo) => generate_with(&repo, &request, config).await?,
        Err(e) => {
            tracing::debug!("No git repository available: {}", e);
            generate_with(&NoRepository::new(e.to_string()), &request, config).await?
        }
    };

    println!("{}", message);
    Ok(())
}

/// Pipeline run against an explicit git collaborator.
pub async fn generate_with<G: GitOperations>(
    git: &G,
    request: &GenerationRequest,
    config: &AppConfig,
) -> Result<String> {
    CommitMessagePipeline::new(git, config).run(request).await
}
