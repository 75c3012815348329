//! Commit message decision pipeline.
//!
//! Detectors and extractors are pure functions over the draft message and the
//! branch name; [`CommitMessagePipeline`] wires them to git, the response cache
//! and the AI backend.

mod directive;
mod extract;
mod pipeline;
mod postprocess;
mod provider;

pub use directive::{has_skip_directive, is_merge_conflict_resolution, strip_skip_directive};
pub use extract::{
    extract_issue_number, extract_ticket_id, extract_version_bump, strip_version_bumps,
};
pub use pipeline::{CommitMessagePipeline, GenerationRequest, Route, route};
pub use postprocess::post_process;
pub use provider::RepositoryProvider;
