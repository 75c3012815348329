//! Prompt construction for commit message classification.

/// Classification instructions sent as the system message.
const COMMIT_SYSTEM_PROMPT: &str = r#"You are an assistant specialized in analyzing the quality of commits for GitHub, using the output of the branch name, the author's original message (that can be empty or a single dot), and the output of the GIT DIFF command.
Classify them according to the following recommendations list:

RECOMMENDATIONS (type - meaning):
initial commit - commits for when the diff is empty and there is no history in the repository (only the very first commits are allowed to use this type).
feat - adds a new feature (related to MINOR in semantic versioning). Suggest this when the branch name starts with feature or feat and no other option fits better.
fix - solves a problem (bug fix, related to PATCH in semantic versioning). Suggest this when the branch name starts with fix, hotfix, bugfix or bug.
docs - changes to documentation only, such as the README or the docs directory.
test - creates, alters or deletes unit/integration tests only.
build - changes to build files and dependencies, usually in build, .github or Terraform directories.
perf - code changes related to performance.
style - formatting changes only (semicolons, trailing spaces, lint).
refactor - restructuring that does not alter functionality.
chore - maintenance such as .gitignore entries or package updates (NuGet, NPM, Cargo, Packagist, ...), no code changes.
ci - continuous integration changes (appveyor.yml, .github/workflows/*.yml, a root config.yml, .yml files in the build directory).
raw - changes to configuration files, data, features and parameters.
cleanup - removes commented code or unnecessary snippets to improve readability.
remove - deletes obsolete or unused files, directories or functionality.

OUTPUT: type - description of changes in up to 10 words in English.

The 'type' must be one of the types listed above.
The 'description of changes' is a brief summary that considers the branch name, the author's original message (sometimes empty or a single dot) and the GIT DIFF output.
Do not end the output with punctuation such as a dot, exclamation point or question mark.
Only generate a single output per request. Return the one that best matches the input data."#;

const EMOJI_DIRECTIVE: &str =
    "\nStart the description of changes with one emoji that matches the change.";

const UNKNOWN_BRANCH: &str = "<unknown>";
const NO_CHANGES: &str = "<no changes>";

/// System prompt, optionally asking for an emoji before the description.
pub fn build_system_prompt(use_emoji: bool) -> String {
    let mut prompt = COMMIT_SYSTEM_PROMPT.to_string();
    if use_emoji {
        prompt.push_str(EMOJI_DIRECTIVE);
    }
    prompt
}

/// User prompt embedding branch, draft message and filtered diff.
pub fn build_user_prompt(branch: &str, message: &str, diff: &str) -> String {
    let branch = if branch.is_empty() { UNKNOWN_BRANCH } else { branch };
    let diff = if diff.is_empty() { NO_CHANGES } else { diff };
    format!(
        "Branch: {}\n\nOriginal message: {}\n\nGit Diff: {}",
        branch, message, diff
    )
}
