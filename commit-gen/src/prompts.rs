// LLM prompt templates

/// Wrap a staged diff in the commit-message instruction.
///
/// The diff is embedded verbatim; callers must not pass an empty diff.
pub fn build_commit_prompt(diff: &str) -> String {
    format!(
        r#"You are an assistant that writes clear and concise git commit messages.

Requirements:
- The commit message must be written in English.
- Do not only describe what was done: identify the specific changes and the files they affect.
- Follow the Conventional Commits format: a type (feat, fix, docs, refactor, test, chore, ...), a colon and a space, then a short summary line.
- Separate any additional body text from the summary line with a blank line.

Return only the commit message, with no code fences or commentary.

Generate a commit message for the following diff:

{}
"#,
        diff
    )
}
