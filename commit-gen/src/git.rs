//! Git access: reading the staged diff and creating the commit

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

/// The two git operations the pipeline needs
pub trait Vcs {
    /// Staged diff of the working tree, with `exclude` pathspec globs left out
    fn staged_diff(&self, exclude: &[String]) -> Result<String>;

    /// Commit the staged changes with `message` as given
    fn commit(&self, message: &str) -> Result<()>;
}

/// `Vcs` backed by the `git` executable
#[derive(Debug, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git in `dir` instead of the current directory
    #[cfg(test)]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }

    // Wraps git commands with error handling
    fn git(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().context("Failed to execute git command")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            // git commit reports some failures (nothing to commit) on stdout
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            anyhow::bail!("git {} failed: {}", args.first().unwrap_or(&""), detail);
        }

        // Staged files need not be UTF-8; keep the rest of the diff readable
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Arguments for `git diff --staged` limited to the working tree with exclusions.
///
/// Exclusions use glob pathspec magic, so `**/yarn.lock` matches at any depth.
pub fn diff_args(exclude: &[String]) -> Vec<String> {
    let mut args: Vec<String> = ["diff", "--staged", "--", "."]
        .iter()
        .map(|s| s.to_string())
        .collect();
    args.extend(exclude.iter().map(|pattern| format!(":(exclude,glob){}", pattern)));
    args
}

impl Vcs for GitCli {
    fn staged_diff(&self, exclude: &[String]) -> Result<String> {
        let args = diff_args(exclude);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.git(&args)
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.git(&["commit", "-m", message])?;
        Ok(())
    }
}

/// Read the staged diff, trimmed.
///
/// A failing git invocation is logged and reported as an empty diff, which the
/// caller handles the same way as "nothing staged".
pub fn collect_diff(vcs: &impl Vcs, exclude: &[String]) -> String {
    match vcs.staged_diff(exclude) {
        Ok(diff) => diff.trim().to_string(),
        Err(e) => {
            log::error!("Error obtaining diff: {:#}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct FailingVcs;

    impl Vcs for FailingVcs {
        fn staged_diff(&self, _exclude: &[String]) -> Result<String> {
            anyhow::bail!("fatal: not a git repository")
        }

        fn commit(&self, _message: &str) -> Result<()> {
            unreachable!()
        }
    }

    fn init_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        let git = GitCli::in_dir(dir.path());
        git.git(&["init", "-q"]).unwrap();
        git.git(&["config", "user.email", "dev@localhost"]).unwrap();
        git.git(&["config", "user.name", "Dev"]).unwrap();
        git.git(&["config", "commit.gpgsign", "false"]).unwrap();
        dir
    }

    fn default_exclude() -> Vec<String> {
        crate::config::CommitGenConfig::default().exclude
    }

    #[test]
    fn test_diff_args() {
        let args = diff_args(&["**/yarn.lock".to_string(), "*.svg".to_string()]);
        assert_eq!(
            args,
            vec![
                "diff",
                "--staged",
                "--",
                ".",
                ":(exclude,glob)**/yarn.lock",
                ":(exclude,glob)*.svg"
            ]
        );
    }

    #[test]
    fn test_diff_args_without_exclusions() {
        assert_eq!(diff_args(&[]), vec!["diff", "--staged", "--", "."]);
    }

    #[test]
    fn test_collect_diff_failure_is_empty() {
        assert_eq!(collect_diff(&FailingVcs, &[]), "");
    }

    #[test]
    fn test_collect_diff_nothing_staged() {
        let dir = init_repo();
        fs::write(dir.path().join("f.txt"), "hello\n").unwrap();

        let diff = collect_diff(&GitCli::in_dir(dir.path()), &default_exclude());
        assert_eq!(diff, "");
    }

    #[test]
    fn test_collect_diff_excludes_patterns() {
        let dir = init_repo();
        let git = GitCli::in_dir(dir.path());
        fs::write(dir.path().join("f.txt"), "hello\n").unwrap();
        fs::write(dir.path().join("yarn.lock"), "lockfile\n").unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg/>\n").unwrap();
        git.git(&["add", "."]).unwrap();

        let diff = collect_diff(&git, &default_exclude());
        assert!(diff.starts_with("diff --git"));
        assert!(diff.contains("f.txt"));
        assert!(diff.contains("+hello"));
        assert!(!diff.contains("yarn.lock"));
        assert!(!diff.contains("logo.svg"));
        assert_eq!(diff, diff.trim());
    }

    #[test]
    fn test_collect_diff_only_excluded_files_is_empty() {
        let dir = init_repo();
        let git = GitCli::in_dir(dir.path());
        fs::write(dir.path().join("package-lock.json"), "{}\n").unwrap();
        git.git(&["add", "."]).unwrap();

        assert_eq!(collect_diff(&git, &default_exclude()), "");
    }

    #[test]
    fn test_collect_diff_excludes_nested_lockfiles() {
        let dir = init_repo();
        let git = GitCli::in_dir(dir.path());
        fs::create_dir_all(dir.path().join("web/assets")).unwrap();
        fs::write(dir.path().join("web/package-lock.json"), "{}\n").unwrap();
        fs::write(dir.path().join("web/pnpm-lock.yaml"), "lockfileVersion: 9\n").unwrap();
        fs::write(dir.path().join("web/assets/icon.svg"), "<svg/>\n").unwrap();
        fs::write(dir.path().join("web/app.js"), "console.log(1);\n").unwrap();
        git.git(&["add", "."]).unwrap();

        let diff = collect_diff(&git, &default_exclude());
        assert!(diff.contains("web/app.js"));
        assert!(!diff.contains("package-lock.json"));
        assert!(!diff.contains("pnpm-lock.yaml"));
        assert!(!diff.contains("icon.svg"));
    }

    #[test]
    fn test_collect_diff_keeps_non_utf8_changes() {
        let dir = init_repo();
        let git = GitCli::in_dir(dir.path());
        fs::write(dir.path().join("legacy.txt"), b"caf\xe9 au lait\n").unwrap();
        git.git(&["add", "legacy.txt"]).unwrap();

        let diff = collect_diff(&git, &default_exclude());
        assert!(!diff.is_empty(), "staged Latin-1 file must not read as no changes");
        assert!(diff.contains("legacy.txt"));
        assert!(diff.contains("+caf\u{FFFD} au lait"));
    }

    #[test]
    fn test_commit_preserves_message_verbatim() {
        let dir = init_repo();
        let git = GitCli::in_dir(dir.path());
        fs::write(dir.path().join("f.txt"), "hello\n").unwrap();
        git.git(&["add", "."]).unwrap();

        let message = "fix: login bug\tAdjust \"session\" $TIMEOUT handling\n\n- keep `quotes` & stuff";
        git.commit(message).unwrap();

        let logged = git.git(&["log", "-1", "--format=%B"]).unwrap();
        assert_eq!(logged.trim_end(), message);
    }

    #[test]
    fn test_commit_failure_reports_git_output() {
        let dir = init_repo();
        let git = GitCli::in_dir(dir.path());

        let err = git.commit("feat: nothing").unwrap_err();
        assert!(err.to_string().starts_with("git commit failed"));
    }
}
