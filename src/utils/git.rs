//! Git operations for deployment.
//!
//! Every state change goes through the `git` executable. The central piece
//! is [`Git::with_remote_branch`], which switches the working tree to a
//! publish branch for the duration of a callback and always switches back.

use crate::{
    exec, log,
    utils::exec::{self, FilterRule, SILENT_FILTER},
};
use anyhow::Result;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Hints git prints on stderr that add nothing to our logs.
const GIT_FILTER: FilterRule = FilterRule::new(&["hint:", "remote:", "To ", "From "]);

/// Branch-session failures.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Must commit or stash changes before proceeding:\n{0}")]
    DirtyWorkingTree(String),

    #[error("HEAD is detached; check out a branch before deploying")]
    DetachedHead,

    /// Switching back failed. `callback` holds the callback's own error, if any.
    #[error("Failed to restore branch `{branch}`{}", callback_note(.callback))]
    RestoreFailed {
        branch: String,
        callback: Option<String>,
        #[source]
        source: anyhow::Error,
    },
}

fn callback_note(callback: &Option<String>) -> String {
    match callback {
        Some(err) => format!(" (after the deploy step failed: {err})"),
        None => String::new(),
    }
}

/// Thin wrapper for running git in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Name of the checked-out branch. A detached `HEAD` is refused.
    pub fn current_branch(&self) -> Result<String> {
        let output = exec!(filter=&SILENT_FILTER; self.workdir.as_path(); ["git"]; "rev-parse", "--abbrev-ref", "HEAD")?;
        let name = String::from_utf8_lossy(&output.stdout).trim().to_owned();
        if name == "HEAD" {
            return Err(GitError::DetachedHead.into());
        }
        Ok(name)
    }

    /// Fail with [`GitError::DirtyWorkingTree`] if `git status --porcelain` reports anything.
    pub fn ensure_clean(&self) -> Result<()> {
        let output = exec!(filter=&SILENT_FILTER; self.workdir.as_path(); ["git"]; "status", "--porcelain")?;
        let status = String::from_utf8_lossy(&output.stdout);
        let status = status.trim_end();
        if status.is_empty() {
            Ok(())
        } else {
            Err(GitError::DirtyWorkingTree(status.to_owned()).into())
        }
    }

    pub fn checkout(&self, branch: &str) -> Result<()> {
        exec!(filter=&GIT_FILTER; self.workdir.as_path(); ["git"]; "checkout", branch)?;
        Ok(())
    }

    /// Check out `branch`, creating a local tracking branch from `remote` when
    /// it does not exist locally.
    pub fn checkout_remote_branch(&self, remote: &str, branch: &str) -> Result<()> {
        if self.checkout(branch).is_ok() {
            return Ok(());
        }
        log!("git"; "fetching {remote}/{branch}");
        exec!(filter=&GIT_FILTER; self.workdir.as_path(); ["git"]; "fetch", remote, branch)?;
        let tracked = format!("{remote}/{branch}");
        exec!(filter=&GIT_FILTER; self.workdir.as_path(); ["git"]; "checkout", "--track", &tracked)?;
        Ok(())
    }

    pub fn pull(&self) -> Result<()> {
        exec!(filter=&GIT_FILTER; self.workdir.as_path(); ["git"]; "pull")?;
        Ok(())
    }

    /// Stage the given paths, relative to the working directory.
    pub fn add<P: AsRef<Path>>(&self, paths: &[P]) -> Result<()> {
        let mut args = vec![OsString::from("add"), OsString::from("--")];
        args.extend(paths.iter().map(|p| p.as_ref().as_os_str().to_owned()));
        exec::exec(
            Some(self.workdir.as_path()),
            &[OsString::from("git")],
            &args,
            &GIT_FILTER,
        )?;
        Ok(())
    }

    /// Commit staged changes; an empty commit is allowed.
    pub fn commit(&self, message: &str) -> Result<()> {
        let message = format!("--message={message}");
        exec!(filter=&GIT_FILTER; self.workdir.as_path(); ["git"]; "commit", "--allow-empty", &message)?;
        Ok(())
    }

    /// Push `branch` to `remote`, setting it as upstream.
    pub fn push(&self, remote: &str, branch: &str, force: bool) -> Result<()> {
        log!("git"; "pushing {branch} to {remote}");
        let force = if force { "-f" } else { "" };
        exec!(filter=&GIT_FILTER; self.workdir.as_path(); ["git"]; "push", "--set-upstream", remote, branch, force)?;
        Ok(())
    }

    /// Run `f` with `branch` checked out, then switch back to the original branch.
    ///
    /// Refuses to start on a dirty working tree, before any switch and
    /// without calling `f`. Once the target branch is checked out, the
    /// original branch is restored on every exit path: pull failure,
    /// callback failure or success.
    pub fn with_remote_branch<T>(
        &self,
        remote: &str,
        branch: &str,
        f: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let original = self.current_branch()?;
        self.ensure_clean()?;

        log!("git"; "switching {original} -> {branch}");
        self.checkout_remote_branch(remote, branch)?;

        let outcome = self.pull().and_then(|()| f());

        log!("git"; "restoring {original}");
        match (outcome, self.checkout(&original)) {
            (outcome, Ok(())) => outcome,
            (outcome, Err(source)) => Err(GitError::RestoreFailed {
                branch: original,
                callback: outcome.err().map(|err| format!("{err:#}")),
                source,
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fs::with_temp_dir;
    use anyhow::{anyhow, bail};
    use std::fs;

    fn git_available() -> bool {
        which::which("git").is_ok()
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = std::process::Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(
            status.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&status.stderr)
        );
    }

    /// A bare `origin` with `main` and `dist` branches, cloned into `work`.
    fn with_clone<F>(f: F)
    where
        F: FnOnce(&Path, &Git),
    {
        with_temp_dir("folio-git-", |root| {
            let origin = root.join("origin.git");
            let seed = root.join("seed");
            let work = root.join("work");
            fs::create_dir(&origin)?;
            fs::create_dir(&seed)?;

            git(&origin, &["init", "--bare", "--quiet"]);
            git(&seed, &["init", "--quiet"]);
            git(&seed, &["config", "user.email", "folio@example.com"]);
            git(&seed, &["config", "user.name", "folio"]);
            git(&seed, &["checkout", "--quiet", "-b", "main"]);
            fs::write(seed.join("README.md"), "source\n")?;
            git(&seed, &["add", "README.md"]);
            git(&seed, &["commit", "--quiet", "-m", "init"]);
            git(&seed, &["checkout", "--quiet", "-b", "dist"]);
            fs::write(seed.join("index.html"), "<p>old</p>\n")?;
            git(&seed, &["add", "index.html"]);
            git(&seed, &["commit", "--quiet", "-m", "publish"]);
            let origin_url = origin.to_string_lossy().into_owned();
            git(&seed, &["remote", "add", "origin", &origin_url]);
            git(&seed, &["push", "--quiet", "origin", "main", "dist"]);

            git(root, &["clone", "--quiet", "--branch", "main", &origin_url, "work"]);
            git(&work, &["config", "user.email", "folio@example.com"]);
            git(&work, &["config", "user.name", "folio"]);

            f(&work, &Git::new(&work));
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_current_branch() {
        if !git_available() {
            return;
        }
        with_clone(|_, git| {
            assert_eq!(git.current_branch().unwrap(), "main");
        });
    }

    #[test]
    fn test_ensure_clean() {
        if !git_available() {
            return;
        }
        with_clone(|work, git| {
            git.ensure_clean().unwrap();

            fs::write(work.join("draft.md"), "wip").unwrap();
            let err = git.ensure_clean().unwrap_err();
            assert!(matches!(
                err.downcast_ref::<GitError>(),
                Some(GitError::DirtyWorkingTree(status)) if status.contains("draft.md")
            ));
        });
    }

    #[test]
    fn test_session_tracks_remote_branch_and_restores() {
        if !git_available() {
            return;
        }
        with_clone(|work, git| {
            let seen = git
                .with_remote_branch("origin", "dist", || {
                    assert!(work.join("index.html").exists());
                    git.current_branch()
                })
                .unwrap();

            assert_eq!(seen, "dist");
            assert_eq!(git.current_branch().unwrap(), "main");
            assert!(!work.join("index.html").exists());
        });
    }

    #[test]
    fn test_session_refuses_dirty_tree() {
        if !git_available() {
            return;
        }
        with_clone(|work, git| {
            fs::write(work.join("README.md"), "edited\n").unwrap();

            let mut called = false;
            let err = git
                .with_remote_branch("origin", "dist", || {
                    called = true;
                    Ok(())
                })
                .unwrap_err();

            assert!(!called);
            assert!(matches!(
                err.downcast_ref::<GitError>(),
                Some(GitError::DirtyWorkingTree(_))
            ));
            assert_eq!(git.current_branch().unwrap(), "main");
        });
    }

    #[test]
    fn test_session_restores_after_callback_failure() {
        if !git_available() {
            return;
        }
        with_clone(|_, git| {
            let err = git
                .with_remote_branch("origin", "dist", || -> Result<()> {
                    bail!("push rejected")
                })
                .unwrap_err();

            assert_eq!(err.to_string(), "push rejected");
            assert_eq!(git.current_branch().unwrap(), "main");
        });
    }

    #[test]
    fn test_session_reports_restore_failure_with_callback_error() {
        if !git_available() {
            return;
        }
        with_clone(|work, repo| {
            let err = repo
                .with_remote_branch("origin", "dist", || -> Result<()> {
                    // a local edit to a file main does not track blocks the checkout back
                    fs::write(work.join("index.html"), "<p>half written</p>\n")?;
                    bail!("push rejected")
                })
                .unwrap_err();

            match err.downcast_ref::<GitError>() {
                Some(GitError::RestoreFailed {
                    branch, callback, ..
                }) => {
                    assert_eq!(branch, "main");
                    assert_eq!(callback.as_deref(), Some("push rejected"));
                }
                other => panic!("expected RestoreFailed, got {other:?}"),
            }
            assert!(err.to_string().contains("push rejected"));
            assert_eq!(repo.current_branch().unwrap(), "dist");
        });
    }

    #[test]
    fn test_session_fetches_branch_created_after_clone() {
        if !git_available() {
            return;
        }
        with_clone(|work, repo| {
            let seed = work.parent().unwrap().join("seed");
            git(&seed, &["checkout", "--quiet", "-b", "pages", "main"]);
            fs::write(seed.join("page.html"), "<p>pages</p>\n").unwrap();
            git(&seed, &["add", "page.html"]);
            git(&seed, &["commit", "--quiet", "-m", "pages"]);
            git(&seed, &["push", "--quiet", "origin", "pages"]);

            // no origin/pages in the clone yet, so only fetch + --track can reach it
            assert!(repo.checkout("pages").is_err());

            let seen = repo
                .with_remote_branch("origin", "pages", || {
                    assert!(work.join("page.html").exists());
                    repo.current_branch()
                })
                .unwrap();

            assert_eq!(seen, "pages");
            assert_eq!(repo.current_branch().unwrap(), "main");
            assert!(!work.join("page.html").exists());
        });
    }

    #[test]
    fn test_session_unknown_branch_does_not_switch() {
        if !git_available() {
            return;
        }
        with_clone(|_, git| {
            let mut called = false;
            let result = git.with_remote_branch("origin", "no-such-branch", || {
                called = true;
                Ok(())
            });

            assert!(result.is_err());
            assert!(!called);
            assert_eq!(git.current_branch().unwrap(), "main");
        });
    }

    #[test]
    fn test_commit_and_push_publish_branch() {
        if !git_available() {
            return;
        }
        with_clone(|work, git| {
            git.with_remote_branch("origin", "dist", || {
                fs::write(work.join("index.html"), "<p>new</p>\n")?;
                git.add(&["index.html"])?;
                git.commit("deploy")?;
                git.push("origin", "dist", false)
            })
            .unwrap();

            assert_eq!(git.current_branch().unwrap(), "main");
            let output = std::process::Command::new("git")
                .args(["show", "origin/dist:index.html"])
                .current_dir(work)
                .output()
                .unwrap();
            assert_eq!(String::from_utf8_lossy(&output.stdout), "<p>new</p>\n");
        });
    }

    #[test]
    fn test_restore_failed_message_mentions_callback() {
        let err = GitError::RestoreFailed {
            branch: "main".into(),
            callback: Some("push rejected".into()),
            source: anyhow!("checkout failed"),
        };
        let message = err.to_string();
        assert!(message.contains("`main`"));
        assert!(message.contains("push rejected"));

        let err = GitError::RestoreFailed {
            branch: "main".into(),
            callback: None,
            source: anyhow!("checkout failed"),
        };
        assert_eq!(err.to_string(), "Failed to restore branch `main`");
    }
}
