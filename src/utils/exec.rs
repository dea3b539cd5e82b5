//! External command execution utilities.
//!
//! Provides the `exec!` macro for running commands with captured output,
//! logging of their stderr and typed errors on non-zero exit.

use crate::log;
use anyhow::{Context, Result};
use regex::Regex;
use std::{
    ffi::OsString,
    path::Path,
    process::{Command, ExitStatus, Output},
    sync::OnceLock,
};
use thiserror::Error;

// ============================================================================
// Macros
// ============================================================================

/// Run an external command with arguments and capture its output.
///
/// # Examples
/// ```ignore
/// // With working directory
/// exec!(root; ["git"]; "checkout", branch)?;
///
/// // With custom filter
/// const MY_FILTER: FilterRule = FilterRule::new(&["hint:"]);
/// exec!(filter=&MY_FILTER; root; ["git"]; "push")?;
/// ```
#[macro_export]
macro_rules! exec {
    (filter=$filter:expr; $($rest:tt)*) => {
        $crate::exec_internal!(@parse_root $filter; $($rest)*)
    };
    ($($rest:tt)*) => {
        $crate::exec_internal!(@parse_root &$crate::utils::exec::EMPTY_FILTER; $($rest)*)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! exec_internal {
    // Parse root and command (with root)
    (@parse_root $filter:expr; $root:expr; $cmd:expr; $($arg:expr),* $(,)?) => {
        $crate::utils::exec::exec(
            Some($root),
            &$crate::utils::exec::internal::to_cmd_vec($cmd),
            &$crate::utils::exec::internal::filter_args(&[$($crate::utils::exec::internal::to_os($arg)),*]),
            $filter,
        )
    };
    // Parse command (without root)
    (@parse_root $filter:expr; $cmd:expr; $($arg:expr),* $(,)?) => {
        $crate::utils::exec::exec(
            None,
            &$crate::utils::exec::internal::to_cmd_vec($cmd),
            &$crate::utils::exec::internal::filter_args(&[$($crate::utils::exec::internal::to_os($arg)),*]),
            $filter,
        )
    };
}

// ============================================================================
// Argument Conversion
// ============================================================================

#[doc(hidden)]
pub mod internal {
    use std::ffi::OsString;

    /// Convert to `OsString`.
    #[inline]
    pub fn to_os<S: Into<OsString>>(s: S) -> OsString {
        s.into()
    }

    /// Trait for converting to command vector.
    pub trait ToCmd {
        fn to_cmd(self) -> Vec<OsString>;
    }

    impl<const N: usize> ToCmd for [&str; N] {
        #[inline]
        fn to_cmd(self) -> Vec<OsString> {
            self.into_iter().map(OsString::from).collect()
        }
    }

    impl ToCmd for &[String] {
        #[inline]
        fn to_cmd(self) -> Vec<OsString> {
            self.iter().map(OsString::from).collect()
        }
    }

    /// Convert command to Vec<OsString>.
    #[inline]
    pub fn to_cmd_vec<C: ToCmd>(cmd: C) -> Vec<OsString> {
        cmd.to_cmd()
    }

    /// Filter out empty args.
    #[inline]
    pub fn filter_args(args: &[OsString]) -> Vec<OsString> {
        args.iter().filter(|a| !a.is_empty()).cloned().collect()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failure of an external command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Failed to execute `{0}`")]
    Spawn(String, #[source] std::io::Error),

    /// The command ran and exited unsuccessfully.
    #[error("Command `{name}` failed with {status}{}", format_detail(.message))]
    Failed {
        name: String,
        status: ExitStatus,
        message: String,
    },
}

fn format_detail(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!("\n{message}")
    }
}

// ============================================================================
// Command Execution
// ============================================================================

/// Execute a command and capture its output.
///
/// # Errors
/// Returns [`ExecError`] if the command fails to start or exits non-zero.
pub fn exec(
    root: Option<&Path>,
    cmd: &[OsString],
    args: &[OsString],
    filter: &'static FilterRule,
) -> Result<Output> {
    let (name, mut command) = prepare(root, cmd, args)?;

    let output = command
        .output()
        .map_err(|err| ExecError::Spawn(name.clone(), err))?;

    if !output.status.success() {
        return Err(failure(&name, &output).into());
    }

    // On success, only log stderr (progress and warnings) to reduce noise
    let stderr = String::from_utf8_lossy(&output.stderr);
    filter.log(&name, stderr.trim());

    Ok(output)
}

/// Prepare a Command from components.
fn prepare(root: Option<&Path>, cmd: &[OsString], args: &[OsString]) -> Result<(String, Command)> {
    let name = cmd
        .first()
        .and_then(|s| s.to_str())
        .context("Empty command")?
        .to_owned();

    let mut command = Command::new(&cmd[0]);
    command.args(&cmd[1..]).args(args);

    if let Some(dir) = root {
        command.current_dir(dir);
    }

    Ok((name, command))
}

// ============================================================================
// Output Filtering
// ============================================================================

fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ansi regex"));
    re.replace_all(s, "")
}

/// Filter rule for skipping output lines by prefix.
///
/// Used to reduce noise in command output logging by ignoring known hints
/// or irrelevant messages.
pub struct FilterRule {
    /// Prefixes to match at the start of output lines.
    pub skip_prefixes: &'static [&'static str],
}

impl FilterRule {
    /// Create a new filter rule with the given prefixes.
    pub const fn new(skip_prefixes: &'static [&'static str]) -> Self {
        Self { skip_prefixes }
    }

    /// Returns true if the line is empty or starts with any of the skip prefixes.
    fn should_skip(&self, line: &str) -> bool {
        line.is_empty() || self.skip_prefixes.iter().any(|p| line.starts_with(p))
    }

    /// Keep the lines that survive the filter, ANSI codes stripped for matching.
    fn retain<'a>(&self, output: &'a str) -> Vec<&'a str> {
        output
            .lines()
            .filter(|line| !self.should_skip(strip_ansi(line).trim()))
            .collect()
    }

    /// Log the lines that survive the filter.
    fn log(&self, name: &str, output: &str) {
        let lines = self.retain(output);
        if !lines.is_empty() {
            log!(name; "{}", lines.join("\n"));
        }
    }
}

/// Empty filter (no skipping).
pub const EMPTY_FILTER: FilterRule = FilterRule::new(&[]);

/// Silent filter: skip all output.
pub const SILENT_FILTER: FilterRule = FilterRule::new(&[""]);

/// Build the error for a failed command from its stderr and stdout.
///
/// The filter only applies to success logging; failures keep everything.
fn failure(name: &str, output: &Output) -> ExecError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let mut message = stderr.trim().to_owned();

    let stdout = stdout.trim();
    if !stdout.is_empty() {
        if !message.is_empty() {
            message.push('\n');
        }
        message.push_str("Stdout:\n");
        message.push_str(stdout);
    }

    ExecError::Failed {
        name: name.to_owned(),
        status: output.status,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::exec::internal::*;

    #[test]
    fn test_to_cmd_vec_array() {
        let cmd = to_cmd_vec(["git", "status"]);
        assert_eq!(cmd, vec![OsString::from("git"), OsString::from("status")]);
    }

    #[test]
    fn test_to_cmd_vec_slice() {
        let v = vec!["git".to_string(), "pull".to_string()];
        let cmd = to_cmd_vec(v.as_slice());
        assert_eq!(cmd.len(), 2);
        assert_eq!(cmd[1], OsString::from("pull"));
    }

    #[test]
    fn test_filter_args() {
        let args = [OsString::from("push"), OsString::from(""), OsString::from("-f")];
        let filtered = filter_args(&args);
        assert_eq!(filtered, vec![OsString::from("push"), OsString::from("-f")]);
    }

    #[test]
    fn test_prepare_empty() {
        assert!(prepare(None, &[], &[]).is_err());
    }

    #[test]
    fn test_prepare_valid() {
        let cmd = to_cmd_vec(["git"]);
        let (name, _) = prepare(None, &cmd, &[]).unwrap();
        assert_eq!(name, "git");
    }

    #[test]
    fn test_filter_rule() {
        let filter = FilterRule::new(&["hint:", "remote:"]);

        assert!(filter.should_skip("hint: use --set-upstream"));
        assert!(filter.should_skip("remote: Resolving deltas"));
        assert!(!filter.should_skip("error: failed to push"));
        assert!(filter.should_skip(""));

        let kept = filter.retain("hint: a\nerror: b\n\x1b[33mhint:\x1b[0m c");
        assert_eq!(kept, vec!["error: b"]);
    }

    #[test]
    fn test_silent_filter_skips_everything() {
        assert!(SILENT_FILTER.retain("anything\nat all").is_empty());
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[31mRed\x1b[0m"), "Red");
        assert_eq!(strip_ansi("\x1b[1;32mGreen Bold\x1b[0m"), "Green Bold");
        assert_eq!(strip_ansi("Plain text"), "Plain text");
    }

    #[test]
    fn test_exec_success_captures_stdout() {
        if which::which("git").is_err() {
            return;
        }
        let dir = tempfile::TempDir::new().unwrap();
        let output = exec!(dir.path(); ["git"]; "--version").unwrap();
        assert!(String::from_utf8_lossy(&output.stdout).starts_with("git version"));
    }

    #[test]
    fn test_exec_failure_is_typed() {
        if which::which("git").is_err() {
            return;
        }
        let dir = tempfile::TempDir::new().unwrap();
        // Not a repository: git exits non-zero
        let err = exec!(dir.path(); ["git"]; "rev-parse", "HEAD").unwrap_err();
        match err.downcast_ref::<ExecError>() {
            Some(ExecError::Failed { name, status, .. }) => {
                assert_eq!(name, "git");
                assert!(!status.success());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("Command `git` failed"));
    }

    #[test]
    fn test_exec_missing_program() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = exec!(dir.path(); ["folio-definitely-not-a-command"]; "--help").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExecError>(),
            Some(ExecError::Spawn(..))
        ));
    }
}
