/*!
 * TypeScript type check appended to the document
 *
 * Runs `npx tsc --noEmit` in the root when a `package.json` is present. A
 * missing tool or a failing check never aborts the run: both are rendered
 * into the document instead.
 */

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{error, info, warn};

use crate::types::Section;

/// Manifest whose presence enables the check
pub const MANIFEST: &str = "package.json";

/// Heading of the type check block
pub const HEADING: &str = "\n# TypeScript Error Check\n";

/// Result of running the type checker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeCheckOutcome {
    /// No manifest in the root
    Skipped,
    /// Checker exited with status 0
    Passed,
    /// Checker exited with a non-zero status
    Failed {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// Checker executable not found on PATH
    ToolMissing(String),
    /// Checker could not be started
    SpawnError(String),
}

impl TypeCheckOutcome {
    /// Render the outcome as a document section
    pub fn to_section(&self, program: &str) -> Option<Section> {
        let mut section = Section::new(vec![HEADING.to_string()]);
        match self {
            Self::Skipped => return None,
            Self::Passed => {
                section.push("No TypeScript errors were detected in the project.\n");
            }
            Self::Failed {
                code,
                stdout,
                stderr,
            } => {
                let status = code.map_or_else(|| "unknown".to_string(), |c| c.to_string());
                section.push(format!(
                    "The TypeScript check exited with status {}.",
                    status
                ));
                section.push("The following TypeScript errors were detected:\n");
                section.push("```shell");
                section.push(stdout.as_str());
                section.push(stderr.as_str());
                section.push("```\n");
            }
            Self::ToolMissing(_) => {
                section.push(format!(
                    "**Warning**: The `{}` command was not found. The TypeScript check could not be performed.",
                    program
                ));
            }
            Self::SpawnError(message) => {
                section.push(format!(
                    "**Unexpected error**: Failed to run the TypeScript check. Details: `{}`",
                    message
                ));
            }
        }
        Some(section)
    }
}

/// External type checker invocation
#[derive(Debug, Clone)]
pub struct TypeCheck {
    /// Executable looked up on PATH
    pub program: String,
    /// Arguments passed to the executable
    pub args: Vec<String>,
}

impl Default for TypeCheck {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            args: vec!["tsc".to_string(), "--noEmit".to_string()],
        }
    }
}

impl TypeCheck {
    /// Run the check in `root` if it holds a manifest
    pub fn run(&self, root: &Path) -> TypeCheckOutcome {
        if !root.join(MANIFEST).exists() {
            info!("No '{}' found. Skipping TypeScript check.", MANIFEST);
            return TypeCheckOutcome::Skipped;
        }

        let binary = match self.locate() {
            Ok(path) => path,
            Err(e) => {
                error!(
                    "'{}' was not found. Make sure Node.js/npm is installed: {}",
                    self.program, e
                );
                return TypeCheckOutcome::ToolMissing(e);
            }
        };

        info!("Running '{} {}'...", self.program, self.args.join(" "));
        let output = match Command::new(&binary)
            .args(&self.args)
            .current_dir(root)
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                error!("Unexpected error while running the type check: {}", e);
                return TypeCheckOutcome::SpawnError(e.to_string());
            }
        };

        if output.status.success() {
            info!("No TypeScript errors found.");
            TypeCheckOutcome::Passed
        } else {
            warn!("TypeScript errors found.");
            TypeCheckOutcome::Failed {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
        }
    }

    /// Run the check and render it, `None` when skipped
    pub fn section(&self, root: &Path) -> Option<Section> {
        self.run(root).to_section(&self.program)
    }

    fn locate(&self) -> std::result::Result<PathBuf, String> {
        which::which(&self.program).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST), "{}").unwrap();
        dir
    }

    #[test]
    fn test_skipped_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let check = TypeCheck::default();
        assert_eq!(check.run(dir.path()), TypeCheckOutcome::Skipped);
        assert!(check.section(dir.path()).is_none());
    }

    #[test]
    fn test_missing_tool_renders_warning() {
        let dir = project();
        let check = TypeCheck {
            program: "dirbook-no-such-checker".to_string(),
            args: vec![],
        };
        let outcome = check.run(dir.path());
        assert!(matches!(outcome, TypeCheckOutcome::ToolMissing(_)));

        let text = outcome.to_section(&check.program).unwrap().render();
        assert!(text.contains("**Warning**"));
        assert!(text.contains("`dirbook-no-such-checker`"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_captures_output() {
        let dir = project();
        let check = TypeCheck {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "echo out-line; echo err-line >&2; exit 3".to_string(),
            ],
        };
        let outcome = check.run(dir.path());
        assert_eq!(
            outcome,
            TypeCheckOutcome::Failed {
                code: Some(3),
                stdout: "out-line\n".to_string(),
                stderr: "err-line\n".to_string(),
            }
        );

        let text = outcome.to_section(&check.program).unwrap().render();
        assert!(text.contains("exited with status 3."));
        assert!(text.contains("```shell\nout-line\n\nerr-line\n\n```"));
    }

    #[test]
    fn test_failure_without_exit_code() {
        let outcome = TypeCheckOutcome::Failed {
            code: None,
            stdout: String::new(),
            stderr: "killed\n".to_string(),
        };
        let text = outcome.to_section("npx").unwrap().render();
        assert!(text.contains("The TypeScript check exited with status unknown."));
        assert!(text.contains("killed"));
    }

    #[cfg(unix)]
    #[test]
    fn test_success() {
        let dir = project();
        let check = TypeCheck {
            program: "true".to_string(),
            args: vec![],
        };
        assert_eq!(check.run(dir.path()), TypeCheckOutcome::Passed);
    }
}
