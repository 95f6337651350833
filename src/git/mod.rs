use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};

/// The working tree the mapping store and relative paths hang off.
#[derive(Debug, Clone)]
pub struct Git {
    root: PathBuf,
}

impl Git {
    pub fn discover() -> Result<Self> {
        let output = run(None, &["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            return Err(anyhow!("not inside a git repository"));
        }
        let root = PathBuf::from(String::from_utf8(output.stdout)?.trim());
        let root = root
            .canonicalize()
            .with_context(|| format!("failed to resolve repository root {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn git_dir(&self) -> Result<PathBuf> {
        let dir = PathBuf::from(self.capture(&["rev-parse", "--git-dir"])?.trim());
        Ok(if dir.is_absolute() {
            dir
        } else {
            self.root.join(dir)
        })
    }

    /// `None` on a detached HEAD.
    pub fn current_branch(&self) -> Result<Option<String>> {
        let name = self.capture(&["branch", "--show-current"])?;
        Ok(non_empty(&name))
    }

    /// `None` when the remote is not configured.
    pub fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        let output = run(Some(&self.root), &["remote", "get-url", remote])?;
        if !output.status.success() {
            return Ok(None);
        }
        Ok(non_empty(&String::from_utf8(output.stdout)?))
    }

    fn capture(&self, args: &[&str]) -> Result<String> {
        let output = run(Some(&self.root), args)?;
        if !output.status.success() {
            return Err(anyhow!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}

fn run(dir: Option<&Path>, args: &[&str]) -> Result<Output> {
    let mut cmd = Command::new("git");
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    cmd.args(args)
        .output()
        .with_context(|| format!("failed to run git {}", args.join(" ")))
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
