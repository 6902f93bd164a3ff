//! Version-control collaborator. Everything the commit gate needs from git
//! goes through [`Git`], so policy can be tested without a real repository.

use crate::config::Author;
use crate::error::{KccError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait Git {
    /// `git config <key>` in the repository; `None` when unset.
    fn config_get(&self, key: &str) -> Result<Option<String>>;
    fn add(&self, path: &str) -> Result<()>;
    fn add_all(&self) -> Result<()>;
    /// Commit staged changes with `author` forced as author and committer.
    fn commit(&self, message: &str, author: &Author) -> Result<()>;
    /// `git status --short` output.
    fn status_short(&self) -> Result<String>;
}

/// Shells out to the `git` binary inside `repo`.
pub struct GitCli {
    bin: PathBuf,
    repo: PathBuf,
}

impl GitCli {
    pub fn new(repo: &Path) -> Result<Self> {
        let bin = which::which("git").map_err(|_| KccError::GitNotInstalled)?;
        Ok(Self {
            bin,
            repo: repo.to_path_buf(),
        })
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.args(args).current_dir(&self.repo);
        cmd
    }

    fn run(&self, mut cmd: Command, label: String) -> Result<String> {
        let output = cmd.output().map_err(|e| KccError::ExternalTool {
            command: label.clone(),
            output: e.to_string(),
        })?;
        if !output.status.success() {
            let mut text = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if text.is_empty() {
                text = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            return Err(KccError::ExternalTool {
                command: label,
                output: text,
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Git for GitCli {
    fn config_get(&self, key: &str) -> Result<Option<String>> {
        let output = self
            .command(&["config", key])
            .output()
            .map_err(|e| KccError::ExternalTool {
                command: format!("git config {key}"),
                output: e.to_string(),
            })?;
        // Exit status 1 means the key is unset.
        match output.status.code() {
            Some(0) => {
                let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Ok(Some(value).filter(|v| !v.is_empty()))
            }
            Some(1) => Ok(None),
            _ => Err(KccError::ExternalTool {
                command: format!("git config {key}"),
                output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }

    fn add(&self, path: &str) -> Result<()> {
        self.run(self.command(&["add", "--", path]), format!("git add {path}"))?;
        Ok(())
    }

    fn add_all(&self) -> Result<()> {
        self.run(self.command(&["add", "-A"]), "git add -A".to_string())?;
        Ok(())
    }

    fn commit(&self, message: &str, author: &Author) -> Result<()> {
        let mut cmd = self.command(&["commit", "-m", message]);
        cmd.env("GIT_AUTHOR_NAME", &author.name)
            .env("GIT_AUTHOR_EMAIL", &author.email)
            .env("GIT_COMMITTER_NAME", &author.name)
            .env("GIT_COMMITTER_EMAIL", &author.email);
        self.run(cmd, "git commit".to_string())?;
        Ok(())
    }

    fn status_short(&self) -> Result<String> {
        self.run(
            self.command(&["status", "--short"]),
            "git status --short".to_string(),
        )
    }
}
