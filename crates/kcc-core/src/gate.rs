use crate::config::{Author, Rules};
use crate::error::{KccError, Result};
use crate::git::Git;
use regex::Regex;
use std::sync::OnceLock;

/// Checked in order; the first hit is the one reported.
pub const BANNED_TERMS: &[&str] = &[
    "claude",
    "anthropic",
    "gemini",
    "openai",
    "gpt",
    "chatgpt",
    "co-authored-by: claude",
    "co-authored-by: gemini",
    "co-authored-by: chatgpt",
    "noreply@anthropic.com",
    "noreply@openai.com",
    "🤖 generated",
    "ai-generated",
    "generated with claude",
    "generated with gemini",
];

static CONVENTIONAL_RE: OnceLock<Regex> = OnceLock::new();

fn conventional_re() -> &'static Regex {
    CONVENTIONAL_RE.get_or_init(|| {
        Regex::new(r"^(feat|fix|docs|style|refactor|perf|test|chore)(\(.+\))?: .+").unwrap()
    })
}

// ---------------------------------------------------------------------------
// CommitGate
// ---------------------------------------------------------------------------

/// Policy in front of every commit: message content, message format and
/// author identity.
pub struct CommitGate<'a> {
    author: &'a Author,
    rules: &'a Rules,
}

impl<'a> CommitGate<'a> {
    pub fn new(author: &'a Author, rules: &'a Rules) -> Self {
        Self { author, rules }
    }

    /// Case-insensitive denylist scan. Not affected by configuration.
    pub fn validate_message(&self, message: &str) -> Result<()> {
        let lower = message.to_lowercase();
        match BANNED_TERMS.iter().find(|term| lower.contains(*term)) {
            Some(term) => Err(KccError::BannedTerm(term.to_string())),
            None => Ok(()),
        }
    }

    /// Conventional-commit check on the first line, when enabled.
    pub fn validate_format(&self, message: &str) -> Result<()> {
        if !self.rules.require_conventional_commits {
            return Ok(());
        }
        let first_line = message.lines().next().unwrap_or("");
        if conventional_re().is_match(first_line) {
            Ok(())
        } else {
            Err(KccError::FormatViolation(first_line.to_string()))
        }
    }

    /// The repository's own identity must already match the configured one.
    /// A mismatch is reported, never fixed.
    pub fn verify_identity(&self, git: &dyn Git, repo: &str) -> Result<()> {
        let email = git.config_get("user.email")?.unwrap_or_default();
        let name = git.config_get("user.name")?.unwrap_or_default();
        if email == self.author.email && name == self.author.name {
            return Ok(());
        }
        Err(KccError::IdentityMismatch {
            current: format!("{name} <{email}>"),
            expected: self.author.to_string(),
            repo: repo.to_string(),
            fix: format!(
                "  git config user.email \"{}\"\n  git config user.name \"{}\"",
                self.author.email, self.author.name
            ),
        })
    }

    /// Validate, stage and commit. Staged changes are left in place if the
    /// commit itself fails.
    pub fn create_commit(
        &self,
        git: &dyn Git,
        repo: &str,
        message: &str,
        files: &[String],
    ) -> Result<()> {
        self.validate_message(message)?;
        self.validate_format(message)?;
        self.verify_identity(git, repo)?;

        if files.is_empty() {
            git.add_all()?;
        } else {
            for file in files {
                git.add(file)?;
            }
        }

        git.commit(message, self.author)?;
        tracing::info!(author = %self.author, "commit created");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
