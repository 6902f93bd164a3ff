use crate::error::{KccError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_AUTHOR_NAME: &str = "KCC_AUTHOR_NAME";
pub const ENV_AUTHOR_EMAIL: &str = "KCC_AUTHOR_EMAIL";
pub const ENV_REPO_PATH: &str = "KCC_REPO_PATH";
pub const ENV_REQUIRE_CONVENTIONAL: &str = "KCC_REQUIRE_CONVENTIONAL_COMMITS";

/// Relative to the home directory.
pub const CONFIG_FILE: &str = ".config/kcc-mcp-server/config.json";

// ---------------------------------------------------------------------------
// On-disk file shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub git: FileGit,
    #[serde(default)]
    pub kcc_repo_path: Option<PathBuf>,
    #[serde(default)]
    pub rules: FileRules,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileGit {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileRules {
    #[serde(default)]
    pub require_conventional_commits: Option<bool>,
}

impl FileConfig {
    /// Read the file at `path`. A missing file is empty; an unparseable one
    /// is logged and treated as empty.
    pub fn load(path: &Path) -> Self {
        let Ok(data) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&data) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not parse config file");
                Self::default()
            }
        }
    }

    /// The file under `home`. Without a home directory there is no file.
    pub fn load_from_home(home: Option<&Path>) -> Self {
        match home {
            Some(home) => Self::load(&home.join(CONFIG_FILE)),
            None => Self::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// The banned-term denylist is not a rule here: it always applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub require_conventional_commits: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            require_conventional_commits: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub author: Author,
    pub repo_path: PathBuf,
    pub rules: Rules,
}

impl Config {
    /// Resolve from the process environment, the user config file and the
    /// global git identity, in that order of precedence. `repo_override`
    /// (the `--repo` flag) beats every source for the repository path.
    pub fn load(repo_override: Option<&Path>) -> Result<Self> {
        let file = FileConfig::load_from_home(home::home_dir().as_deref());
        Self::resolve(
            |key| match repo_override {
                Some(repo) if key == ENV_REPO_PATH => Some(repo.display().to_string()),
                _ => std::env::var(key).ok(),
            },
            &file,
            git_config_global,
        )
    }

    /// Layer `env` over `file` over `git`. Empty values count as unset.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        file: &FileConfig,
        git: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let from_env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let from_git = |key: &str| git(key).filter(|v| !v.trim().is_empty());
        let file_str = |v: &Option<String>| v.clone().filter(|v| !v.trim().is_empty());

        let name = from_env(ENV_AUTHOR_NAME)
            .or_else(|| file_str(&file.git.author_name))
            .or_else(|| from_git("user.name"));
        let email = from_env(ENV_AUTHOR_EMAIL)
            .or_else(|| file_str(&file.git.author_email))
            .or_else(|| from_git("user.email"));
        let repo_path = from_env(ENV_REPO_PATH).map(PathBuf::from).or_else(|| {
            file.kcc_repo_path
                .clone()
                .filter(|p| !p.to_string_lossy().trim().is_empty())
        });

        let (Some(name), Some(email)) = (name, email) else {
            return Err(KccError::ConfigMissing(missing_author_help()));
        };
        let Some(repo_path) = repo_path else {
            return Err(KccError::ConfigMissing(missing_repo_help()));
        };

        let require_conventional_commits = match from_env(ENV_REQUIRE_CONVENTIONAL) {
            Some(v) => !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"),
            None => file.rules.require_conventional_commits.unwrap_or(true),
        };

        Ok(Self {
            author: Author { name, email },
            repo_path,
            rules: Rules {
                require_conventional_commits,
            },
        })
    }
}

fn git_config_global(key: &str) -> Option<String> {
    let output = std::process::Command::new("git")
        .args(["config", key])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn missing_author_help() -> String {
    format!(
        r#"Git author not configured. Set either:
1. {ENV_AUTHOR_EMAIL} and {ENV_AUTHOR_NAME} environment variables, or
2. ~/{CONFIG_FILE}, or
3. git config user.email and user.name

Example config file:
{{
  "git": {{
    "author_name": "Your Name",
    "author_email": "you@example.com"
  }},
  "kcc_repo_path": "/path/to/k8s-config-connector"
}}"#
    )
}

fn missing_repo_help() -> String {
    format!(
        "KCC repository path not configured. Set either:\n\
         1. {ENV_REPO_PATH} environment variable, or\n\
         2. kcc_repo_path in ~/{CONFIG_FILE}, or\n\
         3. the --repo flag"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
