use thiserror::Error;

#[derive(Debug, Error)]
pub enum KccError {
    #[error("resource not found: {resource}\n\nSearched for: {pattern}")]
    ResourceNotFound { resource: String, pattern: String },

    #[error("path '{path}' does not match layout '{template}'")]
    UnexpectedLayout { path: String, template: String },

    #[error("could not determine service/version for {0}")]
    UnresolvedLayout(String),

    #[error("{resource} is already a direct controller at {location}\nNo migration needed. Use kcc_add_field to add fields.")]
    AlreadyMigrated { resource: String, location: String },

    #[error("commit message contains banned term '{0}': AI attribution is not allowed in k8s-config-connector contributions")]
    BannedTerm(String),

    #[error("commit message does not follow conventional commit format <type>(<scope>): <description>\n\nTypes: feat, fix, docs, style, refactor, perf, test, chore\nYour message: \"{0}\"")]
    FormatViolation(String),

    #[error("git identity mismatch\n\nCurrent in repository: {current}\nExpected from config: {expected}\n\nRun in {repo}:\n{fix}")]
    IdentityMismatch {
        current: String,
        expected: String,
        repo: String,
        fix: String,
    },

    #[error("file already exists: {0}")]
    Collision(String),

    #[error("`{command}` failed:\n\n{output}")]
    ExternalTool { command: String, output: String },

    #[error("could not find parent type: {parent}\n\nMake sure the type exists in {file}")]
    ParentTypeNotFound { parent: String, file: String },

    #[error("unsupported field type: {0} (expected string, int64, bool, object or array)")]
    UnsupportedFieldType(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    ConfigMissing(String),

    #[error("git not found on PATH")]
    GitNotInstalled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KccError>;
