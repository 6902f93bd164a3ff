use kcc_core::config::Config;
use kcc_core::git::{Git, GitCli};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

pub mod add_field;
pub mod detect_controller_type;
pub mod find_resource;
pub mod generate_mapper;
pub mod git_commit;
pub mod git_status;
pub mod migration_status;
pub mod plan_migration;
pub mod scaffold;

/// What a tool hands back: plain text is passed through untouched,
/// structured reports are pretty-printed.
#[derive(Debug)]
pub enum ToolOutput {
    Text(String),
    Json(Value),
}

impl ToolOutput {
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, String> {
        serde_json::to_value(value)
            .map(ToolOutput::Json)
            .map_err(|e| format!("serialization error: {e}"))
    }

    pub fn into_text(self) -> String {
        match self {
            ToolOutput::Text(text) => text,
            ToolOutput::Json(v) => serde_json::to_string_pretty(&v)
                .unwrap_or_else(|e| format!("serialization error: {e}")),
        }
    }
}

pub trait KccTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> Value;
    fn call(&self, args: Value, ctx: &ToolContext) -> Result<ToolOutput, String>;
}

// ---------------------------------------------------------------------------
// Shared state handed to every call
// ---------------------------------------------------------------------------

pub struct ToolContext {
    pub config: Config,
    git: Option<Box<dyn Git>>,
}

impl ToolContext {
    pub fn new(config: Config) -> Self {
        Self { config, git: None }
    }

    /// Replace the git binary with another collaborator.
    pub fn with_git(mut self, git: Box<dyn Git>) -> Self {
        self.git = Some(git);
        self
    }

    pub fn root(&self) -> &Path {
        &self.config.repo_path
    }

    /// Run `f` against the repository's git. The binary is looked up per
    /// call so inspection tools work on machines without git.
    pub fn run_git<T>(
        &self,
        f: impl FnOnce(&dyn Git) -> kcc_core::Result<T>,
    ) -> kcc_core::Result<T> {
        match &self.git {
            Some(git) => f(git.as_ref()),
            None => {
                let git = GitCli::new(self.root())?;
                f(&git as &dyn Git)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub struct ToolRegistry {
    tools: Vec<Box<dyn KccTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: vec![
                Box::new(find_resource::FindResourceTool),
                Box::new(detect_controller_type::DetectControllerTypeTool),
                Box::new(migration_status::MigrationStatusTool),
                Box::new(plan_migration::PlanMigrationTool),
                Box::new(add_field::AddFieldTool),
                Box::new(generate_mapper::GenerateMapperTool),
                Box::new(scaffold::ScaffoldTypesTool),
                Box::new(scaffold::ScaffoldIdentityTool),
                Box::new(scaffold::ScaffoldControllerTool),
                Box::new(scaffold::ScaffoldMockGcpTool),
                Box::new(scaffold::ScaffoldFixturesTool),
                Box::new(git_status::GitStatusTool),
                Box::new(git_commit::GitCommitTool),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn KccTool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn KccTool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

/// Deserialize a tool's arguments. Absent arguments count as `{}`.
pub fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, String> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| format!("invalid arguments: {e}"))
}

/// The single-argument shape shared by the inspection tools.
#[derive(Debug, Deserialize)]
pub struct ResourceArgs {
    pub resource: String,
}

pub fn resource_schema(example: &str) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "resource": {
                "type": "string",
                "description": format!("Resource name (e.g. {example})")
            }
        },
        "required": ["resource"]
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use kcc_core::config::{Author, Rules};
    use tempfile::TempDir;

    pub fn context(dir: &TempDir) -> ToolContext {
        ToolContext::new(Config {
            author: Author {
                name: "Jane Dev".to_string(),
                email: "jane@example.com".to_string(),
            },
            repo_path: dir.path().to_path_buf(),
            rules: Rules::default(),
        })
    }

    pub fn touch(dir: &TempDir, rel: &str) {
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_names_are_unique_and_prefixed() {
        let registry = ToolRegistry::new();
        let mut names: Vec<&str> = registry.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), 13);
        assert!(names.iter().all(|n| n.starts_with("kcc_")));
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn every_schema_is_an_object_schema() {
        for tool in ToolRegistry::new().iter() {
            let schema = tool.schema();
            assert_eq!(schema["type"], "object", "{}", tool.name());
            assert!(schema["properties"].is_object(), "{}", tool.name());
        }
    }

    #[test]
    fn parse_args_reports_missing_fields() {
        let err = parse_args::<ResourceArgs>(Value::Null).unwrap_err();
        assert!(err.contains("resource"));
        let ok: ResourceArgs = parse_args(serde_json::json!({"resource": "X"})).unwrap();
        assert_eq!(ok.resource, "X");
    }
}
