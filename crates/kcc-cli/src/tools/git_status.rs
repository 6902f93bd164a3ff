use super::{KccTool, ToolContext, ToolOutput};

pub struct GitStatusTool;

impl KccTool for GitStatusTool {
    fn name(&self) -> &str {
        "kcc_git_status"
    }

    fn description(&self) -> &str {
        "Show git status of the KCC repository and the configured author"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    fn call(&self, _args: serde_json::Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let status = ctx
            .run_git(|git| git.status_short())
            .map_err(|e| e.to_string())?;
        let body = if status.trim().is_empty() {
            "Working tree clean".to_string()
        } else {
            status.trim_end().to_string()
        };
        Ok(ToolOutput::Text(format!(
            "Repository: {}\nAuthor: {}\n\n{body}",
            ctx.root().display(),
            ctx.config.author
        )))
    }
}
