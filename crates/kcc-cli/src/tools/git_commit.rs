use super::{parse_args, KccTool, ToolContext, ToolOutput};
use kcc_core::gate::CommitGate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CommitArgs {
    message: String,
    #[serde(default)]
    files: Vec<String>,
}

pub struct GitCommitTool;

impl KccTool for GitCommitTool {
    fn name(&self) -> &str {
        "kcc_git_commit"
    }

    fn description(&self) -> &str {
        "Commit changes as the configured author after policy checks (no AI attribution, conventional format)"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "Commit message in conventional format (e.g. \"feat: add field to ComputeURLMap\")"
                },
                "files": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Repository-relative files to stage (default: all changes)"
                }
            },
            "required": ["message"]
        })
    }

    fn call(&self, args: serde_json::Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let args: CommitArgs = parse_args(args)?;
        let gate = CommitGate::new(&ctx.config.author, &ctx.config.rules);
        let repo = ctx.root().display().to_string();

        // Policy first so a rejected message never needs git on PATH.
        gate.validate_message(&args.message)
            .and_then(|_| gate.validate_format(&args.message))
            .map_err(|e| e.to_string())?;

        ctx.run_git(|git| gate.create_commit(git, &repo, &args.message, &args.files))
            .map_err(|e| e.to_string())?;

        let staged = if args.files.is_empty() {
            "all changes".to_string()
        } else {
            args.files.join(", ")
        };
        Ok(ToolOutput::Text(format!(
            "Committed as {}\nStaged: {staged}\nMessage: {}",
            ctx.config.author,
            args.message.lines().next().unwrap_or("")
        )))
    }
}
