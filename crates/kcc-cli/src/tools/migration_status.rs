use super::{parse_args, resource_schema, KccTool, ResourceArgs, ToolContext, ToolOutput};
use kcc_core::migration::migration_status;

pub struct MigrationStatusTool;

impl KccTool for MigrationStatusTool {
    fn name(&self) -> &str {
        "kcc_migration_status"
    }

    fn description(&self) -> &str {
        "Report per-phase progress of a legacy-to-direct controller migration"
    }

    fn schema(&self) -> serde_json::Value {
        resource_schema("ComputeURLMap")
    }

    fn call(&self, args: serde_json::Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let args: ResourceArgs = parse_args(args)?;
        let status = migration_status(ctx.root(), &args.resource).map_err(|e| e.to_string())?;
        ToolOutput::json(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{context, touch};
    use tempfile::TempDir;

    #[test]
    fn fresh_legacy_resource_starts_at_phase_one() {
        let dir = TempDir::new().unwrap();
        touch(
            &dir,
            "pkg/clients/generated/apis/compute/v1beta1/computeurlmap_types.go",
        );
        let ToolOutput::Json(v) = MigrationStatusTool
            .call(serde_json::json!({"resource": "ComputeURLMap"}), &context(&dir))
            .unwrap()
        else {
            panic!("expected json output");
        };
        assert_eq!(v["overall_progress"], "0/7 phases");
        assert_eq!(v["current_phase"]["number"], 1);
        assert_eq!(v["can_add_fields"], false);
    }

    #[test]
    fn unknown_resource_cannot_be_evaluated() {
        let dir = TempDir::new().unwrap();
        let err = MigrationStatusTool
            .call(serde_json::json!({"resource": "Ghost"}), &context(&dir))
            .unwrap_err();
        assert!(err.contains("Ghost"));
    }
}
