use super::{parse_args, resource_schema, KccTool, ResourceArgs, ToolContext, ToolOutput};
use kcc_core::plan::plan_migration;

pub struct PlanMigrationTool;

impl KccTool for PlanMigrationTool {
    fn name(&self) -> &str {
        "kcc_plan_migration"
    }

    fn description(&self) -> &str {
        "Generate the seven-phase plan for migrating a legacy resource to a direct controller"
    }

    fn schema(&self) -> serde_json::Value {
        resource_schema("ComputeURLMap")
    }

    fn call(&self, args: serde_json::Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let args: ResourceArgs = parse_args(args)?;
        let plan = plan_migration(ctx.root(), &args.resource).map_err(|e| e.to_string())?;
        ToolOutput::json(&plan)
    }
}
