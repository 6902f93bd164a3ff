use super::{parse_args, resource_schema, KccTool, ResourceArgs, ToolContext, ToolOutput};
use kcc_core::classifier::classify;

pub struct DetectControllerTypeTool;

impl KccTool for DetectControllerTypeTool {
    fn name(&self) -> &str {
        "kcc_detect_controller_type"
    }

    fn description(&self) -> &str {
        "Detect whether a resource uses a direct or legacy controller and whether migration is needed"
    }

    fn schema(&self) -> serde_json::Value {
        resource_schema("ComputeURLMap, NetworkServicesEdgeCacheService")
    }

    fn call(&self, args: serde_json::Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let args: ResourceArgs = parse_args(args)?;
        let info = classify(ctx.root(), &args.resource).map_err(|e| e.to_string())?;
        ToolOutput::json(&info)
    }
}
