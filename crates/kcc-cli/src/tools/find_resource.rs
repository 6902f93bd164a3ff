use super::{parse_args, resource_schema, KccTool, ResourceArgs, ToolContext, ToolOutput};
use kcc_core::resource::find_resource;

pub struct FindResourceTool;

impl KccTool for FindResourceTool {
    fn name(&self) -> &str {
        "kcc_find_resource"
    }

    fn description(&self) -> &str {
        "Find all files related to a KCC resource (types, controller, mapper, fixtures)"
    }

    fn schema(&self) -> serde_json::Value {
        resource_schema("ComputeURLMap")
    }

    fn call(&self, args: serde_json::Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let args: ResourceArgs = parse_args(args)?;
        let location = find_resource(ctx.root(), &args.resource).map_err(|e| e.to_string())?;
        ToolOutput::json(&location)
    }
}
