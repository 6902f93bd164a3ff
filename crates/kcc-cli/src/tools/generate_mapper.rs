use super::{parse_args, resource_schema, KccTool, ResourceArgs, ToolContext, ToolOutput};
use kcc_core::mapper::generate_mapper;

pub struct GenerateMapperTool;

impl KccTool for GenerateMapperTool {
    fn name(&self) -> &str {
        "kcc_generate_mapper"
    }

    fn description(&self) -> &str {
        "Regenerate KRM/proto mapper functions with ./dev/tasks/generate-mapper"
    }

    fn schema(&self) -> serde_json::Value {
        resource_schema("ComputeURLMap")
    }

    fn call(&self, args: serde_json::Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let args: ResourceArgs = parse_args(args)?;
        generate_mapper(ctx.root(), &args.resource)
            .map(ToolOutput::Text)
            .map_err(|e| e.to_string())
    }
}
