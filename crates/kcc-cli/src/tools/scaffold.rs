//! One tool per scaffold writer. Each passes its typed params straight
//! through and returns the writer's confirmation text.

use super::{parse_args, KccTool, ToolContext, ToolOutput};
use kcc_core::scaffold::{
    scaffold_controller, scaffold_fixtures, scaffold_identity, scaffold_mockgcp, scaffold_types,
    ControllerParams, FixturesParams, IdentityParams, MockGcpParams, TypesParams,
};
use serde_json::{json, Map, Value};

fn string_prop(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

/// Object schema over `props`; every prop is required except `optional`.
fn object_schema(props: &[(&str, &str)], optional: &[&str]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for (name, description) in props {
        properties.insert(name.to_string(), string_prop(description));
        if !optional.contains(name) {
            required.push(Value::String(name.to_string()));
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

const RESOURCE: (&str, &str) = ("resource", "Resource name without service prefix (e.g. URLMap)");
const SERVICE: (&str, &str) = ("service", "Service name (e.g. compute)");
const VERSION: (&str, &str) = ("version", "API version (e.g. v1beta1)");
const PROTO_MESSAGE: (&str, &str) = ("proto_message", "Proto message name (e.g. UrlMap)");
const NAME_FORMAT: (&str, &str) = (
    "resource_name_format",
    "GCP resource name format (e.g. projects/{project}/locations/{location}/urlMaps/{urlmap})",
);

// ---------------------------------------------------------------------------

pub struct ScaffoldTypesTool;

impl KccTool for ScaffoldTypesTool {
    fn name(&self) -> &str {
        "kcc_scaffold_types"
    }

    fn description(&self) -> &str {
        "Create the API types file for a direct resource (fails if it exists)"
    }

    fn schema(&self) -> Value {
        object_schema(
            &[
                RESOURCE,
                SERVICE,
                VERSION,
                ("proto_package", "Proto package (e.g. google.cloud.compute.v1)"),
                PROTO_MESSAGE,
                ("description", "Resource description"),
            ],
            &["description"],
        )
    }

    fn call(&self, args: Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let params: TypesParams = parse_args(args)?;
        scaffold_types(ctx.root(), &params)
            .map(ToolOutput::Text)
            .map_err(|e| e.to_string())
    }
}

pub struct ScaffoldIdentityTool;

impl KccTool for ScaffoldIdentityTool {
    fn name(&self) -> &str {
        "kcc_scaffold_identity"
    }

    fn description(&self) -> &str {
        "Create the identity handler for a direct resource (fails if it exists)"
    }

    fn schema(&self) -> Value {
        object_schema(&[RESOURCE, SERVICE, VERSION, NAME_FORMAT], &[])
    }

    fn call(&self, args: Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let params: IdentityParams = parse_args(args)?;
        scaffold_identity(ctx.root(), &params)
            .map(ToolOutput::Text)
            .map_err(|e| e.to_string())
    }
}

pub struct ScaffoldControllerTool;

impl KccTool for ScaffoldControllerTool {
    fn name(&self) -> &str {
        "kcc_scaffold_controller"
    }

    fn description(&self) -> &str {
        "Create the direct controller for a resource (fails if it exists)"
    }

    fn schema(&self) -> Value {
        object_schema(
            &[
                RESOURCE,
                SERVICE,
                VERSION,
                ("proto_package", "Proto package (e.g. google.cloud.compute.v1)"),
                PROTO_MESSAGE,
            ],
            &[],
        )
    }

    fn call(&self, args: Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let params: ControllerParams = parse_args(args)?;
        scaffold_controller(ctx.root(), &params)
            .map(ToolOutput::Text)
            .map_err(|e| e.to_string())
    }
}

pub struct ScaffoldMockGcpTool;

impl KccTool for ScaffoldMockGcpTool {
    fn name(&self) -> &str {
        "kcc_scaffold_mockgcp"
    }

    fn description(&self) -> &str {
        "Create the MockGCP server implementation for a resource (fails if it exists)"
    }

    fn schema(&self) -> Value {
        object_schema(
            &[
                RESOURCE,
                SERVICE,
                (
                    "proto_package",
                    "Go import path of the proto package (e.g. cloud.google.com/go/compute/apiv1/computepb)",
                ),
                PROTO_MESSAGE,
                NAME_FORMAT,
            ],
            &[],
        )
    }

    fn call(&self, args: Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let params: MockGcpParams = parse_args(args)?;
        scaffold_mockgcp(ctx.root(), &params)
            .map(ToolOutput::Text)
            .map_err(|e| e.to_string())
    }
}

pub struct ScaffoldFixturesTool;

impl KccTool for ScaffoldFixturesTool {
    fn name(&self) -> &str {
        "kcc_scaffold_fixtures"
    }

    fn description(&self) -> &str {
        "Create create.yaml and update.yaml test fixtures for a resource (fails if either exists)"
    }

    fn schema(&self) -> Value {
        object_schema(&[RESOURCE, SERVICE, VERSION], &[])
    }

    fn call(&self, args: Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let params: FixturesParams = parse_args(args)?;
        scaffold_fixtures(ctx.root(), &params)
            .map(ToolOutput::Text)
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::context;
    use tempfile::TempDir;

    #[test]
    fn schema_marks_description_optional() {
        let schema = ScaffoldTypesTool.schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(required.contains(&"proto_message"));
        assert!(!required.contains(&"description"));
        assert!(schema["properties"]["description"].is_object());
    }

    #[test]
    fn second_scaffold_reports_collision() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let args = json!({"resource": "URLMap", "service": "compute", "version": "v1beta1"});

        let first = ScaffoldFixturesTool.call(args.clone(), &ctx).unwrap();
        assert!(first.into_text().contains("Created test fixtures"));

        let err = ScaffoldFixturesTool.call(args, &ctx).unwrap_err();
        assert!(err.contains("file already exists"));
    }

    #[test]
    fn controller_tool_writes_under_direct_dir() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        ScaffoldControllerTool
            .call(
                json!({
                    "resource": "URLMap",
                    "service": "compute",
                    "version": "v1beta1",
                    "proto_package": "google.cloud.compute.v1",
                    "proto_message": "UrlMap"
                }),
                &ctx,
            )
            .unwrap();
        assert!(dir
            .path()
            .join("pkg/controller/direct/compute/urlmap_controller.go")
            .exists());
    }
}
