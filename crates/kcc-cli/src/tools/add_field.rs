use super::{parse_args, KccTool, ToolContext, ToolOutput};
use kcc_core::field::{add_field, AddFieldParams};

pub struct AddFieldTool;

impl KccTool for AddFieldTool {
    fn name(&self) -> &str {
        "kcc_add_field"
    }

    fn description(&self) -> &str {
        "Add a field with its +kcc:proto annotation to a direct resource's types file"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "resource": {
                    "type": "string",
                    "description": "Resource name (e.g. ComputeURLMap)"
                },
                "field_name": {
                    "type": "string",
                    "description": "Go field name (e.g. DefaultCustomErrorResponsePolicy)"
                },
                "field_type": {
                    "type": "string",
                    "enum": ["string", "int64", "bool", "object", "array"],
                    "description": "Field type"
                },
                "proto_path": {
                    "type": "string",
                    "description": "Full proto path (e.g. google.cloud.compute.v1.UrlMap.default_custom_error_response_policy)"
                },
                "parent_type": {
                    "type": "string",
                    "description": "Struct to add the field to (default: <resource>Spec)"
                },
                "description": {
                    "type": "string",
                    "description": "Field description comment"
                },
                "json_name": {
                    "type": "string",
                    "description": "JSON tag name (default: camelCase of field_name)"
                },
                "types_file": {
                    "type": "string",
                    "description": "Repository-relative types file (default: located from resource)"
                }
            },
            "required": ["resource", "field_name", "field_type", "proto_path"]
        })
    }

    fn call(&self, args: serde_json::Value, ctx: &ToolContext) -> Result<ToolOutput, String> {
        let params: AddFieldParams = parse_args(args)?;
        add_field(ctx.root(), &params)
            .map(ToolOutput::Text)
            .map_err(|e| e.to_string())
    }
}
