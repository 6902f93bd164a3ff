use crate::error::{KccError, Result};
use crate::io::atomic_write;
use crate::resource;
use crate::types::FieldType;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFieldParams {
    pub resource: String,
    pub field_name: String,
    /// One of `string`, `int64`, `bool`, `object`, `array`.
    pub field_type: String,
    pub proto_path: String,
    #[serde(default)]
    pub parent_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub json_name: Option<String>,
    /// Repository-relative types file; located from `resource` when omitted.
    #[serde(default)]
    pub types_file: Option<String>,
}

/// Insert an annotated field into a struct of the resource's types file.
pub fn add_field(root: &Path, params: &AddFieldParams) -> Result<String> {
    let field_type: FieldType = params.field_type.parse()?;

    let types_file = match &params.types_file {
        Some(f) => {
            require_inside_repo(f)?;
            f.clone()
        }
        None => resource::find_resource(root, &params.resource)?.types_file,
    };
    let path = root.join(&types_file);
    let content = std::fs::read_to_string(&path)?;

    let json_name = params
        .json_name
        .clone()
        .unwrap_or_else(|| lower_first(&params.field_name));
    let go_type = field_type.go_type(&params.resource, &params.field_name);
    let block = field_block(
        &params.field_name,
        &go_type,
        &json_name,
        &params.proto_path,
        params.description.as_deref(),
    );

    let parent = params
        .parent_type
        .clone()
        .unwrap_or_else(|| format!("{}Spec", params.resource));

    let mut lines: Vec<&str> = content.split('\n').collect();
    let at = insertion_point(&lines, &parent).ok_or_else(|| KccError::ParentTypeNotFound {
        parent: parent.clone(),
        file: types_file.clone(),
    })?;
    lines.insert(at, block.as_str());
    atomic_write(&path, lines.join("\n").as_bytes())?;

    tracing::info!(file = %types_file, field = %params.field_name, "added field");
    Ok(format!("Added field to {types_file}\n\n{block}"))
}

/// A caller-supplied path must stay under the repository root.
fn require_inside_repo(rel: &str) -> Result<()> {
    let escapes = Path::new(rel)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if rel.trim().is_empty() || escapes {
        return Err(KccError::InvalidArgument(format!(
            "types_file must be a path inside the repository: {rel}"
        )));
    }
    Ok(())
}

fn field_block(
    field_name: &str,
    go_type: &str,
    json_name: &str,
    proto_path: &str,
    description: Option<&str>,
) -> String {
    let mut lines = Vec::new();
    if let Some(desc) = description.filter(|d| !d.is_empty()) {
        lines.push(format!("\t// {desc}"));
    }
    lines.push(format!("\t// +kcc:proto={proto_path}"));
    lines.push(format!(
        "\t{field_name} {go_type} `json:\"{json_name},omitempty\"`"
    ));
    lines.join("\n")
}

/// Line index just after the last json-tagged field of `type <parent> struct {`,
/// or the closing brace when the struct has no fields yet.
fn insertion_point(lines: &[&str], parent: &str) -> Option<usize> {
    let header = format!("type {parent} struct {{");
    let start = lines.iter().position(|l| l.contains(&header))?;

    let mut last_field = None;
    for (i, line) in lines.iter().enumerate().skip(start + 1) {
        if line.contains("`json:") {
            last_field = Some(i);
        }
        if line.trim() == "}" {
            return Some(last_field.map(|f| f + 1).unwrap_or(i));
        }
    }
    None
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TYPES: &str = "package v1beta1

type ComputeURLMapSpec struct {
\t// +kcc:proto=google.cloud.compute.v1.UrlMap.description
\tDescription *string `json:\"description,omitempty\"`

\t// Trailing comment
}

type ComputeURLMapStatus struct {
}
";

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apis/compute/v1beta1/computeurlmap_types.go");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, TYPES).unwrap();
        dir
    }

    fn params(field_type: &str, parent: Option<&str>) -> AddFieldParams {
        AddFieldParams {
            resource: "ComputeURLMap".to_string(),
            field_name: "DefaultService".to_string(),
            field_type: field_type.to_string(),
            proto_path: "google.cloud.compute.v1.UrlMap.default_service".to_string(),
            parent_type: parent.map(str::to_string),
            description: Some("The default backend service".to_string()),
            json_name: None,
            types_file: None,
        }
    }

    fn read(dir: &TempDir) -> String {
        std::fs::read_to_string(dir.path().join("apis/compute/v1beta1/computeurlmap_types.go"))
            .unwrap()
    }

    #[test]
    fn inserts_after_last_field_of_spec() {
        let dir = setup();
        let msg = add_field(dir.path(), &params("string", None)).unwrap();
        assert!(msg.contains("apis/compute/v1beta1/computeurlmap_types.go"));

        let content = read(&dir);
        let desc = content.find("Description *string").unwrap();
        let added = content
            .find("DefaultService *string `json:\"defaultService,omitempty\"`")
            .unwrap();
        let trailing = content.find("// Trailing comment").unwrap();
        assert!(desc < added && added < trailing);
        assert!(content.contains("// +kcc:proto=google.cloud.compute.v1.UrlMap.default_service"));
        assert!(content.contains("// The default backend service"));
    }

    #[test]
    fn empty_struct_gets_field_before_brace() {
        let dir = setup();
        add_field(dir.path(), &params("object", Some("ComputeURLMapStatus"))).unwrap();
        let content = read(&dir);
        let status = content.find("type ComputeURLMapStatus struct {").unwrap();
        let added = content.find("*ComputeURLMap_DefaultService").unwrap();
        assert!(added > status);
        assert!(content.trim_end().ends_with('}'));
    }

    #[test]
    fn missing_parent_is_reported() {
        let dir = setup();
        let err = add_field(dir.path(), &params("bool", Some("NoSuchType"))).unwrap_err();
        assert!(matches!(err, KccError::ParentTypeNotFound { .. }));
        assert_eq!(read(&dir), TYPES);
    }

    #[test]
    fn types_file_outside_repo_is_rejected() {
        let outer = TempDir::new().unwrap();
        let root = outer.path().join("repo");
        std::fs::create_dir_all(&root).unwrap();
        let victim = outer.path().join("victim.go");
        std::fs::write(&victim, "type XSpec struct {\n}\n").unwrap();

        for types_file in ["../victim.go", victim.to_str().unwrap(), "apis/../../victim.go"] {
            let mut p = params("string", Some("XSpec"));
            p.types_file = Some(types_file.to_string());
            let err = add_field(&root, &p).unwrap_err();
            assert!(matches!(err, KccError::InvalidArgument(_)), "{types_file}");
        }
        assert_eq!(
            std::fs::read_to_string(&victim).unwrap(),
            "type XSpec struct {\n}\n"
        );
    }

    #[test]
    fn explicit_types_file_inside_repo_is_used() {
        let dir = setup();
        let mut p = params("string", None);
        p.types_file = Some("./apis/compute/v1beta1/computeurlmap_types.go".to_string());
        add_field(dir.path(), &p).unwrap();
        assert!(read(&dir).contains("DefaultService *string"));
    }

    #[test]
    fn unsupported_type_is_rejected() {
        let dir = setup();
        let err = add_field(dir.path(), &params("float", None)).unwrap_err();
        assert!(matches!(err, KccError::UnsupportedFieldType(_)));
    }

    #[test]
    fn lower_first_camel_cases() {
        assert_eq!(lower_first("DefaultService"), "defaultService");
        assert_eq!(lower_first(""), "");
    }
}
