use crate::error::{KccError, Result};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const APIS_DIR: &str = "apis";
pub const LEGACY_APIS_DIR: &str = "pkg/clients/generated";
pub const PROTO_DIR: &str = "mockgcp/third_party/googleapis";
pub const DIRECT_CONTROLLER_DIR: &str = "pkg/controller/direct";
pub const FIXTURES_DIR: &str = "pkg/test/resourcefixture/testdata/basic";
pub const MOCKGCP_DIR: &str = "mockgcp";

pub const MAPPER_FILE: &str = "mapper.generated.go";
pub const GENERATE_MAPPER_SCRIPT: &str = "./dev/tasks/generate-mapper";

pub const CREATE_FIXTURE: &str = "create.yaml";
pub const UPDATE_FIXTURE: &str = "update.yaml";

// ---------------------------------------------------------------------------
// Search patterns
// ---------------------------------------------------------------------------

/// File-name glob for direct-style types files of `resource_lower`.
pub fn direct_types_pattern(resource_lower: &str) -> String {
    format!("*{resource_lower}*_types.go")
}

/// File-name glob for legacy types files. Note the missing underscore.
pub fn legacy_types_pattern(resource_lower: &str) -> String {
    format!("*{resource_lower}*types.go")
}

// ---------------------------------------------------------------------------
// Artifact paths (repository-relative, always `/`-separated)
// ---------------------------------------------------------------------------

pub fn types_file(service: &str, version: &str, resource_lower: &str) -> String {
    format!("{APIS_DIR}/{service}/{version}/{resource_lower}_types.go")
}

pub fn identity_file(service: &str, version: &str, resource_lower: &str) -> String {
    format!("{APIS_DIR}/{service}/{version}/{resource_lower}_identity.go")
}

pub fn controller_file(service: &str, resource_lower: &str) -> String {
    format!("{DIRECT_CONTROLLER_DIR}/{service}/{resource_lower}_controller.go")
}

pub fn mapper_file(service: &str) -> String {
    format!("{DIRECT_CONTROLLER_DIR}/{service}/{MAPPER_FILE}")
}

pub fn mockgcp_file(service: &str, resource_lower: &str) -> String {
    format!("{MOCKGCP_DIR}/mock{service}/{resource_lower}.go")
}

pub fn fixtures_dir(service: &str, version: &str, resource_lower: &str) -> String {
    format!("{FIXTURES_DIR}/{service}/{version}/{resource_lower}")
}

pub fn fixture_file(service: &str, version: &str, resource_lower: &str, name: &str) -> String {
    format!("{}/{name}", fixtures_dir(service, version, resource_lower))
}

/// Where phase 1 expects protos when none were located by search.
pub fn default_proto_location(service: &str) -> String {
    format!("{PROTO_DIR}/google/cloud/{service}/v1/*.proto")
}

// ---------------------------------------------------------------------------
// Named-segment path templates
// ---------------------------------------------------------------------------

/// A `/`-separated layout such as `apis/{service}/{version}/{*file}`.
///
/// Literal segments must match exactly, `{name}` captures one segment and a
/// trailing `{*name}` captures the remainder (at least one segment).
#[derive(Debug, Clone, Copy)]
pub struct PathTemplate {
    raw: &'static str,
}

pub const DIRECT_TYPES_LAYOUT: PathTemplate = PathTemplate::new("apis/{service}/{version}/{*file}");
pub const LEGACY_TYPES_LAYOUT: PathTemplate =
    PathTemplate::new("pkg/clients/generated/apis/{service}/{version}/{*file}");

impl PathTemplate {
    pub const fn new(raw: &'static str) -> Self {
        Self { raw }
    }

    pub fn as_str(&self) -> &'static str {
        self.raw
    }

    pub fn capture(&self, path: &str) -> Result<BTreeMap<&'static str, String>> {
        let mismatch = || KccError::UnexpectedLayout {
            path: path.to_string(),
            template: self.raw.to_string(),
        };

        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let mut captures = BTreeMap::new();
        let mut consumed = 0;

        for segment in self.raw.split('/') {
            if let Some(name) = segment
                .strip_prefix("{*")
                .and_then(|s| s.strip_suffix('}'))
            {
                if consumed >= parts.len() {
                    return Err(mismatch());
                }
                captures.insert(name, parts[consumed..].join("/"));
                consumed = parts.len();
                break;
            }

            let part = parts.get(consumed).ok_or_else(mismatch)?;
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    captures.insert(name, part.to_string());
                }
                None if segment == *part => {}
                None => return Err(mismatch()),
            }
            consumed += 1;
        }

        if consumed != parts.len() {
            return Err(mismatch());
        }
        Ok(captures)
    }
}

/// Service and version parsed out of a types file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypesLocation {
    pub service: String,
    pub version: String,
    pub file: String,
}

impl TypesLocation {
    pub fn parse(template: PathTemplate, path: &str) -> Result<Self> {
        let mut caps = template.capture(path)?;
        let mut take = |name: &str| caps.remove(name).unwrap_or_default();
        Ok(Self {
            service: take("service").to_lowercase(),
            version: take("version").to_lowercase(),
            file: take("file"),
        })
    }

    /// The file stem with its `_types.go` suffix stripped.
    pub fn resource_stem(&self) -> &str {
        let name = self.file.rsplit('/').next().unwrap_or(&self.file);
        name.strip_suffix("_types.go")
            .or_else(|| name.strip_suffix("types.go"))
            .unwrap_or(name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
