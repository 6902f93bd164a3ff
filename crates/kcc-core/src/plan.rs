use crate::classifier::{self, ControllerClassification};
use crate::error::{KccError, Result};
use crate::paths;
use crate::types::ControllerStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// Plan types (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedPhase {
    pub phase: u8,
    pub name: String,
    pub description: String,
    pub tasks: Vec<String>,
    pub estimated_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtoInfo {
    pub service: String,
    pub version: String,
    pub proto_package: String,
    pub proto_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationPlan {
    pub resource: String,
    pub current_type: ControllerStyle,
    pub needs_migration: bool,
    pub has_proto: bool,
    pub phases: Vec<PlannedPhase>,
    pub target_files: BTreeMap<String, String>,
    pub proto_info: ProtoInfo,
    pub next_action: String,
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

pub fn plan_migration(root: &Path, resource: &str) -> Result<MigrationPlan> {
    let info = classifier::classify(root, resource)?;
    build_plan(&info)
}

/// Lay out the seven phases for a legacy resource.
pub fn build_plan(info: &ControllerClassification) -> Result<MigrationPlan> {
    let resource = info.resource.as_str();
    match info.style {
        ControllerStyle::Direct => {
            return Err(KccError::AlreadyMigrated {
                resource: resource.to_string(),
                location: info.location.clone().unwrap_or_default(),
            })
        }
        ControllerStyle::Unknown => {
            let lower = resource.to_lowercase();
            return Err(KccError::ResourceNotFound {
                resource: resource.to_string(),
                pattern: format!(
                    "{}/**/{} or {}/**/{}",
                    paths::APIS_DIR,
                    paths::direct_types_pattern(&lower),
                    paths::LEGACY_APIS_DIR,
                    paths::legacy_types_pattern(&lower)
                ),
            });
        }
        ControllerStyle::Legacy => {}
    }

    let (service, version) = info.service_version().ok_or_else(|| {
        KccError::UnresolvedLayout(format!(
            "{resource}\nFound at: {}",
            info.location.as_deref().unwrap_or("<unknown>")
        ))
    })?;
    let lower = resource.to_lowercase();

    let types_file = paths::types_file(service, version, &lower);
    let identity_file = paths::identity_file(service, version, &lower);
    let controller_file = paths::controller_file(service, &lower);
    let mapper_file = paths::mapper_file(service);
    let mockgcp_file = paths::mockgcp_file(service, &lower);
    let fixtures_dir = paths::fixtures_dir(service, version, &lower);

    let proto_task = match &info.proto_location {
        Some(loc) => format!("Proto exists at {loc}"),
        None => format!("Check if proto exists in {}", paths::PROTO_DIR),
    };

    let phases = vec![
        planned(
            1,
            "Proto Definitions",
            "Ensure proto definitions exist for the resource",
            vec![
                proto_task,
                "Identify proto package and message name".into(),
                "Note any custom fields needed".into(),
            ],
            "1-2 hours",
        ),
        planned(
            2,
            "API Types (KRM)",
            "Create Kubernetes resource model types",
            vec![
                format!("Create {types_file}"),
                "Define Spec struct with all fields".into(),
                "Add +kcc:proto= annotations for each field".into(),
                "Define nested types if needed".into(),
                "Follow naming conventions (PascalCase)".into(),
            ],
            "4-6 hours",
        ),
        planned(
            3,
            "Identity Handler",
            "Create resource name parsing and construction",
            vec![
                format!("Create {identity_file}"),
                "Implement resource name format (e.g., projects/{project}/...)".into(),
                "Add parent identity handling".into(),
                "Implement String() method".into(),
            ],
            "2-3 hours",
        ),
        planned(
            4,
            "Mapper Generation",
            "Generate KRM <-> Proto conversion functions",
            vec![
                format!("Run {} {resource}", paths::GENERATE_MAPPER_SCRIPT),
                format!("Verify {mapper_file} updated"),
                "Check for any mapper errors".into(),
            ],
            "30 minutes",
        ),
        planned(
            5,
            "Controller Implementation",
            "Implement CRUD operations",
            vec![
                format!("Create {controller_file}"),
                "Implement Find() method".into(),
                "Implement Create() method".into(),
                "Implement Update() method with field mask".into(),
                "Implement Delete() method".into(),
                "Implement Export() method".into(),
                "Add reference resolution (if needed)".into(),
            ],
            "6-8 hours",
        ),
        planned(
            6,
            "MockGCP Implementation",
            "Create mock GCP server for testing",
            vec![
                format!("Create {mockgcp_file}"),
                "Implement Get method".into(),
                "Implement List method".into(),
                "Implement Create method with LRO".into(),
                "Implement Update method with LRO".into(),
                "Implement Delete method with LRO".into(),
                "Add resource name parsing".into(),
            ],
            "4-6 hours",
        ),
        planned(
            7,
            "Test Fixtures",
            "Create test cases",
            vec![
                format!("Create {fixtures_dir}/"),
                "Create create.yaml with initial resource".into(),
                "Create update.yaml with changed fields".into(),
                "Add _http.log for HTTP golden files".into(),
                "Run tests and update golden files".into(),
            ],
            "2-3 hours",
        ),
    ];

    let target_files = BTreeMap::from([
        ("types_file".to_string(), types_file),
        ("identity_file".to_string(), identity_file),
        ("controller_file".to_string(), controller_file),
        ("mapper_file".to_string(), mapper_file),
        ("mockgcp_file".to_string(), mockgcp_file),
        ("test_fixtures_dir".to_string(), fixtures_dir),
    ]);

    let next_action = if info.has_proto {
        "Start with Phase 2: Create API types using kcc_scaffold_types"
    } else {
        "Check Phase 1: Verify proto definitions exist"
    };

    Ok(MigrationPlan {
        resource: resource.to_string(),
        current_type: info.style,
        needs_migration: true,
        has_proto: info.has_proto,
        phases,
        target_files,
        proto_info: proto_info(resource, service, version),
        next_action: next_action.to_string(),
    })
}

/// Proto coordinates for a resource; alpha/beta KRM versions map to the v1 API.
pub fn proto_info(resource: &str, service: &str, version: &str) -> ProtoInfo {
    let proto_version = match version {
        "v1alpha1" | "v1beta1" => "v1",
        other => other,
    };
    ProtoInfo {
        service: service.to_string(),
        version: proto_version.to_string(),
        proto_package: format!("google.cloud.{service}.v1"),
        proto_message: resource.to_string(),
    }
}

fn planned(
    phase: u8,
    name: &str,
    description: &str,
    tasks: Vec<String>,
    estimated_time: &str,
) -> PlannedPhase {
    PlannedPhase {
        phase,
        name: name.to_string(),
        description: description.to_string(),
        tasks,
        estimated_time: estimated_time.to_string(),
    }
}
