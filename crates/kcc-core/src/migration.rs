//! Reconstructs how far a legacy resource has progressed through the
//! seven-phase migration to a direct controller, from files on disk alone.

use crate::classifier::{self, ControllerClassification};
use crate::error::{KccError, Result};
use crate::paths;
use crate::probe;
use crate::types::{CompletionState, ControllerStyle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const PHASE_COUNT: usize = 7;

/// Fully completed phases needed before fields may be added. The count is
/// all that matters, not which phases make it up.
pub const ADD_FIELDS_THRESHOLD: usize = 4;

// ---------------------------------------------------------------------------
// PhaseDefinition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseDefinition {
    pub number: u8,
    pub name: &'static str,
    /// Artifact key and repository-relative path, in declaration order.
    pub artifacts: Vec<(&'static str, String)>,
}

/// The fixed phase pipeline with paths filled in for one resource.
pub fn phase_definitions(
    service: &str,
    version: &str,
    resource_lower: &str,
    proto_location: &str,
) -> Vec<PhaseDefinition> {
    let phase = |number, name, artifacts| PhaseDefinition {
        number,
        name,
        artifacts,
    };
    vec![
        phase(1, "Proto Definitions", vec![("proto", proto_location.to_string())]),
        phase(
            2,
            "API Types",
            vec![("types", paths::types_file(service, version, resource_lower))],
        ),
        phase(
            3,
            "Identity Handler",
            vec![("identity", paths::identity_file(service, version, resource_lower))],
        ),
        phase(4, "Mapper", vec![("mapper", paths::mapper_file(service))]),
        phase(
            5,
            "Controller",
            vec![("controller", paths::controller_file(service, resource_lower))],
        ),
        phase(
            6,
            "MockGCP",
            vec![("mockgcp", paths::mockgcp_file(service, resource_lower))],
        ),
        phase(
            7,
            "Test Fixtures",
            vec![
                (
                    "create_yaml",
                    paths::fixture_file(service, version, resource_lower, paths::CREATE_FIXTURE),
                ),
                (
                    "update_yaml",
                    paths::fixture_file(service, version, resource_lower, paths::UPDATE_FIXTURE),
                ),
            ],
        ),
    ]
}

fn not_started_action(number: u8) -> &'static str {
    match number {
        1 => "Check proto definitions exist in mockgcp/third_party/googleapis",
        2 => "Use kcc_scaffold_types to create API types file",
        3 => "Use kcc_scaffold_identity to create identity handler",
        4 => "Run kcc_generate_mapper to generate mapper functions",
        5 => "Use kcc_scaffold_controller to create controller",
        6 => "Use kcc_scaffold_mockgcp to create MockGCP implementation",
        _ => "Create test fixtures (create.yaml and update.yaml) with kcc_scaffold_fixtures",
    }
}

// ---------------------------------------------------------------------------
// PhaseStatus / MigrationStatus (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseStatus {
    pub number: u8,
    pub name: String,
    pub status: CompletionState,
    #[serde(default)]
    pub files_exist: BTreeMap<String, bool>,
}

impl PhaseStatus {
    pub fn is_completed(&self) -> bool {
        self.status == CompletionState::Completed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationStatus {
    pub resource: String,
    pub service: Option<String>,
    pub version: Option<String>,
    pub overall_progress: String,
    pub current_phase: PhaseStatus,
    pub phases: Vec<PhaseStatus>,
    pub next_action: String,
    pub can_add_fields: bool,
    /// Stricter reading of readiness: phases 1 through 5 all completed.
    pub core_phases_complete: bool,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub fn migration_status(root: &Path, resource: &str) -> Result<MigrationStatus> {
    let info = classifier::classify(root, resource)?;
    evaluate(root, &info)
}

/// Build the status report for an already-classified resource.
pub fn evaluate(root: &Path, info: &ControllerClassification) -> Result<MigrationStatus> {
    if info.style == ControllerStyle::Direct {
        return Ok(already_direct(info));
    }

    let Some((service, version)) = info.service_version() else {
        return Err(KccError::UnresolvedLayout(match &info.layout_error {
            Some(reason) => format!("{} ({reason})", info.resource),
            None => info.resource.clone(),
        }));
    };

    let resource_lower = info.resource.to_lowercase();
    let proto = info
        .proto_location
        .clone()
        .unwrap_or_else(|| paths::default_proto_location(service));

    let phases = phase_definitions(service, version, &resource_lower, &proto)
        .into_iter()
        .map(|def| probe_phase(root, def))
        .collect();

    let mut status = summarize(&info.resource, phases);
    status.service = Some(service.to_string());
    status.version = Some(version.to_string());
    Ok(status)
}

fn probe_phase(root: &Path, def: PhaseDefinition) -> PhaseStatus {
    let files_exist: BTreeMap<String, bool> = def
        .artifacts
        .iter()
        .map(|(key, rel)| (key.to_string(), probe::exists(root, rel)))
        .collect();
    PhaseStatus {
        number: def.number,
        name: def.name.to_string(),
        status: CompletionState::from_existence(files_exist.values().copied()),
        files_exist,
    }
}

/// Derive current phase, next action and readiness from per-phase states.
///
/// `phases` must be the full pipeline in ascending order.
pub fn summarize(resource: &str, phases: Vec<PhaseStatus>) -> MigrationStatus {
    let completed = phases.iter().filter(|p| p.is_completed()).count();

    let current_phase = phases
        .iter()
        .find(|p| !p.is_completed())
        .or_else(|| phases.last())
        .cloned()
        .unwrap_or_else(complete_marker);

    let next_action = match current_phase.status {
        CompletionState::NotStarted => not_started_action(current_phase.number).to_string(),
        CompletionState::InProgress => format!(
            "Complete phase {}: {}",
            current_phase.number, current_phase.name
        ),
        CompletionState::Completed => {
            "All phases complete. Verify tests pass, then use kcc_add_field to add new fields."
                .to_string()
        }
    };

    let core_phases_complete = phases
        .iter()
        .filter(|p| p.number <= 5)
        .filter(|p| p.is_completed())
        .count()
        == 5;

    MigrationStatus {
        resource: resource.to_string(),
        service: None,
        version: None,
        overall_progress: format!("{completed}/{} phases", phases.len()),
        current_phase,
        phases,
        next_action,
        can_add_fields: completed >= ADD_FIELDS_THRESHOLD,
        core_phases_complete,
    }
}

fn complete_marker() -> PhaseStatus {
    PhaseStatus {
        number: PHASE_COUNT as u8,
        name: "Complete".to_string(),
        status: CompletionState::Completed,
        files_exist: BTreeMap::new(),
    }
}

fn already_direct(info: &ControllerClassification) -> MigrationStatus {
    MigrationStatus {
        resource: info.resource.clone(),
        service: info.service.clone(),
        version: info.version.clone(),
        overall_progress: "Migration complete".to_string(),
        current_phase: complete_marker(),
        phases: Vec::new(),
        next_action: "Migration complete. Use kcc_add_field to add new fields.".to_string(),
        can_add_fields: true,
        core_phases_complete: true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LEGACY: &str = "pkg/clients/generated/apis/redis/v1beta1/redisinstance_types.go";

    fn touch(dir: &TempDir, rel: &str) {
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    fn legacy_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        touch(&dir, LEGACY);
        dir
    }

    fn phases_completed(done: &[u8]) -> Vec<PhaseStatus> {
        (1..=7)
            .map(|n| PhaseStatus {
                number: n,
                name: format!("Phase {n}"),
                status: if done.contains(&n) {
                    CompletionState::Completed
                } else {
                    CompletionState::NotStarted
                },
                files_exist: BTreeMap::new(),
            })
            .collect()
    }

    #[test]
    fn direct_resource_short_circuits() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "apis/redis/v1beta1/redisinstance_types.go");

        let status = migration_status(dir.path(), "RedisInstance").unwrap();
        assert_eq!(status.overall_progress, "Migration complete");
        assert!(status.can_add_fields);
        assert!(status.phases.is_empty());
        assert_eq!(status.current_phase.number, 7);
        assert_eq!(status.current_phase.name, "Complete");
    }

    #[test]
    fn direct_short_circuit_ignores_artifacts() {
        // A direct classification never looks at phase artifacts, even when
        // the root they would be probed under has vanished.
        let dir = TempDir::new().unwrap();
        touch(&dir, "apis/redis/v1beta1/redisinstance_types.go");
        let info = classifier::classify(dir.path(), "RedisInstance").unwrap();
        drop(dir);

        let status = evaluate(Path::new("/nonexistent/kcc"), &info).unwrap();
        assert_eq!(status.overall_progress, "Migration complete");
    }

    #[test]
    fn fresh_legacy_resource_starts_at_phase_one() {
        let dir = legacy_repo();
        let status = migration_status(dir.path(), "RedisInstance").unwrap();

        assert_eq!(status.phases.len(), 7);
        let numbers: Vec<u8> = status.phases.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(status.overall_progress, "0/7 phases");
        assert_eq!(status.current_phase.number, 1);
        assert_eq!(status.current_phase.status, CompletionState::NotStarted);
        assert_eq!(
            status.next_action,
            "Check proto definitions exist in mockgcp/third_party/googleapis"
        );
        assert!(!status.can_add_fields);
    }

    #[test]
    fn current_phase_is_first_incomplete() {
        let dir = legacy_repo();
        touch(&dir, "mockgcp/third_party/googleapis/google/cloud/redis/v1/cloud_redis.proto");
        touch(&dir, "apis/redis/v1beta1/redisinstance_identity.go");

        let status = migration_status(dir.path(), "RedisInstance").unwrap();
        assert_eq!(status.phases[0].status, CompletionState::Completed);
        assert_eq!(status.phases[2].status, CompletionState::Completed);
        assert_eq!(status.current_phase.number, 2);
        assert_eq!(
            status.next_action,
            "Use kcc_scaffold_types to create API types file"
        );
    }

    #[test]
    fn partial_fixtures_are_in_progress() {
        let dir = legacy_repo();
        for rel in [
            "mockgcp/third_party/googleapis/google/cloud/redis/v1/cloud_redis.proto",
            "apis/redis/v1beta1/redisinstance_identity.go",
            "pkg/controller/direct/redis/mapper.generated.go",
            "pkg/controller/direct/redis/redisinstance_controller.go",
            "mockgcp/mockredis/redisinstance.go",
            "pkg/test/resourcefixture/testdata/basic/redis/v1beta1/redisinstance/create.yaml",
        ] {
            touch(&dir, rel);
        }
        // Types file would flip the classification to direct, so phase 2 stays open.
        let status = migration_status(dir.path(), "RedisInstance").unwrap();
        let fixtures = &status.phases[6];
        assert_eq!(fixtures.status, CompletionState::InProgress);
        assert!(fixtures.files_exist["create_yaml"]);
        assert!(!fixtures.files_exist["update_yaml"]);
        assert_eq!(status.current_phase.number, 2);
        assert_eq!(status.overall_progress, "5/7 phases");
        assert!(status.can_add_fields);
        assert!(!status.core_phases_complete);
    }

    #[test]
    fn removing_an_artifact_reopens_phase() {
        let dir = legacy_repo();
        let mapper = "pkg/controller/direct/redis/mapper.generated.go";
        touch(&dir, mapper);
        let before = migration_status(dir.path(), "RedisInstance").unwrap();
        assert_eq!(before.phases[3].status, CompletionState::Completed);

        std::fs::remove_file(dir.path().join(mapper)).unwrap();
        let after = migration_status(dir.path(), "RedisInstance").unwrap();
        assert_eq!(after.phases[3].status, CompletionState::NotStarted);
    }

    #[test]
    fn in_progress_action_is_generic() {
        let mut phases = phases_completed(&[1, 2, 3]);
        phases[3].status = CompletionState::InProgress;
        phases[3].name = "Mapper".to_string();
        let status = summarize("X", phases);
        assert_eq!(status.next_action, "Complete phase 4: Mapper");
    }

    #[test]
    fn all_complete_reports_last_phase() {
        let status = summarize("X", phases_completed(&[1, 2, 3, 4, 5, 6, 7]));
        assert_eq!(status.current_phase.number, 7);
        assert_eq!(status.overall_progress, "7/7 phases");
        assert!(status.can_add_fields && status.core_phases_complete);
    }

    #[test]
    fn add_fields_threshold_counts_only() {
        assert!(!summarize("X", phases_completed(&[1, 2, 3])).can_add_fields);
        assert!(!summarize("X", phases_completed(&[5, 6, 7])).can_add_fields);
        assert!(summarize("X", phases_completed(&[1, 2, 3, 4])).can_add_fields);
        assert!(summarize("X", phases_completed(&[4, 5, 6, 7])).can_add_fields);
    }

    #[test]
    fn unresolved_layout_is_hard_error() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "pkg/clients/generated/redisinstance_types.go");
        let err = migration_status(dir.path(), "RedisInstance").unwrap_err();
        assert!(matches!(err, KccError::UnresolvedLayout(_)));
    }

    #[test]
    fn unknown_resource_is_unresolved() {
        let dir = TempDir::new().unwrap();
        let err = migration_status(dir.path(), "Ghost").unwrap_err();
        assert!(err.to_string().contains("Ghost"));
    }
}
