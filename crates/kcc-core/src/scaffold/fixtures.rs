use super::{confirmation, create, require_segment, Names};
use crate::error::{KccError, Result};
use crate::paths;
use crate::probe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturesParams {
    pub resource: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    api_version: String,
    kind: String,
    metadata: Metadata,
    spec: Spec,
}

#[derive(Debug, Serialize)]
struct Metadata {
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Spec {
    project_ref: BTreeMap<&'static str, &'static str>,
    location: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'static str>,
}

impl Manifest {
    fn new(names: &Names, version: &str, description: Option<&'static str>) -> Self {
        Self {
            api_version: format!("{}.cnrm.cloud.google.com/{version}", names.service),
            kind: names.kind.clone(),
            metadata: Metadata {
                name: format!("{}-${{uniqueId}}", names.lower),
            },
            spec: Spec {
                project_ref: BTreeMap::from([("external", "${projectId}")]),
                location: "us-central1",
                description,
            },
        }
    }
}

/// Write `create.yaml` and `update.yaml` for the resource (phase 7).
///
/// Both targets are checked before either is written.
pub fn scaffold_fixtures(root: &Path, params: &FixturesParams) -> Result<String> {
    let names = Names::new(&params.resource, &params.service)?;
    require_segment("version", &params.version)?;

    let create_rel = paths::fixture_file(
        &names.service,
        &params.version,
        &names.lower,
        paths::CREATE_FIXTURE,
    );
    let update_rel = paths::fixture_file(
        &names.service,
        &params.version,
        &names.lower,
        paths::UPDATE_FIXTURE,
    );
    for rel in [&create_rel, &update_rel] {
        if probe::exists(root, rel) {
            return Err(KccError::Collision(rel.clone()));
        }
    }

    let create_yaml = serde_yaml::to_string(&Manifest::new(&names, &params.version, None))?;
    let update_yaml = serde_yaml::to_string(&Manifest::new(
        &names,
        &params.version,
        Some("Updated description"),
    ))?;
    create(root, &create_rel, &create_yaml)?;
    create(root, &update_rel, &update_yaml)?;

    let dir = paths::fixtures_dir(&names.service, &params.version, &names.lower);
    Ok(confirmation(
        "test fixtures",
        &dir,
        &[
            "Fill in the required spec fields in create.yaml".to_string(),
            "Change at least one mutable field in update.yaml".to_string(),
            "Record golden output with WRITE_GOLDEN_OUTPUT=1 E2E_GCP_TARGET=mock".to_string(),
        ],
    ))
}
