use crate::error::{KccError, Result};
use crate::paths::{self, TypesLocation};
use crate::probe::{self, NamePattern};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Where the files of a direct-controller resource live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLocation {
    pub resource: String,
    pub service: String,
    pub version: String,
    pub types_file: String,
    pub controller_file: String,
    pub mapper_file: String,
    pub test_fixtures_dir: String,
    pub files_exist: BTreeMap<String, bool>,
}

/// Locate a resource's types file under `apis/` and derive its siblings.
///
/// Unlike classification this is strict: no match is an error.
pub fn find_resource(root: &Path, resource: &str) -> Result<ResourceLocation> {
    let lower = resource.to_lowercase();
    let pattern = NamePattern::new(&format!("*{lower}*types.go"))?;
    let hits = probe::locate(root, paths::APIS_DIR, &pattern)?;

    let Some(types_file) = hits.into_iter().next() else {
        return Err(KccError::ResourceNotFound {
            resource: resource.to_string(),
            pattern: format!("{}/**/{}", paths::APIS_DIR, pattern.as_str()),
        });
    };

    let loc = TypesLocation::parse(paths::DIRECT_TYPES_LAYOUT, &types_file)?;
    let name = loc.resource_stem().to_string();

    let controller_file = paths::controller_file(&loc.service, &name);
    let mapper_file = paths::mapper_file(&loc.service);
    let test_fixtures_dir = paths::fixtures_dir(&loc.service, &loc.version, &name);

    let files_exist = BTreeMap::from([
        ("types".to_string(), probe::exists(root, &types_file)),
        ("controller".to_string(), probe::exists(root, &controller_file)),
        ("mapper".to_string(), probe::exists(root, &mapper_file)),
        (
            "test_fixtures".to_string(),
            probe::exists(root, &test_fixtures_dir),
        ),
    ]);

    Ok(ResourceLocation {
        resource: name,
        service: loc.service,
        version: loc.version,
        types_file,
        controller_file,
        mapper_file,
        test_fixtures_dir,
        files_exist,
    })
}
