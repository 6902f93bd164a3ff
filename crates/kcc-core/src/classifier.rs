use crate::error::Result;
use crate::paths::{self, PathTemplate, TypesLocation};
use crate::probe::{self, NamePattern};
use crate::types::ControllerStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ControllerClassification (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerClassification {
    pub resource: String,
    #[serde(rename = "type")]
    pub style: ControllerStyle,
    /// The types file the classification was made from.
    pub location: Option<String>,
    pub migration_needed: bool,
    pub has_direct_types: bool,
    /// Reported even when direct types win the tie-break, so stale leftovers
    /// from a migration stay visible.
    pub has_legacy_types: bool,
    pub has_proto: bool,
    pub proto_location: Option<String>,
    pub service: Option<String>,
    pub version: Option<String>,
    /// Why service/version are unset when a types file was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_error: Option<String>,
}

impl ControllerClassification {
    /// Service and version, if both were resolved.
    pub fn service_version(&self) -> Option<(&str, &str)> {
        Some((self.service.as_deref()?, self.version.as_deref()?))
    }
}

/// Classify `resource` as direct, legacy or unknown.
///
/// Direct-style types always win over legacy ones. A resource found nowhere
/// is `unknown`, not an error.
pub fn classify(root: &Path, resource: &str) -> Result<ControllerClassification> {
    let lower = resource.to_lowercase();

    let direct = probe::locate(
        root,
        paths::APIS_DIR,
        &NamePattern::new(&paths::direct_types_pattern(&lower))?,
    )?;
    let legacy = probe::locate(
        root,
        paths::LEGACY_APIS_DIR,
        &NamePattern::new(&paths::legacy_types_pattern(&lower))?,
    )?;

    let (style, location, template) = match (direct.first(), legacy.first()) {
        (Some(hit), _) => (
            ControllerStyle::Direct,
            Some(hit.clone()),
            Some(paths::DIRECT_TYPES_LAYOUT),
        ),
        (None, Some(hit)) => (
            ControllerStyle::Legacy,
            Some(hit.clone()),
            Some(paths::LEGACY_TYPES_LAYOUT),
        ),
        (None, None) => (ControllerStyle::Unknown, None, None),
    };

    if !direct.is_empty() && !legacy.is_empty() {
        tracing::warn!(
            resource,
            direct = %direct[0],
            legacy = %legacy[0],
            "both direct and legacy types present; treating as direct"
        );
    }

    let (service, version, layout_error) = match (&location, template) {
        (Some(path), Some(template)) => resolve_layout(template, path),
        _ => (None, None, None),
    };

    let proto_location = match &service {
        Some(service) => {
            probe::locate_path(root, paths::PROTO_DIR, &format!("/{service}/"), ".proto")?
                .into_iter()
                .next()
        }
        None => None,
    };

    Ok(ControllerClassification {
        resource: resource.to_string(),
        style,
        location,
        migration_needed: style == ControllerStyle::Legacy,
        has_direct_types: !direct.is_empty(),
        has_legacy_types: !legacy.is_empty(),
        has_proto: proto_location.is_some(),
        proto_location,
        service,
        version,
        layout_error,
    })
}

fn resolve_layout(
    template: PathTemplate,
    path: &str,
) -> (Option<String>, Option<String>, Option<String>) {
    match TypesLocation::parse(template, path) {
        Ok(loc) => (Some(loc.service), Some(loc.version), None),
        Err(e) => (None, None, Some(e.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
