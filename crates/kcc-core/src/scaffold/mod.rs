//! Create-only skeleton writers, one per migration-phase artifact.
//!
//! Every writer expands a static template from its params and refuses to
//! touch a path that already exists. Templates use `{{key}}` placeholders so
//! the Go braces in them need no escaping.

pub mod controller;
pub mod fixtures;
pub mod identity;
pub mod mockgcp;
pub mod types;

pub use controller::{scaffold_controller, ControllerParams};
pub use fixtures::{scaffold_fixtures, FixturesParams};
pub use identity::{scaffold_identity, IdentityParams};
pub use mockgcp::{scaffold_mockgcp, MockGcpParams};
pub use types::{scaffold_types, TypesParams};

use crate::error::{KccError, Result};
use crate::io;
use chrono::Datelike;
use std::path::Path;

const LICENSE_HEADER: &str = r#"// Copyright {{year}} Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
"#;

/// Names derived once from `resource` and `service`.
#[derive(Debug, Clone)]
pub(crate) struct Names {
    /// As given, e.g. `URLMap`.
    pub resource: String,
    pub lower: String,
    pub service: String,
    /// `ComputeURLMap`: the Kubernetes kind.
    pub kind: String,
}

impl Names {
    pub fn new(resource: &str, service: &str) -> Result<Self> {
        require_segment("resource", resource)?;
        require_segment("service", service)?;
        Ok(Self {
            resource: resource.to_string(),
            lower: resource.to_lowercase(),
            service: service.to_string(),
            kind: format!("{}{}", title_case(service), resource),
        })
    }
}

/// Reject empty values and anything that would escape its path segment.
pub(crate) fn require_segment(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(KccError::InvalidArgument(format!("{field} must not be empty")));
    }
    if value.contains('/') || value.contains('\\') || value == "." || value == ".." {
        return Err(KccError::InvalidArgument(format!(
            "{field} must be a single path segment, got '{value}'"
        )));
    }
    Ok(())
}

/// Upper-case the first character only.
pub(crate) fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether a resource name format has a `locations` segment.
pub(crate) fn has_location(name_format: &str) -> bool {
    name_format.split('/').any(|part| part == "locations")
}

/// `projects/{project}/locations/{location}/urlMaps/{urlmap}` becomes
/// `projects/%s/locations/%s/urlMaps/%s` for Go's `fmt.Sprintf`.
pub(crate) fn sprintf_format(name_format: &str, lower: &str) -> String {
    name_format
        .replace("{project}", "%s")
        .replace("{location}", "%s")
        .replace(&format!("{{{lower}}}"), "%s")
}

/// Replace each `{{key}}` in `template` in one pass. Substituted values are
/// never scanned again; unknown keys are left as written.
pub(crate) fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            rest = &rest[open..];
            break;
        };
        let key = &after[..close];
        match vars.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 4]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

/// Apache header stamped with the current year.
pub(crate) fn license_header() -> String {
    let year = chrono::Local::now().year().to_string();
    render(LICENSE_HEADER, &[("year", year.as_str())])
}

/// Create `rel` under `root`. A collision is reported with the relative path.
pub(crate) fn create(root: &Path, rel: &str, content: &str) -> Result<()> {
    io::write_new(&root.join(rel), content.as_bytes()).map_err(|e| match e {
        KccError::Collision(_) => KccError::Collision(rel.to_string()),
        other => other,
    })?;
    tracing::info!(file = %rel, "scaffolded");
    Ok(())
}

/// Confirmation text shared by every writer.
pub(crate) fn confirmation(what: &str, rel: &str, next_steps: &[String]) -> String {
    let mut out = format!("Created {what}: {rel}\n\nNext steps:");
    for (i, step) in next_steps.iter().enumerate() {
        out.push_str(&format!("\n{}. {step}", i + 1));
    }
    out
}
