use super::{confirmation, create, license_header, render, require_segment, Names};
use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypesParams {
    pub resource: String,
    pub service: String,
    pub version: String,
    /// e.g. `google.cloud.compute.v1`
    pub proto_package: String,
    pub proto_message: String,
    #[serde(default)]
    pub description: Option<String>,
}

const TEMPLATE: &str = r#"
package {{version}}

import (
	"github.com/GoogleCloudPlatform/k8s-config-connector/pkg/apis/k8s/v1alpha1"
	metav1 "k8s.io/apimachinery/pkg/apis/meta/v1"
)

var {{kind}}GVK = GroupVersion.WithKind("{{kind}}")

// {{resource}}Spec defines the desired state of {{resource}}.
// {{description}}
// +kcc:proto={{proto_package}}.{{proto_message}}
type {{resource}}Spec struct {
	// Add fields with their +kcc:proto= annotations, for example:
	// // +kcc:proto={{proto_package}}.{{proto_message}}.description
	// Description *string `json:"description,omitempty"`

	// Immutable. The Project that this resource belongs to.
	// +required
	ProjectRef *v1alpha1.ProjectRef `json:"projectRef"`

	// Immutable. The location for the resource.
	// +required
	Location string `json:"location"`

	// The {{resource}} name. If not given, the metadata.name will be used.
	// +optional
	ResourceID *string `json:"resourceID,omitempty"`
}

// {{resource}}Status defines the config connector machine state of {{resource}}.
type {{resource}}Status struct {
	// Conditions represent the latest available observations of the object's current state.
	Conditions []v1alpha1.Condition `json:"conditions,omitempty"`

	// ObservedGeneration is the generation of the resource that was most recently observed by the Config Connector controller.
	ObservedGeneration *int64 `json:"observedGeneration,omitempty"`

	// A unique specifier for the {{resource}} resource in GCP.
	ExternalRef *string `json:"externalRef,omitempty"`

	// ObservedState is the state of the resource as most recently observed in GCP.
	ObservedState *{{resource}}ObservedState `json:"observedState,omitempty"`
}

// {{resource}}ObservedState is the state of the {{resource}} resource as most recently observed in GCP.
// +kcc:proto={{proto_package}}.{{proto_message}}
type {{resource}}ObservedState struct {
}

// +genclient
// +k8s:deepcopy-gen:interfaces=k8s.io/apimachinery/pkg/runtime.Object
// +kubebuilder:resource:categories=gcp
// +kubebuilder:subresource:status
// +kubebuilder:metadata:labels="cnrm.cloud.google.com/managed-by-kcc=true";"cnrm.cloud.google.com/system=true"
// +kubebuilder:printcolumn:name="Age",JSONPath=".metadata.creationTimestamp",type="date"
// +kubebuilder:printcolumn:name="Ready",JSONPath=".status.conditions[?(@.type=='Ready')].status",type="string",description="When 'True', the most recent reconcile of the resource succeeded"
// +kubebuilder:printcolumn:name="Status",JSONPath=".status.conditions[?(@.type=='Ready')].reason",type="string",description="The reason for the value in 'Ready'"
// +kubebuilder:printcolumn:name="Status Age",JSONPath=".status.conditions[?(@.type=='Ready')].lastTransitionTime",type="date",description="The last transition time for the value in 'Status'"

// {{kind}} is the Schema for the {{service}} {{resource}} API
// +k8s:openapi-gen=true
type {{kind}} struct {
	metav1.TypeMeta   `json:",inline"`
	metav1.ObjectMeta `json:"metadata,omitempty"`

	// +required
	Spec   {{resource}}Spec   `json:"spec,omitempty"`
	Status {{resource}}Status `json:"status,omitempty"`
}

// +k8s:deepcopy-gen:interfaces=k8s.io/apimachinery/pkg/runtime.Object
// {{kind}}List contains a list of {{kind}}
type {{kind}}List struct {
	metav1.TypeMeta `json:",inline"`
	metav1.ListMeta `json:"metadata,omitempty"`
	Items           []{{kind}} `json:"items"`
}

func init() {
	SchemeBuilder.Register(&{{kind}}{}, &{{kind}}List{})
}
"#;

/// Write `apis/<service>/<version>/<resource>_types.go` (phase 2).
pub fn scaffold_types(root: &Path, params: &TypesParams) -> Result<String> {
    let names = Names::new(&params.resource, &params.service)?;
    require_segment("version", &params.version)?;

    let description = params
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| format!("{} resource", params.resource));

    let body = render(
        TEMPLATE,
        &[
            ("version", params.version.as_str()),
            ("service", names.service.as_str()),
            ("kind", names.kind.as_str()),
            ("resource", names.resource.as_str()),
            ("description", description.as_str()),
            ("proto_package", params.proto_package.as_str()),
            ("proto_message", params.proto_message.as_str()),
        ],
    );

    let rel = paths::types_file(&names.service, &params.version, &names.lower);
    create(root, &rel, &(license_header() + &body))?;

    Ok(confirmation(
        "types file",
        &rel,
        &[
            "Fill in the Spec fields with +kcc:proto= annotations".to_string(),
            "Add nested types if needed".to_string(),
            format!("Run: {} {}", paths::GENERATE_MAPPER_SCRIPT, names.resource),
            "Use kcc_scaffold_identity to create the identity handler".to_string(),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KccError;
    use tempfile::TempDir;

    fn params() -> TypesParams {
        TypesParams {
            resource: "URLMap".to_string(),
            service: "compute".to_string(),
            version: "v1beta1".to_string(),
            proto_package: "google.cloud.compute.v1".to_string(),
            proto_message: "UrlMap".to_string(),
            description: None,
        }
    }

    #[test]
    fn writes_types_skeleton() {
        let dir = TempDir::new().unwrap();
        let msg = scaffold_types(dir.path(), &params()).unwrap();
        assert!(msg.contains("apis/compute/v1beta1/urlmap_types.go"));
        assert!(msg.contains("./dev/tasks/generate-mapper URLMap"));

        let content =
            std::fs::read_to_string(dir.path().join("apis/compute/v1beta1/urlmap_types.go"))
                .unwrap();
        assert!(content.contains("package v1beta1"));
        assert!(content.contains("var ComputeURLMapGVK = GroupVersion.WithKind(\"ComputeURLMap\")"));
        assert!(content.contains("type URLMapSpec struct {"));
        assert!(content.contains("// +kcc:proto=google.cloud.compute.v1.UrlMap\n"));
        assert!(content.contains("// URLMap resource"));
        assert!(!content.contains("{{"));
    }

    #[test]
    fn second_call_collides_and_keeps_bytes() {
        let dir = TempDir::new().unwrap();
        scaffold_types(dir.path(), &params()).unwrap();
        let path = dir.path().join("apis/compute/v1beta1/urlmap_types.go");
        std::fs::write(&path, "// edited by hand\n").unwrap();

        let err = scaffold_types(dir.path(), &params()).unwrap_err();
        assert!(matches!(err, KccError::Collision(ref p) if p == "apis/compute/v1beta1/urlmap_types.go"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "// edited by hand\n");
    }

    #[test]
    fn bad_version_is_rejected_before_writing() {
        let dir = TempDir::new().unwrap();
        let mut p = params();
        p.version = "..".to_string();
        assert!(matches!(
            scaffold_types(dir.path(), &p).unwrap_err(),
            KccError::InvalidArgument(_)
        ));
        assert!(!dir.path().join("apis").exists());
    }
}
