use super::{
    confirmation, create, has_location, license_header, render, require_segment, sprintf_format,
    Names,
};
use crate::error::{KccError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityParams {
    pub resource: String,
    pub service: String,
    pub version: String,
    /// e.g. `projects/{project}/locations/{location}/urlMaps/{urlmap}`
    pub resource_name_format: String,
}

const TEMPLATE: &str = r#"
package {{version}}

import (
	"context"
	"fmt"

	"github.com/GoogleCloudPlatform/k8s-config-connector/apis/common/parent"
	"sigs.k8s.io/controller-runtime/pkg/client"
)

// {{resource}}Identity defines the resource reference to {{kind}}.
type {{resource}}Identity struct {
	parent *{{resource}}Parent
	id     string
}

// Format: {{name_format}}
func (i *{{resource}}Identity) String() string {
	return fmt.Sprintf("{{sprintf_format}}", {{format_args}})
}

func (i *{{resource}}Identity) Parent() *{{resource}}Parent {
	return i.parent
}

func (i *{{resource}}Identity) ID() string {
	return i.id
}

type {{resource}}Parent struct {
	{{parent_fields}}
}

func (p *{{resource}}Parent) String() string {
	{{parent_string}}
}

// New{{resource}}Identity builds a {{resource}}Identity from the KRM object.
func New{{resource}}Identity(ctx context.Context, reader client.Reader, obj *{{kind}}) (*{{resource}}Identity, error) {
	projectRef := obj.Spec.ProjectRef
	if projectRef == nil {
		return nil, fmt.Errorf("spec.projectRef is required")
	}
	projectID, err := parent.ResolveProjectID(ctx, reader, projectRef)
	if err != nil {
		return nil, err
	}
{{location_check}}
	resourceID := valueOf(obj.Spec.ResourceID)
	if resourceID == "" {
		resourceID = obj.GetName()
	}
	if resourceID == "" {
		return nil, fmt.Errorf("cannot resolve resource ID")
	}

	return &{{resource}}Identity{
		parent: &{{resource}}Parent{
			ProjectID: projectID,{{location_field}}
		},
		id: resourceID,
	}, nil
}

func valueOf[T any](t *T) T {
	var zero T
	if t == nil {
		return zero
	}
	return *t
}
"#;

const LOCATION_CHECK: &str = r#"
	location := obj.Spec.Location
	if location == "" {
		return nil, fmt.Errorf("spec.location is required")
	}
"#;

/// Write `apis/<service>/<version>/<resource>_identity.go` (phase 3).
pub fn scaffold_identity(root: &Path, params: &IdentityParams) -> Result<String> {
    let names = Names::new(&params.resource, &params.service)?;
    require_segment("version", &params.version)?;
    if params.resource_name_format.trim().is_empty() {
        return Err(KccError::InvalidArgument(
            "resource_name_format must not be empty".to_string(),
        ));
    }

    let located = has_location(&params.resource_name_format);
    let (parent_fields, parent_string, format_args, location_check, location_field) = if located {
        (
            "ProjectID string\n\tLocation  string",
            r#"return fmt.Sprintf("projects/%s/locations/%s", p.ProjectID, p.Location)"#,
            "i.parent.ProjectID, i.parent.Location, i.id",
            LOCATION_CHECK,
            "\n\t\t\tLocation:  location,",
        )
    } else {
        (
            "ProjectID string",
            r#"return fmt.Sprintf("projects/%s", p.ProjectID)"#,
            "i.parent.ProjectID, i.id",
            "",
            "",
        )
    };
    let sprintf = sprintf_format(&params.resource_name_format, &names.lower);

    let body = render(
        TEMPLATE,
        &[
            ("version", params.version.as_str()),
            ("kind", names.kind.as_str()),
            ("resource", names.resource.as_str()),
            ("name_format", params.resource_name_format.as_str()),
            ("sprintf_format", sprintf.as_str()),
            ("format_args", format_args),
            ("parent_fields", parent_fields),
            ("parent_string", parent_string),
            ("location_check", location_check),
            ("location_field", location_field),
        ],
    );

    let rel = paths::identity_file(&names.service, &params.version, &names.lower);
    create(root, &rel, &(license_header() + &body))?;

    Ok(confirmation(
        "identity file",
        &rel,
        &[
            "Verify the resource name format matches the GCP API".to_string(),
            "Adjust parsing logic if needed".to_string(),
            "Use kcc_scaffold_controller to create the controller".to_string(),
        ],
    ))
}
