use super::{confirmation, create, license_header, render, require_segment, Names};
use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerParams {
    pub resource: String,
    pub service: String,
    pub version: String,
    pub proto_package: String,
    pub proto_message: String,
}

const TEMPLATE: &str = r#"
package {{service}}

import (
	"context"
	"fmt"

	krm "github.com/GoogleCloudPlatform/k8s-config-connector/apis/{{service}}/{{version}}"
	"github.com/GoogleCloudPlatform/k8s-config-connector/pkg/config"
	"github.com/GoogleCloudPlatform/k8s-config-connector/pkg/controller/direct"
	"github.com/GoogleCloudPlatform/k8s-config-connector/pkg/controller/direct/directbase"
	"github.com/GoogleCloudPlatform/k8s-config-connector/pkg/controller/direct/registry"

	pb "{{proto_go_package}}"
	"k8s.io/apimachinery/pkg/apis/meta/v1/unstructured"
	"k8s.io/apimachinery/pkg/runtime"
	"k8s.io/klog/v2"
	"sigs.k8s.io/controller-runtime/pkg/client"
)

func init() {
	registry.RegisterModel(krm.{{kind}}GVK, New{{resource}}Model)
}

func New{{resource}}Model(ctx context.Context, config *config.ControllerConfig) (directbase.Model, error) {
	return &{{resource}}Model{config: *config}, nil
}

var _ directbase.Model = &{{resource}}Model{}

type {{resource}}Model struct {
	config config.ControllerConfig
}

func (m *{{resource}}Model) AdapterForObject(ctx context.Context, reader client.Reader, u *unstructured.Unstructured) (directbase.Adapter, error) {
	obj := &krm.{{kind}}{}
	if err := runtime.DefaultUnstructuredConverter.FromUnstructured(u.Object, &obj); err != nil {
		return nil, fmt.Errorf("error converting to %T: %w", obj, err)
	}

	id, err := krm.New{{resource}}Identity(ctx, reader, obj)
	if err != nil {
		return nil, err
	}

	return &{{resource}}Adapter{
		id:      id,
		desired: obj,
		reader:  reader,
	}, nil
}

func (m *{{resource}}Model) AdapterForURL(ctx context.Context, url string) (directbase.Adapter, error) {
	return nil, nil
}

type {{resource}}Adapter struct {
	id      *krm.{{resource}}Identity
	desired *krm.{{kind}}
	actual  *pb.{{proto_message}}
	reader  client.Reader
}

var _ directbase.Adapter = &{{resource}}Adapter{}

// Find retrieves the GCP resource.
func (a *{{resource}}Adapter) Find(ctx context.Context) (bool, error) {
	log := klog.FromContext(ctx)
	log.V(2).Info("getting {{resource}}", "name", a.id)

	// Call Get{{proto_message}} and return false on NotFound.
	return false, nil
}

// Create creates the resource in GCP.
func (a *{{resource}}Adapter) Create(ctx context.Context, createOp *directbase.CreateOperation) error {
	log := klog.FromContext(ctx)
	log.V(2).Info("creating {{resource}}", "name", a.id)

	mapCtx := &direct.MapContext{}
	desired := a.desired.DeepCopy()
	resource := {{resource}}Spec_ToProto(mapCtx, &desired.Spec)
	if mapCtx.Err() != nil {
		return mapCtx.Err()
	}

	_ = resource
	return fmt.Errorf("{{resource}} Create not yet implemented")
}

// Update updates the resource in GCP.
func (a *{{resource}}Adapter) Update(ctx context.Context, updateOp *directbase.UpdateOperation) error {
	log := klog.FromContext(ctx)
	log.V(2).Info("updating {{resource}}", "name", a.id)

	mapCtx := &direct.MapContext{}
	desired := a.desired.DeepCopy()
	resource := {{resource}}Spec_ToProto(mapCtx, &desired.Spec)
	if mapCtx.Err() != nil {
		return mapCtx.Err()
	}

	_ = resource
	return fmt.Errorf("{{resource}} Update not yet implemented")
}

// Export maps the GCP object to a Config Connector resource spec.
func (a *{{resource}}Adapter) Export(ctx context.Context) (*unstructured.Unstructured, error) {
	if a.actual == nil {
		return nil, fmt.Errorf("Find() not called")
	}

	obj := &krm.{{kind}}{}
	mapCtx := &direct.MapContext{}
	obj.Spec = direct.ValueOf({{resource}}Spec_FromProto(mapCtx, a.actual))
	if mapCtx.Err() != nil {
		return nil, mapCtx.Err()
	}

	uObj, err := runtime.DefaultUnstructuredConverter.ToUnstructured(obj)
	if err != nil {
		return nil, err
	}

	u := &unstructured.Unstructured{Object: uObj}
	u.SetName(a.id.ID())
	u.SetGroupVersionKind(krm.{{kind}}GVK)
	return u, nil
}

// Delete deletes the resource from GCP.
func (a *{{resource}}Adapter) Delete(ctx context.Context, deleteOp *directbase.DeleteOperation) (bool, error) {
	log := klog.FromContext(ctx)
	log.V(2).Info("deleting {{resource}}", "name", a.id)

	// Call Delete{{proto_message}} and treat NotFound as deleted.
	return true, nil
}
"#;

/// `google.cloud.compute.v1` becomes `cloud.google.com/go/compute/apiv1/computepb`.
fn proto_go_package(proto_package: &str, service: &str) -> String {
    format!("cloud.google.com/go/{service}/apiv1/{}pb", last_service_segment(proto_package, service))
}

fn last_service_segment<'a>(proto_package: &'a str, fallback: &'a str) -> &'a str {
    let mut parts: Vec<&str> = proto_package.split('.').filter(|p| !p.is_empty()).collect();
    // Drop a trailing version segment such as `v1` or `v1beta1`.
    if parts
        .last()
        .is_some_and(|p| p.starts_with('v') && p[1..].starts_with(|c: char| c.is_ascii_digit()))
    {
        parts.pop();
    }
    parts.last().copied().unwrap_or(fallback)
}

/// Write `pkg/controller/direct/<service>/<resource>_controller.go` (phase 5).
pub fn scaffold_controller(root: &Path, params: &ControllerParams) -> Result<String> {
    let names = Names::new(&params.resource, &params.service)?;
    require_segment("version", &params.version)?;
    require_segment("proto_message", &params.proto_message)?;

    let go_package = proto_go_package(&params.proto_package, &names.service);
    let body = render(
        TEMPLATE,
        &[
            ("service", names.service.as_str()),
            ("version", params.version.as_str()),
            ("kind", names.kind.as_str()),
            ("resource", names.resource.as_str()),
            ("proto_message", params.proto_message.as_str()),
            ("proto_go_package", go_package.as_str()),
        ],
    );

    let rel = paths::controller_file(&names.service, &names.lower);
    create(root, &rel, &(license_header() + &body))?;

    Ok(confirmation(
        "controller file",
        &rel,
        &[
            "Implement the GCP API calls in Find, Create, Update and Delete".to_string(),
            "Add field mask logic for Update".to_string(),
            "Resolve references if the resource has any".to_string(),
            "Use kcc_scaffold_mockgcp to create the MockGCP implementation".to_string(),
        ],
    ))
}
