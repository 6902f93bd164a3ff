use super::{
    confirmation, create, has_location, license_header, render, require_segment, sprintf_format,
    title_case, Names,
};
use crate::error::{KccError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockGcpParams {
    pub resource: String,
    pub service: String,
    /// Go import path of the generated proto package.
    pub proto_package: String,
    pub proto_message: String,
    pub resource_name_format: String,
}

const TEMPLATE: &str = r#"
package mock{{service}}

import (
	"context"
	"fmt"
	"strings"

	"google.golang.org/grpc/codes"
	"google.golang.org/grpc/status"
	"google.golang.org/protobuf/proto"

	"github.com/GoogleCloudPlatform/k8s-config-connector/mockgcp/common/projects"
	pb "{{proto_package}}"
)

func (s *{{server}}) Get{{message}}(ctx context.Context, req *pb.Get{{message}}Request) (*pb.{{message}}, error) {
	name, err := s.parse{{message}}Name(req.Name)
	if err != nil {
		return nil, err
	}
	fqn := name.String()

	obj := &pb.{{message}}{}
	if err := s.storage.Get(ctx, fqn, obj); err != nil {
		if status.Code(err) == codes.NotFound {
			return nil, status.Errorf(codes.NotFound, "Resource '%s' was not found", fqn)
		}
		return nil, err
	}
	return obj, nil
}

func (s *{{server}}) Create{{message}}(ctx context.Context, req *pb.Create{{message}}Request) (*pb.{{message}}, error) {
	name, err := s.parse{{message}}Name(req.Parent + "/{{collection}}/" + req.{{message}}Id)
	if err != nil {
		return nil, err
	}
	fqn := name.String()

	obj := proto.Clone(req.{{message}}).(*pb.{{message}})
	obj.Name = fqn
	if err := s.storage.Create(ctx, fqn, obj); err != nil {
		return nil, err
	}
	return obj, nil
}

func (s *{{server}}) Update{{message}}(ctx context.Context, req *pb.Update{{message}}Request) (*pb.{{message}}, error) {
	name, err := s.parse{{message}}Name(req.{{message}}.Name)
	if err != nil {
		return nil, err
	}
	fqn := name.String()

	existing := &pb.{{message}}{}
	if err := s.storage.Get(ctx, fqn, existing); err != nil {
		return nil, err
	}

	updated := proto.Clone(req.{{message}}).(*pb.{{message}})
	updated.Name = fqn
	if err := s.storage.Update(ctx, fqn, updated); err != nil {
		return nil, err
	}
	return updated, nil
}

func (s *{{server}}) Delete{{message}}(ctx context.Context, req *pb.Delete{{message}}Request) (*pb.{{message}}, error) {
	name, err := s.parse{{message}}Name(req.Name)
	if err != nil {
		return nil, err
	}
	fqn := name.String()

	deleted := &pb.{{message}}{}
	if err := s.storage.Delete(ctx, fqn, deleted); err != nil {
		return nil, err
	}
	return deleted, nil
}

type {{message}}Name struct {
	Project *projects.ProjectData{{location_field}}
	ID      string
}

// Format: {{name_format}}
func (n *{{message}}Name) String() string {
	return fmt.Sprintf("{{sprintf_format}}", {{format_args}})
}

// parse{{message}}Name parses a string into a {{message}}Name.
func (s *{{server}}) parse{{message}}Name(name string) (*{{message}}Name, error) {
	tokens := strings.Split(name, "/")
	if {{token_check}} {
		project, err := s.Projects.GetProjectByID(tokens[1])
		if err != nil {
			return nil, err
		}
		return &{{message}}Name{
			Project: project,{{location_value}}
			ID:      tokens[{{id_index}}],
		}, nil
	}
	return nil, status.Errorf(codes.InvalidArgument, "name %q is not valid", name)
}
"#;

/// Collection segment preceding the resource's own placeholder, e.g.
/// `urlMaps` in `projects/{project}/global/urlMaps/{urlmap}`.
fn collection(name_format: &str) -> Option<&str> {
    let parts: Vec<&str> = name_format.split('/').collect();
    if parts.len() < 2 {
        return None;
    }
    Some(parts[parts.len() - 2]).filter(|p| !p.is_empty() && !p.starts_with('{'))
}

/// Go boolean expression matching `tokens` against the literal segments.
fn token_check(name_format: &str) -> String {
    let parts: Vec<&str> = name_format.split('/').collect();
    let mut checks = vec![format!("len(tokens) == {}", parts.len())];
    for (i, part) in parts.iter().enumerate() {
        if !part.starts_with('{') {
            checks.push(format!("tokens[{i}] == \"{part}\""));
        }
    }
    checks.join(" && ")
}

/// Write `mockgcp/mock<service>/<resource>.go` (phase 6).
pub fn scaffold_mockgcp(root: &Path, params: &MockGcpParams) -> Result<String> {
    let names = Names::new(&params.resource, &params.service)?;
    require_segment("proto_message", &params.proto_message)?;
    let format = params.resource_name_format.trim();
    let collection = collection(format).ok_or_else(|| {
        KccError::InvalidArgument(format!(
            "resource_name_format '{format}' must end in <collection>/{{{}}}",
            names.lower
        ))
    })?;

    let located = has_location(format);
    let segments = format.split('/').count();
    let id_index = (segments - 1).to_string();
    let (location_field, location_value, format_args) = if located {
        (
            "\n\tLocation string",
            "\n\t\t\tLocation: tokens[3],",
            "n.Project.ID, n.Location, n.ID",
        )
    } else {
        ("", "", "n.Project.ID, n.ID")
    };
    let server = format!("{}V1", title_case(&names.service));
    let sprintf = sprintf_format(format, &names.lower);
    let check = token_check(format);

    let body = render(
        TEMPLATE,
        &[
            ("service", names.service.as_str()),
            ("proto_package", params.proto_package.as_str()),
            ("server", server.as_str()),
            ("message", params.proto_message.as_str()),
            ("collection", collection),
            ("name_format", format),
            ("sprintf_format", sprintf.as_str()),
            ("format_args", format_args),
            ("token_check", check.as_str()),
            ("location_field", location_field),
            ("location_value", location_value),
            ("id_index", id_index.as_str()),
        ],
    );

    let rel = paths::mockgcp_file(&names.service, &names.lower);
    create(root, &rel, &(license_header() + &body))?;

    Ok(confirmation(
        "MockGCP file",
        &rel,
        &[
            format!("Register the server in mockgcp/mock{}/service.go", names.service),
            "Use kcc_scaffold_fixtures to create test fixtures".to_string(),
            "Run the fixture tests with E2E_GCP_TARGET=mock".to_string(),
        ],
    ))
}
