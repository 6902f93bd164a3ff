use crate::error::{KccError, Result};
use crate::paths;
use std::path::Path;
use std::process::Command;

/// Run the repository's mapper generator for `resource`, once.
///
/// Output is passed through verbatim on both success and failure.
pub fn generate_mapper(root: &Path, resource: &str) -> Result<String> {
    let script = root.join(paths::GENERATE_MAPPER_SCRIPT.trim_start_matches("./"));
    let command = format!("{} {resource}", paths::GENERATE_MAPPER_SCRIPT);
    tracing::info!(%command, "generating mapper");

    let output = Command::new(&script)
        .arg(resource)
        .current_dir(root)
        .output()
        .map_err(|e| KccError::ExternalTool {
            command: command.clone(),
            output: e.to_string(),
        })?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(KccError::ExternalTool {
            command,
            output: format!(
                "{text}\nMake sure:\n\
                 1. Proto annotations (+kcc:proto=) are correct\n\
                 2. Proto definitions exist in {}/\n\
                 3. Field names match proto (use snake_case in annotation)",
                paths::PROTO_DIR
            ),
        });
    }

    Ok(format!(
        "Mapper generated successfully for {resource}\n\n{text}"
    ))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn script(dir: &TempDir, body: &str) {
        let path = dir.path().join("dev/tasks/generate-mapper");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn success_passes_output_through() {
        let dir = TempDir::new().unwrap();
        script(&dir, "echo \"mapped $1\"");
        let out = generate_mapper(dir.path(), "ComputeURLMap").unwrap();
        assert!(out.contains("mapped ComputeURLMap"));
    }

    #[test]
    fn failure_carries_stderr() {
        let dir = TempDir::new().unwrap();
        script(&dir, "echo 'no proto for field' >&2\nexit 3");
        let err = generate_mapper(dir.path(), "ComputeURLMap").unwrap_err();
        match err {
            KccError::ExternalTool { command, output } => {
                assert_eq!(command, "./dev/tasks/generate-mapper ComputeURLMap");
                assert!(output.contains("no proto for field"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_script_is_external_tool_error() {
        let dir = TempDir::new().unwrap();
        let err = generate_mapper(dir.path(), "X").unwrap_err();
        assert!(matches!(err, KccError::ExternalTool { .. }));
    }
}
