use crate::output::{print_json, print_table};
use kcc_core::config::Config;
use kcc_core::resource::find_resource;

pub fn run(config: &Config, resource: &str, json: bool) -> anyhow::Result<()> {
    let loc = find_resource(&config.repo_path, resource)?;
    if json {
        return print_json(&loc);
    }

    println!("{} ({} {})", loc.resource, loc.service, loc.version);
    println!();
    let rows: Vec<Vec<String>> = [
        ("types", &loc.types_file),
        ("controller", &loc.controller_file),
        ("mapper", &loc.mapper_file),
        ("test_fixtures", &loc.test_fixtures_dir),
    ]
    .into_iter()
    .map(|(kind, path)| {
        let exists = loc.files_exist.get(kind).copied().unwrap_or(false);
        vec![
            kind.to_string(),
            path.clone(),
            if exists { "yes" } else { "no" }.to_string(),
        ]
    })
    .collect();
    print_table(&["KIND", "PATH", "EXISTS"], &rows);
    Ok(())
}
