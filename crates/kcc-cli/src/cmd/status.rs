use crate::output::{print_json, print_table};
use kcc_core::config::Config;
use kcc_core::migration::migration_status;

pub fn run(config: &Config, resource: &str, json: bool) -> anyhow::Result<()> {
    let status = migration_status(&config.repo_path, resource)?;
    if json {
        return print_json(&status);
    }

    println!("{}: {}", status.resource, status.overall_progress);
    println!();
    let rows: Vec<Vec<String>> = status
        .phases
        .iter()
        .map(|p| vec![p.number.to_string(), p.name.clone(), p.status.to_string()])
        .collect();
    if !rows.is_empty() {
        print_table(&["PHASE", "NAME", "STATUS"], &rows);
        println!();
    }
    println!("Next: {}", status.next_action);
    println!(
        "Can add fields: {}",
        if status.can_add_fields { "yes" } else { "no" }
    );
    Ok(())
}
