use crate::output::print_json;
use kcc_core::config::Config;
use kcc_core::plan::plan_migration;

pub fn run(config: &Config, resource: &str, json: bool) -> anyhow::Result<()> {
    let plan = plan_migration(&config.repo_path, resource)?;
    if json {
        return print_json(&plan);
    }

    println!("Migration plan for {} ({})", plan.resource, plan.current_type);
    for phase in &plan.phases {
        println!();
        println!(
            "Phase {}: {} [{}]",
            phase.phase, phase.name, phase.estimated_time
        );
        for task in &phase.tasks {
            println!("  - {task}");
        }
    }
    println!();
    println!("Target files:");
    for (kind, path) in &plan.target_files {
        println!("  {kind:<12} {path}");
    }
    println!();
    println!("Next: {}", plan.next_action);
    Ok(())
}
