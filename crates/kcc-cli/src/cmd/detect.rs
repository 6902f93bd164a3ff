use crate::output::print_json;
use kcc_core::classifier::classify;
use kcc_core::config::Config;

pub fn run(config: &Config, resource: &str, json: bool) -> anyhow::Result<()> {
    let info = classify(&config.repo_path, resource)?;
    if json {
        return print_json(&info);
    }

    println!("Resource:        {}", info.resource);
    println!("Type:            {}", info.style);
    if let Some(location) = &info.location {
        println!("Location:        {location}");
    }
    if let Some((service, version)) = info.service_version() {
        println!("Service:         {service} {version}");
    }
    println!("Migration:       {}", if info.migration_needed { "needed" } else { "not needed" });
    println!(
        "Proto:           {}",
        info.proto_location.as_deref().unwrap_or("not found")
    );
    if info.has_direct_types && info.has_legacy_types {
        println!("Note:            legacy types are still present");
    }
    if let Some(reason) = &info.layout_error {
        println!("Layout:          {reason}");
    }
    Ok(())
}
