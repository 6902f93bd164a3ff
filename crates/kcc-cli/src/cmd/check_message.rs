use kcc_core::config::Config;
use kcc_core::gate::CommitGate;

/// Run the message checks a commit would run, without committing.
pub fn run(config: &Config, message: &str, json: bool) -> anyhow::Result<()> {
    let gate = CommitGate::new(&config.author, &config.rules);
    let verdict = gate
        .validate_message(message)
        .and_then(|_| gate.validate_format(message));

    if json {
        let value = match &verdict {
            Ok(()) => serde_json::json!({ "ok": true }),
            Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }),
        };
        crate::output::print_json(&value)?;
    } else if verdict.is_ok() {
        println!("Commit message OK");
    }

    verdict?;
    Ok(())
}
