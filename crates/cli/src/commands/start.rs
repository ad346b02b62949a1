//! `thermowise start`: one attempt to bring the inference service up.

use thermowise_agent::Session;

use super::{load_config, GlobalOpts};

pub async fn run(opts: &GlobalOpts) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(opts)?;
    let mut session =
        Session::from_config(&config).map_err(|e| format!("Failed to set up session: {e}"))?;

    println!(
        "  Starting `{} {}` (waiting up to {}s)...",
        config.service.launch_command,
        config.service.launch_args.join(" "),
        config.service.startup_grace_secs
    );

    if session.start_service().await {
        println!("  Service is up at {}", config.service.base_url);
        Ok(())
    } else {
        println!("  Service state: {}", session.service_state());
        Err("Inference service did not start".into())
    }
}
