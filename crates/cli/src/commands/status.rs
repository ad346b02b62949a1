//! `thermowise status`: configuration, service and dataset status.

use thermowise_config::AppConfig;

use super::{build_session, describe_dataset, load_config, GlobalOpts};

pub async fn run(opts: &GlobalOpts) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(opts)?;
    let (mut session, info) = build_session(opts, &config)?;

    println!("Thermowise Status");
    println!("=================");
    println!("  Config file:  {}", opts.config_path().display());
    println!("  Service URL:  {}", config.service.base_url);
    println!("  Model:        {}", config.service.model);
    println!(
        "  Launch:       {} {}",
        config.service.launch_command,
        config.service.launch_args.join(" ")
    );
    println!(
        "  Timeouts:     probe {}s, startup grace {}s, request {}s",
        config.service.probe_timeout_secs,
        config.service.startup_grace_secs,
        config.service.request_timeout_secs
    );
    println!("  Dataset:      {}", config.dataset.path.display());
    println!("  Loaded:       {}", describe_dataset(info.as_ref()));

    let up = session.check_service().await;
    println!("  Service:      {}", session.service_state());

    if up {
        let models = session.list_models().await;
        if models.is_empty() {
            println!("  Models:       (none installed)");
        } else {
            println!("  Models:       {}", models.join(", "));
        }
        if !models.iter().any(|m| m.split(':').next() == Some(config.service.model.as_str())) {
            println!(
                "\n  Model `{}` is not installed. Run: ollama pull {}",
                config.service.model, config.service.model
            );
        }
    } else {
        println!("\n  Service is not running. Run `thermowise start` or `ollama serve`.");
    }

    if opts.config.is_none() && !AppConfig::config_path().exists() {
        println!("\n  No config file; run `thermowise onboard` to create one");
    }

    Ok(())
}
