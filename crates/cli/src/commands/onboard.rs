//! `thermowise onboard`: first-time setup.

use thermowise_config::AppConfig;

use super::GlobalOpts;

pub fn run(opts: &GlobalOpts) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = opts.config_path();

    println!("Thermowise: First-Time Setup");
    println!("============================\n");

    if let Some(dir) = config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            println!("  Created config directory: {}", dir.display());
        } else {
            println!("  Config directory exists: {}", dir.display());
        }
    }

    if config_path.exists() {
        println!("\n  Config already exists at: {}", config_path.display());
        println!("  Edit it manually or delete and re-run onboard.\n");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("  Created config.toml at: {}", config_path.display());
    println!("\n  Next steps:");
    println!("   1. Install Ollama and run: ollama pull phi");
    println!("   2. Point `dataset.path` at your thermostat CSV export");
    println!("   3. Run: thermowise chat\n");

    Ok(())
}
