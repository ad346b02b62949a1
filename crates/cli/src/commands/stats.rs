//! `thermowise stats`: dataset figures without asking the model.

use thermowise_dataset::summary::{describe_temperatures, hourly_average_energy};
use thermowise_dataset::{load_csv, DatasetInfo, QuickStats};

use super::{load_config, GlobalOpts};

fn figure(value: Option<f64>, render: impl Fn(f64) -> String) -> String {
    value.map(render).unwrap_or_else(|| "N/A".to_string())
}

pub fn run(opts: &GlobalOpts) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(opts)?;
    let path = opts
        .data
        .clone()
        .unwrap_or_else(|| config.dataset.path.clone());
    let dataset = load_csv(&path)?;
    let info = DatasetInfo::of(&dataset);

    println!("Dataset: {}", path.display());
    println!("  {} rows: {}", info.rows, info.columns.join(", "));
    println!();

    let quick = QuickStats::from_dataset(&dataset);
    println!("Quick stats");
    println!("  Total energy:   {}", figure(quick.total_energy_kwh, |v| format!("{v:.1} kWh")));
    println!("  Avg indoor:     {}", figure(quick.avg_indoor_temp_c, |v| format!("{v:.1}°C")));
    println!("  Total cost:     {}", figure(quick.total_cost_usd, |v| format!("${v:.2}")));
    println!("  Avg efficiency: {}", figure(quick.avg_cop, |v| format!("{v:.2} COP")));

    let hourly = hourly_average_energy(&dataset);
    if !hourly.is_empty() {
        println!();
        println!("Average energy by hour");
        for (hour, kwh) in hourly {
            println!("  {hour:>2}:00  {kwh:>8.3} kWh");
        }
    }

    let temps = describe_temperatures(&dataset);
    if !temps.is_empty() {
        println!();
        println!("Temperature summary");
        for d in temps {
            println!(
                "  {:<16} count {:>6}  mean {:>7}  std {:>7}",
                d.name,
                d.count,
                figure(d.mean, |v| format!("{v:.2}")),
                figure(d.std, |v| format!("{v:.2}"))
            );
        }
    }

    if opts.data.is_none() && !config.dataset.autoload {
        println!("\n  Note: dataset.autoload is off; `ask` and `chat` will not use this file.");
    }

    Ok(())
}
