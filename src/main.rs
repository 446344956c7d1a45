use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use greenex::Registry;
use greenex::seed::seed_sample_properties;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let metrics_port: Option<u16> = std::env::var("GREENEX_METRICS_PORT")
        .ok()
        .and_then(|s| s.parse().ok());
    greenex::observability::init(metrics_port)?;

    let seed: bool = std::env::var("GREENEX_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(true);
    let rate_seed: Option<u64> = std::env::var("GREENEX_RATE_SEED")
        .ok()
        .and_then(|s| s.parse().ok());

    info!("greenex starting");
    info!("  seed: {seed}");
    info!("  rate_seed: {}", rate_seed.map_or("none".to_string(), |s| s.to_string()));
    info!("  metrics: {}", metrics_port.map_or("disabled".to_string(), |p| format!("http://0.0.0.0:{p}/metrics")));

    let mut registry = Registry::new();
    if seed {
        seed_sample_properties(&mut registry)?;
    }

    if let Some(s) = rate_seed {
        let mut rng = StdRng::seed_from_u64(s);
        for index in 0..registry.property_count() {
            registry.randomize_environmental_rates(index, &mut rng)?;
        }
    }

    let snapshot = registry.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    info!(events = registry.journal().len(), "greenex stopped");
    Ok(())
}
