use std::net::SocketAddr;

/// Counter: registry mutations. Labels: op, status (`ok` | `rejected`).
pub const MUTATIONS_TOTAL: &str = "greenex_mutations_total";

/// Gauge: properties currently in the registry.
pub const PROPERTIES_ACTIVE: &str = "greenex_properties_active";

/// Gauge: reservations currently held across all properties.
pub const RESERVATIONS_ACTIVE: &str = "greenex_reservations_active";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), metrics_exporter_prometheus::BuildError> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}
