use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use greenex::{PropertyCategory, Registry};

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64) * p / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn print_latency(label: &str, latencies: &mut [Duration]) {
    if latencies.is_empty() {
        println!("  {label}: no samples");
        return;
    }
    latencies.sort();
    let total: Duration = latencies.iter().sum();
    let avg = total / latencies.len() as u32;
    println!("  {label}:");
    println!(
        "    n={}, avg={:.2}us, p50={:.2}us, p95={:.2}us, p99={:.2}us, max={:.2}us",
        latencies.len(),
        avg.as_secs_f64() * 1e6,
        percentile(latencies, 50.0).as_secs_f64() * 1e6,
        percentile(latencies, 95.0).as_secs_f64() * 1e6,
        percentile(latencies, 99.0).as_secs_f64() * 1e6,
        latencies[latencies.len() - 1].as_secs_f64() * 1e6,
    );
}

fn setup(n_properties: usize) -> Registry {
    let mut reg = Registry::new();
    let days: Vec<u32> = (1..=30).collect();
    for i in 0..n_properties {
        let category = PropertyCategory::ALL[i % PropertyCategory::ALL.len()];
        reg.create_property(&format!("property-{i}"), category, &days)
            .expect("setup: create property");
    }
    println!("  created {} properties", reg.property_count());
    reg
}

/// Book every night of every property as back-to-back two-night stays.
fn phase1_fill(reg: &mut Registry) {
    let mut latencies = Vec::new();
    let start = Instant::now();
    for idx in 0..reg.property_count() {
        for check_in in (1..29u32).step_by(2) {
            let t = Instant::now();
            reg.add_reservation(idx, "guest", check_in, check_in + 2)
                .expect("phase 1: stay should fit");
            latencies.push(t.elapsed());
        }
    }
    let elapsed = start.elapsed();
    let ops = latencies.len() as f64 / elapsed.as_secs_f64();
    println!("  {} bookings in {:.3}s = {ops:.0} ops/sec", latencies.len(), elapsed.as_secs_f64());
    print_latency("add latency", &mut latencies);
}

/// Random stays against a full calendar: every attempt is rejected.
fn phase2_rejections(reg: &mut Registry, rng: &mut StdRng, n: usize) {
    let mut latencies = Vec::with_capacity(n);
    let mut rejected = 0usize;
    for _ in 0..n {
        let idx = rng.random_range(0..reg.property_count());
        let check_in = rng.random_range(1..=28u32);
        let check_out = rng.random_range(check_in + 1..=29);
        let t = Instant::now();
        if reg.add_reservation(idx, "late", check_in, check_out).is_err() {
            rejected += 1;
        }
        latencies.push(t.elapsed());
    }
    println!("  {rejected}/{n} rejected");
    print_latency("reject latency", &mut latencies);
}

/// Cancel and rebook random reservations.
fn phase3_churn(reg: &mut Registry, rng: &mut StdRng, n: usize) {
    let mut latencies = Vec::with_capacity(n);
    for _ in 0..n {
        let idx = rng.random_range(0..reg.property_count());
        let count = reg.reservations_for_property(idx).len();
        if count == 0 {
            continue;
        }
        let t = Instant::now();
        let removed = reg
            .remove_reservation(idx, rng.random_range(0..count))
            .expect("phase 3: index in range");
        reg.add_reservation(idx, removed.guest_name(), u32::from(removed.check_in()), u32::from(removed.check_out()))
            .expect("phase 3: freed stay rebooks");
        latencies.push(t.elapsed());
    }
    print_latency("cancel+rebook latency", &mut latencies);
}

fn phase4_pricing(reg: &Registry) {
    let start = Instant::now();
    let mut total = 0.0;
    for _ in 0..100 {
        total = reg.snapshot().iter().map(|p| p.estimated_earnings).sum::<f64>();
    }
    println!(
        "  100 snapshots in {:.3}s, earnings={total:.2}",
        start.elapsed().as_secs_f64()
    );
}

fn main() {
    let n_properties: usize = std::env::var("GREENEX_BENCH_PROPERTIES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);
    if n_properties == 0 {
        println!("GREENEX_BENCH_PROPERTIES must be at least 1");
        return;
    }
    let mut rng = StdRng::seed_from_u64(0x6e65);

    println!("=== greenex stress benchmark ===\n");

    println!("[setup]");
    let mut reg = setup(n_properties);

    println!("\n[phase 1] sequential booking throughput");
    phase1_fill(&mut reg);

    println!("\n[phase 2] rejected bookings on a full calendar");
    phase2_rejections(&mut reg, &mut rng, 20_000);

    println!("\n[phase 3] cancel/rebook churn");
    phase3_churn(&mut reg, &mut rng, 20_000);

    println!("\n[phase 4] earnings snapshot");
    phase4_pricing(&reg);

    println!("\n=== benchmark complete ===");
}
