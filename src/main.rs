use anyhow::Result;
use clap::Parser;
use fog_cluster_engine::config::{ClusterConfig, GeneratorConfig, ScoreWeights, DEFAULT_RADIUS};
use fog_cluster_engine::data;
use fog_cluster_engine::device::DeviceRegistry;
use fog_cluster_engine::storage;
use fog_cluster_engine::ClusterManager;

#[derive(Parser, Debug)]
#[clap(
    name = "fog-cluster-engine",
    about = "Distance- and energy-aware clustering of fog devices"
)]
struct Cli {
    /// Number of synthetic devices to generate
    #[clap(long, default_value = "20")]
    devices: usize,

    /// Seed for the synthetic device generator
    #[clap(long, default_value = "42")]
    seed: u64,

    /// JSON device list to cluster instead of a synthetic population
    #[clap(long)]
    input: Option<String>,

    /// Maximum seed-to-device distance for joining a cluster
    #[clap(long, default_value_t = DEFAULT_RADIUS)]
    radius: f64,

    /// Head election weight for energy
    #[clap(long, default_value = "0.5")]
    alpha: f64,

    /// Head election penalty for mean member distance
    #[clap(long, default_value = "0.3")]
    beta: f64,

    /// Head election penalty for load
    #[clap(long, default_value = "0.2")]
    gamma: f64,

    /// Output directory for JSON results (nothing is written if omitted)
    #[clap(long)]
    output_dir: Option<String>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    // Fail fast on bad configuration before touching any input
    let weights = ScoreWeights::new(args.alpha, args.beta, args.gamma);
    let config = ClusterConfig::new(args.radius, weights);
    config.validate()?;

    // 1. Build the device population
    let devices = match &args.input {
        Some(path) => data::json::load_devices(path)?,
        None => data::synthetic::generate_devices(&GeneratorConfig::new(args.devices, args.seed))?,
    };
    let registry: DeviceRegistry = devices.into_iter().collect();

    // 2. Form clusters
    let mut manager = ClusterManager::with_registry(registry, config)?;
    manager.form_clusters()?;

    // 3. Report
    report(&manager)?;

    // 4. Save results if requested
    if let Some(output_dir) = &args.output_dir {
        storage::save_results(&manager, output_dir)?;
        log::info!("Results saved to {}", output_dir);
    }

    Ok(())
}

fn report(manager: &ClusterManager) -> Result<()> {
    for cluster in manager.clusters()? {
        let head = &manager.all_devices()[cluster.head as usize];
        log::info!(
            "Cluster {} head: {} with {} members | avg distance: {:.2} units",
            cluster.id,
            head.name,
            cluster.size,
            cluster.avg_head_distance
        );
    }

    let stats = manager.statistics()?;
    log::info!(
        "{} devices in {} clusters (avg size {:.2}, largest {}, smallest {})",
        stats.device_count,
        stats.cluster_count,
        stats.avg_cluster_size,
        stats.largest_cluster_size,
        stats.smallest_cluster_size
    );
    log::info!(
        "Average energy: {:.2}%, average load: {:.2}%",
        stats.avg_energy,
        stats.avg_load
    );

    let score = manager.efficiency()?;
    log::info!(
        "Clustering efficiency: {:.2}/100 (balance {:.2}, energy {:.2})",
        score.total,
        score.balance,
        score.energy
    );

    Ok(())
}
