//! Results persistence module

use anyhow::Result;
use crate::cluster::{Cluster, ClusterManager};
use crate::device::Device;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use serde_json::{json, to_string_pretty};

/// Save formation results to the specified directory
pub fn save_results(manager: &ClusterManager, output_dir: &str) -> Result<()> {
    let clusters = manager.clusters()?;
    log::info!("Saving {} clusters to {}", clusters.len(), output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(manager, output_dir)?;
    save_clusters(&clusters, manager.all_devices(), output_dir)?;
    save_devices(manager.all_devices(), output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save statistics and scores
fn save_summary(manager: &ClusterManager, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let config = manager.config();
    let summary = json!({
        "config": {
            "radius": config.radius,
            "alpha": config.weights.alpha,
            "beta": config.weights.beta,
            "gamma": config.weights.gamma,
        },
        "statistics": manager.statistics()?,
        "efficiency": manager.efficiency()?,
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save every cluster with head and member names resolved
fn save_clusters(clusters: &[Cluster], devices: &[Device], output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("all_clusters.json");
    let mut file = File::create(path)?;

    let name_of = |idx: u32| devices[idx as usize].name.clone();

    let clusters_json = json!({
        "clusters": clusters.iter().map(|c| {
            json!({
                "id": c.id,
                "size": c.size,
                "head": name_of(c.head),
                "avg_head_distance": c.avg_head_distance,
                "members": c.members.iter().map(|&m| name_of(m)).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>()
    });

    file.write_all(to_string_pretty(&clusters_json)?.as_bytes())?;

    Ok(())
}

/// Save the device population with its cluster state
fn save_devices(devices: &[Device], output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("devices.json");
    let mut file = File::create(path)?;

    file.write_all(to_string_pretty(devices)?.as_bytes())?;

    Ok(())
}
