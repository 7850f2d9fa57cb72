//! Greedy seed-and-radius cluster formation with weighted head election

use crate::config::{ClusterConfig, ScoreWeights};
use crate::device::{ClusterId, Device, DeviceIndex};
use rayon::prelude::*;

/// Member sets at least this large compute mean distances in parallel
pub const PARALLEL_ELECTION_THRESHOLD: usize = 1000;

/// Position (within `candidates`) of the device with the highest energy
///
/// Ties keep the earliest candidate.
pub fn select_seed(devices: &[Device], candidates: &[DeviceIndex]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (pos, &idx) in candidates.iter().enumerate() {
        let energy = devices[idx as usize].energy;
        match best {
            Some((_, best_energy)) if energy <= best_energy => {}
            _ => best = Some((pos, energy)),
        }
    }

    best.map(|(pos, _)| pos)
}

/// Split `unclustered` into the devices within `radius` of the seed and the rest
///
/// A single ordered pass: both halves keep their relative order. Distance equal
/// to the radius joins.
pub fn gather_members(
    devices: &[Device],
    seed: DeviceIndex,
    unclustered: Vec<DeviceIndex>,
    radius: f64,
) -> (Vec<DeviceIndex>, Vec<DeviceIndex>) {
    let seed_device = &devices[seed as usize];

    unclustered.into_iter().partition(|&idx| {
        let device = &devices[idx as usize];
        let distance = seed_device.distance_to(device);
        if distance <= radius {
            log::debug!(
                "{} joins seed {} (distance: {:.2} units)",
                device.name,
                seed_device.name,
                distance
            );
            true
        } else {
            false
        }
    })
}

/// Mean distance from `candidate` to every other device in `members`
pub fn mean_distance(devices: &[Device], members: &[DeviceIndex], candidate: DeviceIndex) -> f64 {
    if members.len() <= 1 {
        return 0.0;
    }

    let device = &devices[candidate as usize];
    let total: f64 = members
        .iter()
        .filter(|&&other| other != candidate)
        .map(|&other| device.distance_to(&devices[other as usize]))
        .sum();

    total / (members.len() - 1) as f64
}

/// Mean distance of every member to the others, in member order
pub fn mean_distances(devices: &[Device], members: &[DeviceIndex]) -> Vec<f64> {
    if members.len() < PARALLEL_ELECTION_THRESHOLD {
        return members
            .iter()
            .map(|&idx| mean_distance(devices, members, idx))
            .collect();
    }

    members
        .par_iter()
        .map(|&idx| mean_distance(devices, members, idx))
        .collect()
}

/// Elect the member with the highest weighted score
///
/// Ties keep the earliest member, so the result depends only on the member
/// order and the scores.
pub fn elect_head(
    devices: &[Device],
    members: &[DeviceIndex],
    weights: &ScoreWeights,
) -> Option<DeviceIndex> {
    let distances = mean_distances(devices, members);
    let mut best: Option<(DeviceIndex, f64)> = None;

    for (&idx, &distance) in members.iter().zip(distances.iter()) {
        let device = &devices[idx as usize];
        let score = weights.score(device.energy, distance, device.load);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }

    best.map(|(idx, _)| idx)
}

/// Partition every device into clusters and elect their heads
///
/// Cluster ids are assigned from `first_id` upwards in formation order.
/// Returns the elected heads in id order.
pub fn form_clusters(
    devices: &mut [Device],
    config: &ClusterConfig,
    first_id: ClusterId,
) -> Vec<DeviceIndex> {
    log::info!(
        "Forming clusters over {} devices (radius: {})",
        devices.len(),
        config.radius
    );

    let mut unclustered: Vec<DeviceIndex> = (0..devices.len() as DeviceIndex).collect();
    let mut heads = Vec::new();
    let mut next_id = first_id;

    while let Some(pos) = select_seed(devices, &unclustered) {
        let seed = unclustered.remove(pos);
        let (joined, remaining) = gather_members(devices, seed, unclustered, config.radius);
        unclustered = remaining;

        let mut members = Vec::with_capacity(joined.len() + 1);
        members.push(seed);
        members.extend(joined);

        let head = match elect_head(devices, &members, &config.weights) {
            Some(head) => head,
            None => break,
        };

        for &idx in &members {
            let device = &mut devices[idx as usize];
            device.assign_cluster(next_id);
            if idx != head {
                device.demote();
            }
        }

        log::debug!(
            "Cluster {} formed: {} (head) with {} members",
            next_id,
            devices[head as usize].name,
            members.len() - 1
        );
        devices[head as usize].promote(members);

        heads.push(head);
        next_id += 1;
    }

    log::info!("Formed {} clusters", heads.len());

    heads
}
