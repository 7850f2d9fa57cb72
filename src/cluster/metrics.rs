//! Cluster scores and summary statistics

use crate::cluster::Cluster;
use crate::device::{Device, DeviceIndex};
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Weight applied to the mean balance contribution
pub const BALANCE_WEIGHT: f64 = 50.0;

/// Weight applied to the mean head energy
pub const ENERGY_WEIGHT: f64 = 0.5;

/// Balance, energy and combined efficiency of a formed partition
///
/// `total` is nominally within [0, 100] but is not clamped; very uneven
/// partitions push the balance term negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyScore {
    pub balance: f64,
    pub energy: f64,
    pub total: f64,
}

impl EfficiencyScore {
    pub fn new(balance: f64, energy: f64) -> Self {
        Self {
            balance,
            energy,
            total: balance + energy,
        }
    }
}

/// Descriptive statistics of a formed partition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterStatistics {
    pub device_count: usize,
    pub cluster_count: usize,
    pub avg_cluster_size: f64,
    pub largest_cluster_size: usize,
    pub smallest_cluster_size: usize,

    /// Population standard deviation of cluster sizes
    pub cluster_size_std_dev: f64,

    /// Mean energy over all devices
    pub avg_energy: f64,

    /// Mean load over all devices
    pub avg_load: f64,
}

impl ClusterStatistics {
    /// Compute statistics for a population and its clusters
    pub fn compute(devices: &[Device], clusters: &[Cluster]) -> Self {
        let sizes: Vec<f64> = clusters.iter().map(|c| c.size as f64).collect();
        let energies: Vec<f64> = devices.iter().map(|d| d.energy).collect();
        let loads: Vec<f64> = devices.iter().map(|d| d.load).collect();
        let (smallest, largest) = match clusters.iter().map(|c| c.size).minmax() {
            MinMaxResult::NoElements => (0, 0),
            MinMaxResult::OneElement(size) => (size, size),
            MinMaxResult::MinMax(min, max) => (min, max),
        };

        let avg_cluster_size = if clusters.is_empty() {
            0.0
        } else {
            devices.len() as f64 / clusters.len() as f64
        };

        Self {
            device_count: devices.len(),
            cluster_count: clusters.len(),
            avg_cluster_size,
            largest_cluster_size: largest,
            smallest_cluster_size: smallest,
            cluster_size_std_dev: stat_or_zero(&sizes, |s| s.iter().population_std_dev()),
            avg_energy: stat_or_zero(&energies, |v| v.iter().mean()),
            avg_load: stat_or_zero(&loads, |v| v.iter().mean()),
        }
    }
}

fn stat_or_zero(values: &[f64], stat: impl Fn(&[f64]) -> f64) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        stat(values)
    }
}

/// Balance score of a partition with the given cluster sizes over `population` devices
///
/// Each cluster contributes `1 - |size - ideal| / ideal` where `ideal` is the
/// integer quotient `population / cluster_count`; the mean contribution is
/// scaled by 50.
pub fn balance_score(sizes: &[usize], population: usize) -> f64 {
    if sizes.is_empty() {
        return 0.0;
    }

    let ideal = population / sizes.len();
    if ideal == 0 {
        return 0.0;
    }

    let ideal = ideal as f64;
    let contributions: f64 = sizes
        .iter()
        .map(|&size| 1.0 - (size as f64 - ideal).abs() / ideal)
        .sum();

    contributions / sizes.len() as f64 * BALANCE_WEIGHT
}

/// Mean head energy scaled by 0.5
pub fn energy_score(head_energies: &[f64]) -> f64 {
    stat_or_zero(head_energies, |e| e.iter().mean()) * ENERGY_WEIGHT
}

/// Balance plus energy score for a population and its clusters
pub fn efficiency(devices: &[Device], clusters: &[Cluster]) -> EfficiencyScore {
    let sizes: Vec<usize> = clusters.iter().map(|c| c.size).collect();
    let head_energies: Vec<f64> = clusters
        .iter()
        .map(|c| devices[c.head as usize].energy)
        .collect();

    EfficiencyScore::new(
        balance_score(&sizes, devices.len()),
        energy_score(&head_energies),
    )
}

/// Mean distance from the head to the other members
pub fn avg_head_distance(devices: &[Device], head: DeviceIndex, members: &[DeviceIndex]) -> f64 {
    let head_device = &devices[head as usize];
    let distances: Vec<f64> = members
        .iter()
        .filter(|&&idx| idx != head)
        .map(|&idx| head_device.distance_to(&devices[idx as usize]))
        .collect();

    stat_or_zero(&distances, |d| d.iter().mean())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn balance_of_perfect_partition_is_fifty() {
        assert!((balance_score(&[5, 5, 5, 5], 20) - 50.0).abs() < EPS);
    }

    #[test]
    fn balance_uses_integer_ideal_size() {
        // ideal = 3 / 2 = 1; contributions 1.0 and 0.0
        assert!((balance_score(&[1, 2], 3) - 25.0).abs() < EPS);
    }

    #[test]
    fn balance_can_go_negative() {
        // ideal = 15 / 3 = 5; contributions -0.6, 0.2 and 0.2
        let score = balance_score(&[13, 1, 1], 15);
        assert!((score - (-10.0 / 3.0)).abs() < EPS);
    }

    #[test]
    fn empty_partition_scores_zero() {
        assert_eq!(balance_score(&[], 0), 0.0);
        assert_eq!(energy_score(&[]), 0.0);

        let score = efficiency(&[], &[]);
        assert_eq!(score, EfficiencyScore::new(0.0, 0.0));
    }

    #[test]
    fn energy_score_halves_mean() {
        assert!((energy_score(&[95.0, 90.0]) - 46.25).abs() < EPS);
    }

    #[test]
    fn head_distance_ignores_head() {
        let devices = vec![
            Device::new("h", 0.0, 0.0, 90.0, 0.0, 1000),
            Device::new("a", 3.0, 4.0, 80.0, 0.0, 1000),
            Device::new("b", 0.0, 10.0, 80.0, 0.0, 1000),
        ];
        assert!((avg_head_distance(&devices, 0, &[0, 1, 2]) - 7.5).abs() < EPS);
        assert_eq!(avg_head_distance(&devices, 0, &[0]), 0.0);
    }

    #[test]
    fn statistics_of_empty_population_are_zero() {
        let stats = ClusterStatistics::compute(&[], &[]);
        assert_eq!(stats.cluster_count, 0);
        assert_eq!(stats.avg_cluster_size, 0.0);
        assert_eq!(stats.largest_cluster_size, 0);
        assert_eq!(stats.smallest_cluster_size, 0);
        assert_eq!(stats.cluster_size_std_dev, 0.0);
        assert_eq!(stats.avg_energy, 0.0);
        assert_eq!(stats.avg_load, 0.0);
    }
}
