//! Cluster manager: owns a device population and its one formation run

use crate::cluster::formation;
use crate::cluster::metrics::{self, ClusterStatistics, EfficiencyScore};
use crate::cluster::Cluster;
use crate::config::ClusterConfig;
use crate::device::{ClusterId, Device, DeviceIndex, DeviceRegistry};
use crate::error::ClusterError;
use std::collections::BTreeMap;

/// Id of the first cluster a run forms
pub const FIRST_CLUSTER_ID: ClusterId = 1;

/// Lifecycle of a manager's single formation run
///
/// `Forming` is only held inside `form_clusters`, which borrows the manager
/// mutably and cannot fail partway, so callers observe `Unformed` or `Formed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationState {
    Unformed,
    Forming,
    Formed,
}

/// Partitions a device population into clusters with elected heads
///
/// Each manager owns its registry and cluster map, so independent runs never
/// share state. Formation runs at most once; a second call is rejected.
#[derive(Debug, Clone)]
pub struct ClusterManager {
    config: ClusterConfig,
    registry: DeviceRegistry,
    heads: BTreeMap<ClusterId, DeviceIndex>,
    state: FormationState,
}

impl Default for ClusterManager {
    fn default() -> Self {
        Self {
            config: ClusterConfig::default(),
            registry: DeviceRegistry::new(),
            heads: BTreeMap::new(),
            state: FormationState::Unformed,
        }
    }
}

impl ClusterManager {
    /// Create an empty manager, validating the configuration
    pub fn new(config: ClusterConfig) -> Result<Self, ClusterError> {
        Self::with_registry(DeviceRegistry::new(), config)
    }

    /// Create a manager over an already populated registry
    pub fn with_registry(
        registry: DeviceRegistry,
        config: ClusterConfig,
    ) -> Result<Self, ClusterError> {
        config.validate()?;
        Ok(Self {
            config,
            registry,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    pub fn state(&self) -> FormationState {
        self.state
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn all_devices(&self) -> &[Device] {
        self.registry.all_devices()
    }

    /// Add a device to the population; rejected once clusters are formed
    pub fn add_device(&mut self, device: Device) -> Result<DeviceIndex, ClusterError> {
        if self.state != FormationState::Unformed {
            return Err(ClusterError::AlreadyFormed);
        }
        Ok(self.registry.add_device(device))
    }

    /// Partition the population and elect one head per cluster
    ///
    /// Returns the number of clusters formed. An empty population forms zero
    /// clusters.
    pub fn form_clusters(&mut self) -> Result<usize, ClusterError> {
        if self.state != FormationState::Unformed {
            return Err(ClusterError::AlreadyFormed);
        }

        self.state = FormationState::Forming;
        let devices = self.registry.devices_mut();
        let heads = formation::form_clusters(devices, &self.config, FIRST_CLUSTER_ID);

        self.heads = (FIRST_CLUSTER_ID..).zip(heads).collect();
        self.state = FormationState::Formed;

        Ok(self.heads.len())
    }

    fn ensure_formed(&self) -> Result<(), ClusterError> {
        match self.state {
            FormationState::Formed => Ok(()),
            _ => Err(ClusterError::NotFormed),
        }
    }

    /// Number of elected heads
    pub fn cluster_count(&self) -> Result<usize, ClusterError> {
        self.ensure_formed()?;
        Ok(self.heads.len())
    }

    /// Elected heads in cluster id order
    pub fn cluster_heads(&self) -> Result<Vec<&Device>, ClusterError> {
        self.ensure_formed()?;
        let devices = self.registry.all_devices();
        Ok(self.heads.values().map(|&head| &devices[head as usize]).collect())
    }

    /// Head of the cluster `device` belongs to
    pub fn head_for(&self, device: DeviceIndex) -> Result<&Device, ClusterError> {
        self.ensure_formed()?;
        let member = self
            .registry
            .get(device)
            .ok_or(ClusterError::UnknownDevice(device))?;

        member
            .cluster_id()
            .and_then(|id| self.heads.get(&id))
            .and_then(|&head| self.registry.get(head))
            .ok_or_else(|| ClusterError::DeviceNotClustered(member.name.clone()))
    }

    /// The cluster with the given id, if it exists
    pub fn cluster(&self, id: ClusterId) -> Result<Option<Cluster>, ClusterError> {
        self.ensure_formed()?;
        Ok(self
            .heads
            .get(&id)
            .and_then(|&head| Cluster::from_head(self.registry.all_devices(), head)))
    }

    /// All clusters in id order
    pub fn clusters(&self) -> Result<Vec<Cluster>, ClusterError> {
        self.ensure_formed()?;
        let devices = self.registry.all_devices();
        Ok(self
            .heads
            .values()
            .filter_map(|&head| Cluster::from_head(devices, head))
            .collect())
    }

    pub fn balance_score(&self) -> Result<f64, ClusterError> {
        Ok(self.efficiency()?.balance)
    }

    pub fn energy_score(&self) -> Result<f64, ClusterError> {
        Ok(self.efficiency()?.energy)
    }

    /// Balance, energy and combined efficiency scores
    pub fn efficiency(&self) -> Result<EfficiencyScore, ClusterError> {
        let clusters = self.clusters()?;
        Ok(metrics::efficiency(self.registry.all_devices(), &clusters))
    }

    pub fn statistics(&self) -> Result<ClusterStatistics, ClusterError> {
        let clusters = self.clusters()?;
        Ok(ClusterStatistics::compute(self.registry.all_devices(), &clusters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoreWeights;

    fn manager_with(devices: Vec<Device>) -> ClusterManager {
        let mut manager = ClusterManager::default();
        for device in devices {
            manager.add_device(device).unwrap();
        }
        manager
    }

    #[test]
    fn rejects_invalid_config_at_construction() {
        let config = ClusterConfig::new(-5.0, ScoreWeights::default());
        assert_eq!(
            ClusterManager::new(config).unwrap_err(),
            ClusterError::InvalidRadius(-5.0)
        );
    }

    #[test]
    fn queries_before_formation_fail() {
        let manager = manager_with(vec![Device::new("a", 0.0, 0.0, 90.0, 0.0, 1000)]);
        assert_eq!(manager.state(), FormationState::Unformed);
        assert_eq!(manager.cluster_count(), Err(ClusterError::NotFormed));
        assert!(matches!(manager.head_for(0), Err(ClusterError::NotFormed)));
        assert!(matches!(manager.efficiency(), Err(ClusterError::NotFormed)));
    }

    #[test]
    fn second_formation_is_rejected() {
        let mut manager = manager_with(vec![
            Device::new("a", 0.0, 0.0, 90.0, 0.0, 1000),
            Device::new("b", 5.0, 0.0, 80.0, 0.0, 1000),
        ]);
        assert_eq!(manager.form_clusters(), Ok(1));
        assert_eq!(manager.form_clusters(), Err(ClusterError::AlreadyFormed));
        assert_eq!(manager.cluster_count(), Ok(1));
        assert_eq!(manager.state(), FormationState::Formed);
    }

    #[test]
    fn add_after_formation_is_rejected() {
        let mut manager = ClusterManager::default();
        manager.form_clusters().unwrap();
        let result = manager.add_device(Device::new("late", 0.0, 0.0, 50.0, 0.0, 1000));
        assert_eq!(result, Err(ClusterError::AlreadyFormed));
    }

    #[test]
    fn empty_population_forms_nothing() {
        let mut manager = ClusterManager::default();
        assert_eq!(manager.form_clusters(), Ok(0));
        assert!(manager.cluster_heads().unwrap().is_empty());
        assert_eq!(manager.efficiency().unwrap().total, 0.0);
        assert_eq!(manager.statistics().unwrap().device_count, 0);
    }

    #[test]
    fn single_device_heads_itself() {
        let mut manager = manager_with(vec![Device::new("solo", 3.0, 3.0, 60.0, 10.0, 1200)]);
        manager.form_clusters().unwrap();

        let head = manager.head_for(0).unwrap();
        assert_eq!(head.name, "solo");
        assert!(head.is_head());
        assert_eq!(head.members(), &[0]);

        let cluster = manager.cluster(1).unwrap().unwrap();
        assert_eq!(cluster.size, 1);
        assert_eq!(cluster.avg_head_distance, 0.0);
    }

    #[test]
    fn head_for_unknown_device_fails() {
        let mut manager = manager_with(vec![Device::new("a", 0.0, 0.0, 90.0, 0.0, 1000)]);
        manager.form_clusters().unwrap();
        assert_eq!(manager.head_for(9), Err(ClusterError::UnknownDevice(9)));
        assert_eq!(manager.cluster(2), Ok(None));
    }

    #[test]
    fn scattered_devices_become_singleton_heads() {
        let mut manager = manager_with(
            (0..5)
                .map(|i| Device::new(format!("d{}", i), i as f64 * 1000.0, 0.0, 80.0, 0.0, 1000))
                .collect(),
        );
        assert_eq!(manager.form_clusters(), Ok(5));
        assert!(manager.all_devices().iter().all(|d| d.is_head()));
        // Perfect balance: every cluster has the ideal size of one.
        assert!((manager.balance_score().unwrap() - 50.0).abs() < 1e-9);
        assert!((manager.energy_score().unwrap() - 40.0).abs() < 1e-9);
    }
}
