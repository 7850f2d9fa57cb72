//! Fog device data model and registry

pub mod registry;

pub use registry::DeviceRegistry;

use crate::error::ClusterError;
use serde::{Deserialize, Serialize};

/// Index of a device within its registry
pub type DeviceIndex = u32;

/// Identifier of a formed cluster (assigned from 1 in formation order)
pub type ClusterId = u32;

/// A fog/edge compute node
///
/// Position, energy, load and capacity are fixed at creation. Cluster state is
/// written only by the [`ClusterManager`](crate::cluster::manager::ClusterManager)
/// and is never read back from serialized input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Human-readable identity, expected to be unique within a registry
    pub name: String,

    pub x: f64,
    pub y: f64,

    /// Remaining energy in percent (0-100)
    pub energy: f64,

    /// Utilization in percent (0-100)
    pub load: f64,

    /// Processing rate units
    pub capacity: u32,

    #[serde(skip_deserializing)]
    cluster_id: Option<ClusterId>,

    #[serde(skip_deserializing)]
    is_head: bool,

    /// Registry indices of the cluster members, populated only on heads
    #[serde(skip_deserializing)]
    members: Vec<DeviceIndex>,
}

impl Device {
    /// Create an unclustered device
    pub fn new(
        name: impl Into<String>,
        x: f64,
        y: f64,
        energy: f64,
        load: f64,
        capacity: u32,
    ) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            energy,
            load,
            capacity,
            cluster_id: None,
            is_head: false,
            members: Vec::new(),
        }
    }

    /// Check attributes against their ranges: finite position, energy and load
    /// within [0, 100], positive capacity
    pub fn validate(&self) -> Result<(), ClusterError> {
        let invalid = |reason: String| ClusterError::InvalidDevice {
            name: self.name.clone(),
            reason,
        };

        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(invalid(format!("position ({}, {}) is not finite", self.x, self.y)));
        }
        if !(0.0..=100.0).contains(&self.energy) {
            return Err(invalid(format!("energy {} outside [0, 100]", self.energy)));
        }
        if !(0.0..=100.0).contains(&self.load) {
            return Err(invalid(format!("load {} outside [0, 100]", self.load)));
        }
        if self.capacity == 0 {
            return Err(invalid("capacity must be positive".to_string()));
        }
        Ok(())
    }

    /// Euclidean distance to another device
    pub fn distance_to(&self, other: &Device) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn cluster_id(&self) -> Option<ClusterId> {
        self.cluster_id
    }

    pub fn is_head(&self) -> bool {
        self.is_head
    }

    /// Members of this device's cluster (head included); empty unless this is a head
    pub fn members(&self) -> &[DeviceIndex] {
        &self.members
    }

    pub(crate) fn assign_cluster(&mut self, cluster_id: ClusterId) {
        self.cluster_id = Some(cluster_id);
    }

    pub(crate) fn promote(&mut self, members: Vec<DeviceIndex>) {
        self.is_head = true;
        self.members = members;
    }

    pub(crate) fn demote(&mut self) {
        self.is_head = false;
        self.members.clear();
    }
}
