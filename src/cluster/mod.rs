//! Cluster formation module

pub mod formation;
pub mod manager;
pub mod metrics;

pub use manager::{ClusterManager, FormationState};

use crate::device::{ClusterId, Device, DeviceIndex};
use serde::Serialize;

/// A formed cluster, derived from its head and the head's member list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Formation-order identifier, starting at 1
    pub id: ClusterId,

    /// Registry index of the elected head
    pub head: DeviceIndex,

    /// Registry indices of all members (head included), seed first
    pub members: Vec<DeviceIndex>,

    /// Size of the cluster
    pub size: usize,

    /// Mean distance from the head to the other members (0 for singletons)
    pub avg_head_distance: f64,
}

impl Cluster {
    /// Build the view of the cluster headed by `head`, if that device is a head
    pub fn from_head(devices: &[Device], head: DeviceIndex) -> Option<Self> {
        let device = devices.get(head as usize)?;
        if !device.is_head() {
            return None;
        }

        let members = device.members().to_vec();
        Some(Self {
            id: device.cluster_id()?,
            head,
            size: members.len(),
            avg_head_distance: metrics::avg_head_distance(devices, head, &members),
            members,
        })
    }
}
