//! Distance- and energy-aware clustering of fog/edge compute devices

pub mod cluster;
pub mod config;
pub mod data;
pub mod device;
pub mod error;
pub mod storage;

pub use cluster::{Cluster, ClusterManager, FormationState};
pub use config::{ClusterConfig, GeneratorConfig, ScoreWeights};
pub use device::{ClusterId, Device, DeviceIndex, DeviceRegistry};
pub use error::ClusterError;
