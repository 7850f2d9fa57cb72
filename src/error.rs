//! Error types for cluster formation

use crate::device::DeviceIndex;
use thiserror::Error;

/// Errors raised by configuration, formation and cluster queries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// Radius threshold must be finite and strictly positive
    #[error("invalid radius threshold {0}: must be finite and > 0")]
    InvalidRadius(f64),

    /// Score weights must be finite, non-negative and not all zero
    #[error("invalid score weights (alpha={alpha}, beta={beta}, gamma={gamma})")]
    InvalidWeights { alpha: f64, beta: f64, gamma: f64 },

    /// Synthetic generator ranges are empty or inverted
    #[error("invalid generator configuration: {0}")]
    InvalidGenerator(String),

    /// Device attributes outside their documented ranges
    #[error("invalid device {name}: {reason}")]
    InvalidDevice { name: String, reason: String },

    #[error("clusters have already been formed")]
    AlreadyFormed,

    #[error("clusters have not been formed yet")]
    NotFormed,

    #[error("no device with index {0}")]
    UnknownDevice(DeviceIndex),

    #[error("device {0} does not belong to any cluster")]
    DeviceNotClustered(String),
}
