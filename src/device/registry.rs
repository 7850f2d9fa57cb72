//! Insertion-ordered device container

use crate::device::{Device, DeviceIndex};

/// Ordered population of devices owned by one cluster manager
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            devices: Vec::with_capacity(capacity),
        }
    }

    /// Append a device and return its index
    ///
    /// Names are not checked for uniqueness.
    pub fn add_device(&mut self, device: Device) -> DeviceIndex {
        let idx = self.devices.len() as DeviceIndex;
        self.devices.push(device);
        idx
    }

    /// All devices in insertion order
    pub fn all_devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn get(&self, idx: DeviceIndex) -> Option<&Device> {
        self.devices.get(idx as usize)
    }

    /// First device with the given name, in insertion order
    pub fn find_by_name(&self, name: &str) -> Option<DeviceIndex> {
        self.devices
            .iter()
            .position(|device| device.name == name)
            .map(|pos| pos as DeviceIndex)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub(crate) fn devices_mut(&mut self) -> &mut [Device] {
        &mut self.devices
    }
}

impl FromIterator<Device> for DeviceRegistry {
    fn from_iter<I: IntoIterator<Item = Device>>(iter: I) -> Self {
        Self {
            devices: iter.into_iter().collect(),
        }
    }
}
