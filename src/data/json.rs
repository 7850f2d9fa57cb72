//! JSON device list loading

use anyhow::Result;
use crate::device::Device;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a JSON array of devices
///
/// Each entry needs `name`, `x`, `y`, `energy`, `load` and `capacity`; any
/// cluster state in the file is ignored. Entries with out-of-range attributes
/// reject the whole file.
pub fn load_devices(path: impl AsRef<Path>) -> Result<Vec<Device>> {
    let path = path.as_ref();
    log::info!("Reading device list: {}", path.display());

    if !path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }

    let reader = BufReader::new(File::open(path)?);
    let devices: Vec<Device> = serde_json::from_reader(reader)?;

    for (i, device) in devices.iter().enumerate() {
        device
            .validate()
            .map_err(|e| anyhow::anyhow!("{}: entry {}: {}", path.display(), i, e))?;
    }

    log::info!("Loaded {} devices", devices.len());

    Ok(devices)
}
