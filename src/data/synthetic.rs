//! Seeded synthetic fog device populations

use crate::config::GeneratorConfig;
use crate::device::Device;
use crate::error::ClusterError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a reproducible device population
///
/// Devices are named `FogDevice_<i>` and placed uniformly in a square of side
/// `config.area`. The same config always yields the same population.
pub fn generate_devices(config: &GeneratorConfig) -> Result<Vec<Device>, ClusterError> {
    config.validate()?;

    log::info!(
        "Generating {} fog devices (seed: {})",
        config.device_count,
        config.seed
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut devices = Vec::with_capacity(config.device_count);

    for i in 0..config.device_count {
        let x = rng.gen_range(0.0..config.area);
        let y = rng.gen_range(0.0..config.area);
        let energy = rng.gen_range(config.energy.clone());
        let load = rng.gen_range(config.load.clone());
        let capacity = rng.gen_range(config.capacity.clone());

        let device = Device::new(format!("FogDevice_{}", i), x, y, energy, load, capacity);
        log::debug!(
            "Created {} at ({:.2}, {:.2}) - energy: {:.2}%, load: {:.2}%, capacity: {}",
            device.name,
            x,
            y,
            energy,
            load,
            capacity
        );
        devices.push(device);
    }

    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_population() {
        let config = GeneratorConfig::new(15, 7);
        assert_eq!(generate_devices(&config).unwrap(), generate_devices(&config).unwrap());
    }

    #[test]
    fn different_seed_differs() {
        let a = generate_devices(&GeneratorConfig::new(10, 1)).unwrap();
        let b = generate_devices(&GeneratorConfig::new(10, 2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn attributes_stay_in_range() {
        let config = GeneratorConfig::default();
        let devices = generate_devices(&config).unwrap();

        assert_eq!(devices.len(), 20);
        assert_eq!(devices[3].name, "FogDevice_3");
        for device in &devices {
            assert!((0.0..1000.0).contains(&device.x));
            assert!((0.0..1000.0).contains(&device.y));
            assert!(config.energy.contains(&device.energy));
            assert!(config.load.contains(&device.load));
            assert!(config.capacity.contains(&device.capacity));
            assert_eq!(device.cluster_id(), None);
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GeneratorConfig {
            area: 0.0,
            ..Default::default()
        };
        assert!(generate_devices(&config).is_err());
    }
}
