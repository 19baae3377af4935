//! Seed management for map generation
//!
//! Provides separate seeds for each generation system, so one master seed
//! reproduces a whole map while individual systems can still be varied.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for all generation systems.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Height noise
    pub heightmap: u64,
    /// Heat noise
    pub heat: u64,
    /// Moisture noise
    pub moisture: u64,
    /// River source selection and widths
    pub rivers: u64,
}

impl WorldSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            heightmap: derive_seed(master, "heightmap"),
            heat: derive_seed(master, "heat"),
            moisture: derive_seed(master, "moisture"),
            rivers: derive_seed(master, "rivers"),
        }
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u64) -> WorldSeedsBuilder {
        WorldSeedsBuilder::new(master)
    }

    /// Noise generators take 32-bit seeds.
    pub fn noise_seed(seed: u64) -> u32 {
        (seed ^ (seed >> 32)) as u32
    }
}

/// Builder for customizing individual seeds while deriving others from master
pub struct WorldSeedsBuilder {
    seeds: WorldSeeds,
}

impl WorldSeedsBuilder {
    pub fn new(master: u64) -> Self {
        Self {
            seeds: WorldSeeds::from_master(master),
        }
    }

    /// Override the heightmap seed
    pub fn heightmap(mut self, seed: u64) -> Self {
        self.seeds.heightmap = seed;
        self
    }

    /// Override the heat seed
    pub fn heat(mut self, seed: u64) -> Self {
        self.seeds.heat = seed;
        self
    }

    /// Override the moisture seed
    pub fn moisture(mut self, seed: u64) -> Self {
        self.seeds.moisture = seed;
        self
    }

    /// Override the rivers seed
    pub fn rivers(mut self, seed: u64) -> Self {
        self.seeds.rivers = seed;
        self
    }

    pub fn build(self) -> WorldSeeds {
        self.seeds
    }
}

/// Derive a sub-seed from a master seed and a system name.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for WorldSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WorldSeeds {{ master: {}, heightmap: {}, heat: {}, moisture: {}, rivers: {} }}",
            self.master, self.heightmap, self.heat, self.moisture, self.rivers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        let seeds1 = WorldSeeds::from_master(12345);
        let seeds2 = WorldSeeds::from_master(12345);
        assert_eq!(seeds1, seeds2);
    }

    #[test]
    fn test_different_systems_get_different_seeds() {
        let seeds = WorldSeeds::from_master(12345);
        assert_ne!(seeds.heightmap, seeds.heat);
        assert_ne!(seeds.heat, seeds.moisture);
        assert_ne!(seeds.moisture, seeds.rivers);
    }

    #[test]
    fn test_builder_overrides_one_system() {
        let base = WorldSeeds::from_master(7);
        let custom = WorldSeeds::builder(7).rivers(99).build();
        assert_eq!(custom.rivers, 99);
        assert_eq!(custom.heightmap, base.heightmap);
        assert_eq!(custom.master, 7);
    }
}
