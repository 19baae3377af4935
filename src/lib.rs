//! Seamless tile map generation library
//!
//! Noise heightfield -> height bands -> land/water regions -> rivers ->
//! adjacency bitmasks, all on a map that wraps on both axes.

pub mod bitmask;
pub mod classify;
pub mod climate;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod heightmap;
pub mod logging;
pub mod noise_field;
pub mod regions;
pub mod rivers;
pub mod seeds;
pub mod tile;
pub mod tilemap;
pub mod world;

pub use config::GeneratorConfig;
pub use error::{ConfigError, GenError};
pub use world::{Generator, World};
