//! Coherent noise sampled on a 4D torus embedding
//!
//! Each grid axis is mapped onto its own circle, so the two circles together
//! form a torus in 4D noise space. Cells on opposite edges of the grid land
//! next to each other on the circle and the resulting field tiles seamlessly.

use std::f64::consts::{PI, TAU};

use noise::{
    BasicMulti, Billow, Fbm, HybridMulti, MultiFractal, NoiseFn, OpenSimplex, Perlin,
    RidgedMulti, Seedable, Simplex, Value,
};

use crate::error::ConfigError;

/// How octaves are combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum FractalType {
    /// Plain fractional Brownian motion
    Fbm,
    /// Multifractal: octave contribution scales with the running value
    #[default]
    Multi,
    Billow,
    RidgedMulti,
    HybridMulti,
}

/// The per-octave noise function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum BasisType {
    Perlin,
    #[default]
    Simplex,
    OpenSimplex,
    Value,
}

/// Parameters for a wrapped fractal noise field
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub fractal: FractalType,
    pub basis: BasisType,
    /// Number of noise octaves
    pub octaves: usize,
    /// Base frequency (lower = larger features)
    pub frequency: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
    /// Amplitude decay per octave (0.0-1.0)
    pub persistence: f64,
    /// Radius of each sampling circle in noise space
    pub radius: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            fractal: FractalType::Multi,
            basis: BasisType::Simplex,
            octaves: 6,
            frequency: 1.25,
            lacunarity: 2.0,
            persistence: 0.5,
            // A noise domain two units wide, bent into a circle
            radius: 1.0 / PI,
        }
    }
}

impl NoiseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.octaves == 0 {
            return Err(ConfigError::ZeroOctaves);
        }
        if !(self.frequency > 0.0) {
            return Err(ConfigError::NonPositiveFrequency(self.frequency));
        }
        for (name, value) in [
            ("radius", self.radius),
            ("lacunarity", self.lacunarity),
            ("persistence", self.persistence),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidNoiseParameter { name, value });
            }
        }
        Ok(())
    }
}

/// A seeded fractal noise function plus the torus radius it is sampled on.
pub struct NoiseField {
    source: Box<dyn NoiseFn<f64, 4>>,
    radius: f64,
}

impl NoiseField {
    pub fn new(config: &NoiseConfig, seed: u32) -> Self {
        let source = match config.basis {
            BasisType::Perlin => build_fractal::<Perlin>(config, seed),
            BasisType::Simplex => build_fractal::<Simplex>(config, seed),
            BasisType::OpenSimplex => build_fractal::<OpenSimplex>(config, seed),
            BasisType::Value => build_fractal::<Value>(config, seed),
        };
        Self {
            source,
            radius: config.radius,
        }
    }

    /// Wrap an arbitrary 4D noise function. Mostly useful for tests that
    /// need a known field.
    pub fn from_fn(source: impl NoiseFn<f64, 4> + 'static, radius: f64) -> Self {
        Self {
            source: Box::new(source),
            radius,
        }
    }

    /// Sample at wrapped parameters `s`, `t` in [0, 1).
    ///
    /// `s` runs around the first circle (x/z plane) and `t` around the second
    /// (y/w plane), so `s = 0` and `s = 1` are the same point.
    pub fn sample(&self, s: f64, t: f64) -> f64 {
        self.source.get(torus_point(s, t, self.radius))
    }
}

/// Project grid parameters onto two circles in independent planes.
pub fn torus_point(s: f64, t: f64, radius: f64) -> [f64; 4] {
    let (sin_s, cos_s) = (s * TAU).sin_cos();
    let (sin_t, cos_t) = (t * TAU).sin_cos();
    [cos_s * radius, cos_t * radius, sin_s * radius, sin_t * radius]
}

fn build_fractal<T>(config: &NoiseConfig, seed: u32) -> Box<dyn NoiseFn<f64, 4>>
where
    T: Default + Seedable + NoiseFn<f64, 4> + 'static,
{
    match config.fractal {
        FractalType::Fbm => Box::new(
            Fbm::<T>::new(seed)
                .set_octaves(config.octaves)
                .set_frequency(config.frequency)
                .set_lacunarity(config.lacunarity)
                .set_persistence(config.persistence),
        ),
        FractalType::Multi => Box::new(
            BasicMulti::<T>::new(seed)
                .set_octaves(config.octaves)
                .set_frequency(config.frequency)
                .set_lacunarity(config.lacunarity)
                .set_persistence(config.persistence),
        ),
        FractalType::Billow => Box::new(
            Billow::<T>::new(seed)
                .set_octaves(config.octaves)
                .set_frequency(config.frequency)
                .set_lacunarity(config.lacunarity)
                .set_persistence(config.persistence),
        ),
        FractalType::RidgedMulti => Box::new(
            RidgedMulti::<T>::new(seed)
                .set_octaves(config.octaves)
                .set_frequency(config.frequency)
                .set_lacunarity(config.lacunarity)
                .set_persistence(config.persistence),
        ),
        FractalType::HybridMulti => Box::new(
            HybridMulti::<T>::new(seed)
                .set_octaves(config.octaves)
                .set_frequency(config.frequency)
                .set_lacunarity(config.lacunarity)
                .set_persistence(config.persistence),
        ),
    }
}
