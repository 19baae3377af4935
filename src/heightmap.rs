//! Height field sampling
//!
//! Drives a `NoiseField` across the grid and records the observed range so the
//! classifier can normalize without a second pass.

use crate::noise_field::NoiseField;
use crate::tilemap::Tilemap;

/// Raw noise samples plus the running min/max seen while sampling.
///
/// Consumed once by classification.
#[derive(Clone, Debug)]
pub struct HeightField {
    pub data: Tilemap<f32>,
    pub min: f32,
    pub max: f32,
}

impl HeightField {
    /// Build a field from existing samples, computing the range.
    pub fn from_tilemap(data: Tilemap<f32>) -> Self {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for (_, _, &h) in data.iter() {
            min = min.min(h);
            max = max.max(h);
        }
        Self { data, min, max }
    }

    pub fn width(&self) -> usize {
        self.data.width
    }

    pub fn height(&self) -> usize {
        self.data.height
    }

    pub fn range(&self) -> f32 {
        self.max - self.min
    }

    /// True when every sample is identical and normalization is undefined.
    pub fn is_flat(&self) -> bool {
        !(self.range() > 0.0)
    }

    /// Normalize a sample into [0, 1] against the observed range.
    /// A flat field normalizes to the midpoint.
    pub fn normalize(&self, value: f32) -> f32 {
        if self.is_flat() {
            return 0.5;
        }
        ((value - self.min) / self.range()).clamp(0.0, 1.0)
    }
}

/// Sample `noise` once per cell on the wrapped torus embedding.
pub fn sample_height_field(width: usize, height: usize, noise: &NoiseField) -> HeightField {
    let mut data = Tilemap::new_with(width, height, 0.0f32);
    let mut min = f32::MAX;
    let mut max = f32::MIN;

    for y in 0..height {
        for x in 0..width {
            let s = x as f64 / width as f64;
            let t = y as f64 / height as f64;
            let value = noise.sample(s, t) as f32;

            max = max.max(value);
            min = min.min(value);

            data.set(x, y, value);
        }
    }

    HeightField { data, min, max }
}
