use std::ops::RangeInclusive;

use crate::aurora::Size;
use crate::seeded_rng::SeededStreamGenerator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Star {
    pub fn opacity(&self, seconds: f64, rate: f64) -> f64 {
        twinkle(self.index, seconds, rate)
    }
}

pub fn twinkle(index: usize, seconds: f64, rate: f64) -> f64 {
    let shine = 0.6 + 0.4 * (seconds * rate + index as f64).sin();
    0.5 + 0.5 * shine
}

#[derive(Debug, Clone, PartialEq)]
pub struct StarField {
    pub seed: u64,
    pub size: Size,
    pub stars: Vec<Star>,
}

impl StarField {
    /// Stars stay within the top `band` fraction of the height.
    pub fn layout(
        seed: u64,
        count: usize,
        size: Size,
        band: f64,
        radius: RangeInclusive<f64>,
    ) -> Self {
        let mut rng = SeededStreamGenerator::new(seed);
        let stars = (0..count)
            .map(|index| {
                let x = rng.next_double() * size.width;
                let y = rng.next_double() * size.height * band;
                let radius = rng.next_double_in(radius.clone());
                Star { index, x, y, radius }
            })
            .collect();

        tracing::debug!(seed, count, width = size.width, height = size.height, "star layout");

        Self { seed, size, stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
