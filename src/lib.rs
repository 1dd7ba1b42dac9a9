//! Procedural aurora background: value noise, a seeded star stream and the
//! per-frame geometry built from them.
//!
//! Everything is deterministic. Time enters only through [`FrameClock`],
//! which the caller owns and ticks.

pub mod aurora;
pub mod clock;
pub mod config;
pub mod logger;
pub mod noise_generator;
pub mod presets;
pub mod scene;
pub mod seeded_rng;
pub mod starfield;

pub use crate::aurora::{AuroraLayer, AuroraPath, Point, Rgba, Size};
pub use crate::clock::FrameClock;
pub use crate::config::AuroraConfig;
pub use crate::noise_generator::{fractal_noise, hash, value_noise, FractalNoise};
pub use crate::presets::{Preset, Presets};
pub use crate::scene::{Frame, LayerFrame, Scene, StarFrame};
pub use crate::seeded_rng::SeededStreamGenerator;
pub use crate::starfield::{Star, StarField};
