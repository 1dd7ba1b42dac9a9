use crate::aurora::{AuroraLayer, AuroraPath, HorizonGlow, Point, Ridge, Rgba, Size};
use crate::clock::FrameClock;
use crate::config::AuroraConfig;
use crate::starfield::{Star, StarField};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerFrame {
    pub path: AuroraPath,
    pub opacity: f64,
    pub offset: Point,
    pub blur: f64,
    pub colors: [Rgba; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarFrame {
    pub star: Star,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub number: u64,
    pub time: f64,
    pub size: Size,
    pub layers: Vec<LayerFrame>,
    pub stars: Vec<StarFrame>,
    pub glow: HorizonGlow,
    pub ridge: Ridge,
}

pub struct Scene {
    config: AuroraConfig,
    clock: FrameClock,
    star_field: Option<StarField>,
}

impl Scene {
    pub fn new(config: AuroraConfig) -> Self {
        let clock = FrameClock::new(config.frame_interval());
        Self {
            config,
            clock,
            star_field: None,
        }
    }

    pub fn config(&self) -> &AuroraConfig {
        &self.config
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn advance(&mut self) -> u64 {
        let frame = self.clock.tick();
        tracing::trace!(frame, "advance");
        frame
    }

    pub fn reset(&mut self) {
        self.clock.reset();
    }

    /// Star layout for `size`, rebuilt only when the size changes
    pub fn star_field(&mut self, size: Size) -> &StarField {
        let field = match self.star_field.take() {
            Some(field) if field.size == size => field,
            _ => {
                let [lo, hi] = self.config.star_radius;
                StarField::layout(
                    self.config.star_seed,
                    self.config.star_count,
                    size,
                    self.config.star_band,
                    lo..=hi,
                )
            }
        };

        self.star_field.insert(field)
    }

    pub fn frame(&mut self, size: Size) -> Frame {
        let time = self.clock.time();
        let seconds = self.clock.seconds();
        let twinkle_rate = self.config.twinkle_rate;

        let stars = self
            .star_field(size)
            .stars
            .iter()
            .map(|star| StarFrame {
                star: *star,
                opacity: star.opacity(seconds, twinkle_rate),
            })
            .collect();

        let layers = self
            .config
            .layers
            .iter()
            .enumerate()
            .map(|(index, layer)| LayerFrame {
                path: layer.build_path(size, time),
                opacity: AuroraLayer::stacked_opacity(index),
                offset: AuroraLayer::stacked_offset(index),
                blur: layer.blur,
                colors: layer.colors,
            })
            .collect();

        tracing::trace!(frame = self.clock.frame(), time, "frame");

        Frame {
            number: self.clock.frame(),
            time,
            size,
            layers,
            stars,
            glow: HorizonGlow::new(size),
            ridge: Ridge::new(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::TraceRecorder;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn frame_has_one_entry_per_layer_and_star() {
        let mut scene = Scene::new(AuroraConfig::default());
        let frame = scene.frame(Size::new(390.0, 844.0));
        assert_eq!(frame.number, 0);
        assert_eq!(frame.layers.len(), 3);
        assert_eq!(frame.stars.len(), 220);
        assert!((frame.layers[1].opacity - 0.78).abs() < 1e-12);
        assert_eq!(frame.layers[1].offset, Point::new(6.0, -8.0));
        assert_eq!(frame.ridge, Ridge::new(Size::new(390.0, 844.0)));
        assert!(frame.glow.top < frame.glow.bottom);
    }

    #[test]
    fn stars_hold_still_while_curves_move() {
        let size = Size::new(300.0, 600.0);
        let mut scene = Scene::new(AuroraConfig::default());
        let first = scene.frame(size);
        scene.advance();
        let second = scene.frame(size);

        assert_eq!(second.number, 1);
        assert_eq!(second.time, 1.0);
        for (a, b) in first.stars.iter().zip(&second.stars) {
            assert_eq!(a.star, b.star);
        }
        assert_ne!(first.stars[0].opacity, second.stars[0].opacity);
        assert_ne!(first.layers[0].path, second.layers[0].path);
    }

    #[test]
    fn same_config_same_frames() {
        let size = Size::new(200.0, 400.0);
        let mut a = Scene::new(AuroraConfig::default());
        let mut b = Scene::new(AuroraConfig::default());
        for _ in 0..5 {
            a.advance();
            b.advance();
        }
        assert_eq!(a.frame(size), b.frame(size));
    }

    #[test]
    fn star_layout_is_cached_per_size() {
        let recorder = TraceRecorder::new().with_level(Level::DEBUG);
        let subscriber = tracing_subscriber::registry().with(recorder.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut scene = Scene::new(AuroraConfig::default());
            scene.frame(Size::new(100.0, 100.0));
            scene.advance();
            scene.frame(Size::new(100.0, 100.0));
            scene.frame(Size::new(120.0, 100.0));
        });

        assert_eq!(recorder.with_message("star layout").len(), 2);
    }

    #[test]
    fn reset_rewinds_the_clock() {
        let mut scene = Scene::new(AuroraConfig::default());
        scene.advance();
        scene.advance();
        scene.reset();
        assert_eq!(scene.clock().frame(), 0);
        assert_eq!(scene.config().star_seed, 42);
    }
}
