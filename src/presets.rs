use crate::aurora::AuroraLayer;
use crate::config::AuroraConfig;

#[derive(Debug, Clone)]
pub struct Preset {
    pub name: String,
    pub config: AuroraConfig,
}

impl Preset {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            config: AuroraConfig {
                layers: Vec::new(),
                ..AuroraConfig::default()
            },
        }
    }

    pub fn add_layer(mut self, layer: AuroraLayer) -> Self {
        self.config.layers.push(layer);
        self
    }

    pub fn stars(mut self, seed: u64, count: usize) -> Self {
        self.config.star_seed = seed;
        self.config.star_count = count;
        self
    }

    pub fn twinkle_rate(mut self, rate: f64) -> Self {
        self.config.twinkle_rate = rate;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Presets(pub Vec<Preset>);

impl Presets {
    pub fn init() -> Self {
        let borealis = AuroraConfig::default();

        Self(vec![
            Preset {
                name: "Borealis".to_string(),
                config: borealis.clone(),
            },
            // Low, slow curtains on a dense sky
            Preset::new("Still Night")
                .stars(7, 320)
                .twinkle_rate(0.4)
                .add_layer(AuroraLayer {
                    amplitude: 60.0,
                    speed: 0.08,
                    vertical_offset: 40.0,
                    ..borealis.layers[0].clone()
                })
                .add_layer(AuroraLayer {
                    amplitude: 45.0,
                    speed: 0.11,
                    vertical_offset: 90.0,
                    ..borealis.layers[1].clone()
                }),
            Preset::new("Storm")
                .stars(42, 120)
                .twinkle_rate(1.6)
                .add_layer(AuroraLayer {
                    amplitude: 200.0,
                    speed: 0.45,
                    frequency: 0.006,
                    ..borealis.layers[0].clone()
                })
                .add_layer(AuroraLayer {
                    amplitude: 170.0,
                    speed: 0.5,
                    frequency: 0.007,
                    ..borealis.layers[1].clone()
                })
                .add_layer(AuroraLayer {
                    amplitude: 130.0,
                    speed: 0.6,
                    frequency: 0.008,
                    ..borealis.layers[2].clone()
                }),
        ])
    }

    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.0
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|preset| preset.name.as_str()).collect()
    }
}
