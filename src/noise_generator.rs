const HASH_PRIME_1: i64 = 374_761_393;
const HASH_PRIME_2: i64 = 1_274_126_177;

const CORNER_MASK: i64 = 0xffff;

#[inline]
pub fn hash(i: i64) -> i64 {
    let h = i.wrapping_mul(HASH_PRIME_1);
    (h ^ (h >> 13)).wrapping_mul(HASH_PRIME_2)
}

#[inline]
pub fn corner_value(i: i64) -> f64 {
    (hash(i) & CORNER_MASK) as f64 / CORNER_MASK as f64
}

#[inline(always)]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

// f²(3 - 2f)
#[inline(always)]
pub fn smoothstep(f: f64) -> f64 {
    f * f * (3.0 - 2.0 * f)
}

// Huge inputs saturate the cell index and lose detail
pub fn value_noise(x: f64) -> f64 {
    let cell = x.floor();
    let offset = x - cell;
    let i = cell as i64;

    let v0 = corner_value(i);
    let v1 = corner_value(i.wrapping_add(1));

    lerp(v0, v1, smoothstep(offset))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalNoise {
    pub octaves: u32,
    pub lacunarity: f64,
    pub gain: f64,
    pub scale: f64,
}

impl Default for FractalNoise {
    fn default() -> Self {
        Self {
            octaves: 5,
            lacunarity: 2.0,
            gain: 0.5,
            scale: 0.9,
        }
    }
}

impl FractalNoise {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_octaves(self, octaves: u32) -> Self {
        Self { octaves, ..self }
    }

    pub fn octave_amplitudes(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.octaves).scan(1.0, move |amplitude, _| {
            let current = *amplitude;
            *amplitude *= self.gain;
            Some(current)
        })
    }

    pub fn sample(&self, x: f64, t: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;

        for _ in 0..self.octaves {
            total += amplitude * value_noise(x * frequency + t);
            frequency *= self.lacunarity;
            amplitude *= self.gain;
        }

        (total - 0.5) * 2.0 * self.scale
    }
}

/// Five octaves. The floor is -0.9 and the octave weights put the ceiling
/// at 2.5875.
pub fn fractal_noise(x: f64, t: f64) -> f64 {
    FractalNoise::default().sample(x, t)
}
