/// Light output tied to the hover state.
///
/// The inner point light runs at twice the emissive intensity and the bloom pass
/// sits half a unit above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub emissive_intensity: f32,
    pub inner_light_intensity: f32,
    pub bloom_strength: f32,
}

impl Glow {
    pub fn new(intensity: f32) -> Self {
        Self {
            emissive_intensity: intensity,
            inner_light_intensity: intensity * 2.0,
            bloom_strength: 0.5 + intensity,
        }
    }
}

/// Colours for one frame of the slow RGB pulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub inner_light: [f32; 3],
}

impl Pulse {
    /// Each channel is a sine at its own frequency, mapped into `[0, 1]`.
    pub fn at(seconds: f64) -> Self {
        let wave = |frequency: f64| ((seconds * frequency).sin() * 0.5 + 0.5) as f32;
        let (r, g, b) = (wave(0.3), wave(0.5), wave(0.7));

        Self {
            color: [r * 0.5, g * 0.5, b],
            emissive: [r * 0.2, g * 0.2, b * 0.5],
            inner_light: [r, g, b],
        }
    }
}
