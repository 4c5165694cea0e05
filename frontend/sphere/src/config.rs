/// Scene constants for the glowing sphere.
/// [`RenderContext::setup`](crate::RenderContext::setup) turns them into startup values.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Camera distance from the sphere center along +Z.
    pub camera_distance: f32,

    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,

    pub base_color: u32,
    pub emissive_color: u32,
    pub metalness: f32,
    pub roughness: f32,

    /// Emissive intensity while the pointer is away.
    pub rest_intensity: f32,
    /// Emissive intensity while the pointer is over the sphere.
    pub hover_intensity: f32,

    pub inner_light_color: u32,
    pub inner_light_intensity: f32,
    pub inner_light_range: f32,

    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub bloom_threshold: f32,

    pub ambient_color: u32,
    pub directional_intensity: f32,

    pub orbit: OrbitConfig,

    /// Radians added to the Y rotation per frame while auto-rotating.
    pub auto_rotate_step: f32,
}

/// Orbit controls: drag to rotate the camera around the sphere, no zoom or pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitConfig {
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub enable_zoom: bool,
    pub enable_pan: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 5.0,
            radius: 2.0,
            width_segments: 64,
            height_segments: 64,
            base_color: 0x0088ff,
            emissive_color: 0x0044aa,
            metalness: 0.3,
            roughness: 0.4,
            rest_intensity: 0.5,
            hover_intensity: 1.0,
            inner_light_color: 0x0088ff,
            inner_light_intensity: 1.0,
            inner_light_range: 10.0,
            bloom_strength: 1.5,
            bloom_radius: 0.4,
            bloom_threshold: 0.85,
            ambient_color: 0x404040,
            directional_intensity: 1.0,
            orbit: OrbitConfig {
                damping_factor: 0.05,
                rotate_speed: 0.5,
                enable_zoom: false,
                enable_pan: false,
            },
            auto_rotate_step: 0.005,
        }
    }
}

/// `0xRRGGBB` to `[r, g, b]` in `[0, 1]`.
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
