use glam::{Vec2, Vec3};
use log::{debug, info};

use crate::{
    camera::Camera,
    config::{OrbitConfig, SceneConfig, hex_to_rgb},
    glow::{Glow, Pulse},
    input::PointerEvent,
};

/// Everything the animation loop reads or writes between frames.
pub struct RenderContext {
    config: SceneConfig,
    camera: Camera,
    viewport: Vec2,
    hovering: bool,
    dragging: bool,
    auto_rotate: bool,
    rotation_y: f32,
    glow: Glow,
}

/// Values the binding copies onto the scene graph before rendering a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub rotation_y: f32,
    pub glow: Glow,
    pub pulse: Pulse,
}

/// Everything the scene graph needs once, before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSetup {
    pub camera_position: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub radius: f32,
    pub segments: (u32, u32),
    pub base_color: [f32; 3],
    pub emissive_color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub glow: Glow,

    pub inner_light_color: [f32; 3],
    pub inner_light_range: f32,
    pub ambient_color: [f32; 3],
    pub directional_intensity: f32,

    pub bloom_radius: f32,
    pub bloom_threshold: f32,
    pub orbit: OrbitConfig,
}

impl RenderContext {
    pub fn new(config: SceneConfig, viewport: Vec2) -> Self {
        let camera = Camera::new(
            config.fov_degrees,
            config.camera_distance,
            config.near,
            config.far,
            viewport,
        );
        let glow = Glow::new(config.rest_intensity);

        Self {
            config,
            camera,
            viewport,
            hovering: false,
            dragging: false,
            auto_rotate: true,
            rotation_y: 0.0,
            glow,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn auto_rotates(&self) -> bool {
        self.auto_rotate
    }

    pub fn glow(&self) -> Glow {
        self.glow
    }

    /// Startup values for the scene graph. Before any hover, the inner light and bloom
    /// keep their configured levels rather than the ones derived from the rest glow.
    pub fn setup(&self) -> SceneSetup {
        let config = &self.config;
        info!(
            "sphere r={} at distance {}, {}x{} segments",
            config.radius, config.camera_distance, config.width_segments, config.height_segments
        );

        SceneSetup {
            camera_position: self.camera.position(),
            fov_degrees: self.camera.fov_degrees,
            aspect: self.camera.aspect,
            near: self.camera.near,
            far: self.camera.far,
            radius: config.radius,
            segments: (config.width_segments, config.height_segments),
            base_color: hex_to_rgb(config.base_color),
            emissive_color: hex_to_rgb(config.emissive_color),
            metalness: config.metalness,
            roughness: config.roughness,
            glow: Glow {
                emissive_intensity: config.rest_intensity,
                inner_light_intensity: config.inner_light_intensity,
                bloom_strength: config.bloom_strength,
            },
            inner_light_color: hex_to_rgb(config.inner_light_color),
            inner_light_range: config.inner_light_range,
            ambient_color: hex_to_rgb(config.ambient_color),
            directional_intensity: config.directional_intensity,
            bloom_radius: config.bloom_radius,
            bloom_threshold: config.bloom_threshold,
            orbit: config.orbit,
        }
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.camera.resize(viewport);
    }

    /// Apply one pointer event. Returns true when the hover state flipped.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::MouseDown | PointerEvent::TouchStart { .. } => self.set_dragging(true),
            PointerEvent::MouseUp | PointerEvent::MouseLeave | PointerEvent::TouchEnd => {
                self.set_dragging(false)
            }
            PointerEvent::MouseMove { .. } | PointerEvent::TouchMove { .. } => {}
        }

        match event.hover_point() {
            Some((x, y)) => self.update_hover(Vec2::new(x, y)),
            None => false,
        }
    }

    /// Advance one animation frame. `seconds` is wall-clock time driving the colour pulse.
    pub fn tick(&mut self, seconds: f64) -> Frame {
        if self.auto_rotate && !self.dragging {
            self.rotation_y += self.config.auto_rotate_step;
        }

        Frame {
            rotation_y: self.rotation_y,
            glow: self.glow,
            pulse: Pulse::at(seconds),
        }
    }

    fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        self.auto_rotate = !dragging;
    }

    fn update_hover(&mut self, pointer: Vec2) -> bool {
        let hovering = self
            .camera
            .hits_sphere(pointer, self.viewport, self.config.radius);

        if hovering == self.hovering {
            return false;
        }

        self.hovering = hovering;
        let intensity = if hovering {
            self.config.hover_intensity
        } else {
            self.config.rest_intensity
        };
        self.glow = Glow::new(intensity);
        debug!("hover {hovering}, glow {intensity}");

        true
    }
}
