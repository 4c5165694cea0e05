use glam::{Vec2, Vec3};

/// Perspective camera orbiting the origin at a fixed distance.
///
/// Orbit controls only rotate the camera around the sphere's center, and the sphere is
/// symmetric, so picking can always use the camera's rest pose on +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub distance: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(fov_degrees: f32, distance: f32, near: f32, far: f32, viewport: Vec2) -> Self {
        let mut camera = Self {
            fov_degrees,
            aspect: 1.0,
            distance,
            near,
            far,
        };
        camera.resize(viewport);
        camera
    }

    /// Keep the aspect ratio in step with the viewport.
    pub fn resize(&mut self, viewport: Vec2) {
        if viewport.x > 0.0 && viewport.y > 0.0 {
            self.aspect = viewport.x / viewport.y;
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    /// Viewport pixel to normalized device coordinates, Y up.
    pub fn to_ndc(pixel: Vec2, viewport: Vec2) -> Vec2 {
        Vec2::new(pixel.x / viewport.x * 2.0 - 1.0, -(pixel.y / viewport.y) * 2.0 + 1.0)
    }

    /// Unit direction of the ray through `ndc`.
    pub fn ray_direction(&self, ndc: Vec2) -> Vec3 {
        let half_height = (self.fov_degrees.to_radians() / 2.0).tan();
        let half_width = half_height * self.aspect;

        Vec3::new(ndc.x * half_width, ndc.y * half_height, -1.0).normalize()
    }

    /// Whether the ray through `pixel` hits a sphere of `radius` at the origin
    /// within the camera's clip range.
    pub fn hits_sphere(&self, pixel: Vec2, viewport: Vec2, radius: f32) -> bool {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return false;
        }

        let origin = self.position();
        let direction = self.ray_direction(Self::to_ndc(pixel, viewport));

        let b = origin.dot(direction);
        let c = origin.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return false;
        }

        let root = discriminant.sqrt();
        let near_hit = -b - root;
        let far_hit = -b + root;
        let t = if near_hit >= self.near { near_hit } else { far_hit };

        t >= self.near && t <= self.far
    }
}
