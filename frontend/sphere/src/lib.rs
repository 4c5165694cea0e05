//! # Sphere
//!
//! Render state for the glowing sphere on the landing page.
//!
//! The page owns the WebGL scene graph, bloom pass and orbit controls. This crate owns
//! what changes over time: pointer flags, auto-rotation and the glow/colour values.
//!
//! ## Loop
//! - [`RenderContext::setup`] gives the scene graph its materials, lights, bloom and orbit settings
//! - Browser listeners turn mouse/touch events into [`PointerEvent`]s for [`RenderContext::handle`]
//! - Each animation frame calls [`RenderContext::tick`] and copies the [`Frame`] onto the scene
//! - Window resizes go through [`RenderContext::resize`]
//!
//! ## Behaviour
//! - Pressing or touching stops auto-rotation until release
//! - Pointer over the sphere brightens the emissive glow, inner light and bloom
//! - Colours pulse on three slow sines regardless of interaction
pub mod camera;
pub mod config;
pub mod context;
pub mod glow;
pub mod input;

pub use config::SceneConfig;
pub use context::{Frame, RenderContext, SceneSetup};
pub use input::PointerEvent;
