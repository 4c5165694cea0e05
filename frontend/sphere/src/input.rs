/// Pointer events the sphere reacts to, in CSS pixels relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Mouse button pressed over the container. Starts a drag.
    MouseDown,
    /// Mouse button released. Ends a drag.
    MouseUp,
    /// Pointer left the container. Ends a drag like `MouseUp`.
    MouseLeave,
    /// Cursor moved to (x, y).
    MouseMove { x: f32, y: f32 },
    /// First touch point at (x, y), `touches` fingers down. Starts a drag.
    TouchStart { x: f32, y: f32, touches: u32 },
    /// Last finger lifted. Ends a drag.
    TouchEnd,
    /// First touch point moved to (x, y), `touches` fingers down.
    TouchMove { x: f32, y: f32, touches: u32 },
}

impl PointerEvent {
    /// Position to hover-test, if this event carries one.
    /// Multi-touch gestures never change hover.
    pub fn hover_point(&self) -> Option<(f32, f32)> {
        match *self {
            PointerEvent::MouseMove { x, y } => Some((x, y)),
            PointerEvent::TouchStart { x, y, touches: 1 } | PointerEvent::TouchMove { x, y, touches: 1 } => {
                Some((x, y))
            }
            _ => None,
        }
    }
}
