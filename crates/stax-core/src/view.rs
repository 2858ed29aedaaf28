use glam::Vec2;

/// World-to-screen fit: the fixed-size game world is uniformly scaled and
/// centered in the host window. Pointer input arrives in client
/// coordinates and must be mapped through the inverse before any drag
/// math sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Vec2,
}

impl Viewport {
    /// No scaling; world equals screen.
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }

    /// Fit `world` into `screen`, preserving aspect, centered.
    pub fn fit(screen_w: f32, screen_h: f32, world_w: f32, world_h: f32) -> Self {
        let mut scale = (screen_w / world_w).min(screen_h / world_h);
        if !(scale > 0.0) || !scale.is_finite() {
            scale = 1.0;
        }
        Self {
            scale,
            offset: Vec2::new(
                (screen_w - world_w * scale) * 0.5,
                (screen_h - world_h * scale) * 0.5,
            ),
        }
    }

    /// Map a client-space point into world space.
    pub fn to_world(&self, point: Vec2) -> Vec2 {
        (point - self.offset) / self.scale
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity()
    }
}
