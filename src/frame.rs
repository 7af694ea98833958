//! Per-tick output for the rendering collaborator.
//!
//! Each tick the experience fills one [`Frame`]: a flat list of
//! (transform, asset) pairs plus a single camera pose. Renderers own all
//! lighting, shading, and post effects; the core never talks to a GPU.
//!
//! The frame's instance buffer is reused across ticks (cleared, not
//! reallocated), keeping the per-tick path allocation-free once warm.

use glam::{Mat4, Quat, Vec3, Vec4};

/// What an instance should be drawn as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Asset {
    /// An ornament bauble (instanced sphere/sprite).
    Ornament,
    /// The photo at this index in the photo collection.
    Photo { index: usize },
}

/// One drawable: a world transform, an RGBA color (alpha carries
/// opacity), and the asset to draw.
#[derive(Clone, Copy, Debug)]
pub struct Instance {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub color: Vec4,
    pub asset: Asset,
}

impl Instance {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3, color: Vec4, asset: Asset) -> Self {
        Self {
            position,
            rotation,
            scale,
            color,
            asset,
        }
    }

    /// World matrix for this instance.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Camera pose for one tick.
#[derive(Clone, Copy, Debug)]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
}

impl CameraPose {
    /// Right-handed view matrix for this pose.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 25.0),
            look_at: Vec3::ZERO,
        }
    }
}

/// Everything a renderer needs for one tick.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub instances: Vec<Instance>,
    pub camera: CameraPose,
    /// Elapsed experience time at this tick, for time-driven shading.
    pub elapsed: f32,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all instances but keep the allocation.
    pub fn clear(&mut self) {
        self.instances.clear();
    }
}
