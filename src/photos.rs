//! The photo cloud: an append-only collection of framed photos that
//! shares the ornaments' layout mathematics.
//!
//! Photos differ from ornaments in three ways: the collection grows at
//! runtime (uploads append, nothing deletes), orientation and scale have
//! their own per-mode targets (blended with slerp/lerp at the same rate
//! as position), and exactly one photo can be *focused* - pulled up to a
//! fixed near-camera point while the rest dim.
//!
//! A photo's tree seat is frozen at append time using the collection size
//! at that moment. Recomputing seats on every append would reshuffle the
//! whole spiral each upload; freezing trades a slightly denser spiral for
//! photos that never jump once placed.

use glam::{Quat, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::frame::{Asset, Instance};
use crate::geometry::{scatter_position, tree_position};
use crate::mode::Mode;

/// Layout and motion parameters for the photo cloud.
#[derive(Clone, Debug)]
pub struct PhotoLayout {
    /// Vertical span of the photo spiral (slightly shorter than the
    /// ornament cone so photos sit inside the silhouette).
    pub tree_height: f32,
    /// Base radius of the photo spiral.
    pub tree_radius: f32,
    /// Radius of the photo scatter sphere.
    pub scatter_radius: f32,
    /// Per-tick smoothing factor for position, scale, and orientation.
    pub lerp: f32,
    /// Where the focused photo parks, just in front of the camera.
    pub focus_point: Vec3,
    /// Scale of the focused photo.
    pub focus_scale: f32,
    /// Scale of every non-focused photo.
    pub base_scale: f32,
    /// Opacity of non-focused photos while one is in focus.
    pub dimmed_opacity: f32,
    /// Vertical float amplitude per tick while dispersed.
    pub bob_amplitude: f32,
}

impl Default for PhotoLayout {
    fn default() -> Self {
        Self {
            tree_height: 18.0,
            tree_radius: 7.5,
            scatter_radius: 20.0,
            lerp: 0.05,
            focus_point: Vec3::new(0.0, 0.0, 5.0),
            focus_scale: 4.0,
            base_scale: 1.5,
            dimmed_opacity: 0.3,
            bob_amplitude: 0.01,
        }
    }
}

/// One photo in the cloud.
#[derive(Clone, Debug)]
pub struct PhotoParticle {
    /// Opaque reference handle (URL, path, upload id). The core never
    /// fetches or decodes it.
    reference: String,
    /// Spiral seat, frozen with the collection size at append time.
    tree_target: Vec3,
    /// Scatter point, drawn once at append time.
    scatter_target: Vec3,
    position: Vec3,
    rotation: Quat,
    scale: f32,
    opacity: f32,
}

impl PhotoParticle {
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn tree_target(&self) -> Vec3 {
        self.tree_target
    }

    pub fn scatter_target(&self) -> Vec3 {
        self.scatter_target
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// Insertion-ordered, append-only photo collection.
#[derive(Clone, Debug)]
pub struct PhotoCloud {
    layout: PhotoLayout,
    particles: Vec<PhotoParticle>,
    /// Which photo PhotoView pulls forward. An explicit selection, not
    /// index arithmetic; defaults to the first photo appended.
    focused: Option<usize>,
    rng: SmallRng,
}

impl PhotoCloud {
    /// Empty cloud, randomness seeded from the system.
    pub fn new(layout: PhotoLayout) -> Self {
        Self::seeded(layout, rand::thread_rng().gen())
    }

    /// Empty cloud with a fixed seed (reproducible scatter targets).
    pub fn seeded(layout: PhotoLayout, seed: u64) -> Self {
        Self {
            layout,
            particles: Vec::new(),
            focused: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn layout(&self) -> &PhotoLayout {
        &self.layout
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhotoParticle> {
        self.particles.iter()
    }

    /// The currently selected photo, if any.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Select which photo PhotoView pulls forward.
    ///
    /// An out-of-range index leaves the selection unchanged.
    pub fn set_focus(&mut self, index: Option<usize>) {
        match index {
            Some(i) if i >= self.particles.len() => {}
            other => self.focused = other,
        }
    }

    /// Append a photo. It becomes an animated particle immediately.
    ///
    /// The new particle's spiral seat is computed with `total = len + 1`
    /// - the collection size including itself - and then frozen; seats of
    /// existing photos do not move. The first photo appended becomes the
    /// default focus.
    pub fn push(&mut self, reference: impl Into<String>) {
        let index = self.particles.len() as u32;
        let total = index + 1;
        let tree_target = tree_position(
            index,
            total,
            self.layout.tree_height,
            self.layout.tree_radius,
        );

        self.particles.push(PhotoParticle {
            reference: reference.into(),
            tree_target,
            scatter_target: scatter_position(&mut self.rng, self.layout.scatter_radius),
            position: tree_target,
            rotation: outward_orientation(tree_target),
            scale: self.layout.base_scale,
            opacity: 1.0,
        });

        if self.focused.is_none() {
            self.focused = Some(0);
        }
    }

    /// Advance every photo one tick toward the mode's layout.
    pub fn update(&mut self, mode: Mode, elapsed: f32) {
        let alpha = self.layout.lerp;
        let scatter_spin = Quat::from_euler(
            glam::EulerRot::XYZ,
            elapsed * 0.1,
            elapsed * 0.05,
            0.0,
        );

        for (i, particle) in self.particles.iter_mut().enumerate() {
            let focused = mode == Mode::PhotoView && self.focused == Some(i);

            let (target, target_scale, target_rotation, opacity) = match mode {
                Mode::Tree => (
                    particle.tree_target,
                    self.layout.base_scale,
                    outward_orientation(particle.position),
                    1.0,
                ),
                Mode::Scattered => (
                    particle.scatter_target,
                    self.layout.base_scale,
                    scatter_spin,
                    1.0,
                ),
                Mode::PhotoView if focused => (
                    self.layout.focus_point,
                    self.layout.focus_scale,
                    // Face the camera squarely.
                    Quat::IDENTITY,
                    1.0,
                ),
                Mode::PhotoView => (
                    particle.scatter_target,
                    self.layout.base_scale,
                    outward_orientation(particle.position),
                    self.layout.dimmed_opacity,
                ),
            };

            particle.position = particle.position.lerp(target, alpha);
            if mode != Mode::Tree && !focused {
                particle.position.y += (elapsed + i as f32).sin() * self.layout.bob_amplitude;
            }

            particle.scale += (target_scale - particle.scale) * alpha;
            // Linear blending of rotations takes unnatural paths; slerp
            // keeps the turn on the great arc.
            particle.rotation = particle.rotation.slerp(target_rotation, alpha);
            particle.opacity = opacity;
        }
    }

    /// Append one render instance per photo.
    pub fn emit(&self, out: &mut Vec<Instance>) {
        for (index, particle) in self.particles.iter().enumerate() {
            out.push(Instance::new(
                particle.position,
                particle.rotation,
                // Photos are flat quads; depth stays unit.
                Vec3::new(particle.scale, particle.scale, 1.0),
                Vec3::ONE.extend(particle.opacity),
                Asset::Photo { index },
            ));
        }
    }
}

/// Orientation that faces a tree-mounted photo away from the trunk:
/// look at the axis at the photo's own height, then flip.
fn outward_orientation(position: Vec3) -> Quat {
    Quat::from_rotation_y(position.x.atan2(position.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud_of(n: usize) -> PhotoCloud {
        let mut cloud = PhotoCloud::seeded(PhotoLayout::default(), 11);
        for i in 0..n {
            cloud.push(format!("photo-{i}"));
        }
        cloud
    }

    #[test]
    fn append_freezes_existing_seats() {
        let mut cloud = cloud_of(3);
        let seats: Vec<Vec3> = cloud.iter().map(|p| p.tree_target()).collect();

        cloud.push("photo-3");
        assert_eq!(cloud.len(), 4);

        // The three already-placed photos keep their seats; the new one is
        // laid out as the 4th of 4.
        for (p, seat) in cloud.iter().take(3).zip(&seats) {
            assert_eq!(p.tree_target(), *seat);
        }
        let expected = tree_position(3, 4, 18.0, 7.5);
        let last = cloud.iter().last().unwrap();
        assert_eq!(last.tree_target(), expected);
    }

    #[test]
    fn first_photo_becomes_default_focus() {
        let mut cloud = cloud_of(0);
        assert_eq!(cloud.focused(), None);
        cloud.push("a");
        assert_eq!(cloud.focused(), Some(0));
        cloud.push("b");
        assert_eq!(cloud.focused(), Some(0));
    }

    #[test]
    fn focus_selection_rejects_out_of_range() {
        let mut cloud = cloud_of(2);
        cloud.set_focus(Some(1));
        assert_eq!(cloud.focused(), Some(1));
        cloud.set_focus(Some(7));
        assert_eq!(cloud.focused(), Some(1));
        cloud.set_focus(None);
        assert_eq!(cloud.focused(), None);
    }

    #[test]
    fn focused_photo_pulls_forward_and_grows() {
        let mut cloud = cloud_of(3);
        for tick in 0..400 {
            cloud.update(Mode::PhotoView, tick as f32 / 60.0);
        }

        let focused = cloud.iter().next().unwrap();
        assert!((focused.position() - Vec3::new(0.0, 0.0, 5.0)).length() < 0.05);
        assert!((focused.scale() - 4.0).abs() < 0.05);
        assert!((focused.rotation().dot(Quat::IDENTITY).abs() - 1.0).abs() < 1e-3);
        assert!((focused.opacity() - 1.0).abs() < 1e-6);

        // The rest sit out in the cloud, dimmed.
        for p in cloud.iter().skip(1) {
            assert!((p.position() - p.scatter_target()).length() < 1.0);
            assert!((p.opacity() - 0.3).abs() < 1e-6);
        }
    }

    #[test]
    fn leaving_photo_view_restores_opacity() {
        let mut cloud = cloud_of(2);
        cloud.update(Mode::PhotoView, 0.0);
        assert!((cloud.iter().nth(1).unwrap().opacity() - 0.3).abs() < 1e-6);

        cloud.update(Mode::Scattered, 0.1);
        assert!((cloud.iter().nth(1).unwrap().opacity() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn tree_mode_faces_photos_outward() {
        let mut cloud = cloud_of(5);
        for _ in 0..400 {
            cloud.update(Mode::Tree, 0.0);
        }

        for p in cloud.iter() {
            let radial = Vec3::new(p.position().x, 0.0, p.position().z);
            if radial.length() < 1e-3 {
                continue; // apex photo has no meaningful outward direction
            }
            let normal = p.rotation() * Vec3::Z;
            let alignment = normal.dot(radial.normalize());
            assert!(
                alignment > 0.99,
                "photo normal should point away from the trunk"
            );
        }
    }

    #[test]
    fn empty_cloud_update_is_a_no_op() {
        let mut cloud = cloud_of(0);
        cloud.update(Mode::PhotoView, 1.0);
        let mut out = Vec::new();
        cloud.emit(&mut out);
        assert!(out.is_empty());
    }
}
