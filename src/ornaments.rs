//! The ornament field: a fixed arena of instanced baubles.
//!
//! Every ornament carries two immutable layout targets - its assigned seat
//! on the tree spiral and a random point in the scatter sphere - plus the
//! mutable transform that eases between them. The arena is allocated once
//! at construction and mutated in place every tick; nothing here allocates
//! per frame.

use glam::{Quat, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::frame::{Asset, Instance};
use crate::geometry::{random_palette_color, scatter_position, tree_position};
use crate::mode::Mode;

/// Festive default palette: gold, metallic gold, red, dark green, white.
pub const PALETTE: [Vec3; 5] = [
    Vec3::new(1.0, 0.843, 0.0),
    Vec3::new(0.831, 0.686, 0.216),
    Vec3::new(0.667, 0.0, 0.0),
    Vec3::new(0.0, 0.267, 0.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Layout and motion parameters for the ornament field.
#[derive(Clone, Debug)]
pub struct OrnamentLayout {
    /// Number of ornaments; fixed for the lifetime of the field.
    pub count: u32,
    /// Vertical span of the tree cone.
    pub tree_height: f32,
    /// Base radius of the tree cone.
    pub tree_radius: f32,
    /// Radius of the scatter sphere.
    pub scatter_radius: f32,
    /// Per-tick smoothing factor toward the active target.
    pub lerp: f32,
    /// Vertical float amplitude per tick while dispersed.
    pub bob_amplitude: f32,
}

impl Default for OrnamentLayout {
    fn default() -> Self {
        Self {
            count: 350,
            tree_height: 20.0,
            tree_radius: 7.0,
            scatter_radius: 25.0,
            lerp: 0.05,
            bob_amplitude: 0.01,
        }
    }
}

/// One bauble.
#[derive(Clone, Debug)]
pub struct Ornament {
    /// Seat on the tree spiral. Never changes after creation.
    tree_target: Vec3,
    /// Point in the scatter sphere. Drawn once; never re-rolled.
    scatter_target: Vec3,
    /// Rendered position, eased every tick.
    position: Vec3,
    /// Accumulated self-rotation (X and Y axes).
    spin: f32,
    /// Rotation advance per tick, fixed at creation.
    rotation_speed: f32,
    scale: f32,
    color: Vec3,
}

impl Ornament {
    /// Current rendered position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Tree-layout target.
    pub fn tree_target(&self) -> Vec3 {
        self.tree_target
    }

    /// Scatter-layout target.
    pub fn scatter_target(&self) -> Vec3 {
        self.scatter_target
    }
}

/// The full ornament arena.
#[derive(Clone, Debug)]
pub struct Ornaments {
    layout: OrnamentLayout,
    particles: Vec<Ornament>,
}

impl Ornaments {
    /// Build the arena, seeding randomness from the system.
    pub fn new(layout: OrnamentLayout) -> Self {
        Self::seeded(layout, rand::thread_rng().gen())
    }

    /// Build the arena from a fixed seed (reproducible scatter layout).
    pub fn seeded(layout: OrnamentLayout, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let particles = (0..layout.count)
            .map(|i| {
                let tree_target =
                    tree_position(i, layout.count, layout.tree_height, layout.tree_radius);
                Ornament {
                    tree_target,
                    scatter_target: scatter_position(&mut rng, layout.scatter_radius),
                    // Gathered at first: start seated on the tree.
                    position: tree_target,
                    spin: 0.0,
                    rotation_speed: rng.gen_range(0.0..0.02),
                    scale: rng.gen_range(0.1..0.4),
                    color: random_palette_color(&mut rng, &PALETTE),
                }
            })
            .collect();

        Self { layout, particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn layout(&self) -> &OrnamentLayout {
        &self.layout
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ornament> {
        self.particles.iter()
    }

    /// Advance every ornament one tick toward the mode's layout.
    ///
    /// Each ornament eases toward its tree seat in `Tree` mode and toward
    /// its scatter point otherwise (`PhotoView` keeps ornaments dispersed).
    /// While dispersed, a per-particle phase-shifted bob keeps the cloud
    /// alive without synchronized motion.
    pub fn update(&mut self, mode: Mode, elapsed: f32) {
        let alpha = self.layout.lerp;
        let amplitude = self.layout.bob_amplitude;

        for (i, particle) in self.particles.iter_mut().enumerate() {
            let target = match mode {
                Mode::Tree => particle.tree_target,
                Mode::Scattered | Mode::PhotoView => particle.scatter_target,
            };

            particle.position = particle.position.lerp(target, alpha);

            if mode != Mode::Tree {
                particle.position.y += (elapsed + i as f32).sin() * amplitude;
            }

            particle.spin += particle.rotation_speed;
        }
    }

    /// Append one render instance per ornament.
    pub fn emit(&self, out: &mut Vec<Instance>) {
        for particle in &self.particles {
            let rotation = Quat::from_euler(glam::EulerRot::XYZ, particle.spin, particle.spin, 0.0);
            out.push(Instance::new(
                particle.position,
                rotation,
                Vec3::splat(particle.scale),
                particle.color.extend(1.0),
                Asset::Ornament,
            ));
        }
    }
}
