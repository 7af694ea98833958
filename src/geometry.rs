//! Layout generators for the two particle arrangements.
//!
//! Two placement functions drive the whole choreography: a deterministic
//! spiral-cone layout for the gathered tree, and a uniform-volume sphere
//! sample for the scattered cloud. Both are pure; `scatter_position` takes
//! its RNG from the caller so a seeded [`SmallRng`](rand::rngs::SmallRng)
//! makes it reproducible in tests.
//!
//! # Example
//!
//! ```ignore
//! use garland::geometry::{tree_position, scatter_position};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let base = tree_position(0, 350, 20.0, 7.0);    // wide, at the bottom
//! let apex = tree_position(349, 350, 20.0, 7.0);  // narrow, near the top
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let cloud_point = scatter_position(&mut rng, 25.0);
//! ```

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Angular advance per index along the tree spiral, in radians.
///
/// A constant step (rather than a randomized angle) is what makes the
/// gather animation read as particles settling into assigned seats.
pub const SPIRAL_STEP: f32 = 0.5;

/// Position of particle `index` of `total` on a spiral cone.
///
/// `index / total` maps linearly onto the vertical span
/// `[-height / 2, +height / 2]`; the radius tapers linearly from `radius`
/// at the base to zero at the apex; the angle advances by [`SPIRAL_STEP`]
/// per index, producing a rising spiral.
///
/// Deterministic and repeatable: the same `(index, total, height, radius)`
/// always yields the same point. `total == 0` is defined as the origin so
/// the function stays total; callers with empty collections skip layout
/// entirely.
pub fn tree_position(index: u32, total: u32, height: f32, radius: f32) -> Vec3 {
    if total == 0 {
        return Vec3::ZERO;
    }

    let y = (index as f32 / total as f32) * height - height / 2.0;
    let progress = (y + height / 2.0) / height;
    let r = radius * (1.0 - progress);
    let angle = index as f32 * SPIRAL_STEP;

    Vec3::new(angle.cos() * r, y, angle.sin() * r)
}

/// Random point inside a solid sphere of the given radius, centered at
/// the origin.
///
/// Uniform throughout the volume: polar angle via `acos(2v - 1)`, radial
/// distance via cube root. Linear radius sampling would pile points near
/// the center.
///
/// Every call draws a fresh sample; a particle's scatter target must be
/// drawn once at creation and then held, or the cloud never settles.
pub fn scatter_position<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen_range(0.0..TAU);
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    let r = radius * rng.gen::<f32>().cbrt();

    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Pick a random color from a palette.
///
/// Returns black for an empty palette rather than panicking.
pub fn random_palette_color<R: Rng + ?Sized>(rng: &mut R, palette: &[Vec3]) -> Vec3 {
    if palette.is_empty() {
        return Vec3::ZERO;
    }
    palette[rng.gen_range(0..palette.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn tree_y_spans_height() {
        let height = 20.0;
        for i in 0..350 {
            let p = tree_position(i, 350, height, 7.0);
            assert!(p.y >= -height / 2.0 && p.y <= height / 2.0);
        }
    }

    #[test]
    fn tree_radius_tapers_to_apex() {
        let mut last_r = f32::INFINITY;
        for i in 0..350 {
            let p = tree_position(i, 350, 20.0, 7.0);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r < last_r, "radius must strictly decrease up the cone");
            last_r = r;
        }
    }

    #[test]
    fn tree_endpoints_match_cone() {
        // 350 particles, height 20, radius 7: index 0 sits at the wide
        // base, index 349 just below the apex.
        let base = tree_position(0, 350, 20.0, 7.0);
        assert!((base.y - (-10.0)).abs() < 1e-5);
        let base_r = (base.x * base.x + base.z * base.z).sqrt();
        assert!((base_r - 7.0).abs() < 1e-5);

        let top = tree_position(349, 350, 20.0, 7.0);
        assert!((top.y - 10.0).abs() < 0.1);
        let top_r = (top.x * top.x + top.z * top.z).sqrt();
        assert!(top_r < 0.05);
    }

    #[test]
    fn tree_is_deterministic() {
        assert_eq!(
            tree_position(42, 350, 20.0, 7.0),
            tree_position(42, 350, 20.0, 7.0)
        );
    }

    #[test]
    fn tree_empty_collection_is_origin() {
        assert_eq!(tree_position(0, 0, 20.0, 7.0), Vec3::ZERO);
    }

    #[test]
    fn scatter_stays_inside_radius() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1000 {
            let p = scatter_position(&mut rng, 25.0);
            assert!(p.length() <= 25.0 + 1e-3);
        }
    }

    #[test]
    fn scatter_density_is_volumetric() {
        // Uniform volume density puts ~1/8 of samples inside half the
        // radius. Naive linear radius sampling would put ~1/2 there.
        let mut rng = SmallRng::seed_from_u64(2);
        let n = 20_000;
        let inside = (0..n)
            .filter(|_| scatter_position(&mut rng, 10.0).length() < 5.0)
            .count();
        let fraction = inside as f32 / n as f32;
        assert!(
            (fraction - 0.125).abs() < 0.02,
            "fraction inside r/2 was {fraction}, expected ~0.125"
        );
    }

    #[test]
    fn palette_pick_handles_empty() {
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(random_palette_color(&mut rng, &[]), Vec3::ZERO);

        let palette = [Vec3::X, Vec3::Y];
        for _ in 0..20 {
            let c = random_palette_color(&mut rng, &palette);
            assert!(c == Vec3::X || c == Vec3::Y);
        }
    }
}
